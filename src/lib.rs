// Library exports for binary tools and tests
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use services::LunchStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LunchStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn LunchStore>) -> Self {
        Self { store }
    }
}
