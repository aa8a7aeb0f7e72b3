pub mod health;
pub mod lunch_week;

use axum::{
    routing::{get, post, put, MethodRouter},
    Router,
};

use crate::AppState;

fn lunch_week_collection() -> MethodRouter<AppState> {
    get(lunch_week::list_lunch_weeks).post(lunch_week::create_lunch_week)
}

/// All HTTP routes. The `/lunch-week` collection answers with or without a trailing slash.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/lunch-week", lunch_week_collection())
        .route("/lunch-week/", lunch_week_collection())
        .route(
            "/lunch-week/{lunch_week_id}",
            get(lunch_week::get_lunch_week)
                .put(lunch_week::update_lunch_week)
                .delete(lunch_week::delete_lunch_week),
        )
        .route(
            "/lunch-week/{lunch_week_id}/lunch-day",
            post(lunch_week::create_lunch_day),
        )
        .route(
            "/lunch-week/{lunch_week_id}/lunch-day/{lunch_day_id}",
            put(lunch_week::update_lunch_day),
        )
        .with_state(state)
}
