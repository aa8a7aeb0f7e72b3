pub mod lunch;
pub mod memory;

pub use lunch::{LunchStore, PgLunchStore};
pub use memory::MemoryLunchStore;
