// Database layer module

pub mod pool;
pub mod repositories;
pub mod store;

pub use pool::DbPool;
pub use store::{PgScheduleStore, ScheduleStore};
