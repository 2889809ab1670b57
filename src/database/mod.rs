pub mod manager;
pub mod models;
pub mod unit_store;

pub use manager::{DatabaseError, DatabaseManager};
pub use unit_store::PgUnitStore;
