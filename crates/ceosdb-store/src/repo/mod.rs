//! Repository layer: catalog persistence, hydration and result storage

pub mod hydration;
pub mod results;
pub mod sqlite_repo;

pub use results::StoredResult;
pub use sqlite_repo::{CatalogTable, SqliteRepo};
