// Service exports
pub mod catalog;
pub mod sessions;

pub use catalog::{load_catalog, load_engine, parse_catalog, CatalogError};
pub use sessions::{SessionError, SessionStore, SharedContext};
