// Library root for the baby names services

pub mod config;
pub mod db;
pub mod error;
pub mod frontend;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;

// Re-export commonly used types
pub use db::{Database, NameRepository};
pub use error::ApiError;
pub use models::{NameListResponse, NameRecord};
