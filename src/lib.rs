pub mod admin;
pub mod auth;
pub mod config;
pub mod date;
pub mod error;
pub mod http;
pub mod ingredients;
pub mod meals;
pub mod query;
pub mod state;

pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http::ApiClient;
pub use state::AppState;
