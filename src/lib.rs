#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Storage backends, authentication, routing and error handling for the todo API."]
#![doc = "The binary (`main.rs`) only reads configuration and starts the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
pub use crate::routes::AppState;
