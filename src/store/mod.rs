//! Storage abstraction for users and todos.
//!
//! Handlers only ever see `dyn TodoStore` / `dyn UserStore`, so the server can run
//! on SQLite or entirely in memory without any route knowing the difference.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Todo, User};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos in insertion order.
    async fn list(&self) -> Result<Vec<Todo>, AppError>;

    /// Appends a todo and returns it with its assigned id.
    async fn add(&self, text: &str) -> Result<Todo, AppError>;

    /// Removes the todo with `id`, or fails with `AppError::NotFound`.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Inserts a user. A taken username fails with `AppError::Conflict` and
    /// leaves the store untouched.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, AppError>;
}

pub(crate) fn todo_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Todo {} not found", id))
}

pub(crate) fn username_taken() -> AppError {
    AppError::Conflict("Username already exists".into())
}
