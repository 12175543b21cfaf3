use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

/// Longest todo text the `todos.text` column accepts.
pub const MAX_TODO_LENGTH: u64 = 200;

/// A todo item as stored by either backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Zero-based identifier, one past the highest id in the store at insert time.
    pub id: i64,
    /// The todo text.
    pub text: String,
}

/// Form payload for `POST /todos`.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoForm {
    #[validate(length(max = 200, message = "Todo must be at most 200 characters"))]
    pub todo: Option<String>,
}

impl TodoForm {
    /// Returns the todo text once it is known to be present and short enough.
    pub fn into_text(self) -> Result<String, AppError> {
        self.validate()?;
        self.todo
            .ok_or_else(|| AppError::ValidationError("Missing todo parameter".into()))
    }
}
