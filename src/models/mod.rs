pub mod todo;
pub mod user;

pub use todo::{Todo, TodoForm};
pub use user::User;
