use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{todo_not_found, username_taken, TodoStore, UserStore};
use crate::error::AppError;
use crate::models::{Todo, User};

/// Process-local store. Everything is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, AppError> {
        Ok(self.todos.read().await.clone())
    }

    async fn add(&self, text: &str) -> Result<Todo, AppError> {
        let mut todos = self.todos.write().await;
        // ids only grow, so the last entry holds the highest one
        let id = todos.last().map_or(0, |todo| todo.id + 1);
        let todo = Todo {
            id,
            text: text.to_string(),
        };
        todos.push(todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut todos = self.todos.write().await;
        let index = todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or_else(|| todo_not_found(id))?;
        todos.remove(index);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|user| user.username == username) {
            return Err(username_taken());
        }
        let user = User {
            id: users.len() as i64 + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|todo| todo.text.as_str()).collect()
    }

    #[actix_rt::test]
    async fn test_add_list_delete() {
        let store = MemoryStore::new();
        assert!(store.list().await.unwrap().is_empty());

        let first = store.add("buy milk").await.unwrap();
        let second = store.add("walk dog").await.unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert_eq!(texts(&store.list().await.unwrap()), vec!["buy milk", "walk dog"]);

        store.delete(first.id).await.unwrap();
        assert_eq!(texts(&store.list().await.unwrap()), vec!["walk dog"]);
    }

    #[actix_rt::test]
    async fn test_delete_unknown_id_leaves_others() {
        let store = MemoryStore::new();
        store.add("keep me").await.unwrap();

        assert!(matches!(store.delete(42).await, Err(AppError::NotFound(_))));
        assert_eq!(texts(&store.list().await.unwrap()), vec!["keep me"]);
    }

    #[actix_rt::test]
    async fn test_ids_follow_highest_remaining() {
        let store = MemoryStore::new();
        store.add("a").await.unwrap();
        let b = store.add("b").await.unwrap();
        store.add("c").await.unwrap();
        store.delete(b.id).await.unwrap();

        let d = store.add("d").await.unwrap();
        assert_eq!(d.id, 3);
        assert_eq!(texts(&store.list().await.unwrap()), vec!["a", "c", "d"]);
    }

    #[actix_rt::test]
    async fn test_duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        let alice = store.create("alice", "hash-1").await.unwrap();
        assert_eq!(alice.id, 1);

        assert!(matches!(
            store.create("alice", "hash-2").await,
            Err(AppError::Conflict(_))
        ));

        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "hash-1");
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }
}
