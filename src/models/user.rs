use sqlx::FromRow;

/// A registered account. Never serialized: the hash stays on the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}
