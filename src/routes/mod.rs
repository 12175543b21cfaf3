pub mod auth;
pub mod docs;
pub mod health;
pub mod todos;

use std::sync::Arc;

use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::web;

use crate::auth::{AuthMiddleware, AuthState};
use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::store::{MemoryStore, SqliteStore, TodoStore, UserStore};

/// Shared handles every worker's `App` is built from.
#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<dyn TodoStore>,
    pub users: Arc<dyn UserStore>,
    pub auth: Arc<AuthState>,
}

impl AppState {
    pub fn new(todos: Arc<dyn TodoStore>, users: Arc<dyn UserStore>, auth: AuthState) -> Self {
        Self {
            todos,
            users,
            auth: Arc::new(auth),
        }
    }

    /// Opens the configured storage backend.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let auth = AuthState::from_config(config);
        match config.storage_backend {
            StorageBackend::Sqlite => {
                let store = Arc::new(SqliteStore::connect(&config.database_url).await?);
                log::info!("using sqlite storage at {}", config.database_url);
                Ok(Self::new(store.clone(), store, auth))
            }
            StorageBackend::Memory => {
                let store = Arc::new(MemoryStore::new());
                log::info!("using in-memory storage");
                Ok(Self::new(store.clone(), store, auth))
            }
        }
    }

    /// Registers the shared data plus every route.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.todos.clone()))
            .app_data(web::Data::from(self.users.clone()))
            .app_data(web::Data::from(self.auth.clone()));
        config(cfg);
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(form_config())
        .service(health::health)
        .service(docs::apispec)
        .service(auth::signup)
        .service(auth::login)
        .service(auth::refresh)
        .service(
            web::scope("/todos")
                .wrap(AuthMiddleware)
                .service(todos::list_todos)
                .service(todos::add_todo)
                .service(todos::delete_todo),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let msg = match err {
            JsonPayloadError::ContentType => "Missing JSON in request".to_string(),
            other => format!("Invalid JSON in request: {}", other),
        };
        AppError::BadRequest(msg).into()
    })
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        let msg = match err {
            UrlencodedError::ContentType => "Missing form data in request".to_string(),
            other => format!("Invalid form data in request: {}", other),
        };
        AppError::BadRequest(msg).into()
    })
}
