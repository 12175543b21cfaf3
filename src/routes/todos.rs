use crate::{
    auth::AuthenticatedUser, error::AppError, models::TodoForm, store::TodoStore,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;

/// Lists every todo text in insertion order.
///
/// ## Responses:
/// - `200 OK`: JSON array of strings, empty when there are no todos.
/// - `401 Unauthorized`: missing or invalid access token.
#[get("")]
pub async fn list_todos(store: web::Data<dyn TodoStore>) -> Result<impl Responder, AppError> {
    let texts: Vec<String> = store
        .list()
        .await?
        .into_iter()
        .map(|todo| todo.text)
        .collect();

    Ok(HttpResponse::Ok().json(texts))
}

/// Appends a todo taken from the `todo` form field.
///
/// ## Responses:
/// - `200 OK`: `{"msg": "Todo added successfully", "id": <id>}`.
/// - `400 Bad Request`: the `todo` field is missing or longer than 200 characters.
/// - `401 Unauthorized`: missing or invalid access token.
#[post("")]
pub async fn add_todo(
    store: web::Data<dyn TodoStore>,
    user: AuthenticatedUser,
    form: web::Form<TodoForm>,
) -> Result<impl Responder, AppError> {
    let text = form.into_inner().into_text()?;
    let todo = store.add(&text).await?;
    log::info!("{} added todo {}", user.0, todo.id);

    Ok(HttpResponse::Ok().json(json!({
        "msg": "Todo added successfully",
        "id": todo.id
    })))
}

/// Deletes the todo with the given id.
///
/// ## Responses:
/// - `200 OK`: `{"msg": "Todo deleted successfully"}`.
/// - `401 Unauthorized`: missing or invalid access token.
/// - `404 Not Found`: no todo has that id.
#[delete("/{id}")]
pub async fn delete_todo(
    store: web::Data<dyn TodoStore>,
    user: AuthenticatedUser,
    todo_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = todo_id.into_inner();
    store.delete(id).await?;
    log::info!("{} deleted todo {}", user.0, id);

    Ok(HttpResponse::Ok().json(json!({ "msg": "Todo deleted successfully" })))
}
