//! Machine-readable description of the HTTP API.
//!
//! Kept as a standalone OpenAPI 3 document instead of annotations on the
//! handlers; update it alongside any route change.

use actix_web::{get, HttpResponse, Responder};
use serde_json::{json, Value};

use crate::models::todo::MAX_TODO_LENGTH;

#[get("/apispec.json")]
pub async fn apispec() -> impl Responder {
    HttpResponse::Ok().json(openapi_document())
}

pub fn openapi_document() -> Value {
    let message = json!({
        "type": "object",
        "properties": { "msg": { "type": "string" } }
    });
    let token_pair = json!({
        "type": "object",
        "properties": {
            "access_token": { "type": "string" },
            "refresh_token": { "type": "string" }
        }
    });
    let credentials = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "required": ["username", "password"],
                    "properties": {
                        "username": { "type": "string", "maxLength": 80 },
                        "password": { "type": "string" }
                    }
                }
            }
        }
    });
    let error = |description: &str| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Message" } } }
        })
    };
    let ok = |description: &str, schema: &str| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": { "$ref": format!("#/components/schemas/{}", schema) } } }
        })
    };

    let bearer = json!([{ "bearerAuth": [] }]);
    let unauthorized = error("Missing or invalid access token");

    let list_todos = json!({
        "summary": "Get all todos",
        "description": "Returns all todo texts in insertion order",
        "security": bearer.clone(),
        "responses": {
            "200": {
                "description": "Returns all todos",
                "content": { "application/json": { "schema": {
                    "type": "array", "items": { "type": "string" }
                } } }
            },
            "401": unauthorized.clone()
        }
    });

    let todo_form = json!({
        "type": "object",
        "required": ["todo"],
        "properties": {
            "todo": { "type": "string", "maxLength": MAX_TODO_LENGTH }
        }
    });
    let add_todo = json!({
        "summary": "Add a new todo",
        "security": bearer.clone(),
        "requestBody": {
            "required": true,
            "content": { "application/x-www-form-urlencoded": { "schema": todo_form } }
        },
        "responses": {
            "200": {
                "description": "Adds a new todo to the list",
                "content": { "application/json": { "schema": {
                    "type": "object",
                    "properties": {
                        "msg": { "type": "string" },
                        "id": { "type": "integer" }
                    }
                } } }
            },
            "400": error("Missing or too long todo parameter"),
            "401": unauthorized.clone()
        }
    });

    let delete_todo = json!({
        "summary": "Delete a todo",
        "security": bearer.clone(),
        "parameters": [{
            "name": "todo_id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer" }
        }],
        "responses": {
            "200": ok("Deletes a todo from the list", "Message"),
            "401": unauthorized,
            "404": error("No todo with that id")
        }
    });

    let signup = json!({
        "summary": "Sign up for the application",
        "description": "Provides a JSON web token pair after successful sign up",
        "requestBody": credentials.clone(),
        "responses": {
            "201": ok("A JSON web token pair", "TokenPair"),
            "400": error("Missing JSON in request or username already exists")
        }
    });

    let login = json!({
        "summary": "Login to the application",
        "description": "Provides a JSON web token pair after successful login",
        "requestBody": credentials,
        "responses": {
            "200": ok("A JSON web token pair", "TokenPair"),
            "400": error("Missing JSON in request or missing parameter"),
            "401": error("Invalid username or password")
        }
    });

    let refresh = json!({
        "summary": "Get a new access token",
        "description": "Send the refresh token as a bearer token",
        "security": bearer,
        "responses": {
            "200": {
                "description": "A new access token",
                "content": { "application/json": { "schema": {
                    "type": "object",
                    "properties": { "access_token": { "type": "string" } }
                } } }
            },
            "401": error("Missing or invalid refresh token")
        }
    });

    let health = json!({
        "summary": "Health check",
        "responses": { "200": { "description": "Service is up" } }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": env!("CARGO_PKG_NAME"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/todos": { "get": list_todos, "post": add_todo },
            "/todos/{todo_id}": { "delete": delete_todo },
            "/signup": { "post": signup },
            "/login": { "post": login },
            "/refresh": { "post": refresh },
            "/health": { "get": health }
        },
        "components": {
            "schemas": {
                "Message": message,
                "TokenPair": token_pair
            },
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
            }
        }
    })
}
