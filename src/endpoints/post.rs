//! # Endpoints POST
//! src/endpoints/post.rs
//!
//! Los dos handlers reciben el body ya interpretado por el router
//! (JSON, formulario o texto envuelto en `{"data": ...}`).

use crate::http::{Response, StatusCode};
use crate::router::RouteContext;
use serde_json::{json, Value};

/// Handler para POST `/api/users`
///
/// Responde 201 con el usuario tal como llegó.
///
/// # Ejemplo de response
/// ```json
/// {
///   "message": "User created",
///   "user": {
///     "name": "John"
///   }
/// }
/// ```
pub fn create_user_handler(ctx: &RouteContext) -> Response {
    let user = ctx.body.clone().unwrap_or(Value::Null);
    let body = json!({
        "message": "User created",
        "user": user,
    });
    Response::json(StatusCode::CREATED, &body)
}

/// Handler para POST `/api/echo`
pub fn echo_handler(ctx: &RouteContext) -> Response {
    let body = json!({
        "content_type": ctx.request.content_type(),
        "received": ctx.body.clone().unwrap_or(Value::Null),
    });
    Response::json(StatusCode::OK, &body)
}
