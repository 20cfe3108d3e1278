//! # Endpoints GET
//! src/endpoints/get.rs
//!
//! - `/`: Bienvenida en texto plano
//! - `/api/status`: Estado del servidor
//! - `/api/info`: Información del servidor y del request recibido
//! - `/api/users`: Lista de usuarios de ejemplo
//! - `/api/echo`: Devuelve los query params decodificados

use super::SERVER_NAME;
use crate::http::{Response, StatusCode};
use crate::router::RouteContext;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;

/// Usuario de ejemplo
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
}

/// Datos fijos que sirve `/api/users`
pub const SAMPLE_USERS: &[User] = &[
    User { id: 1, name: "Alice", email: "alice@example.com" },
    User { id: 2, name: "Bob", email: "bob@example.com" },
    User { id: 3, name: "Carol", email: "carol@example.com" },
];

/// Handler para `/`
pub fn index_handler(_ctx: &RouteContext) -> Response {
    let body = format!(
        "Welcome to {}!\n\n\
         GET  /api/status   server status\n\
         GET  /api/info     server and request info\n\
         GET  /api/users    sample users (?limit=N)\n\
         GET  /api/echo     echo query parameters\n\
         POST /api/users    create a user (JSON or form body)\n\
         POST /api/echo     echo the parsed body\n",
        SERVER_NAME
    );
    Response::text(StatusCode::OK, &body)
}

/// Handler para `/api/status`
///
/// # Ejemplo de response
/// ```json
/// {
///   "server": "raw-http-server",
///   "status": "Running",
///   "timestamp": "2024-01-01T12:00:00.000Z"
/// }
/// ```
pub fn status_handler(_ctx: &RouteContext) -> Response {
    let body = json!({
        "status": "Running",
        "server": SERVER_NAME,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    Response::json(StatusCode::OK, &body)
}

#[derive(Serialize)]
struct ServerInfo<'a> {
    name: &'static str,
    version: &'static str,
    protocol: &'static str,
    supported_methods: [&'static str; 2],
    request: RequestInfo<'a>,
}

#[derive(Serialize)]
struct RequestInfo<'a> {
    method: &'a str,
    path: &'a str,
    /// `null` si la request line no traía versión
    version: Option<&'a str>,
    header_count: usize,
}

/// Handler para `/api/info`
pub fn info_handler(ctx: &RouteContext) -> Response {
    let request = ctx.request;
    let info = ServerInfo {
        name: SERVER_NAME,
        version: env!("CARGO_PKG_VERSION"),
        protocol: "HTTP/1.1",
        supported_methods: ["GET", "POST"],
        request: RequestInfo {
            method: request.method().as_str(),
            path: request.path(),
            version: request.version(),
            header_count: request.headers().len(),
        },
    };

    Response::json(StatusCode::OK, &info)
}

/// Handler para `/api/users?limit=N`
///
/// # Query parameters
/// - `limit`: Máximo de usuarios a retornar (opcional)
pub fn list_users_handler(ctx: &RouteContext) -> Response {
    let limit = match ctx.query.get("limit") {
        None => SAMPLE_USERS.len(),
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                return Response::text(
                    StatusCode::BAD_REQUEST,
                    "Bad Request - Parameter 'limit' must be a non-negative integer",
                );
            }
        },
    };

    let users: Vec<&User> = SAMPLE_USERS.iter().take(limit).collect();
    let body = json!({
        "count": users.len(),
        "users": users,
    });
    Response::json(StatusCode::OK, &body)
}

/// Handler para `/api/echo`
pub fn echo_handler(ctx: &RouteContext) -> Response {
    Response::json(StatusCode::OK, &json!({ "query": ctx.query.to_json() }))
}
