//! # Endpoints de Ejemplo
//!
//! Handlers que el servidor registra por defecto. No tienen lógica de
//! protocolo: cada uno recibe un [`RouteContext`](crate::router::RouteContext)
//! y arma una `Response`.
//!
//! ## Rutas
//!
//! | Método | Path          | Status |
//! |--------|---------------|--------|
//! | GET    | `/`           | 200    |
//! | GET    | `/api/status` | 200    |
//! | GET    | `/api/info`   | 200    |
//! | GET    | `/api/users`  | 200    |
//! | GET    | `/api/echo`   | 200    |
//! | POST   | `/api/users`  | 201    |
//! | POST   | `/api/echo`   | 200    |

pub mod get;
pub mod post;

use crate::router::Router;

/// Nombre con el que el servidor se identifica en sus respuestas
pub const SERVER_NAME: &str = "raw-http-server";

/// Router con todos los endpoints por defecto
pub fn default_router() -> Router {
    let mut router = Router::new();
    register(&mut router);
    router
}

/// Registra los endpoints por defecto en un router existente
pub fn register(router: &mut Router) {
    router
        .get("/", get::index_handler)
        .get("/api/status", get::status_handler)
        .get("/api/info", get::info_handler)
        .get("/api/users", get::list_users_handler)
        .get("/api/echo", get::echo_handler)
        .post("/api/users", post::create_user_handler)
        .post("/api/echo", post::echo_handler);
}
