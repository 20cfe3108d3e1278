//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Registro explícito `(método, path exacto) → handler`.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router ─┬─ GET  → query string → handler  (o 404)
//!                   ├─ POST → parse body   → handler  (o 400 / 404)
//!                   └─ otro → 405
//! ```
//!
//! El registro se arma una sola vez al iniciar y después solo se lee, así
//! que se comparte entre threads con un `Arc` sin locks.
//!
//! El match de paths es siempre exacto: sin prefijos, sin wildcards y sin
//! normalizar el `/` final.

pub mod body;

use crate::http::{Method, QueryParams, Request, Response, StatusCode};
use serde_json::Value;

/// Body de la respuesta 400 cuando el body POST no se pudo interpretar
pub const INVALID_BODY_MESSAGE: &str = "Bad Request - Invalid request body format";

/// Body de la respuesta 400 cuando el request no se pudo leer como HTTP
pub const INVALID_HTTP_MESSAGE: &str = "Bad Request - Invalid HTTP format";

/// Tipo de función handler
pub type Handler = fn(&RouteContext<'_>) -> Response;

/// Lo que recibe un handler
#[derive(Debug)]
pub struct RouteContext<'a> {
    pub request: &'a Request,

    /// Query string decodificada (vacía si no había)
    pub query: QueryParams,

    /// Body interpretado según Content-Type (solo POST)
    pub body: Option<Value>,
}

/// Una entrada del registro
#[derive(Clone)]
pub struct Route {
    method: Method,
    path: String,
    handler: Handler,
}

impl Route {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Router que mapea `(método, path)` a handlers
#[derive(Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Crea un router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra una ruta con su handler
    ///
    /// Registrar dos veces el mismo `(método, path)` reemplaza el handler.
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::http::{Method, Response, StatusCode};
    /// use raw_http_server::router::{RouteContext, Router};
    ///
    /// fn hello(_ctx: &RouteContext) -> Response {
    ///     Response::text(StatusCode::OK, "hello")
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register(Method::Get, "/hello", hello);
    /// assert_eq!(router.known_paths(&Method::Get), vec!["/hello"]);
    /// ```
    pub fn register(&mut self, method: Method, path: &str, handler: Handler) {
        if let Some(route) = self
            .routes
            .iter_mut()
            .find(|route| route.method == method && route.path == path)
        {
            route.handler = handler;
            return;
        }

        self.routes.push(Route {
            method,
            path: path.to_string(),
            handler,
        });
    }

    /// Atajo para `register(Method::Get, ...)`
    pub fn get(&mut self, path: &str, handler: Handler) -> &mut Self {
        self.register(Method::Get, path, handler);
        self
    }

    /// Atajo para `register(Method::Post, ...)`
    pub fn post(&mut self, path: &str, handler: Handler) -> &mut Self {
        self.register(Method::Post, path, handler);
        self
    }

    /// Todas las rutas, en orden de registro
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Paths registrados para un método, en orden de registro
    pub fn known_paths(&self, method: &Method) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|route| &route.method == method)
            .map(|route| route.path.as_str())
            .collect()
    }

    /// Busca el handler de un `(método, path)` exacto
    pub fn find(&self, method: &Method, path: &str) -> Option<Handler> {
        self.routes
            .iter()
            .find(|route| &route.method == method && route.path == path)
            .map(|route| route.handler)
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Nunca falla: todo caso termina en una `Response` (404, 405, 400...).
    pub fn route(&self, request: &Request) -> Response {
        match request.method() {
            Method::Get => self.route_get(request),
            Method::Post => self.route_post(request),
            Method::Other(method) => Response::text(
                StatusCode::METHOD_NOT_ALLOWED,
                &format!("405 Method Not Allowed - Method '{}' not supported", method),
            ),
            // Request line vacía: no hay nada que enrutar
            Method::Unknown => Response::text(StatusCode::BAD_REQUEST, INVALID_HTTP_MESSAGE),
        }
    }

    /// GET: separa la query string y despacha por el path sin query
    fn route_get(&self, request: &Request) -> Response {
        let route_path = request.route_path();

        match self.find(&Method::Get, route_path) {
            Some(handler) => handler(&RouteContext {
                request,
                query: parse_query(request),
                body: None,
            }),
            None => self.not_found(&Method::Get, route_path),
        }
    }

    /// POST: interpreta el body y despacha por el path completo
    ///
    /// Un JSON inválido corta antes de buscar la ruta.
    fn route_post(&self, request: &Request) -> Response {
        let body = match body::parse_body(request) {
            Ok(body) => body,
            Err(_) => return Response::text(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE),
        };

        let path = request.path();

        match self.find(&Method::Post, path) {
            Some(handler) => handler(&RouteContext {
                request,
                query: parse_query(request),
                body: Some(body),
            }),
            None => self.not_found(&Method::Post, path),
        }
    }

    /// 404 con la lista de rutas conocidas para el método
    fn not_found(&self, method: &Method, path: &str) -> Response {
        let body = format!(
            "404 Not Found - Route '{}' not found. Available {} routes: {}",
            path,
            method,
            self.known_paths(method).join(", ")
        );
        Response::text(StatusCode::NOT_FOUND, &body)
    }
}

fn parse_query(request: &Request) -> QueryParams {
    request
        .query_string()
        .filter(|query| !query.is_empty())
        .map(QueryParams::parse)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok_handler(_ctx: &RouteContext) -> Response {
        Response::text(StatusCode::OK, "ok")
    }

    fn other_handler(_ctx: &RouteContext) -> Response {
        Response::text(StatusCode::OK, "other")
    }

    fn query_handler(ctx: &RouteContext) -> Response {
        Response::json(StatusCode::OK, &ctx.query.to_json())
    }

    fn body_handler(ctx: &RouteContext) -> Response {
        Response::json(StatusCode::CREATED, ctx.body.as_ref().unwrap_or(&Value::Null))
    }

    fn request(raw: &str) -> Request {
        Request::parse(raw.as_bytes()).unwrap()
    }

    fn test_router() -> Router {
        let mut router = Router::new();
        router
            .get("/", ok_handler)
            .get("/query", query_handler)
            .post("/items", body_handler);
        router
    }

    #[test]
    fn test_router_creation() {
        assert!(Router::new().routes().is_empty());
    }

    #[test]
    fn test_register_replaces_same_route() {
        let mut router = Router::new();
        router.get("/a", ok_handler);
        router.get("/a", other_handler);

        assert_eq!(router.routes().len(), 1);
        let response = router.route(&request("GET /a HTTP/1.1\r\n\r\n"));
        assert_eq!(response.body(), b"other");
    }

    #[test]
    fn test_same_path_different_methods() {
        let mut router = Router::new();
        router.get("/a", ok_handler).post("/a", other_handler);

        assert_eq!(router.routes().len(), 2);
        assert!(router.find(&Method::Get, "/a").is_some());
        assert!(router.find(&Method::Post, "/a").is_some());
    }

    #[test]
    fn test_known_paths_in_registration_order() {
        let router = test_router();
        assert_eq!(router.known_paths(&Method::Get), vec!["/", "/query"]);
        assert_eq!(router.known_paths(&Method::Post), vec!["/items"]);
    }

    #[test]
    fn test_get_found() {
        let response = test_router().route(&request("GET / HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_get_query_is_split_and_decoded() {
        let response = test_router().route(&request("GET /query?name=John%20Doe HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(value, json!({"name": "John Doe"}));
    }

    #[test]
    fn test_get_not_found_lists_routes() {
        let response = test_router().route(&request("GET /missing HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.body_text(),
            "404 Not Found - Route '/missing' not found. Available GET routes: /, /query"
        );
    }

    #[test]
    fn test_exact_match_only() {
        let router = test_router();

        for path in ["/query/", "/QUERY", "/quer", "//"] {
            let response = router.route(&request(&format!("GET {} HTTP/1.1\r\n\r\n", path)));
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {}", path);
        }
    }

    #[test]
    fn test_post_json() {
        let raw = "POST /items HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"id\":1}";
        let response = test_router().route(&request(raw));

        assert_eq!(response.status(), StatusCode::CREATED);
        let value: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(value, json!({"id": 1}));
    }

    #[test]
    fn test_post_invalid_json_short_circuits() {
        // Ni siquiera la ruta existe: el 400 llega antes del 404
        let raw = "POST /nowhere HTTP/1.1\r\nContent-Type: application/json\r\n\r\nnot-json";
        let response = test_router().route(&request(raw));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.body(), INVALID_BODY_MESSAGE.as_bytes());
    }

    #[test]
    fn test_post_not_found_lists_routes() {
        let response = test_router().route(&request("POST /missing HTTP/1.1\r\n\r\nx"));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.body_text().contains("Available POST routes: /items"));
    }

    #[test]
    fn test_post_matches_full_path() {
        let raw = "POST /items?x=1 HTTP/1.1\r\n\r\nhello";
        let response = test_router().route(&request(raw));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_method_not_allowed() {
        let response = test_router().route(&request("DELETE / HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.body_text(),
            "405 Method Not Allowed - Method 'DELETE' not supported"
        );
    }

    #[test]
    fn test_missing_method_is_bad_request() {
        let response = test_router().route(&request("\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.body(), INVALID_HTTP_MESSAGE.as_bytes());
    }

    #[test]
    fn test_two_token_request_line_still_routes() {
        let response = test_router().route(&request("GET /\r\n\r\n"));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_route_is_idempotent() {
        let router = test_router();
        let req = request("GET /query?a=1 HTTP/1.1\r\n\r\n");

        assert_eq!(router.route(&req), router.route(&req));
    }
}
