//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser HTTP/1.1 implementado desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /api/users?debug=1 HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Type: application/json\r\n
//! \r\n
//! {"name":"John"}
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query VERSION`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: todo lo que sigue a la línea vacía
//!
//! ## Degradación silenciosa
//!
//! Un request mal formado NO es un error: una request line con menos de
//! 3 tokens deja los campos faltantes vacíos, y una línea de header sin
//! `:` se ignora. El único error posible es que los bytes no sean UTF-8.

use std::collections::HashMap;
use thiserror::Error;

/// Método HTTP de la request line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Obtener un recurso
    Get,

    /// POST - Enviar datos a un recurso
    Post,

    /// Cualquier otro token (DELETE, PUT, `get`...), tal cual llegó
    Other(String),

    /// La request line no traía método
    Unknown,
}

impl Method {
    /// Clasifica un token de método
    ///
    /// La comparación es sensible a mayúsculas: `get` NO es `GET`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "" => Method::Unknown,
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Other(token) => token.as_str(),
            Method::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Los bytes recibidos no son texto UTF-8
    #[error("Request is not valid UTF-8 (at byte {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },
}

/// Request HTTP parseado (inmutable)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,

    /// Path crudo, incluyendo `?query` si viene
    path: String,

    /// Versión declarada por el cliente (vacía si no vino)
    version: String,

    /// Headers con nombre en minúsculas
    headers: HashMap<String, String>,

    body: String,
}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use raw_http_server::http::{Method, Request};
    ///
    /// let raw = b"GET /api/status?verbose=1 HTTP/1.1\r\nHOST: x\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), &Method::Get);
    /// assert_eq!(request.path(), "/api/status?verbose=1");
    /// assert_eq!(request.header("host"), Some("x"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(buffer).map_err(|e| ParseError::InvalidEncoding {
            valid_up_to: e.valid_up_to(),
        })?;

        let lines: Vec<&str> = text.split("\r\n").collect();

        // 1. Request line
        let (method, path, version) = Self::parse_request_line(lines[0]);

        // 2. Headers y body
        let (headers, body) = Self::parse_headers_and_body(&lines[1..]);

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }

    /// Parsea la request line: `METHOD PATH VERSION`
    ///
    /// Se separa por espacios simples y se toman los tres primeros tokens;
    /// los que falten quedan vacíos.
    fn parse_request_line(line: &str) -> (Method, String, String) {
        let mut parts = line.split(' ');

        let method = Method::from_token(parts.next().unwrap_or(""));
        let path = parts.next().unwrap_or("").to_string();
        let version = parts.next().unwrap_or("").to_string();

        (method, path, version)
    }

    /// Recorre las líneas después de la request line
    ///
    /// La primera línea vacía marca el fin de los headers: todo lo que
    /// sigue (re-unido con `\r\n`) es el body.
    fn parse_headers_and_body(lines: &[&str]) -> (HashMap<String, String>, String) {
        let mut headers = HashMap::new();

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                let body = lines[i + 1..].join("\r\n");
                return (headers, body);
            }

            // Header sin ':' se ignora
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.to_lowercase(), value.trim().to_string());
            }
        }

        (headers, String::new())
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path completo tal como vino (con query string)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path sin la query string
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::http::Request;
    ///
    /// let request = Request::parse(b"GET /search?q=rust HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(request.route_path(), "/search");
    /// assert_eq!(request.query_string(), Some("q=rust"));
    /// ```
    pub fn route_path(&self) -> &str {
        match self.path.split_once('?') {
            Some((route, _)) => route,
            None => self.path.as_str(),
        }
    }

    /// Query string (sin el `?`), si existe
    pub fn query_string(&self) -> Option<&str> {
        self.path.split_once('?').map(|(_, query)| query)
    }

    /// Versión HTTP declarada, o `None` si la request line no la traía
    pub fn version(&self) -> Option<&str> {
        if self.version.is_empty() {
            None
        } else {
            Some(self.version.as_str())
        }
    }

    /// Todos los headers (keys en minúsculas)
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header (búsqueda insensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Content-Type declarado (`text/plain` si no vino)
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or("text/plain")
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
