//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! API para construir respuestas HTTP/1.1 y convertirlas a bytes.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! Connection: close\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Headers por defecto
//!
//! Toda respuesta lleva, en este orden, `Content-Type: text/plain`,
//! `Content-Length: <bytes del body>` y `Connection: close`. Un header del
//! handler con el mismo nombre exacto (sensible a mayúsculas) reemplaza el
//! valor por defecto en su misma posición; el resto se agrega después, en
//! el orden en que se definió.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use raw_http_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::OK)
//!     .with_header("X-Powered-By", "raw-tcp")
//!     .with_body("hello");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nhello"));
//! ```

use super::StatusCode;
use serde::Serialize;

/// Versión que se escribe en la status line, sin importar la del cliente
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Respuesta HTTP (status + headers del handler + body)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,

    /// Headers definidos por el handler, sin duplicados, en orden
    headers: Vec<(String, String)>,

    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin headers extra y con body vacío
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si ya existe uno con el mismo nombre, se sobrescribe el valor.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Versión mutable de [`Response::with_header`]
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Respuesta `text/plain`
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status).with_body(body)
    }

    /// Respuesta JSON con el valor serializado en formato legible
    ///
    /// Si el valor no se puede serializar (p. ej. un mapa con claves que no
    /// son strings) la respuesta es un 500 en texto plano con el error.
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::http::{Response, StatusCode};
    /// use serde_json::json;
    ///
    /// let response = Response::json(StatusCode::CREATED, &json!({"ok": true}));
    /// assert_eq!(response.header("Content-Type"), Some("application/json"));
    /// ```
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(body) => Self::new(status)
                .with_header("Content-Type", "application/json")
                .with_body(&body),
            Err(e) => Self::text(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("500 Internal Server Error - {}", e),
            ),
        }
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    pub fn to_bytes(&self) -> Vec<u8> {
        build_response(self.status, &self.headers, &self.body)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Headers definidos por el handler (sin los de por defecto)
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header definido por el handler
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body como texto (reemplazando bytes no UTF-8)
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Serializa `(status, headers, body)` al formato del wire
///
/// - Status line: `HTTP/1.1 {code} {reason}\r\n`
/// - Headers por defecto, luego los extra: `Name: value\r\n`
/// - Línea vacía: `\r\n`
/// - Body
///
/// `Content-Length` cuenta bytes, no caracteres.
///
/// # Ejemplo
/// ```
/// use raw_http_server::http::{build_response, StatusCode};
///
/// let bytes = build_response(StatusCode::OK, &[], b"hello");
/// let text = String::from_utf8(bytes).unwrap();
///
/// assert!(text.contains("Content-Length: 5\r\n"));
/// assert!(text.ends_with("\r\n\r\nhello"));
/// ```
pub fn build_response(status: StatusCode, headers: &[(String, String)], body: &[u8]) -> Vec<u8> {
    let mut merged: Vec<(&str, String)> = vec![
        ("Content-Type", "text/plain".to_string()),
        ("Content-Length", body.len().to_string()),
        ("Connection", "close".to_string()),
    ];

    for (name, value) in headers {
        match merged.iter_mut().find(|(existing, _)| *existing == name.as_str()) {
            Some((_, existing_value)) => *existing_value = value.clone(),
            None => merged.push((name.as_str(), value.clone())),
        }
    }

    let mut result = Vec::with_capacity(128 + body.len());

    // 1. Status line
    result.extend_from_slice(
        format!("{} {} {}\r\n", HTTP_VERSION, status.as_u16(), status.reason_phrase()).as_bytes(),
    );

    // 2. Headers
    for (name, value) in &merged {
        result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
    }

    // 3. Línea vacía
    result.extend_from_slice(b"\r\n");

    // 4. Body
    result.extend_from_slice(body);

    result
}
