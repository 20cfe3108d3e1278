//! # Módulo HTTP
//!
//! Este módulo implementa el protocolo HTTP/1.1 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Acumulación de chunks TCP hasta tener un mensaje completo
//! - Parsing de requests
//! - Construcción de responses
//! - Tabla de status codes
//! - Parsing de query strings y formularios
//!
//! ## Alcance
//!
//! Solo un request por conexión: sin keep-alive, sin chunked transfer
//! encoding, sin pipelining. Toda respuesta lleva `Connection: close`.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! Connection: close\r\n
//! \r\n
//! hello
//! ```

pub mod frame;     // Acumulación de bytes hasta \r\n\r\n
pub mod query;     // Query strings y formularios
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use frame::FrameAccumulator;
pub use query::QueryParams;
pub use request::{Method, ParseError, Request};
pub use response::{build_response, Response};
pub use status::StatusCode;
