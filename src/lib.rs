//! # Raw HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado directamente sobre sockets TCP,
//! sin librerías HTTP.
//!
//! ## Arquitectura
//!
//! ```text
//! bytes → FrameAccumulator → Request::parse → Router → Response → socket
//! ```
//!
//! - `http`: Framing, parsing de requests, responses, status codes
//! - `router`: Registro `(método, path) → handler` y parsing de bodies
//! - `endpoints`: Handlers de ejemplo registrados por defecto
//! - `server`: Listener TCP y máquina de estados por conexión
//! - `hooks`: Puntos de enganche para logging
//! - `config`: Configuración por CLI / variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use raw_http_server::config::Config;
//! use raw_http_server::server::Server;
//!
//! let mut server = Server::new(Config::default());
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod endpoints;
pub mod error;
pub mod hooks;
pub mod http;
pub mod router;
pub mod server;
