//! # Hooks de Observabilidad
//! src/hooks.rs
//!
//! El núcleo no imprime nada por su cuenta: avisa de cada evento a un
//! [`ServerHooks`]. Todos los métodos tienen implementación vacía, así que
//! basta con sobrescribir los que interesen.
//!
//! [`LogHooks`] los manda a la fachada `log`; el binario instala
//! `env_logger` como backend.

use crate::error::ConnectionError;
use crate::http::{Request, StatusCode};
use std::net::SocketAddr;

/// Puntos de enganche del ciclo de vida de una conexión
pub trait ServerHooks: Send + Sync {
    /// Se aceptó una conexión nueva
    fn on_connection(&self, _peer: Option<SocketAddr>) {}

    /// Se parseó un request completo
    fn on_request_parsed(&self, _request: &Request) {}

    /// Se escribió la respuesta al socket
    fn on_response(&self, _status: StatusCode, _bytes_written: usize) {}

    /// Algo no cumple el protocolo pero se atiende igual
    fn on_warning(&self, _message: &str) {}

    /// La conexión se abandonó por un error de socket
    fn on_error(&self, _error: &ConnectionError) {}
}

/// Hooks que no hacen nada
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl ServerHooks for NoopHooks {}

/// Hooks sobre la fachada `log`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHooks;

impl ServerHooks for LogHooks {
    fn on_connection(&self, peer: Option<SocketAddr>) {
        match peer {
            Some(peer) => log::debug!("Nueva conexión desde {}", peer),
            None => log::debug!("Nueva conexión desde origen desconocido"),
        }
    }

    fn on_request_parsed(&self, request: &Request) {
        log::info!(
            "{} {} {}",
            request.method(),
            request.path(),
            request.version().unwrap_or("-")
        );
    }

    fn on_response(&self, status: StatusCode, bytes_written: usize) {
        log::info!("-> {} ({} bytes)", status, bytes_written);
    }

    fn on_warning(&self, message: &str) {
        log::warn!("{}", message);
    }

    fn on_error(&self, error: &ConnectionError) {
        log::error!("Conexión abandonada: {}", error);
    }
}
