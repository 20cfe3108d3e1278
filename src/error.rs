//! # Errores del Servidor
//! src/error.rs
//!
//! Los errores de protocolo (ruta inexistente, método no soportado, body
//! inválido) NO están aquí: se responden como HTTP. Estos son los que no
//! tienen respuesta posible.

use std::io;
use thiserror::Error;

/// Error fatal para UNA conexión (nunca para el servidor)
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Reset, broken pipe, timeout de lectura...
    #[error("socket error: {0}")]
    Io(#[from] io::Error),
}

/// Errores del servidor en sí
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("server is not listening")]
    NotListening,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
