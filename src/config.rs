//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./raw_http_server --port 3000 --read-buffer 4096 --log-level debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=3000 HTTP_HOST=0.0.0.0 ./raw_http_server
//! ```

use crate::error::ServerError;
use crate::server::connection::DEFAULT_READ_BUFFER_SIZE;
use clap::Parser;
use std::time::Duration;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "raw_http_server")]
#[command(about = "Servidor HTTP/1.1 mínimo sobre sockets TCP")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = cualquiera libre)
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Bytes leídos del socket en cada `read()`
    ///
    /// Lo que el socket ya tenga listo al completar los headers se lee
    /// igual, aunque supere este tamaño.
    #[arg(long = "read-buffer", default_value = "8192", env = "READ_BUFFER_SIZE")]
    pub read_buffer_size: usize,

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    ///
    /// Sin timeout, un cliente que nunca manda la línea vacía mantiene
    /// ocupado su thread indefinidamente.
    #[arg(long = "read-timeout-ms", default_value = "0", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Filtro por defecto para el logger (RUST_LOG tiene prioridad)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use raw_http_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout de lectura, si está habilitado
    pub fn read_timeout(&self) -> Option<Duration> {
        if self.read_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.read_timeout_ms))
        }
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.read_buffer_size == 0 {
            return Err(ServerError::InvalidConfig(
                "Read buffer size must be >= 1".to_string(),
            ));
        }

        if self.host.trim().is_empty() {
            return Err(ServerError::InvalidConfig("Host must not be empty".to_string()));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        log::info!("Address:      {}", self.address());
        log::info!("Read buffer:  {} bytes", self.read_buffer_size);
        match self.read_timeout() {
            Some(timeout) => log::info!("Read timeout: {} ms", timeout.as_millis()),
            None => log::info!("Read timeout: disabled"),
        }
    }
}

impl Default for Config {
    /// Configuración por defecto (mismos valores que el CLI)
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            read_timeout_ms: 0,
            log_level: "info".to_string(),
        }
    }
}
