//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes (un thread por conexión)
//! 3. Acumula bytes hasta tener un request completo
//! 4. Parsea, enruta y escribe la respuesta
//! 5. Cierra la conexión

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{Connection, ConnectionState, Transport};
pub use tcp::{Server, ServerHandle};
