//! # Acumulador de Frames
//! src/http/frame.rs
//!
//! TCP entrega bytes en chunks arbitrarios: un request puede llegar en
//! varios `read()`. Este módulo junta los chunks de una conexión hasta que
//! aparece el delimitador `\r\n\r\n` que cierra el bloque de headers.
//!
//! ## Limitación conocida
//!
//! La decisión de "listo" depende SOLO del delimitador. No se mira
//! `Content-Length`, así que un body POST que llegue en un chunk posterior
//! al delimitador queda fuera del request parseado.

use memchr::memmem;

/// Delimitador que cierra el bloque de headers
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Buffer de bytes de una conexión (append-only)
#[derive(Debug, Default)]
pub struct FrameAccumulator {
    buffer: Vec<u8>,

    /// Posición del delimitador, una vez encontrado
    terminator_at: Option<usize>,
}

impl FrameAccumulator {
    /// Crea un acumulador vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un chunk al buffer
    ///
    /// Retorna `true` cuando el buffer ya contiene `\r\n\r\n`.
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::http::FrameAccumulator;
    ///
    /// let mut frame = FrameAccumulator::new();
    /// assert!(!frame.feed(b"GET / HTTP/1.1\r\n"));
    /// assert!(frame.feed(b"\r\n"));
    /// ```
    pub fn feed(&mut self, chunk: &[u8]) -> bool {
        if self.terminator_at.is_some() {
            self.buffer.extend_from_slice(chunk);
            return true;
        }

        // El delimitador puede quedar partido entre dos chunks: se vuelve a
        // buscar desde los últimos 3 bytes ya acumulados.
        let search_from = self.buffer.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
        self.buffer.extend_from_slice(chunk);

        self.terminator_at = memmem::find(&self.buffer[search_from..], HEADER_TERMINATOR)
            .map(|pos| search_from + pos);

        self.terminator_at.is_some()
    }

    /// Indica si ya se recibió el bloque de headers completo
    pub fn is_ready(&self) -> bool {
        self.terminator_at.is_some()
    }

    /// Bytes acumulados hasta ahora
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Cantidad de bytes acumulados
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Descarta el contenido (el request ya fue parseado)
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.terminator_at = None;
    }
}
