//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Máquina de estados de UNA conexión:
//!
//! ```text
//! AwaitingHeaders ──(\r\n\r\n)──► Parsed ──► Responded ──► Closed
//!        │                                                   ▲
//!        └──────────────(peer cerró sin mensaje)─────────────┘
//! ```
//!
//! Un solo request por conexión: después de responder no se vuelve a leer
//! el siguiente mensaje. Es genérica sobre [`Transport`] para poder probarla
//! sin sockets.

use crate::error::ConnectionError;
use crate::hooks::ServerHooks;
use crate::http::{FrameAccumulator, Method, Request, Response, StatusCode};
use crate::router::{Router, INVALID_HTTP_MESSAGE};
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// Tamaño por defecto de cada `read()`
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8192;

/// Máximo de bytes que se descartan al cerrar
const DRAIN_LIMIT: usize = 64 * 1024;

/// Cuánto se espera por input pendiente al cerrar
const DRAIN_TIMEOUT: Duration = Duration::from_millis(200);

/// Stream sobre el que corre una conexión
///
/// Además de leer y escribir, sabe entregar lo que ya llegó sin bloquear y
/// cerrar ordenadamente. Los defaults sirven para streams en memoria.
pub trait Transport: Read + Write {
    /// Lee bytes que ya estén disponibles, sin esperar a la red
    ///
    /// `Ok(0)` significa que no hay nada listo en este momento.
    fn read_ready(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }

    /// Cierra la conexión después de escribir la respuesta
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for TcpStream {
    fn read_ready(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.set_nonblocking(true)?;
        let result = match self.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            other => other,
        };
        self.set_nonblocking(false)?;
        result
    }

    /// Cierra la escritura y descarta el input que quede sin leer
    ///
    /// Cerrar un socket con bytes sin leer en el buffer del kernel manda un
    /// RST en vez de un FIN, y el cliente puede perder la respuesta.
    fn finish(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Write)?;
        self.set_read_timeout(Some(DRAIN_TIMEOUT))?;

        let mut buf = [0u8; 4096];
        let mut drained = 0;
        while drained < DRAIN_LIMIT {
            match self.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => drained += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e)
                    if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) =>
                {
                    break
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Estado de la conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Leyendo chunks hasta ver el fin de los headers
    AwaitingHeaders,

    /// Mensaje completo, falta parsear y enrutar
    Parsed,

    /// Respuesta lista para escribir
    Responded,

    /// Terminada
    Closed,
}

/// Una conexión aceptada
pub struct Connection<'a, S> {
    stream: S,
    state: ConnectionState,
    frame: FrameAccumulator,
    response: Option<Response>,
    router: &'a Router,
    hooks: &'a dyn ServerHooks,
    read_buffer_size: usize,
}

impl<'a, S: Transport> Connection<'a, S> {
    pub fn new(stream: S, router: &'a Router, hooks: &'a dyn ServerHooks) -> Self {
        Self {
            stream,
            state: ConnectionState::AwaitingHeaders,
            frame: FrameAccumulator::new(),
            response: None,
            router,
            hooks,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }

    /// Cambia el tamaño de cada lectura
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Atiende la conexión hasta cerrarla
    ///
    /// Un error de socket abandona la conexión: se reporta al hook y se
    /// retorna, sin intentar responder.
    pub fn serve(&mut self) -> Result<(), ConnectionError> {
        let result = self.drive();
        self.state = ConnectionState::Closed;

        if let Err(error) = &result {
            self.hooks.on_error(error);
        }
        result
    }

    fn drive(&mut self) -> Result<(), ConnectionError> {
        let mut chunk = vec![0u8; self.read_buffer_size];

        loop {
            match self.state {
                ConnectionState::AwaitingHeaders => {
                    let bytes_read = self.stream.read(&mut chunk)?;

                    // El peer cerró antes de mandar un mensaje completo
                    if bytes_read == 0 {
                        self.state = ConnectionState::Closed;
                        continue;
                    }

                    if self.frame.feed(&chunk[..bytes_read]) {
                        // Lo que el socket ya tiene listo es parte del mismo
                        // mensaje, aunque no haya entrado en un solo read()
                        loop {
                            let ready = self.stream.read_ready(&mut chunk)?;
                            if ready == 0 {
                                break;
                            }
                            self.frame.feed(&chunk[..ready]);
                        }
                        self.state = ConnectionState::Parsed;
                    }
                }
                ConnectionState::Parsed => {
                    let response = self.handle_message();
                    self.frame.clear();
                    self.response = Some(response);
                    self.state = ConnectionState::Responded;
                }
                ConnectionState::Responded => {
                    if let Some(response) = self.response.take() {
                        let bytes = response.to_bytes();
                        self.stream.write_all(&bytes)?;
                        self.stream.flush()?;
                        self.hooks.on_response(response.status(), bytes.len());

                        // La respuesta ya salió: un error al cerrar no la invalida
                        if let Err(e) = self.stream.finish() {
                            self.hooks.on_warning(&format!("Error closing connection: {}", e));
                        }
                    }
                    self.state = ConnectionState::Closed;
                }
                ConnectionState::Closed => return Ok(()),
            }
        }
    }

    /// Parsea el mensaje acumulado y lo enruta
    fn handle_message(&self) -> Response {
        let request = match Request::parse(self.frame.as_bytes()) {
            Ok(request) => request,
            Err(error) => {
                self.hooks.on_warning(&format!("Parse error: {}", error));
                return Response::text(StatusCode::BAD_REQUEST, INVALID_HTTP_MESSAGE);
            }
        };

        self.hooks.on_request_parsed(&request);

        if request.method() == &Method::Get && !request.body().is_empty() {
            self.hooks.on_warning(&format!(
                "GET {} carries a {}-byte body; HTTP/1.1 gives it no meaning",
                request.path(),
                request.body().len()
            ));
        }

        self.router.route(&request)
    }

    /// Devuelve el stream (útil en tests)
    pub fn into_inner(self) -> S {
        self.stream
    }
}
