//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor TCP que maneja múltiples conexiones simultáneas usando threads.
//! Cada conexión se procesa en su propio thread; lo único compartido es el
//! router (solo lectura, detrás de un `Arc`) y los hooks.
//!
//! ## Ciclo de vida
//!
//! ```text
//! Server::new(config) → listen() → run() ... handle.stop() → run() retorna
//! ```

use super::connection::Connection;
use crate::config::Config;
use crate::endpoints;
use crate::error::ServerError;
use crate::hooks::{NoopHooks, ServerHooks};
use crate::router::Router;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    hooks: Arc<dyn ServerHooks>,
    listener: Option<TcpListener>,
    shutdown: Arc<AtomicBool>,
}

/// Permite detener un servidor desde otro thread
#[derive(Debug, Clone)]
pub struct ServerHandle {
    address: SocketAddr,
    shutdown: Arc<AtomicBool>,
}

impl ServerHandle {
    /// Dirección real en la que escucha el servidor
    pub fn local_addr(&self) -> SocketAddr {
        self.address
    }

    /// Pide al servidor que deje de aceptar conexiones
    ///
    /// `accept()` es bloqueante, así que después de marcar el flag se abre
    /// una conexión propia para despertarlo. Las conexiones ya aceptadas
    /// terminan normalmente en sus threads.
    pub fn stop(&self) {
        if self.shutdown.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Err(e) = TcpStream::connect(wake_address(self.address)) {
            log::debug!("No se pudo despertar el accept loop: {}", e);
        }
    }
}

/// Dirección a la que conectarse para llegar al listener
///
/// Un listener en `0.0.0.0` o `::` se alcanza por loopback en el mismo puerto.
fn wake_address(address: SocketAddr) -> SocketAddr {
    let ip = match address.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, address.port())
}

impl Server {
    /// Crea un servidor con los endpoints por defecto
    pub fn new(config: Config) -> Self {
        Self::with_router(config, endpoints::default_router())
    }

    /// Crea un servidor con un router propio
    pub fn with_router(config: Config, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
            hooks: Arc::new(NoopHooks),
            listener: None,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Instala los hooks de observabilidad
    pub fn with_hooks(mut self, hooks: Arc<dyn ServerHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Abre el socket de escucha en `host:port`
    ///
    /// Con puerto 0 el sistema elige uno libre; la dirección real se
    /// retorna. Llamarlo dos veces no vuelve a hacer bind.
    pub fn listen(&mut self) -> Result<SocketAddr, ServerError> {
        if let Some(listener) = &self.listener {
            return Ok(listener.local_addr()?);
        }

        self.config.validate()?;

        let address = self.config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

        let local_addr = listener.local_addr()?;
        log::info!("Servidor escuchando en {}", local_addr);

        self.listener = Some(listener);
        Ok(local_addr)
    }

    /// Dirección de escucha, si ya se hizo `listen()`
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Handle para detener el servidor (requiere `listen()` previo)
    pub fn handle(&self) -> Result<ServerHandle, ServerError> {
        let address = self.local_addr().ok_or(ServerError::NotListening)?;
        Ok(ServerHandle {
            address,
            shutdown: Arc::clone(&self.shutdown),
        })
    }

    /// Detiene el servidor (equivale a `handle()?.stop()`)
    pub fn stop(&self) -> Result<(), ServerError> {
        self.handle()?.stop();
        Ok(())
    }

    /// Acepta conexiones hasta que se llame a `stop()`
    ///
    /// Hace `listen()` si todavía no se hizo. Los errores de `accept()` y
    /// de cada conexión se reportan y el loop sigue.
    pub fn run(&mut self) -> Result<(), ServerError> {
        self.listen()?;
        let listener = self.listener.as_ref().ok_or(ServerError::NotListening)?;

        log::info!("Modo concurrente: un thread por conexión");

        for stream in listener.incoming() {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => log::error!("Error al aceptar conexión: {}", e),
            }
        }

        log::info!("Servidor detenido");
        Ok(())
    }

    fn spawn_connection(&self, stream: TcpStream) {
        let router = Arc::clone(&self.router);
        let hooks = Arc::clone(&self.hooks);
        let read_buffer_size = self.config.read_buffer_size;
        let read_timeout = self.config.read_timeout();

        hooks.on_connection(stream.peer_addr().ok());

        thread::spawn(move || {
            if let Err(e) = stream.set_read_timeout(read_timeout) {
                log::warn!("No se pudo configurar el read timeout: {}", e);
            }

            // El error ya se reportó a los hooks dentro de serve()
            let _ = Connection::new(stream, &router, hooks.as_ref())
                .with_read_buffer_size(read_buffer_size)
                .serve();
        });
    }
}
