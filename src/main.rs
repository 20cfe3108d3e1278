//! # Raw HTTP Server - Entry Point
//! src/main.rs

use raw_http_server::config::Config;
use raw_http_server::hooks::LogHooks;
use raw_http_server::server::Server;
use std::sync::Arc;

fn main() {
    let config = Config::new();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    log::info!("Raw HTTP/1.1 Server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let mut server = Server::new(config).with_hooks(Arc::new(LogHooks));

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        log::error!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
