use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::routing::IntoMakeService;
use axum_server::Handle;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tower_http::normalize_path::NormalizePath;

use homeops_api::config::ServerConfig;

use crate::error::ApiResult;

pub struct HttpServer {
    addr: SocketAddr,
    handle: Handle,
}

impl HttpServer {
    #[must_use]
    pub fn new(conf: &ServerConfig) -> Self {
        Self {
            addr: SocketAddr::from((conf.listen_address, conf.port)),
            handle: Handle::new(),
        }
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shut the server down gracefully on Ctrl-C or SIGTERM.
    pub fn install_signal_handlers(&self) -> ApiResult<()> {
        fn shutdown(msg: &str, handle: &Handle) {
            log::warn!("{msg}");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        }

        let handle = self.handle.clone();
        tokio::spawn(async move {
            if matches!(signal::ctrl_c().await, Ok(())) {
                shutdown("Ctrl-C pressed, exiting..", &handle);
            }
        });

        let handle = self.handle.clone();
        let mut signal = signal::unix::signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            if matches!(signal.recv().await, Some(())) {
                shutdown("SIGTERM received, exiting..", &handle);
            }
        });

        Ok(())
    }

    pub async fn serve(self, svc: IntoMakeService<NormalizePath<Router>>) -> ApiResult<()> {
        log::info!("Opening listen port on {}", self.addr);
        axum_server::bind(self.addr)
            .handle(self.handle)
            .serve(svc)
            .await?;
        log::info!("Stopped server {}", self.addr);
        Ok(())
    }
}
