use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::backend::SharedBackend;
use crate::config::Config;
use crate::service::CadService;
use crate::tools::{default_registry, ToolRegistry};

pub mod error;
pub mod openapi;
pub mod parse;
pub mod prompts;
pub mod state;
pub mod tools;

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    state: Arc<ServerState>,
}

impl Server {
    /// Binds `config.server.host:port` and serves until shut down.
    pub async fn start(config: Config, backend: SharedBackend) -> Result<Self, String> {
        let bind_addr = format!("{}:{}", config.server.host, config.server.port);
        let state = Arc::new(ServerState {
            service: CadService::new(config, backend),
            registry: default_registry(),
        });
        let app = router(state.clone());
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|error| format!("failed to bind {bind_addr}: {error}"))?;
        let addr = listener
            .local_addr()
            .map_err(|error| error.to_string())?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        tracing::info!("listening on http://{addr}");
        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
            state,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> Result<(), String> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| "failed to send server shutdown signal".to_string())
        } else {
            Ok(())
        }
    }

    pub fn service(&self) -> &CadService {
        &self.state.service
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(tools::list_tools))
        .route("/tools/call", post(tools::call_tool))
        .route("/parse", post(parse::parse_command))
        .route("/parse/batch", post(parse::parse_batch))
        .route("/state", get(state::drawing_state))
        .route("/prompts", get(prompts::list_prompts))
        .route("/prompts/:name", get(prompts::get_prompt))
        .with_state(state)
        .layer(cors)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Server is up", body = String))
)]
pub(crate) async fn health() -> &'static str {
    "ok"
}

pub(crate) struct ServerState {
    pub(crate) service: CadService,
    pub(crate) registry: ToolRegistry,
}
