use anyhow::{bail, Context, Result};
use axum::Router;
use dashboard::core::config::Config;
use dashboard::core::routes::build_router;
use dashboard::core::startup::warm_caches;
use dashboard::core::state::AppState;
use dashboard::core::tracing_init::init_tracing;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::{TcpListener, UnixListener};
use tokio::signal;
use tokio::task::JoinHandle;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, warn, Level};

type ServerTask = JoinHandle<Result<()>>;

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let config = Config::from_file(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from '{}'. \
            Copy config.example.toml to config.toml and point [data] at your CSV files.",
            config_path.display()
        )
    })?;

    init_tracing(&config.logging);

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?
        .block_on(run(config, config_path))
}

async fn run(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        port = ?config.server.port,
        unix_socket = ?config.server.unix_socket,
        num_threads = config.server.num_threads,
        credentials_path = %config.data.credentials_path.display(),
        sales_path = %config.data.sales_path.display(),
        rederive_on_access = config.auth.rederive_on_access,
        "Sales dashboard starting"
    );

    let state = Arc::new(AppState::new(config.clone()));

    // Broken CSV sources are reported per request until /reload succeeds
    match warm_caches(&state) {
        Ok(summary) => info!(
            active_users = summary.active_users,
            sales_rows = summary.sales_rows,
            "Caches warmed"
        ),
        Err(e) => warn!(error = %e, "CSV sources unavailable at startup, serving without warm caches"),
    }

    let app = build_router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
    );

    let tcp = match config.server.port {
        Some(port) => Some(serve_tcp(app.clone(), port).await?),
        None => None,
    };
    let unix = match &config.server.unix_socket {
        Some(path) => Some(serve_unix(app, path)?),
        None => None,
    };

    match (tcp, unix) {
        (Some(tcp), Some(unix)) => {
            tokio::select! {
                result = tcp => report("TCP", result),
                result = unix => report("Unix socket", result),
            }
        }
        (Some(task), None) => report("TCP", task.await),
        (None, Some(task)) => report("Unix socket", task.await),
        (None, None) => bail!("No listeners configured"),
    }

    info!("Sales dashboard stopped");

    Ok(())
}

fn report(listener: &str, result: std::result::Result<Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(listener, error = %e, "Server exited with error"),
        Err(e) => error!(listener, error = %e, "Server task panicked"),
    }
}

async fn serve_tcp(app: Router, port: u16) -> Result<ServerTask> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to {}", addr))?;

    info!(address = %addr, "Listening on TCP");

    Ok(tokio::spawn(async move {
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("TCP server error")
    }))
}

fn serve_unix(app: Router, path: &Path) -> Result<ServerTask> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove stale Unix socket {}", path.display()))?;
    }

    let listener = UnixListener::bind(path)
        .with_context(|| format!("Failed to bind Unix socket {}", path.display()))?;

    info!(path = %path.display(), "Listening on Unix socket");

    Ok(tokio::spawn(async move {
        use tower::Service;

        let mut make_service = app.into_make_service();
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            let socket = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((socket, _)) => socket,
                    Err(e) => {
                        error!(error = %e, "Failed to accept Unix socket connection");
                        continue;
                    }
                },
                _ = &mut shutdown => return Ok(()),
            };

            let tower_service = match make_service.call(&socket).await {
                Ok(service) => service,
                Err(infallible) => match infallible {},
            };

            tokio::spawn(async move {
                let io = hyper_util::rt::TokioIo::new(socket);
                let hyper_service = hyper::service::service_fn(
                    move |request: hyper::Request<hyper::body::Incoming>| tower_service.clone().call(request),
                );

                if let Err(e) = hyper_util::server::conn::auto::Builder::new(hyper_util::rt::TokioExecutor::new())
                    .serve_connection_with_upgrades(io, hyper_service)
                    .await
                {
                    error!(error = %e, "Error serving Unix socket connection");
                }
            });
        }
    }))
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
