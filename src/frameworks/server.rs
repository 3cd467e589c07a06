// Framework bootstrap for the service runtime.

use crate::domain::entities::User;
use crate::frameworks::config;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AppState, InMemoryUserDirectory};

use std::io::Result;
use std::net::SocketAddr;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state()?;
    let app = app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from((config::http_host(), config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> Result<AppState> {
    let service_name = config::service_name();

    // Seed the example directory so a fresh instance has something to list.
    let users = InMemoryUserDirectory::seeded([User {
        id: 1,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    }]);

    let state = AppState::new(&service_name, users)
        .map_err(|e| std::io::Error::other(format!("failed to build route validators: {e}")))?;
    tracing::debug!(service = %service_name, "application state configured");

    Ok(state)
}
