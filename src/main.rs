use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trending_stories::{
    api::{ApiConfig, HttpArticleClient},
    http::{router, AppState},
    markdown::StyleRules,
    resolve::RouteResolver,
    store::{SessionRegistry, StoreBackend, DEFAULT_MAX_SESSIONS},
};

#[derive(Parser)]
#[command(name = "trending-stories")]
#[command(about = "Server-rendered reader for daily trend stories")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[arg(short, long, default_value = "3000")]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long)]
    debug: bool,

    /// Upstream trend API, overrides TREND_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Persist session stores as JSON files here instead of in memory
    #[arg(long)]
    session_dir: Option<PathBuf>,

    #[arg(long, default_value = "30")]
    session_idle_minutes: u64,

    /// Upper bound on sessions held at once
    #[arg(long, default_value_t = DEFAULT_MAX_SESSIONS)]
    max_sessions: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("trending_stories={filter_level},tower_http=info").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    dotenvy::dotenv().ok();

    let api_config = match &args.api_url {
        Some(url) => ApiConfig::new(url.as_str()),
        None => ApiConfig::from_env(),
    }
    .context("Failed to load trend API configuration")?;

    let backend = match &args.session_dir {
        Some(dir) => {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create {}", dir.display()))?;
            StoreBackend::File(dir.clone())
        }
        None => StoreBackend::Memory,
    };

    let upstream = Arc::new(HttpArticleClient::new(api_config)?);
    info!("Using trend API at {}", upstream.config().base_url);

    let sessions = SessionRegistry::new(
        backend,
        Duration::from_secs(args.session_idle_minutes * 60),
        args.max_sessions,
    );
    sessions
        .load_persisted()
        .await
        .context("failed to load persisted sessions")?;

    let state = AppState {
        resolver: RouteResolver::new(upstream.clone()),
        upstream,
        sessions,
        rules: Arc::new(StyleRules::new()),
    };

    let bind_addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;

    info!("Trending stories server started on http://{}", bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from([
            "trending-stories",
            "--port",
            "9000",
            "--debug",
            "--session-dir",
            "/tmp/ts-sessions",
        ])
        .unwrap();

        assert_eq!(args.port, 9000);
        assert!(args.debug);
        assert_eq!(args.session_dir, Some(PathBuf::from("/tmp/ts-sessions")));
        assert_eq!(args.session_idle_minutes, 30);
        assert_eq!(args.max_sessions, DEFAULT_MAX_SESSIONS);
        assert_eq!(args.host, "127.0.0.1");
    }
}
