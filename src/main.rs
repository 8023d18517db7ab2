use anyhow::{Context, Result};
use clap::Parser;
use page_insight::app::{build_router, AppState};
use page_insight::config::Config;
use std::net::{IpAddr, SocketAddr};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "page-insight")]
#[command(about = "Relay page analyses to OpenAI and assemble DOCX reports")]
struct CliArgs {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 5001)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "page_insight=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env();
    let router = build_router(AppState::new(&config));

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server started. Open http://{} in a browser", addr);

    let server = axum::serve(listener, router).with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Ctrl-C received; shutting down");
    });

    if let Err(e) = server.await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
