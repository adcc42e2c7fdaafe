//! StockMind: research board server.

use std::sync::Arc;

use stockmind_catalog::StaticCatalog;
use stockmind_core::StockMindConfig;
use stockmind_oracle::CannedOracle;
use stockmind_server::{build_router, ticker, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" | "help" => {
                println!("StockMind: visual stock research board");
                println!();
                println!("Usage: stockmind [command]");
                println!();
                println!("Commands:");
                println!("  (none)     Start the server");
                println!("  help       Show this help message");
                println!();
                println!("Environment:");
                println!("  STOCKMIND_PORT                 HTTP port (default 3004)");
                println!("  STOCKMIND_FOLLOW_UP_DELAY_MS   Follow-up question delay (default 1000)");
                println!("  STOCKMIND_THINKING_DELAY_MS    Assistant thinking time (default 2000)");
                println!("  STOCKMIND_TICK_INTERVAL_MS     Scheduler tick period (default 100)");
                println!("  STOCKMIND_PLACEMENT_SEED       Fixed seed for node placement");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'stockmind help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let config = StockMindConfig::from_env()?;
    let port = config.port;

    let state = Arc::new(AppState::new(
        config,
        Arc::new(StaticCatalog::mock()),
        Arc::new(CannedOracle::new()),
    ));

    let ticker = ticker::start_scheduler_ticker(state.clone());
    let app = build_router(state.clone());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("StockMind server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ticker.abort();
    state.sessions.end_all();
    info!("StockMind server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
