//! Hold'em table server.
//!
//! Spawns one TableActor per configured table and serves them over HTTP.

use std::net::SocketAddr;

use anyhow::Error;
use holdem_table::table::{TableActor, TableHandle};
use ht_server::{api, config::ServerConfig, logging};
use pico_args::Arguments;
use tracing::{error, info};

const HELP: &str = "\
Run a Texas Hold'em table server

USAGE:
  ht_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:6969]
  --tables     N           Number of tables to create  [default: env MAX_TABLES or 1]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  MAX_TABLES               Number of tables
  TABLE_MAX_PLAYERS        Seats per table [default: 6]
  TABLE_LIMIT              Stake level in dollars; small blind is limit/200 [default: 2.00]
  TABLE_BUY_IN             Chips each player sits down with [default: TABLE_LIMIT]
  RUST_LOG                 Log filter [default: info]
";

struct Args {
    bind: Option<SocketAddr>,
    num_tables: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        num_tables: pargs.opt_value_from_str("--tables")?,
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.num_tables)?;
    config.validate()?;

    info!("Creating {} table(s)...", config.num_tables);
    let mut handles: Vec<TableHandle> = Vec::with_capacity(config.num_tables);
    for i in 1..=config.num_tables {
        let table_id = i as i64;
        let table_config = config.table_config(table_id);
        info!(
            "  - {} (ID: {}) - {} seats, limit ${}, buy-in ${}",
            table_config.name,
            table_id,
            table_config.max_players,
            table_config.limit,
            table_config.buy_in()
        );
        let (actor, handle) = TableActor::new(table_id, table_config);
        tokio::spawn(actor.run());
        handles.push(handle);
    }

    let state = api::AppState::new(handles.clone());
    let app = api::create_router(state);

    info!("Starting HTTP server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");
    for handle in handles {
        if let Err(e) = handle.close().await {
            error!("{}", e);
        }
    }

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}
