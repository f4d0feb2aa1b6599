//! Short-path redirect service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http server ──▶ JSON overlay ──miss──▶ YAML overlay ──miss──▶ store map ──miss──▶ default responder
//!                  ▲                │ hit                  │ hit                 │ hit                  │
//!                  └──── 302 ───────┴──────────────────────┴─────────────────────┘        200 ──────────┘
//!
//!   Boot: config → store (open, seed once, scan, close) → overlays → chain → listener
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use urlshort::config::{self, AppConfig, ConfigError};
use urlshort::http::HttpServer;
use urlshort::lifecycle::{self, signals, Shutdown};
use urlshort::observability;

#[derive(Parser)]
#[command(name = "urlshort")]
#[command(about = "Redirect short paths to URLs from a persistent store and config overlays", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML file of redirects
    #[arg(long)]
    yaml: Option<String>,

    /// JSON file of redirects
    #[arg(long)]
    json: Option<String>,

    /// Route store file
    #[arg(long)]
    db: Option<String>,

    /// Listen address
    #[arg(long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve redirects over HTTP (default)
    Serve,
    /// Print the redirects held in the route store
    Routes,
}

impl Cli {
    fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        config::load_config(self.config.as_deref(), |config| {
            if let Some(yaml) = &self.yaml {
                config.overlays.yaml_path = yaml.clone();
            }
            if let Some(json) = &self.json {
                config.overlays.json_path = json.clone();
            }
            if let Some(db) = &self.db {
                config.store.path = db.clone();
            }
            if let Some(bind) = &self.bind {
                config.listener.bind_address = bind.clone();
            }
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    observability::init_tracing(&config.observability.log_level);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Routes => print_routes(&config),
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        store = %config.store.path,
        yaml = %config.overlays.yaml_path,
        json = %config.overlays.json_path,
        "Configuration loaded"
    );

    let chain = match lifecycle::build_chain(&config) {
        Ok(chain) => chain,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed, not serving");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    HttpServer::new(&config, chain).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_routes(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let routes = lifecycle::startup::load_store_routes(&config.store)?;

    let mut routes: Vec<_> = routes.into_iter().collect();
    routes.sort();
    for (path, url) in routes {
        println!("{}\t{}", path, url);
    }
    Ok(())
}
