use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use espeat::AppState;
use espeat_gateway::{MobileMoneyGateway, SimulatedScanner};
use espeat_store::MemoryStore;
use tower_http::trace::TraceLayer;

/// ESP'eat - Gestion des tickets restaurant du campus
#[derive(Parser)]
#[command(name = "espeat")]
#[command(about = "Tickets restaurant, menus et statistiques du campus ESP", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Write the seed snapshot if none exists yet
    Seed,
    /// Drop the snapshot and re-seed it
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = espeat::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    espeat::observability::init_observability("espeat", &config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Seed => seed_command(config),
        Commands::Reset => reset_command(config),
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: espeat::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Démarrage du serveur ESP'eat...");

    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    let store = MemoryStore::ouvrir(&config.store.snapshot_path)?;
    tracing::info!(
        snapshot = %config.store.snapshot_path,
        "magasin de données prêt"
    );

    let state = AppState {
        store: Arc::new(store),
        paiement: Arc::new(MobileMoneyGateway::new(config.paiement.clone())),
        scanner: Arc::new(SimulatedScanner::new(config.scanner.clone())),
        config,
    };

    let app = espeat::routes::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Serveur à l'écoute sur {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tracing::instrument(skip(config))]
fn seed_command(config: espeat::Config) -> Result<()> {
    let chemin = std::path::Path::new(&config.store.snapshot_path);
    if chemin.exists() {
        tracing::info!(snapshot = %chemin.display(), "le snapshot existe déjà, rien à faire");
        return Ok(());
    }
    MemoryStore::ouvrir(chemin)?;
    tracing::info!(snapshot = %chemin.display(), "snapshot initialisé avec les données de démonstration");
    Ok(())
}

#[tracing::instrument(skip(config))]
fn reset_command(config: espeat::Config) -> Result<()> {
    let chemin = std::path::Path::new(&config.store.snapshot_path);
    if chemin.exists() {
        tracing::warn!(snapshot = %chemin.display(), "suppression du snapshot existant");
        std::fs::remove_file(chemin)?;
    }
    MemoryStore::ouvrir(chemin)?;
    tracing::info!(snapshot = %chemin.display(), "snapshot réinitialisé");
    Ok(())
}
