pub mod assets;
pub mod auth;
pub mod config;
pub mod error;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use routes::AppState;

use std::sync::Arc;

use espeat_gateway::{MobileMoneyGateway, SimulatedScanner};
use espeat_store::MemoryStore;

/// Build the full router over a seeded in-memory store with instant
/// gateways. Integration tests drive this without binding a socket.
pub fn create_app(jwt_secret: &str) -> axum::Router {
    let config = Config::pour_tests(jwt_secret);

    let state = AppState {
        store: Arc::new(MemoryStore::avec_seed()),
        paiement: Arc::new(MobileMoneyGateway::new(espeat_gateway::PaymentConfig {
            delai_ms: 0,
            taux_echec: 0.0,
            timeout_ms: 100,
            tentatives_max: 1,
        })),
        scanner: Arc::new(SimulatedScanner::new(espeat_gateway::ScannerConfig {
            delai_ms: 0,
        })),
        config,
    };

    routes::router(state)
}
