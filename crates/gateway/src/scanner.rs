//! QR decoder simulation for the validation desk. There is no camera: a
//! "scan" picks one of a small pool of canned codes (some belonging to real
//! student numbers, some not, so both outcomes show up at the desk), or
//! wraps the manually entered student number.

use std::time::Duration;

use async_trait::async_trait;
use rand::RngExt;
use serde::Deserialize;
use tokio::time::sleep;

use espeat_core::TicketKind;

use crate::{ScannedTicket, ScannerGateway};

#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Simulated decode latency.
    #[serde(default = "default_delai_ms")]
    pub delai_ms: u64,
}

fn default_delai_ms() -> u64 {
    1500
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            delai_ms: default_delai_ms(),
        }
    }
}

const CODES_SIMULES: [(&str, TicketKind, u32); 4] = [
    ("ESP2023001", TicketKind::Ndekki, 1),
    ("ESP2023002", TicketKind::Repas, 1),
    ("ESP2023012", TicketKind::Ndekki, 2),
    ("ESP2023156", TicketKind::Repas, 1),
];

pub struct SimulatedScanner {
    config: ScannerConfig,
}

impl SimulatedScanner {
    pub fn new(config: ScannerConfig) -> Self {
        SimulatedScanner { config }
    }
}

#[async_trait]
impl ScannerGateway for SimulatedScanner {
    async fn scan(&self, numero_manuel: Option<String>) -> ScannedTicket {
        sleep(Duration::from_millis(self.config.delai_ms)).await;

        match numero_manuel {
            Some(numero) => {
                let (_, type_ticket, nombre) = CODES_SIMULES[0];
                ScannedTicket {
                    numero_etudiant: numero,
                    type_ticket,
                    nombre,
                }
            }
            None => {
                let (numero, type_ticket, nombre) =
                    CODES_SIMULES[rand::rng().random_range(0..CODES_SIMULES.len())];
                ScannedTicket {
                    numero_etudiant: numero.to_string(),
                    type_ticket,
                    nombre,
                }
            }
        }
    }
}
