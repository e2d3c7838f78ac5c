//! Simulated request/response boundaries.
//!
//! The original application faked its payment processor and QR decoder with
//! fixed timers that always succeeded. Here they are real seams: async
//! traits with an in-process simulation behind them, complete with latency,
//! failure branches, per-attempt timeouts and a bounded retry policy, so a
//! real operator integration only has to implement the trait.

pub mod payment;
pub mod scanner;

use async_trait::async_trait;
use thiserror::Error;

use espeat_core::{MoyenPaiement, TicketKind};

pub use payment::{MobileMoneyGateway, PaymentConfig};
pub use scanner::{ScannerConfig, SimulatedScanner};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("paiement refusé par l'opérateur: {0}")]
    Declined(String),

    #[error("numéro de téléphone invalide: {0}")]
    InvalidPhone(String),

    #[error("l'opérateur n'a pas répondu après {tentatives} tentative(s)")]
    Timeout { tentatives: u32 },
}

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub moyen: MoyenPaiement,
    pub telephone: String,
    pub montant: u64,
}

#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub moyen: MoyenPaiement,
    pub montant: u64,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, demande: PaymentRequest) -> Result<PaymentReceipt, GatewayError>;
}

/// What the QR decoder hands back: who showed their code and for what.
#[derive(Debug, Clone)]
pub struct ScannedTicket {
    pub numero_etudiant: String,
    pub type_ticket: TicketKind,
    pub nombre: u32,
}

#[async_trait]
pub trait ScannerGateway: Send + Sync {
    /// Decode a presented QR code, or take the manually entered student
    /// number when the camera is skipped.
    async fn scan(&self, numero_manuel: Option<String>) -> ScannedTicket;
}
