//! Domain model for ESP'eat: tickets, users, restaurants, menus and the
//! records the statistics pipeline aggregates over.

pub mod error;
pub mod menu;
pub mod proposition;
pub mod restaurant;
pub mod scan;
pub mod stats;
pub mod ticket;
pub mod user;

pub use error::Error;
pub use menu::{Menu, MenuJour, PlatsDuJour};
pub use proposition::{MenuProposition, StatutProposition};
pub use restaurant::{Horaires, Restaurant};
pub use scan::{StatutScan, ValidationScan};
pub use stats::{CompteurTickets, RapportExport, Statistiques, TopPlat, VentesMois};
pub use ticket::{
    MoyenPaiement, TicketBalance, TicketKind, TicketPurchase, TicketShare, montant_achat,
    PRIX_NDEKKI, PRIX_REPAS,
};
pub use user::{Role, User};

/// Generate a fresh entity identifier.
pub fn new_id() -> String {
    ulid::Ulid::new().to_string().to_lowercase()
}
