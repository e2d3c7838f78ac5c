//! Ticket types, balances and the purchase/share records.
//!
//! Prices are fixed campus-wide: a ndekki (breakfast) ticket costs 50 F CFA,
//! a repas (lunch/dinner) ticket 100 F CFA.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Error;

pub const PRIX_NDEKKI: u64 = 50;
pub const PRIX_REPAS: u64 = 100;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketKind {
    Ndekki,
    Repas,
}

impl TicketKind {
    pub fn prix_unitaire(&self) -> u64 {
        match self {
            TicketKind::Ndekki => PRIX_NDEKKI,
            TicketKind::Repas => PRIX_REPAS,
        }
    }

    pub fn libelle(&self) -> &'static str {
        match self {
            TicketKind::Ndekki => "Ndekki",
            TicketKind::Repas => "Repas",
        }
    }
}

/// Total cost of a purchase, per-type subtotals summed.
pub fn montant_achat(ndekki: u32, repas: u32) -> u64 {
    u64::from(ndekki) * PRIX_NDEKKI + u64::from(repas) * PRIX_REPAS
}

/// A student's ticket balance, one counter per ticket type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketBalance {
    pub ndekki: u32,
    pub repas: u32,
}

impl TicketBalance {
    pub fn new(ndekki: u32, repas: u32) -> Self {
        Self { ndekki, repas }
    }

    pub fn total(&self) -> u32 {
        self.ndekki + self.repas
    }

    /// Face value of the balance at current prices.
    pub fn valeur(&self) -> u64 {
        montant_achat(self.ndekki, self.repas)
    }

    pub fn disponible(&self, kind: TicketKind) -> u32 {
        match kind {
            TicketKind::Ndekki => self.ndekki,
            TicketKind::Repas => self.repas,
        }
    }

    pub fn crediter(&mut self, ndekki: u32, repas: u32) {
        self.ndekki += ndekki;
        self.repas += repas;
    }

    /// Checked debit. Fails without touching either counter when any type
    /// would go negative.
    pub fn debiter(&mut self, ndekki: u32, repas: u32) -> Result<(), Error> {
        if ndekki > self.ndekki {
            return Err(Error::InsufficientTickets {
                kind: TicketKind::Ndekki,
                demande: ndekki,
                disponible: self.ndekki,
            });
        }
        if repas > self.repas {
            return Err(Error::InsufficientTickets {
                kind: TicketKind::Repas,
                demande: repas,
                disponible: self.repas,
            });
        }
        self.ndekki -= ndekki;
        self.repas -= repas;
        Ok(())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MoyenPaiement {
    Wave,
    OrangeMoney,
}

impl MoyenPaiement {
    pub fn libelle(&self) -> &'static str {
        match self {
            MoyenPaiement::Wave => "Wave",
            MoyenPaiement::OrangeMoney => "Orange Money",
        }
    }
}

/// A recorded ticket purchase. Statistics aggregate over these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPurchase {
    pub id: String,
    pub etudiant_id: String,
    pub nombre_ndekki: u32,
    pub nombre_repas: u32,
    pub montant: u64,
    pub moyen_paiement: MoyenPaiement,
    pub date: DateTime<Utc>,
}

/// A recorded ticket transfer between two students. The recipient is a real
/// user record, never free text, so both balances move together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketShare {
    pub id: String,
    pub expediteur_id: String,
    pub destinataire_id: String,
    pub destinataire_nom: String,
    pub nombre_ndekki: u32,
    pub nombre_repas: u32,
    pub date: DateTime<Utc>,
}
