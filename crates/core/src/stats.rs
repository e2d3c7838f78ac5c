//! Statistics view models. These are computed from the recorded purchases,
//! scans and menus, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ticket::TicketKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompteurTickets {
    pub ndekki: u32,
    pub repas: u32,
}

impl CompteurTickets {
    pub fn total(&self) -> u32 {
        self.ndekki + self.repas
    }

    pub fn ajouter(&mut self, kind: TicketKind, nombre: u32) {
        match kind {
            TicketKind::Ndekki => self.ndekki += nombre,
            TicketKind::Repas => self.repas += nombre,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistiques {
    pub recette_journaliere: u64,
    pub recette_mensuelle: u64,
    pub recette_annuelle: u64,
    pub tickets_vendus: CompteurTickets,
    pub tickets_utilises: CompteurTickets,
}

/// Sales totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VentesMois {
    pub mois: String,
    pub ndekki: u32,
    pub repas: u32,
    pub recette: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPlat {
    pub nom: String,
    pub commandes: u32,
    #[serde(rename = "type")]
    pub type_ticket: TicketKind,
}

/// The downloadable statistics artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RapportExport {
    pub periode: String,
    pub date: DateTime<Utc>,
    pub statistiques: Statistiques,
    pub ventes_par_mois: Vec<VentesMois>,
    pub top_plats: Vec<TopPlat>,
}
