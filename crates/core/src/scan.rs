use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::ticket::TicketKind;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatutScan {
    Valide,
    Invalide,
}

/// One entry of the validation-agent scan history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationScan {
    pub id: String,
    pub etudiant_nom: String,
    pub numero_etudiant: String,
    pub type_ticket: TicketKind,
    pub nombre: u32,
    pub date_heure: DateTime<Utc>,
    pub statut: StatutScan,
    /// Why the scan was rejected, when it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motif_refus: Option<String>,
}

impl ValidationScan {
    pub fn est_valide(&self) -> bool {
        self.statut == StatutScan::Valide
    }
}
