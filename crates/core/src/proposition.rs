use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::ticket::TicketKind;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatutProposition {
    EnAttente,
    Accepte,
    Refuse,
}

impl StatutProposition {
    pub fn libelle(&self) -> &'static str {
        match self {
            StatutProposition::EnAttente => "En attente",
            StatutProposition::Accepte => "Acceptée",
            StatutProposition::Refuse => "Refusée",
        }
    }
}

/// A student menu suggestion, reviewed by the restaurant operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuProposition {
    pub id: String,
    pub etudiant_id: String,
    pub etudiant_nom: String,
    pub restaurant_id: String,
    pub type_menu: TicketKind,
    pub proposition: String,
    pub date: NaiveDate,
    pub statut: StatutProposition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reponse_restaurateur: Option<String>,
}

impl MenuProposition {
    pub fn en_attente(&self) -> bool {
        self.statut == StatutProposition::EnAttente
    }
}
