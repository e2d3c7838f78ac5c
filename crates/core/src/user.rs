use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::ticket::TicketBalance;

/// The four account roles. Navigation and page access branch on this.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Etudiant,
    Agent,
    Gerant,
    Restaurateur,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Etudiant, Role::Agent, Role::Gerant, Role::Restaurateur];

    pub fn libelle(&self) -> &'static str {
        match self {
            Role::Etudiant => "Étudiant",
            Role::Agent => "Agent de validation",
            Role::Gerant => "Gérant",
            Role::Restaurateur => "Restaurateur",
        }
    }

    pub fn is_etudiant(&self) -> bool {
        matches!(self, Role::Etudiant)
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, Role::Agent)
    }

    pub fn is_gerant(&self) -> bool {
        matches!(self, Role::Gerant)
    }

    pub fn is_restaurateur(&self) -> bool {
        matches!(self, Role::Restaurateur)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_etudiant: Option<String>,
    /// `Some` for students only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<TicketBalance>,
}

impl User {
    /// Build a new account. Students start with an empty ticket balance,
    /// other roles carry none at all.
    pub fn nouveau(
        nom: impl Into<String>,
        prenom: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        numero_etudiant: Option<String>,
    ) -> Self {
        User {
            id: crate::new_id(),
            nom: nom.into(),
            prenom: prenom.into(),
            email: email.into(),
            role,
            numero_etudiant,
            tickets: role.is_etudiant().then(TicketBalance::default),
        }
    }

    pub fn nom_complet(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }

    pub fn solde(&self) -> TicketBalance {
        self.tickets.unwrap_or_default()
    }
}
