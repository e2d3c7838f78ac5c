use thiserror::Error;

use crate::ticket::TicketKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("tickets {kind} insuffisants: demandé {demande}, disponible {disponible}")]
    InsufficientTickets {
        kind: TicketKind,
        demande: u32,
        disponible: u32,
    },

    #[error("un compte avec cet email existe déjà: {0}")]
    DuplicateEmail(String),

    #[error("utilisateur introuvable: {0}")]
    UserNotFound(String),

    #[error("numéro étudiant inconnu: {0}")]
    StudentNumberNotFound(String),

    #[error("seuls les étudiants disposent d'un solde de tickets")]
    NotAStudent,

    #[error("menu introuvable: {0}")]
    MenuNotFound(String),

    #[error("proposition introuvable: {0}")]
    PropositionNotFound(String),

    #[error("restaurant introuvable: {0}")]
    RestaurantNotFound(String),

    #[error("{0}")]
    Validation(String),
}

impl Error {
    /// Validation failures are surfaced to the form; everything else is a
    /// lookup failure the caller decides how to render.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::InsufficientTickets { .. } | Error::DuplicateEmail(_)
        )
    }
}
