//! Share tickets with another student. The recipient is picked from the
//! student list and resolved by id, so the credit lands on a real balance.

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::{info, warn};

use espeat_core::{Role, TicketBalance, User};
use espeat_store::{ShareRepository, UserRepository};

use super::super::{AppState, exiger_role, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/tickets/partager.html")]
struct PartagerTemplate {
    user: SessionUser,
    solde: TicketBalance,
    etudiants: Vec<User>,
    erreur: Option<String>,
    succes: Option<String>,
}

#[derive(Deserialize)]
pub struct PartageForm {
    #[serde(default)]
    destinataire: String,
    #[serde(default)]
    nombre_ndekki: u32,
    #[serde(default)]
    nombre_repas: u32,
}

struct Contexte {
    solde: TicketBalance,
    etudiants: Vec<User>,
}

/// Other students, the only valid recipients.
async fn contexte(state: &AppState, user_id: &str) -> Contexte {
    let solde = state
        .store
        .get_user(user_id)
        .await
        .and_then(|u| u.tickets)
        .unwrap_or_default();

    let etudiants = state
        .store
        .list_users()
        .await
        .into_iter()
        .filter(|u| u.role.is_etudiant() && u.id != user_id)
        .collect();

    Contexte { solde, etudiants }
}

fn rendre(
    user: SessionUser,
    contexte: Contexte,
    erreur: Option<String>,
    succes: Option<String>,
) -> Response {
    render_template(PartagerTemplate {
        user,
        solde: contexte.solde,
        etudiants: contexte.etudiants,
        erreur,
        succes,
    })
}

/// GET /partager-tickets
pub async fn page(State(state): State<AppState>, Extension(user): Extension<SessionUser>) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Etudiant) {
        return reponse;
    }
    let ctx = contexte(&state, &user.id).await;
    rendre(user, ctx, None, None)
}

/// POST /partager-tickets
pub async fn action(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<PartageForm>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Etudiant) {
        return reponse;
    }

    if form.destinataire.is_empty() {
        let ctx = contexte(&state, &user.id).await;
        return rendre(
            user,
            ctx,
            Some("Veuillez sélectionner un destinataire".to_string()),
            None,
        );
    }

    match state
        .store
        .transferer_tickets(&user.id, &form.destinataire, form.nombre_ndekki, form.nombre_repas)
        .await
    {
        Ok(partage) => {
            info!(
                user_id = %user.id,
                destinataire = %partage.destinataire_id,
                "tickets partagés"
            );
            let message = format!(
                "Vous avez partagé {} ticket(s) Ndekki et {} ticket(s) Repas avec {}",
                partage.nombre_ndekki, partage.nombre_repas, partage.destinataire_nom
            );
            let ctx = contexte(&state, &user.id).await;
            rendre(user, ctx, None, Some(message))
        }
        Err(err) => {
            warn!(user_id = %user.id, erreur = %err, "partage refusé");
            let ctx = contexte(&state, &user.id).await;
            rendre(user, ctx, Some(err.to_string()), None)
        }
    }
}
