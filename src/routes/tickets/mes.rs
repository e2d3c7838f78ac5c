//! My tickets: balance, face value and history.

use askama::Template;
use axum::{Extension, extract::State, response::Response};

use espeat_core::{Role, TicketBalance, TicketPurchase, TicketShare};
use espeat_store::{PurchaseRepository, ShareRepository, UserRepository};

use super::super::{AppState, exiger_role, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/tickets/mes.html")]
struct MesTicketsTemplate {
    user: SessionUser,
    solde: TicketBalance,
    valeur: u64,
    achats: Vec<TicketPurchase>,
    partages: Vec<TicketShare>,
}

/// GET /mes-tickets
pub async fn page(State(state): State<AppState>, Extension(user): Extension<SessionUser>) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Etudiant) {
        return reponse;
    }

    let solde = state
        .store
        .get_user(&user.id)
        .await
        .and_then(|u| u.tickets)
        .unwrap_or_default();

    let mut achats = state.store.achats_de(&user.id).await;
    achats.sort_by(|a, b| b.date.cmp(&a.date));

    let mut partages = state.store.partages_envoyes_par(&user.id).await;
    partages.sort_by(|a, b| b.date.cmp(&a.date));

    render_template(MesTicketsTemplate {
        user,
        valeur: solde.valeur(),
        solde,
        achats,
        partages,
    })
}
