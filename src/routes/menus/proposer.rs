//! Student menu propositions: submit one, follow its status.

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use axum_extra::extract::Form;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use espeat_core::{MenuProposition, Restaurant, Role, StatutProposition, TicketKind};
use espeat_store::{PropositionRepository, RestaurantRepository};

use super::super::{AppState, exiger_role, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/menus/proposer.html")]
struct ProposerTemplate {
    user: SessionUser,
    restaurants: Vec<Restaurant>,
    mes_propositions: Vec<MenuProposition>,
    erreur: Option<String>,
    succes: Option<String>,
}

#[derive(Deserialize)]
pub struct PropositionForm {
    #[serde(default)]
    restaurant_id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    type_menu: String,
    #[serde(default)]
    proposition: String,
}

async fn rendre(
    state: &AppState,
    user: SessionUser,
    erreur: Option<String>,
    succes: Option<String>,
) -> Response {
    let restaurants = state.store.list_restaurants().await;
    let mut mes_propositions = state.store.propositions_de(&user.id).await;
    mes_propositions.sort_by(|a, b| b.date.cmp(&a.date));
    render_template(ProposerTemplate {
        user,
        restaurants,
        mes_propositions,
        erreur,
        succes,
    })
}

/// GET /proposer-menu
pub async fn page(State(state): State<AppState>, Extension(user): Extension<SessionUser>) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Etudiant) {
        return reponse;
    }
    rendre(&state, user, None, None).await
}

/// POST /proposer-menu
pub async fn action(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<PropositionForm>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Etudiant) {
        return reponse;
    }

    let champs_obligatoires = "Veuillez remplir tous les champs obligatoires".to_string();

    let Ok(type_menu) = form.type_menu.parse::<TicketKind>() else {
        return rendre(&state, user, Some(champs_obligatoires), None).await;
    };
    let Ok(date) = form.date.parse::<NaiveDate>() else {
        return rendre(&state, user, Some(champs_obligatoires), None).await;
    };
    if form.restaurant_id.is_empty() || form.proposition.trim().is_empty() {
        return rendre(&state, user, Some(champs_obligatoires), None).await;
    }

    let proposition = MenuProposition {
        id: espeat_core::new_id(),
        etudiant_id: user.id.clone(),
        etudiant_nom: user.nom_complet(),
        restaurant_id: form.restaurant_id,
        type_menu,
        proposition: form.proposition.trim().to_string(),
        date,
        statut: StatutProposition::EnAttente,
        reponse_restaurateur: None,
    };

    match state.store.create_proposition(proposition).await {
        Ok(creee) => {
            info!(user_id = %user.id, proposition = %creee.id, "proposition envoyée");
            rendre(
                &state,
                user,
                None,
                Some("Votre proposition a été transmise au restaurateur".to_string()),
            )
            .await
        }
        Err(err) => {
            warn!(user_id = %user.id, erreur = %err, "proposition refusée");
            rendre(&state, user, Some(err.to_string()), None).await
        }
    }
}
