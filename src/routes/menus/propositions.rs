//! Review of student propositions by the restaurant operator.

use askama::Template;
use axum::{
    Extension,
    extract::{Path, Query, State},
    response::Response,
};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::{info, warn};

use espeat_core::{MenuProposition, Role, StatutProposition};
use espeat_store::PropositionRepository;

use super::super::{AppState, exiger_role, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/menus/propositions.html")]
struct PropositionsTemplate {
    user: SessionUser,
    propositions: Vec<MenuProposition>,
    filtre: String,
    total: usize,
    en_attente: usize,
    acceptees: usize,
    refusees: usize,
    succes: Option<String>,
}

#[derive(Deserialize)]
pub struct FiltreQuery {
    #[serde(default)]
    statut: Option<String>,
}

#[derive(Deserialize)]
pub struct ReponseForm {
    #[serde(default)]
    reponse: String,
}

async fn rendre(
    state: &AppState,
    user: SessionUser,
    filtre: String,
    succes: Option<String>,
) -> Response {
    let toutes = state.store.list_propositions().await;

    let total = toutes.len();
    let en_attente = toutes.iter().filter(|p| p.statut == StatutProposition::EnAttente).count();
    let acceptees = toutes.iter().filter(|p| p.statut == StatutProposition::Accepte).count();
    let refusees = toutes.iter().filter(|p| p.statut == StatutProposition::Refuse).count();

    let propositions = match filtre.parse::<StatutProposition>() {
        Ok(statut) => toutes.into_iter().filter(|p| p.statut == statut).collect(),
        Err(_) => toutes,
    };

    render_template(PropositionsTemplate {
        user,
        propositions,
        filtre,
        total,
        en_attente,
        acceptees,
        refusees,
        succes,
    })
}

/// GET /propositions-menus
pub async fn page(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<FiltreQuery>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Restaurateur) {
        return reponse;
    }
    let filtre = query.statut.unwrap_or_else(|| "toutes".to_string());
    rendre(&state, user, filtre, None).await
}

async fn repondre(
    state: AppState,
    user: SessionUser,
    id: String,
    statut: StatutProposition,
    reponse: String,
    defaut: &str,
) -> Response {
    if let Err(reponse_http) = exiger_role(&user, Role::Restaurateur) {
        return reponse_http;
    }

    let reponse = if reponse.trim().is_empty() {
        defaut.to_string()
    } else {
        reponse.trim().to_string()
    };

    match state
        .store
        .repondre_proposition(&id, statut, Some(reponse))
        .await
    {
        Ok(traitee) => {
            info!(proposition = %traitee.id, statut = %traitee.statut, "proposition traitée");
            rendre(
                &state,
                user,
                "toutes".to_string(),
                Some(format!("Proposition {}", traitee.statut.libelle().to_lowercase())),
            )
            .await
        }
        Err(err) => {
            warn!(proposition = %id, erreur = %err, "réponse impossible");
            rendre(&state, user, "toutes".to_string(), Some(err.to_string())).await
        }
    }
}

/// POST /propositions-menus/{id}/accepter
pub async fn accepter(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
    Form(form): Form<ReponseForm>,
) -> Response {
    repondre(
        state,
        user,
        id,
        StatutProposition::Accepte,
        form.reponse,
        "Proposition acceptée !",
    )
    .await
}

/// POST /propositions-menus/{id}/refuser
pub async fn refuser(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
    Form(form): Form<ReponseForm>,
) -> Response {
    repondre(
        state,
        user,
        id,
        StatutProposition::Refuse,
        form.reponse,
        "Proposition refusée.",
    )
    .await
}
