//! Manager statistics: aggregates over the recorded purchases, scans and
//! menus, plus the JSON export artifact.

use askama::Template;
use axum::{
    Extension,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use espeat_core::{Role, Statistiques, TopPlat, VentesMois};
use espeat_store::StatsQuery;

use super::{AppState, exiger_role, render_template};
use crate::auth::SessionUser;
use crate::error::AppError;

const PERIODES: [&str; 3] = ["journalier", "mensuel", "annuel"];

#[derive(Template)]
#[template(path = "pages/statistiques.html")]
struct StatistiquesTemplate {
    user: SessionUser,
    periode: String,
    stats: Statistiques,
    ventes: Vec<VentesMois>,
    top_plats: Vec<TopPlat>,
}

#[derive(Deserialize)]
pub struct PeriodeQuery {
    #[serde(default)]
    periode: Option<String>,
}

fn periode_valide(periode: Option<String>) -> String {
    match periode {
        Some(p) if PERIODES.contains(&p.as_str()) => p,
        _ => "mensuel".to_string(),
    }
}

/// GET /statistiques
pub async fn page(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<PeriodeQuery>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Gerant) {
        return reponse;
    }

    let stats = state.store.statistiques(Utc::now()).await;
    let ventes = state.store.ventes_par_mois().await;
    let top_plats = state.store.top_plats(5).await;

    render_template(StatistiquesTemplate {
        user,
        periode: periode_valide(query.periode),
        stats,
        ventes,
        top_plats,
    })
}

/// GET /statistiques/export - download the report as a JSON attachment
pub async fn export(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<PeriodeQuery>,
) -> Result<Response, AppError> {
    if let Err(reponse) = exiger_role(&user, Role::Gerant) {
        return Ok(reponse);
    }

    let periode = periode_valide(query.periode);
    let maintenant = Utc::now();
    let rapport = state.store.rapport(&periode, maintenant).await;

    let corps = serde_json::to_string_pretty(&rapport)
        .map_err(|e| AppError::Internal(e.into()))?;
    let nom_fichier = format!(
        "statistiques-{periode}-{}.json",
        maintenant.date_naive()
    );

    info!(gerant = %user.id, periode = %periode, "export des statistiques");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{nom_fichier}\""),
            ),
        ],
        corps,
    )
        .into_response())
}
