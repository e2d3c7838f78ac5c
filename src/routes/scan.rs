//! QR validation desk for agents: simulated decode, real balance check.

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::info;

use espeat_core::{Role, ValidationScan};
use espeat_gateway::ScannerGateway;
use espeat_store::ScanRepository;

use super::{AppState, exiger_role, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/scanner.html")]
struct ScannerTemplate {
    user: SessionUser,
    historique: Vec<ValidationScan>,
    valides: usize,
    invalides: usize,
    dernier: Option<ValidationScan>,
}

#[derive(Deserialize)]
pub struct ScanForm {
    /// Empty when the camera button was used.
    #[serde(default)]
    numero_etudiant: String,
}

async fn rendre(state: &AppState, user: SessionUser, dernier: Option<ValidationScan>) -> Response {
    let historique = state.store.list_scans().await;
    let valides = historique.iter().filter(|s| s.est_valide()).count();
    render_template(ScannerTemplate {
        user,
        invalides: historique.len() - valides,
        valides,
        historique,
        dernier,
    })
}

/// GET /scanner-qr
pub async fn page(State(state): State<AppState>, Extension(user): Extension<SessionUser>) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Agent) {
        return reponse;
    }
    rendre(&state, user, None).await
}

/// POST /scanner-qr
pub async fn action(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<ScanForm>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Agent) {
        return reponse;
    }

    let numero_manuel = {
        let saisi = form.numero_etudiant.trim();
        (!saisi.is_empty()).then(|| saisi.to_string())
    };

    // decode first (simulated camera), then check for real
    let decode = state.scanner.scan(numero_manuel).await;
    let scan = state
        .store
        .valider_ticket(&decode.numero_etudiant, decode.type_ticket, decode.nombre)
        .await;

    info!(
        agent = %user.id,
        numero = %scan.numero_etudiant,
        statut = %scan.statut,
        "ticket scanné"
    );

    rendre(&state, user, Some(scan)).await
}
