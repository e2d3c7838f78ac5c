//! Buy tickets: fixed unit prices, simulated mobile-money charge, balance
//! credit on success.

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::{info, warn};

use espeat_core::{MoyenPaiement, Role, TicketBalance, montant_achat, PRIX_NDEKKI, PRIX_REPAS};
use espeat_gateway::{PaymentGateway, PaymentRequest};
use espeat_store::{PurchaseRepository, UserRepository};

use super::super::{AppState, exiger_role, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/tickets/acheter.html")]
struct AcheterTemplate {
    user: SessionUser,
    solde: TicketBalance,
    prix_ndekki: u64,
    prix_repas: u64,
    erreur: Option<String>,
    succes: Option<String>,
}

#[derive(Deserialize)]
pub struct AchatForm {
    #[serde(default)]
    nombre_ndekki: u32,
    #[serde(default)]
    nombre_repas: u32,
    #[serde(default)]
    moyen_paiement: String,
    #[serde(default)]
    telephone: String,
}

async fn solde_de(state: &AppState, user_id: &str) -> TicketBalance {
    state
        .store
        .get_user(user_id)
        .await
        .and_then(|u| u.tickets)
        .unwrap_or_default()
}

fn rendre(
    user: SessionUser,
    solde: TicketBalance,
    erreur: Option<String>,
    succes: Option<String>,
) -> Response {
    render_template(AcheterTemplate {
        user,
        solde,
        prix_ndekki: PRIX_NDEKKI,
        prix_repas: PRIX_REPAS,
        erreur,
        succes,
    })
}

/// GET /acheter-tickets
pub async fn page(State(state): State<AppState>, Extension(user): Extension<SessionUser>) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Etudiant) {
        return reponse;
    }
    let solde = solde_de(&state, &user.id).await;
    rendre(user, solde, None, None)
}

/// POST /acheter-tickets
pub async fn action(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<AchatForm>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Etudiant) {
        return reponse;
    }

    let solde = solde_de(&state, &user.id).await;

    let moyen = match form.moyen_paiement.parse::<MoyenPaiement>() {
        Ok(moyen) => moyen,
        Err(_) => {
            return rendre(
                user,
                solde,
                Some("Veuillez sélectionner un moyen de paiement".to_string()),
                None,
            );
        }
    };
    if form.telephone.trim().is_empty() {
        return rendre(
            user,
            solde,
            Some("Veuillez saisir votre numéro de téléphone".to_string()),
            None,
        );
    }
    if form.nombre_ndekki + form.nombre_repas == 0 {
        return rendre(
            user,
            solde,
            Some("Veuillez sélectionner au moins un ticket".to_string()),
            None,
        );
    }

    let montant = montant_achat(form.nombre_ndekki, form.nombre_repas);
    let demande = PaymentRequest {
        moyen,
        telephone: form.telephone.trim().to_string(),
        montant,
    };

    let recu = match state.paiement.charge(demande).await {
        Ok(recu) => recu,
        Err(err) => {
            warn!(user_id = %user.id, erreur = %err, "paiement refusé");
            return rendre(
                user,
                solde,
                Some(format!("Le paiement a échoué : {err}")),
                None,
            );
        }
    };

    let (achat, nouveau_solde) = match state
        .store
        .enregistrer_achat(&user.id, form.nombre_ndekki, form.nombre_repas, moyen)
        .await
    {
        Ok(resultat) => resultat,
        Err(err) => {
            warn!(user_id = %user.id, erreur = %err, "achat non enregistré");
            return rendre(user, solde, Some(err.to_string()), None);
        }
    };

    info!(
        user_id = %user.id,
        transaction = %recu.transaction_id,
        montant = achat.montant,
        "achat de tickets confirmé"
    );

    // the form resets: fresh page with the new balance and a confirmation
    let message = format!(
        "Achat réussi ! {} ticket(s) Ndekki et {} ticket(s) Repas pour {} F CFA",
        form.nombre_ndekki, form.nombre_repas, achat.montant
    );
    rendre(user, nouveau_solde, None, Some(message))
}
