//! Profile page: view and edit the current account.

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use espeat_core::User;
use espeat_store::{UserPatch, UserRepository};

use super::{AppState, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/profil.html")]
struct ProfilTemplate {
    user: SessionUser,
    compte: User,
    erreur: Option<String>,
    succes: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct ProfilForm {
    #[validate(length(min = 1, message = "le nom est obligatoire"))]
    nom: String,
    #[validate(length(min = 1, message = "le prénom est obligatoire"))]
    prenom: String,
    #[validate(email(message = "adresse email invalide"))]
    email: String,
    #[serde(default)]
    numero_etudiant: String,
}

async fn compte_courant(state: &AppState, user: &SessionUser) -> User {
    match state.store.get_user(&user.id).await {
        Some(compte) => compte,
        // the middleware checked existence; fall back to session data
        None => User {
            id: user.id.clone(),
            nom: user.nom.clone(),
            prenom: user.prenom.clone(),
            email: user.email.clone(),
            role: user.role,
            numero_etudiant: None,
            tickets: None,
        },
    }
}

/// GET /profil
pub async fn page(State(state): State<AppState>, Extension(user): Extension<SessionUser>) -> Response {
    let compte = compte_courant(&state, &user).await;
    render_template(ProfilTemplate {
        user,
        compte,
        erreur: None,
        succes: None,
    })
}

/// POST /profil
pub async fn action(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<ProfilForm>,
) -> Response {
    if let Err(erreurs) = form.validate() {
        let compte = compte_courant(&state, &user).await;
        return render_template(ProfilTemplate {
            user,
            compte,
            erreur: Some(erreurs.to_string()),
            succes: None,
        });
    }

    let patch = UserPatch {
        nom: Some(form.nom),
        prenom: Some(form.prenom),
        email: Some(form.email),
        role: None,
        numero_etudiant: Some(form.numero_etudiant.trim().to_string()),
    };

    match state.store.update_user(&user.id, patch).await {
        Ok(compte) => {
            info!(user_id = %user.id, "profil mis à jour");
            // the sidebar shows the fresh identity right away
            let user = SessionUser::from(compte.clone());
            render_template(ProfilTemplate {
                user,
                compte,
                erreur: None,
                succes: Some("Profil mis à jour avec succès".to_string()),
            })
        }
        Err(err) => {
            warn!(user_id = %user.id, erreur = %err, "mise à jour du profil refusée");
            let compte = compte_courant(&state, &user).await;
            render_template(ProfilTemplate {
                user,
                compte,
                erreur: Some(err.to_string()),
                succes: None,
            })
        }
    }
}
