//! User administration for the manager: list, filter, create, edit, delete.

use askama::Template;
use axum::{
    Extension,
    extract::{Path, Query, State},
    response::Response,
};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use espeat_core::{Role, User};
use espeat_store::{UserPatch, UserRepository};

use super::{AppState, exiger_role, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/admin/utilisateurs.html")]
struct UtilisateursTemplate {
    user: SessionUser,
    utilisateurs: Vec<User>,
    filtre_role: String,
    total: usize,
    etudiants: usize,
    agents: usize,
    gerants: usize,
    restaurateurs: usize,
    erreur: Option<String>,
    succes: Option<String>,
}

#[derive(Deserialize)]
pub struct FiltreQuery {
    #[serde(default)]
    role: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct UtilisateurForm {
    #[validate(length(min = 1, message = "le nom est obligatoire"))]
    nom: String,
    #[validate(length(min = 1, message = "le prénom est obligatoire"))]
    prenom: String,
    #[validate(email(message = "adresse email invalide"))]
    email: String,
    role: Role,
    #[serde(default)]
    numero_etudiant: String,
}

async fn rendre(
    state: &AppState,
    user: SessionUser,
    filtre_role: String,
    erreur: Option<String>,
    succes: Option<String>,
) -> Response {
    let tous = state.store.list_users().await;

    let compte = |role: Role| tous.iter().filter(|u| u.role == role).count();
    let total = tous.len();
    let etudiants = compte(Role::Etudiant);
    let agents = compte(Role::Agent);
    let gerants = compte(Role::Gerant);
    let restaurateurs = compte(Role::Restaurateur);

    let utilisateurs = match filtre_role.parse::<Role>() {
        Ok(role) => tous.into_iter().filter(|u| u.role == role).collect(),
        Err(_) => tous,
    };

    render_template(UtilisateursTemplate {
        user,
        utilisateurs,
        filtre_role,
        total,
        etudiants,
        agents,
        gerants,
        restaurateurs,
        erreur,
        succes,
    })
}

/// GET /gestion-utilisateurs
pub async fn page(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<FiltreQuery>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Gerant) {
        return reponse;
    }
    let filtre = query.role.unwrap_or_else(|| "tous".to_string());
    rendre(&state, user, filtre, None, None).await
}

/// POST /gestion-utilisateurs
pub async fn creer(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<UtilisateurForm>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Gerant) {
        return reponse;
    }

    if let Err(erreurs) = form.validate() {
        return rendre(&state, user, "tous".to_string(), Some(erreurs.to_string()), None).await;
    }

    let numero = (!form.numero_etudiant.trim().is_empty())
        .then(|| form.numero_etudiant.trim().to_string());
    let nouveau = User::nouveau(form.nom, form.prenom, form.email, form.role, numero);

    match state.store.create_user(nouveau).await {
        Ok(cree) => {
            info!(gerant = %user.id, cree = %cree.id, "compte créé par le gérant");
            rendre(
                &state,
                user,
                "tous".to_string(),
                None,
                Some(format!("Le compte de {} a été créé", cree.nom_complet())),
            )
            .await
        }
        Err(err) => {
            warn!(gerant = %user.id, erreur = %err, "création de compte refusée");
            rendre(&state, user, "tous".to_string(), Some(err.to_string()), None).await
        }
    }
}

/// POST /gestion-utilisateurs/{id}/modifier
pub async fn modifier(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
    Form(form): Form<UtilisateurForm>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Gerant) {
        return reponse;
    }

    if let Err(erreurs) = form.validate() {
        return rendre(&state, user, "tous".to_string(), Some(erreurs.to_string()), None).await;
    }

    let patch = UserPatch {
        nom: Some(form.nom),
        prenom: Some(form.prenom),
        email: Some(form.email),
        role: Some(form.role),
        numero_etudiant: Some(form.numero_etudiant.trim().to_string()),
    };

    match state.store.update_user(&id, patch).await {
        Ok(modifie) => {
            info!(gerant = %user.id, modifie = %modifie.id, "compte mis à jour");
            rendre(
                &state,
                user,
                "tous".to_string(),
                None,
                Some(format!("Le compte de {} a été mis à jour", modifie.nom_complet())),
            )
            .await
        }
        Err(err) => {
            warn!(gerant = %user.id, erreur = %err, "mise à jour de compte refusée");
            rendre(&state, user, "tous".to_string(), Some(err.to_string()), None).await
        }
    }
}

/// POST /gestion-utilisateurs/{id}/supprimer
pub async fn supprimer(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Gerant) {
        return reponse;
    }

    if id == user.id {
        return rendre(
            &state,
            user,
            "tous".to_string(),
            Some("Impossible de supprimer votre propre compte".to_string()),
            None,
        )
        .await;
    }

    match state.store.delete_user(&id).await {
        Ok(supprime) => {
            info!(gerant = %user.id, supprime = %supprime.id, "compte supprimé");
            rendre(
                &state,
                user,
                "tous".to_string(),
                None,
                Some(format!("Le compte de {} a été supprimé", supprime.nom_complet())),
            )
            .await
        }
        Err(err) => {
            rendre(&state, user, "tous".to_string(), Some(err.to_string()), None).await
        }
    }
}
