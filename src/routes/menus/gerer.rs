//! Menu management for the restaurant operator: create, edit, delete, with
//! menus partitioned into today / upcoming / past.

use askama::Template;
use axum::{
    Extension,
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::Form;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use espeat_core::{Menu, MenuJour, PlatsDuJour, Role};
use espeat_store::MenuRepository;

use super::super::{AppState, exiger_role, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/menus/gerer.html")]
struct GererMenusTemplate {
    user: SessionUser,
    aujourd_hui: Vec<Menu>,
    a_venir: Vec<Menu>,
    passes: Vec<Menu>,
    erreur: Option<String>,
    succes: Option<String>,
}

#[derive(Deserialize)]
pub struct MenuForm {
    #[serde(default)]
    date: String,
    /// One dish per line in the form textarea.
    #[serde(default)]
    ndekki: String,
    #[serde(default)]
    repas: String,
    #[serde(default)]
    restaurant_id: String,
}

fn lignes(champ: &str) -> Vec<String> {
    champ
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

impl MenuForm {
    fn parse(&self) -> Result<(NaiveDate, PlatsDuJour), String> {
        let obligatoires = "Veuillez remplir tous les champs obligatoires".to_string();
        let date = self
            .date
            .parse::<NaiveDate>()
            .map_err(|_| obligatoires.clone())?;
        let plats = PlatsDuJour {
            ndekki: lignes(&self.ndekki),
            repas: lignes(&self.repas),
        };
        if plats.ndekki.is_empty() || plats.repas.is_empty() {
            return Err(obligatoires);
        }
        Ok((date, plats))
    }
}

async fn rendre(
    state: &AppState,
    user: SessionUser,
    erreur: Option<String>,
    succes: Option<String>,
) -> Response {
    let aujourdhui = Utc::now().date_naive();
    let mut menus = state.store.list_menus().await;
    menus.sort_by_key(|m| m.date);

    let mut aujourd_hui = Vec::new();
    let mut a_venir = Vec::new();
    let mut passes = Vec::new();
    for menu in menus {
        match menu.jour(aujourdhui) {
            MenuJour::Aujourdhui => aujourd_hui.push(menu),
            MenuJour::AVenir => a_venir.push(menu),
            MenuJour::Passe => passes.push(menu),
        }
    }
    // past menus read best newest first
    passes.reverse();

    render_template(GererMenusTemplate {
        user,
        aujourd_hui,
        a_venir,
        passes,
        erreur,
        succes,
    })
}

/// GET /gerer-menus
pub async fn page(State(state): State<AppState>, Extension(user): Extension<SessionUser>) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Restaurateur) {
        return reponse;
    }
    rendre(&state, user, None, None).await
}

/// POST /gerer-menus
pub async fn creer(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<MenuForm>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Restaurateur) {
        return reponse;
    }

    let (date, plats) = match form.parse() {
        Ok(valide) => valide,
        Err(message) => return rendre(&state, user, Some(message), None).await,
    };

    let menu = Menu {
        id: espeat_core::new_id(),
        date,
        plats,
        restaurant_id: if form.restaurant_id.is_empty() {
            "resto1".to_string()
        } else {
            form.restaurant_id
        },
    };

    match state.store.create_menu(menu).await {
        Ok(cree) => {
            info!(menu = %cree.id, date = %cree.date, "menu créé");
            rendre(&state, user, None, Some("Le nouveau menu a été ajouté".to_string())).await
        }
        Err(err) => {
            warn!(erreur = %err, "création de menu refusée");
            rendre(&state, user, Some(err.to_string()), None).await
        }
    }
}

/// POST /gerer-menus/{id}/modifier
pub async fn modifier(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
    Form(form): Form<MenuForm>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Restaurateur) {
        return reponse;
    }

    let (date, plats) = match form.parse() {
        Ok(valide) => valide,
        Err(message) => return rendre(&state, user, Some(message), None).await,
    };

    match state.store.update_menu(&id, date, plats).await {
        Ok(_) => {
            info!(menu = %id, "menu mis à jour");
            rendre(&state, user, None, Some("Le menu a été mis à jour".to_string())).await
        }
        Err(err) => {
            warn!(menu = %id, erreur = %err, "mise à jour de menu refusée");
            rendre(&state, user, Some(err.to_string()), None).await
        }
    }
}

/// POST /gerer-menus/{id}/supprimer
pub async fn supprimer(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<String>,
) -> Response {
    if let Err(reponse) = exiger_role(&user, Role::Restaurateur) {
        return reponse;
    }

    match state.store.delete_menu(&id).await {
        Ok(_) => {
            info!(menu = %id, "menu supprimé");
            rendre(&state, user, None, Some("Le menu a été supprimé".to_string())).await
        }
        Err(err) => rendre(&state, user, Some(err.to_string()), None).await,
    }
}
