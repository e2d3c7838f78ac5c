//! Route handlers, one module per page.

pub mod admin;
pub mod dashboard;
pub mod health;
pub mod login;
pub mod menus;
pub mod profile;
pub mod restaurants;
pub mod scan;
pub mod stats;
pub mod tickets;

use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    middleware as axum_middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};

use espeat_core::Role;
use espeat_gateway::{PaymentGateway, ScannerGateway};
use espeat_store::Store;

use crate::auth::SessionUser;
use crate::auth::middleware::auth_middleware;
use crate::config::Config;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub paiement: Arc<dyn PaymentGateway>,
    pub scanner: Arc<dyn ScannerGateway>,
}

/// Helper to render templates
pub(crate) fn render_template<T: Template>(t: T) -> Response {
    match t.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {}", e),
        )
            .into_response(),
    }
}

#[derive(Template)]
#[template(path = "pages/acces_restreint.html")]
struct AccesRestreintTemplate {
    user: SessionUser,
    role_requis: &'static str,
}

/// Every gated page checks its designated role and renders the full
/// "Accès restreint" state for anyone else.
pub(crate) fn exiger_role(user: &SessionUser, role: Role) -> Result<(), Response> {
    if user.role == role {
        return Ok(());
    }
    tracing::warn!(
        user_id = %user.id,
        role = %user.role,
        role_requis = %role,
        "accès refusé à une page réservée"
    );
    Err((
        StatusCode::FORBIDDEN,
        render_template(AccesRestreintTemplate {
            user: user.clone(),
            role_requis: role.libelle(),
        }),
    )
        .into_response())
}

#[derive(Template)]
#[template(path = "pages/404.html")]
struct NotFoundTemplate;

pub async fn fallback() -> Response {
    (StatusCode::NOT_FOUND, render_template(NotFoundTemplate)).into_response()
}

/// Create the application router
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(dashboard::page))
        .route("/dashboard", get(dashboard::page))
        .route(
            "/acheter-tickets",
            get(tickets::acheter::page).post(tickets::acheter::action),
        )
        .route("/mes-tickets", get(tickets::mes::page))
        .route(
            "/partager-tickets",
            get(tickets::partager::page).post(tickets::partager::action),
        )
        .route("/restaurants", get(restaurants::page))
        .route("/profil", get(profile::page).post(profile::action))
        .route(
            "/proposer-menu",
            get(menus::proposer::page).post(menus::proposer::action),
        )
        .route(
            "/gerer-menus",
            get(menus::gerer::page).post(menus::gerer::creer),
        )
        .route("/gerer-menus/{id}/modifier", post(menus::gerer::modifier))
        .route("/gerer-menus/{id}/supprimer", post(menus::gerer::supprimer))
        .route("/propositions-menus", get(menus::propositions::page))
        .route(
            "/propositions-menus/{id}/accepter",
            post(menus::propositions::accepter),
        )
        .route(
            "/propositions-menus/{id}/refuser",
            post(menus::propositions::refuser),
        )
        .route("/scanner-qr", get(scan::page).post(scan::action))
        .route("/statistiques", get(stats::page))
        .route("/statistiques/export", get(stats::export))
        .route(
            "/gestion-utilisateurs",
            get(admin::page).post(admin::creer),
        )
        .route("/gestion-utilisateurs/{id}/modifier", post(admin::modifier))
        .route(
            "/gestion-utilisateurs/{id}/supprimer",
            post(admin::supprimer),
        )
        .route("/logout", post(login::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/login", get(login::page).post(login::action))
        .route(
            "/inscription",
            get(login::inscription_page).post(login::inscription_action),
        )
        .merge(protected)
        .route("/static/{*chemin}", get(crate::assets::static_handler))
        .fallback(fallback)
        .with_state(state)
}
