//! Role-dispatched dashboard: one view per role over the same route.

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use chrono::Utc;

use espeat_core::{Menu, Role, Statistiques, TicketBalance, TicketPurchase};
use espeat_store::{
    MenuRepository, PropositionRepository, PurchaseRepository, ScanRepository, StatsQuery,
    UserRepository,
};

use super::{AppState, render_template};
use crate::auth::SessionUser;

#[derive(Template)]
#[template(path = "pages/dashboard/etudiant.html")]
struct TableauEtudiantTemplate {
    user: SessionUser,
    solde: TicketBalance,
    derniers_achats: Vec<TicketPurchase>,
}

#[derive(Template)]
#[template(path = "pages/dashboard/agent.html")]
struct TableauAgentTemplate {
    user: SessionUser,
    scans_valides: usize,
    scans_invalides: usize,
}

#[derive(Template)]
#[template(path = "pages/dashboard/gerant.html")]
struct TableauGerantTemplate {
    user: SessionUser,
    stats: Statistiques,
    nombre_utilisateurs: usize,
}

#[derive(Template)]
#[template(path = "pages/dashboard/restaurateur.html")]
struct TableauRestaurateurTemplate {
    user: SessionUser,
    menus_a_venir: Vec<Menu>,
    propositions_en_attente: usize,
}

/// GET /dashboard
pub async fn page(State(state): State<AppState>, Extension(user): Extension<SessionUser>) -> Response {
    match user.role {
        Role::Etudiant => {
            let solde = state
                .store
                .get_user(&user.id)
                .await
                .and_then(|u| u.tickets)
                .unwrap_or_default();
            let mut derniers_achats = state.store.achats_de(&user.id).await;
            derniers_achats.sort_by(|a, b| b.date.cmp(&a.date));
            derniers_achats.truncate(3);
            render_template(TableauEtudiantTemplate {
                user,
                solde,
                derniers_achats,
            })
        }
        Role::Agent => {
            let scans = state.store.list_scans().await;
            let scans_valides = scans.iter().filter(|s| s.est_valide()).count();
            render_template(TableauAgentTemplate {
                user,
                scans_invalides: scans.len() - scans_valides,
                scans_valides,
            })
        }
        Role::Gerant => {
            let stats = state.store.statistiques(Utc::now()).await;
            let nombre_utilisateurs = state.store.list_users().await.len();
            render_template(TableauGerantTemplate {
                user,
                stats,
                nombre_utilisateurs,
            })
        }
        Role::Restaurateur => {
            let aujourdhui = Utc::now().date_naive();
            let mut menus_a_venir: Vec<Menu> = state
                .store
                .list_menus()
                .await
                .into_iter()
                .filter(|m| m.date >= aujourdhui)
                .collect();
            menus_a_venir.sort_by_key(|m| m.date);
            let propositions_en_attente = state
                .store
                .list_propositions()
                .await
                .iter()
                .filter(|p| p.en_attente())
                .count();
            render_template(TableauRestaurateurTemplate {
                user,
                menus_a_venir,
                propositions_en_attente,
            })
        }
    }
}
