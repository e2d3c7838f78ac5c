//! Campus restaurants and their menus of the day.

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use chrono::Utc;

use espeat_core::{Menu, Restaurant};
use espeat_store::{MenuRepository, RestaurantRepository};

use super::{AppState, render_template};
use crate::auth::SessionUser;

pub struct RestaurantAvecMenus {
    pub restaurant: Restaurant,
    pub menus_du_jour: Vec<Menu>,
}

#[derive(Template)]
#[template(path = "pages/restaurants.html")]
struct RestaurantsTemplate {
    user: SessionUser,
    entrees: Vec<RestaurantAvecMenus>,
}

/// GET /restaurants
pub async fn page(State(state): State<AppState>, Extension(user): Extension<SessionUser>) -> Response {
    let aujourdhui = Utc::now().date_naive();
    let menus = state.store.list_menus().await;

    let entrees = state
        .store
        .list_restaurants()
        .await
        .into_iter()
        .map(|restaurant| {
            let menus_du_jour = menus
                .iter()
                .filter(|m| m.restaurant_id == restaurant.id && m.date == aujourdhui)
                .cloned()
                .collect();
            RestaurantAvecMenus {
                restaurant,
                menus_du_jour,
            }
        })
        .collect();

    render_template(RestaurantsTemplate { user, entrees })
}
