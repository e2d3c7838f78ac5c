//! Statistics page and the JSON export artifact.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{corps_texte, create_test_app, get, login, post_form};
use tower::ServiceExt;

const GERANT: &str = "ibrahima.sarr@esp.sn";

#[tokio::test]
async fn statistics_page_shows_real_aggregates() {
    let app = create_test_app();
    let cookie = login(&app, GERANT).await;

    let (statut, corps) = get(&app, "/statistiques", Some(&cookie)).await;
    assert_eq!(statut, StatusCode::OK);

    // seeded purchases: 36 ndekki + 28 repas sold in total
    assert!(corps.contains("36"));
    assert!(corps.contains("28"));
    assert!(corps.contains("Ventes par mois"));
    assert!(corps.contains("Jan 2025"));
    assert!(corps.contains("Plats les plus programmés"));
}

#[tokio::test]
async fn statistics_reflect_new_purchases() {
    let app = create_test_app();

    let cookie_etudiant = login(&app, "aminata.diop@esp.sn").await;
    post_form(
        &app,
        "/acheter-tickets",
        Some(&cookie_etudiant),
        &[
            ("nombre_ndekki", "4"),
            ("nombre_repas", "2"),
            ("moyen_paiement", "wave"),
            ("telephone", "771234567"),
        ],
    )
    .await;

    let cookie = login(&app, GERANT).await;
    let (_, corps) = get(&app, "/statistiques", Some(&cookie)).await;
    // 36 + 4 sold ndekki, 28 + 2 repas
    assert!(corps.contains("40"));
    assert!(corps.contains("30"));
}

#[tokio::test]
async fn export_produces_a_json_attachment() {
    let app = create_test_app();
    let cookie = login(&app, GERANT).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/statistiques/export?periode=mensuel")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"statistiques-mensuel-"));

    let corps = corps_texte(response).await;
    let rapport: serde_json::Value = serde_json::from_str(&corps).unwrap();

    assert_eq!(rapport["periode"], "mensuel");
    assert!(rapport["date"].is_string());
    assert_eq!(rapport["statistiques"]["ticketsVendus"]["ndekki"], 36);
    assert_eq!(rapport["statistiques"]["ticketsVendus"]["repas"], 28);
    assert!(rapport["ventesParMois"].as_array().unwrap().len() >= 3);
    assert!(!rapport["topPlats"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn export_falls_back_to_the_monthly_period() {
    let app = create_test_app();
    let cookie = login(&app, GERANT).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/statistiques/export?periode=fantaisie")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let corps = corps_texte(response).await;
    let rapport: serde_json::Value = serde_json::from_str(&corps).unwrap();
    assert_eq!(rapport["periode"], "mensuel");
}

#[tokio::test]
async fn export_is_reserved_to_the_manager() {
    let app = create_test_app();
    let cookie = login(&app, "aminata.diop@esp.sn").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/statistiques/export")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
