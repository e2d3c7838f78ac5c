//! Menu management and proposition review flows.

mod common;

use axum::http::StatusCode;
use common::{create_test_app, get, login, post_form};

const RESTAURATEUR: &str = "awa.ba@esp.sn";
const ETUDIANT: &str = "aminata.diop@esp.sn";

#[tokio::test]
async fn menu_creation_rejects_missing_fields_and_keeps_the_list() {
    let app = create_test_app();
    let cookie = login(&app, RESTAURATEUR).await;

    let cas = [
        [("date", ""), ("ndekki", "Pain + café"), ("repas", "Thiéboudienne")],
        [("date", "2030-05-01"), ("ndekki", ""), ("repas", "Thiéboudienne")],
        [("date", "2030-05-01"), ("ndekki", "Pain + café"), ("repas", "")],
    ];

    for champs in cas {
        let (statut, corps) = post_form(&app, "/gerer-menus", Some(&cookie), &champs).await;
        assert_eq!(statut, StatusCode::OK);
        assert!(
            corps.contains("champs obligatoires"),
            "soumission incomplète acceptée: {champs:?}"
        );
    }

    // nothing slipped into the list
    let (_, corps) = get(&app, "/gerer-menus", Some(&cookie)).await;
    assert!(!corps.contains("2030-05-01"));
}

#[tokio::test]
async fn menu_creation_lands_in_the_upcoming_partition() {
    let app = create_test_app();
    let cookie = login(&app, RESTAURATEUR).await;

    let (statut, corps) = post_form(
        &app,
        "/gerer-menus",
        Some(&cookie),
        &[
            ("date", "2030-05-01"),
            ("ndekki", "Pain + café"),
            ("repas", "Thiéboudienne\nYassa Poulet"),
            ("restaurant_id", "resto1"),
        ],
    )
    .await;

    assert_eq!(statut, StatusCode::OK);
    assert!(corps.contains("Le nouveau menu a été ajouté"));
    assert!(corps.contains("2030-05-01"));
    assert!(corps.contains("Thiéboudienne / Yassa Poulet"));
}

#[tokio::test]
async fn menu_update_replaces_the_entry() {
    let app = create_test_app();
    let cookie = login(&app, RESTAURATEUR).await;

    let (statut, corps) = post_form(
        &app,
        "/gerer-menus/menu1/modifier",
        Some(&cookie),
        &[
            ("date", "2031-01-05"),
            ("ndekki", "Pain + lait"),
            ("repas", "Domoda"),
            ("restaurant_id", "resto1"),
        ],
    )
    .await;

    assert_eq!(statut, StatusCode::OK);
    assert!(corps.contains("Le menu a été mis à jour"));
    assert!(corps.contains("2031-01-05"));
}

#[tokio::test]
async fn menu_delete_removes_the_entry() {
    let app = create_test_app();
    let cookie = login(&app, RESTAURATEUR).await;

    let (_, corps) = post_form(&app, "/gerer-menus/menu3/supprimer", Some(&cookie), &[]).await;
    assert!(corps.contains("Le menu a été supprimé"));
    assert!(!corps.contains("2025-01-16"));
}

#[tokio::test]
async fn student_proposition_requires_all_fields() {
    let app = create_test_app();
    let cookie = login(&app, ETUDIANT).await;

    let (_, corps) = post_form(
        &app,
        "/proposer-menu",
        Some(&cookie),
        &[
            ("restaurant_id", "resto1"),
            ("date", "2030-05-01"),
            ("type_menu", ""),
            ("proposition", "Du Ngalax en dessert"),
        ],
    )
    .await;

    assert!(corps.contains("champs obligatoires"));
}

#[tokio::test]
async fn student_proposition_reaches_the_operator_and_gets_an_answer() {
    let app = create_test_app();

    let cookie_etudiant = login(&app, ETUDIANT).await;
    let (statut, corps) = post_form(
        &app,
        "/proposer-menu",
        Some(&cookie_etudiant),
        &[
            ("restaurant_id", "resto2"),
            ("date", "2030-05-01"),
            ("type_menu", "repas"),
            ("proposition", "Caldou Poisson le mercredi"),
        ],
    )
    .await;
    assert_eq!(statut, StatusCode::OK);
    assert!(corps.contains("transmise au restaurateur"));

    // the operator sees it pending
    let cookie_operateur = login(&app, RESTAURATEUR).await;
    let (_, corps) = get(&app, "/propositions-menus?statut=en_attente", Some(&cookie_operateur)).await;
    assert!(corps.contains("Caldou Poisson le mercredi"));
    assert!(corps.contains("Aminata Diop"));
}

#[tokio::test]
async fn accepting_a_proposition_sets_status_and_default_reply() {
    let app = create_test_app();
    let cookie = login(&app, RESTAURATEUR).await;

    let (statut, corps) = post_form(
        &app,
        "/propositions-menus/prop1/accepter",
        Some(&cookie),
        &[("reponse", "")],
    )
    .await;

    assert_eq!(statut, StatusCode::OK);
    assert!(corps.contains("Proposition acceptée"));

    // the student sees the new status on their own page
    let cookie_etudiant = login(&app, ETUDIANT).await;
    let (_, corps) = get(&app, "/proposer-menu", Some(&cookie_etudiant)).await;
    assert!(corps.contains("Acceptée"));
    assert!(corps.contains("Proposition acceptée !"));
}

#[tokio::test]
async fn refusing_a_proposition_keeps_the_custom_reply() {
    let app = create_test_app();
    let cookie = login(&app, RESTAURATEUR).await;

    let (_, corps) = post_form(
        &app,
        "/propositions-menus/prop1/refuser",
        Some(&cookie),
        &[("reponse", "Pas de dessert cette semaine")],
    )
    .await;

    assert!(corps.contains("Proposition refusée"));

    let (_, corps) = get(&app, "/propositions-menus?statut=refuse", Some(&cookie)).await;
    assert!(corps.contains("Pas de dessert cette semaine"));
}

#[tokio::test]
async fn status_filter_narrows_the_review_list() {
    let app = create_test_app();
    let cookie = login(&app, RESTAURATEUR).await;

    // seed: prop1 en attente, prop2 acceptée
    let (_, corps) = get(&app, "/propositions-menus?statut=en_attente", Some(&cookie)).await;
    assert!(corps.contains("Ngalax"));
    assert!(!corps.contains("Thiéré au poisson"));

    let (_, corps) = get(&app, "/propositions-menus?statut=accepte", Some(&cookie)).await;
    assert!(corps.contains("Thiéré au poisson"));
    assert!(!corps.contains("Ngalax"));
}
