//! Profile edition: the merge persists and stays consistent everywhere.

mod common;

use axum::http::StatusCode;
use common::{create_test_app, get, login, post_form};

#[tokio::test]
async fn profile_update_merges_and_persists() {
    let app = create_test_app();
    let cookie = login(&app, "aminata.diop@esp.sn").await;

    let (statut, corps) = post_form(
        &app,
        "/profil",
        Some(&cookie),
        &[
            ("prenom", "Aminata Bintou"),
            ("nom", "Diop"),
            ("email", "aminata.diop@esp.sn"),
            ("numero_etudiant", "ESP2023001"),
        ],
    )
    .await;

    assert_eq!(statut, StatusCode::OK);
    assert!(corps.contains("Profil mis à jour"));
    assert!(corps.contains("Aminata Bintou"));

    // the user administration list reads the same record
    let cookie_gerant = login(&app, "ibrahima.sarr@esp.sn").await;
    let (_, corps) = get(&app, "/gestion-utilisateurs", Some(&cookie_gerant)).await;
    assert!(corps.contains("Aminata Bintou Diop"));

    // the ticket balance survived the merge
    let (_, corps) = get(&app, "/mes-tickets", Some(&cookie)).await;
    assert!(corps.contains(r#"<p class="valeur">5</p>"#));
    assert!(corps.contains(r#"<p class="valeur">3</p>"#));
}

#[tokio::test]
async fn profile_update_rejects_an_email_already_taken() {
    let app = create_test_app();
    let cookie = login(&app, "aminata.diop@esp.sn").await;

    let (_, corps) = post_form(
        &app,
        "/profil",
        Some(&cookie),
        &[
            ("prenom", "Aminata"),
            ("nom", "Diop"),
            ("email", "moussa.fall@esp.sn"),
            ("numero_etudiant", "ESP2023001"),
        ],
    )
    .await;

    assert!(corps.contains("existe déjà"));
}

#[tokio::test]
async fn profile_update_rejects_an_invalid_email() {
    let app = create_test_app();
    let cookie = login(&app, "aminata.diop@esp.sn").await;

    let (_, corps) = post_form(
        &app,
        "/profil",
        Some(&cookie),
        &[
            ("prenom", "Aminata"),
            ("nom", "Diop"),
            ("email", "pas-un-email"),
            ("numero_etudiant", "ESP2023001"),
        ],
    )
    .await;

    assert!(corps.contains("email invalide"));
}
