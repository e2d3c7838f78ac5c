#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test_secret_key_minimum_32_characters_long";

pub fn create_test_app() -> Router {
    espeat::create_app(JWT_SECRET)
}

/// Log in by email and return the session cookie to replay on later
/// requests. Any password works, membership is email-only.
pub async fn login(app: &Router, email: &str) -> String {
    let corps = serde_urlencoded::to_string([("email", email), ("password", "peu-importe")])
        .expect("encodage du formulaire");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(corps))
                .expect("requête de connexion"),
        )
        .await
        .expect("réponse de connexion");

    assert_eq!(
        response.status(),
        StatusCode::SEE_OTHER,
        "la connexion de {email} aurait dû réussir"
    );

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("cookie de session absent")
        .to_str()
        .expect("cookie illisible");

    // keep only "name=value"
    cookie
        .split(';')
        .next()
        .expect("cookie vide")
        .to_string()
}

pub async fn get(app: &Router, chemin: &str, cookie: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method("GET").uri(chemin);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).expect("requête GET"))
        .await
        .expect("réponse GET");

    let statut = response.status();
    (statut, corps_texte(response).await)
}

pub async fn post_form(
    app: &Router,
    chemin: &str,
    cookie: Option<&str>,
    champs: &[(&str, &str)],
) -> (StatusCode, String) {
    let corps = serde_urlencoded::to_string(champs).expect("encodage du formulaire");

    let mut builder = Request::builder()
        .method("POST")
        .uri(chemin)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(corps)).expect("requête POST"))
        .await
        .expect("réponse POST");

    let statut = response.status();
    (statut, corps_texte(response).await)
}

pub async fn corps_texte(response: axum::response::Response) -> String {
    let octets = response
        .into_body()
        .collect()
        .await
        .expect("lecture du corps")
        .to_bytes();
    String::from_utf8_lossy(&octets).into_owned()
}
