use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use espeat_store::UserRepository;

use super::{AUTH_COOKIE_NAME, SessionUser, jwt::validate_token};
use crate::routes::AppState;

fn vers_login() -> Response {
    (StatusCode::SEE_OTHER, [("Location", "/login")]).into_response()
}

/// Validates the session cookie, checks the account still exists in the
/// store and injects a [`SessionUser`] extension. Anything short of that
/// redirects to the login page.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match jar.get(AUTH_COOKIE_NAME) {
        Some(cookie) => cookie.value(),
        None => {
            tracing::debug!("cookie de session absent, redirection vers /login");
            return vers_login();
        }
    };

    let auth = match validate_token(token, &state.config.auth.jwt_secret) {
        Ok(auth) => auth,
        Err(err) => {
            tracing::warn!(erreur = %err, "jeton de session invalide");
            return vers_login();
        }
    };

    // the account may have been deleted since the cookie was issued
    let user = match state.store.get_user(&auth.user_id).await {
        Some(user) => user,
        None => {
            tracing::warn!(user_id = %auth.user_id, "compte introuvable pour la session");
            return vers_login();
        }
    };

    req.extensions_mut().insert(SessionUser::from(user));
    next.run(req).await
}
