use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] espeat_core::Error),

    #[error("passerelle de paiement: {0}")]
    Gateway(#[from] espeat_gateway::GatewayError),

    #[error("erreur interne")]
    Internal(#[from] anyhow::Error),
}

#[derive(Template)]
#[template(path = "pages/erreur.html")]
struct ErrorPageTemplate {
    status_code: u16,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            AppError::Domain(err) if err.is_validation() => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            AppError::Domain(err) => (StatusCode::NOT_FOUND, err.to_string()),
            AppError::Gateway(err) => {
                tracing::error!(erreur = %err, "échec de la passerelle");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(erreur = %err, "erreur interne");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Une erreur inattendue s'est produite. Veuillez réessayer.".to_string(),
                )
            }
        };

        let template = ErrorPageTemplate {
            status_code: status_code.as_u16(),
            message,
        };

        match template.render() {
            Ok(html) => (status_code, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(erreur = %err, "échec du rendu de la page d'erreur");
                (status_code, self.to_string()).into_response()
            }
        }
    }
}
