//! Static assets embedded into the binary.

use axum::{
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "static/"]
struct Assets;

/// GET /static/{*chemin}
pub async fn static_handler(Path(chemin): Path<String>) -> Response {
    match Assets::get(&chemin) {
        Some(fichier) => {
            let mime = mime_guess::from_path(&chemin).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref())],
                fichier.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
