//! Frontend page serving
//!
//! The browser page is a single self-contained HTML document embedded at
//! compile time. It only talks to the JSON endpoints under `/api`.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use include_dir::{include_dir, Dir};

use crate::api::status_response;

// Embed the frontend directory at compile time
static FRONTEND_DIRECTORY: Dir = include_dir!("$CARGO_MANIFEST_DIR/frontend");

const INDEX_FILE: &str = "index.html";

/// Serve the index page at the root path
///
/// Caching: no-cache, so a restarted server with a new build is picked up
pub async fn serve_index_page() -> Response {
    let Some(file) = FRONTEND_DIRECTORY.get_file(INDEX_FILE) else {
        tracing::error!("Embedded frontend is missing {}", INDEX_FILE);
        return status_response(StatusCode::INTERNAL_SERVER_ERROR);
    };

    let content_type = format!(
        "{}; charset=utf-8",
        mime_guess::from_path(INDEX_FILE).first_or_text_plain()
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        Body::from(file.contents()),
    )
        .into_response()
}
