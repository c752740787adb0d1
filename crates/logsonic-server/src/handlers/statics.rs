//! SPA fallback for non-API paths.
//!
//! The real web UI bundle ships separately; this serves a minimal index
//! page for extension-less paths so client-side routes resolve, and 404s
//! for unknown assets.

use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

const INDEX_HTML: &str = "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>LogSonic</title></head>\n<body>\n<h1>LogSonic</h1>\n<p>The API is served under <code>/api/v1</code>.</p>\n</body>\n</html>\n";

/// Fallback handler for every path outside the API router.
pub async fn spa_fallback(uri: Uri) -> Response {
    let path = uri.path();
    if path.starts_with("/api/") {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }

    let has_extension = path
        .rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'));
    if has_extension {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }

    Html(INDEX_HTML).into_response()
}
