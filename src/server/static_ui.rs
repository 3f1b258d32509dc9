//! Front-end serving for non-API paths.
//!
//! Existing files under the static directory are returned as-is. Every other
//! path is a client-side route and receives `index.html`; when the directory
//! has no `index.html` a minimal built-in shell is returned instead, so a
//! front-end route never turns into a 404.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::path::Path;
use tracing::{debug, warn};

use crate::utils::is_safe_relative_path;

const INDEX_FILE: &str = "index.html";

/// Shell page used when the static directory has no `index.html`.
pub const BUILTIN_SHELL: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Campus Records</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

pub async fn serve(static_dir: &Path, request_path: &str) -> Response {
    let key = normalize_req_path(request_path);

    if is_safe_relative_path(&key) && key != INDEX_FILE {
        if let Ok(body) = tokio::fs::read(static_dir.join(&key)).await {
            return file_response(&key, body);
        }
    } else if key != INDEX_FILE {
        warn!(path = %request_path, "rejected unsafe static path");
    }

    app_shell(static_dir).await
}

async fn app_shell(static_dir: &Path) -> Response {
    match tokio::fs::read(static_dir.join(INDEX_FILE)).await {
        Ok(body) => file_response(INDEX_FILE, body),
        Err(e) => {
            debug!(dir = %static_dir.display(), error = %e, "no index.html, using built-in shell");
            file_response(INDEX_FILE, BUILTIN_SHELL.as_bytes().to_vec())
        }
    }
}

fn file_response(key: &str, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type_for_path(key)),
            (header::CACHE_CONTROL, cache_control_for_path(key)),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        body,
    )
        .into_response()
}

fn normalize_req_path(path: &str) -> String {
    let p = path.trim_start_matches('/');
    if p.is_empty() {
        INDEX_FILE.to_string()
    } else {
        p.to_string()
    }
}

fn cache_control_for_path(key: &str) -> &'static str {
    if key == INDEX_FILE {
        return "no-cache";
    }
    match key.rsplit('.').next().unwrap_or("") {
        "js" | "css" | "png" | "jpg" | "jpeg" | "svg" | "webp" | "woff" | "woff2" => {
            "public, max-age=31536000, immutable"
        }
        _ => "public, max-age=3600",
    }
}

fn content_type_for_path(path: &str) -> &'static str {
    match path.rsplit('.').next().unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}
