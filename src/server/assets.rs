//! Static asset serving with single-page-app fallback.

use std::path::{Component, Path, PathBuf};

use axum::extract::{Path as UrlPath, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::AppState;
use crate::config::INDEX_FILE;

/// Serves `/` from the root `index.html`.
pub async fn serve_index(State(state): State<AppState>) -> Response {
    serve_request_path(&state.root, "").await
}

/// Serves a file below the root. The wildcard segment arrives percent-decoded.
pub async fn serve_asset(State(state): State<AppState>, UrlPath(path): UrlPath<String>) -> Response {
    serve_request_path(&state.root, &path).await
}

async fn serve_request_path(root: &Path, request_path: &str) -> Response {
    let Some(target) = resolve_asset_path(root, request_path) else {
        log::debug!("Rejected asset path {:?}", request_path);
        return not_found();
    };

    if let Some(response) = read_file_response(&target).await {
        return response;
    }

    // Unmatched routes get the app shell so client-side routing can take over
    match read_file_response(&root.join(INDEX_FILE)).await {
        Some(response) => response,
        None => not_found(),
    }
}

/// Maps a request path onto the filesystem below `root`.
///
/// Returns `None` for parent-directory, absolute or drive-prefixed
/// components and for hidden entries (any component starting with `.`).
pub fn resolve_asset_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(request_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => {
                if part.to_string_lossy().starts_with('.') {
                    return None;
                }
                resolved.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

/// Reads a file (or a directory's `index.html`) into a response.
async fn read_file_response(path: &Path) -> Option<Response> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    let file_path = if metadata.is_dir() {
        path.join(INDEX_FILE)
    } else {
        path.to_path_buf()
    };

    match tokio::fs::read(&file_path).await {
        Ok(bytes) => Some(
            (
                StatusCode::OK,
                [(CONTENT_TYPE, content_type_for(&file_path))],
                bytes,
            )
                .into_response(),
        ),
        Err(e) => {
            log::debug!("Could not read {}: {}", file_path.display(), e);
            None
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Content type from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "pdf" => "application/pdf",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}
