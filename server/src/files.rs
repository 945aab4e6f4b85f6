use std::path::{Path, PathBuf};

use rocket::State;
use rocket::http::{ContentType, RawStr, Status};
use rocket::http::uri::Origin;
use tracing::{debug, warn};

pub struct SSiteRoot(pub PathBuf);

const INDEX_FILE: &str = "index.html";

pub fn mime_type(path: &Path) -> &'static str {
    let ext = path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "html" => "text/html; charset=UTF-8",
        "css" => "text/css; charset=UTF-8",
        "js" => "application/javascript; charset=UTF-8",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "json" => "application/json; charset=UTF-8",
        "xml" => "application/xml; charset=UTF-8",
        "pdf" => "application/pdf",
        "txt" => "text/plain; charset=UTF-8",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn content_type(path: &Path) -> ContentType {
    ContentType::parse_flexible(mime_type(path)).unwrap_or(ContentType::Binary)
}

/// Maps a request path onto a file under `root`. `..` is stripped, and directories
/// (including a trailing `/`) resolve to their `index.html`.
pub fn resolve_file_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut cleaned = request_path.replace("..", "");
    if cleaned.ends_with('/') {
        cleaned.push_str(INDEX_FILE);
    }

    let file_path = root.join(cleaned.trim_start_matches('/'));
    if file_path.is_file() {
        return Some(file_path);
    }

    if file_path.is_dir() {
        let index_path = file_path.join(INDEX_FILE);
        if index_path.is_file() {
            return Some(index_path);
        }
    }

    None
}

#[get("/<_..>")]
pub async fn serve_file(uri: &Origin<'_>, root: &State<SSiteRoot>) -> Result<(ContentType, Vec<u8>), (Status, String)> {
    let request_path = RawStr::new(uri.path().as_str()).percent_decode_lossy();

    let file_path = match resolve_file_path(&root.0, &request_path) {
        Some(p) => p,
        None => {
            debug!(path = %request_path, "no such file");
            return Err((Status::NotFound, String::from("Resource Not Found")));
        }
    };

    match tokio::fs::read(&file_path).await {
        Ok(content) => Ok((content_type(&file_path), content)),
        Err(e) => {
            warn!(path = %file_path.display(), error = %e, "failed to read file");
            Err((Status::InternalServerError, format!("Server Error: {}", e)))
        }
    }
}

fn method_not_allowed() -> (Status, &'static str) {
    (Status::MethodNotAllowed, "Method Not Allowed")
}

#[post("/<_..>")]
pub fn reject_post() -> (Status, &'static str) {
    method_not_allowed()
}

#[put("/<_..>")]
pub fn reject_put() -> (Status, &'static str) {
    method_not_allowed()
}

#[delete("/<_..>")]
pub fn reject_delete() -> (Status, &'static str) {
    method_not_allowed()
}

#[patch("/<_..>")]
pub fn reject_patch() -> (Status, &'static str) {
    method_not_allowed()
}

#[head("/<_..>")]
pub fn reject_head() -> (Status, &'static str) {
    method_not_allowed()
}

#[options("/<_..>")]
pub fn reject_options() -> (Status, &'static str) {
    method_not_allowed()
}

#[catch(404)]
pub fn not_found() -> &'static str {
    "Resource Not Found"
}
