//! Static front-end bundle serving.
//!
//! # Responsibilities
//! - Resolve request paths against the configured asset root
//! - Detect content types from file extensions
//! - Fall back to the index document for SPA routes
//! - Reject path traversal without ever resolving outside the root
//!
//! # Design Decisions
//! - Paths are never percent-decoded; an encoded `..` stays a literal
//!   file-name component and cannot escape the root
//! - Literal `..` segments are rejected outright, with no index
//!   fallback, and a canonicalize containment check backstops symlinks
//! - Missing assets without traversal serve the index document so
//!   client-side routing works

pub mod mime;

use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::fs;

use crate::config::StaticAssetsConfig;

/// Resolver for the configured static asset root.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    root: PathBuf,
    index_file: String,
}

/// Outcome of resolving a request path against the root.
enum Resolution {
    File(Vec<u8>, &'static str),
    NotFound,
    Traversal,
}

impl StaticAssets {
    pub fn new(config: &StaticAssetsConfig) -> Self {
        Self {
            root: config.root.clone(),
            index_file: config.index_file.clone(),
        }
    }

    /// Serve a request path. `head_only` sends headers without a body.
    pub async fn serve(&self, path: &str, head_only: bool) -> Response {
        match self.resolve(path).await {
            Resolution::File(content, content_type) => {
                file_response(content, content_type, head_only)
            }
            Resolution::NotFound => match self.load_index().await {
                Some(content) => file_response(content, "text/html; charset=utf-8", head_only),
                None => StatusCode::NOT_FOUND.into_response(),
            },
            Resolution::Traversal => {
                tracing::warn!(path = %path, "Path traversal attempt blocked");
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }

    /// Resolve a request path to file contents and a content type.
    async fn resolve(&self, path: &str) -> Resolution {
        let relative = path.trim_start_matches('/');

        let relative_path = Path::new(relative);
        if relative_path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Resolution::Traversal;
        }

        let mut file_path = self.root.join(relative_path);

        // Directory-style requests get that directory's index document.
        let is_dir = matches!(fs::metadata(&file_path).await, Ok(meta) if meta.is_dir());
        if relative.is_empty() || relative.ends_with('/') || is_dir {
            file_path = file_path.join(&self.index_file);
        }

        let Ok(root_canonical) = fs::canonicalize(&self.root).await else {
            tracing::warn!(root = %self.root.display(), "Asset root not found or inaccessible");
            return Resolution::NotFound;
        };

        // Missing files are the common 404/SPA case, not worth logging.
        let Ok(file_canonical) = fs::canonicalize(&file_path).await else {
            return Resolution::NotFound;
        };
        if !file_canonical.starts_with(&root_canonical) {
            return Resolution::Traversal;
        }
        match fs::metadata(&file_canonical).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Resolution::NotFound,
        }

        match fs::read(&file_canonical).await {
            Ok(content) => {
                let content_type =
                    mime::content_type(file_canonical.extension().and_then(|e| e.to_str()));
                Resolution::File(content, content_type)
            }
            Err(e) => {
                tracing::error!(
                    path = %file_canonical.display(),
                    error = %e,
                    "Failed to read asset"
                );
                Resolution::NotFound
            }
        }
    }

    /// Load the root index document for SPA fallback.
    async fn load_index(&self) -> Option<Vec<u8>> {
        let index_path = self.root.join(&self.index_file);
        fs::read(&index_path).await.ok()
    }
}

fn file_response(content: Vec<u8>, content_type: &'static str, head_only: bool) -> Response {
    let length = content.len();
    let body = if head_only {
        Body::empty()
    } else {
        Body::from(content)
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, length.to_string()),
        ],
        body,
    )
        .into_response()
}
