//! Recursive `@file` include expansion.
//!
//! Markers are collected in a single scan over the original text and the
//! result is rebuilt from untouched spans plus resolved spans. The mutated
//! string is never re-searched, so repeated marker text cannot be spliced
//! at the wrong occurrence and resolved content that happens to contain
//! `@`-shaped text stays inert for the current pass.

use once_cell::sync::Lazy;
use regex::Regex;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tracing::debug;

use super::path_guard;
use crate::error::{Result, StrudelError};

/// `@path`: at the start of the text or after one whitespace character,
/// followed by a run of non-whitespace.
static INCLUDE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|\s)@(\S+)").expect("include marker pattern is valid"));

/// Expand every `@file` marker in `body` against `base_path`.
pub async fn resolve(body: &str, base_path: &Path, max_depth: u8) -> Result<String> {
    resolve_at_depth(body, base_path, 0, max_depth).await
}

fn resolve_at_depth<'a>(
    body: &'a str,
    base_path: &'a Path,
    depth: u8,
    max_depth: u8,
) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
    Box::pin(async move {
        let mut result = String::with_capacity(body.len());
        let mut last_end = 0;

        for caps in INCLUDE_MARKER.captures_iter(body) {
            let marker = caps.get(0).map_or(0..0, |m| m.range());
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let token = caps.get(2).map_or("", |m| m.as_str());

            if depth >= max_depth {
                return Err(StrudelError::DepthExceeded {
                    path: token.to_string(),
                    limit: max_depth,
                });
            }

            if !path_guard::is_safe_include(token) {
                return Err(StrudelError::PathTraversal(token.to_string()));
            }

            let file_path = base_path.join(token);
            debug!(path = %file_path.display(), depth, "resolving include");

            let contents = match tokio::fs::read_to_string(&file_path).await {
                Ok(contents) => contents,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(StrudelError::FileNotFound(token.to_string()));
                }
                Err(e) => return Err(e.into()),
            };

            let resolved = resolve_at_depth(&contents, base_path, depth + 1, max_depth).await?;

            result.push_str(&body[last_end..marker.start]);
            result.push_str(prefix);
            result.push_str(&resolved);
            last_end = marker.end;
        }

        result.push_str(&body[last_end..]);
        Ok(result)
    })
}
