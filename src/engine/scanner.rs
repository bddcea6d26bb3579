//! Discovery of command template files.
//!
//! Walks a commands directory for `*.md` templates and derives namespaced
//! command names from their relative paths (`git/fixup.md` → `git:fixup`).
//! Discovery is read-only; nothing here expands or executes anything.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, StrudelError};

/// One discovered template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    /// Namespaced command name, `:`-separated per directory level.
    pub name: String,
    /// Path to the template file.
    pub path: PathBuf,
}

/// Collect every markdown template under `dir`, sorted by name.
pub fn scan(dir: &Path) -> Result<Vec<CommandTemplate>> {
    if !dir.is_dir() {
        return Err(StrudelError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("command directory does not exist: {}", dir.display()),
        )));
    }

    let mut templates = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry))
    {
        let entry = entry.map_err(|e| StrudelError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
            continue;
        }

        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        let name = template_name(relative);
        debug!(name = %name, path = %path.display(), "discovered command template");
        templates.push(CommandTemplate {
            name,
            path: path.to_path_buf(),
        });
    }

    templates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(templates)
}

fn template_name(relative: &Path) -> String {
    let mut segments: Vec<String> = relative
        .iter()
        .map(|part| part.to_string_lossy().into_owned())
        .collect();

    if let Some(last) = segments.last_mut() {
        if let Some(stem) = last.strip_suffix(".md") {
            *last = stem.to_string();
        }
    }

    segments.join(":")
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn finds_and_names_nested_templates() {
        let dir = TempDir::new().unwrap();
        write(&dir, "review.md", "");
        write(&dir, "git/fixup.md", "");
        write(&dir, "git/hooks/install.md", "");

        let templates = scan(dir.path()).unwrap();
        let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["git:fixup", "git:hooks:install", "review"]);
    }

    #[test]
    fn ignores_non_markdown_and_hidden_entries() {
        let dir = TempDir::new().unwrap();
        write(&dir, "real.md", "");
        write(&dir, "notes.txt", "");
        write(&dir, ".hidden/secret.md", "");
        write(&dir, ".draft.md", "");

        let templates = scan(dir.path()).unwrap();
        let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["real"]);
    }

    #[test]
    fn empty_directory_yields_no_templates() {
        let dir = TempDir::new().unwrap();
        assert!(scan(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = scan(&dir.path().join("nope"));
        assert!(matches!(result, Err(StrudelError::Io(_))));
    }
}
