//! Markdown discovery
//!
//! Each pattern is either a directory (walked recursively for markdown files)
//! or a glob relative to the root. Document ids are root-relative paths with
//! `/` separators.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File extensions picked up when a pattern names a directory
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Load `(id, content)` pairs for every file matched by `patterns`
///
/// Files are returned in pattern order, sorted by path within a pattern.
/// A file matched by several patterns is loaded once.
pub fn load_documents(root: &Path, patterns: &[String]) -> Result<Vec<(String, String)>> {
    debug!(root = %root.display(), ?patterns, "load_documents: called");
    let mut seen = HashSet::new();
    let mut documents = Vec::new();

    for pattern in patterns {
        let paths = resolve_pattern(root, pattern)?;
        if paths.is_empty() {
            warn!(%pattern, "Pattern matched no files");
        }
        for path in paths {
            if !seen.insert(path.clone()) {
                continue;
            }
            let content =
                fs::read_to_string(&path).context(format!("Failed to read document {}", path.display()))?;
            documents.push((document_id(root, &path), content));
        }
    }

    info!("Loaded {} documents from {}", documents.len(), root.display());
    Ok(documents)
}

fn resolve_pattern(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let direct = root.join(pattern);
    if direct.is_dir() {
        debug!(dir = %direct.display(), "resolve_pattern: walking directory");
        let mut paths: Vec<PathBuf> = WalkDir::new(&direct)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_markdown(e.path()))
            .map(|e| e.into_path())
            .collect();
        paths.sort();
        return Ok(paths);
    }
    if direct.is_file() {
        return Ok(vec![direct]);
    }

    let full_pattern = format!("{}/{}", glob::Pattern::escape(&root.to_string_lossy()), pattern);
    let entries = glob::glob(&full_pattern).context(format!("Invalid glob pattern: {}", pattern))?;
    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).filter(|p| p.is_file()).collect();
    paths.sort();
    Ok(paths)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
}

fn document_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
