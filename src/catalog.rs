use std::path::{Path, PathBuf};

use crate::{
    encode::gif::ensure_parent_dir,
    foundation::error::{PathVizError, PathVizResult},
};

pub const CATALOG_TITLE: &str = "Pattern Visualizations";

/// One rendered artifact as listed in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub artifact: PathBuf,
}

/// Repository-root link for an artifact path: `/` + the path with forward slashes.
pub fn artifact_reference(artifact: &Path) -> String {
    let normalized = artifact.to_string_lossy().replace('\\', "/");
    let mut rel = normalized.as_str();
    while let Some(rest) = rel.strip_prefix("./") {
        rel = rest;
    }
    format!("/{}", rel.trim_start_matches('/'))
}

/// Markdown listing with one heading and one embedded image per entry, in the given order.
pub fn render_catalog(entries: &[CatalogEntry]) -> String {
    let mut out = format!("# {CATALOG_TITLE}\n\n");
    for entry in entries {
        let reference = artifact_reference(&entry.artifact);
        out.push_str(&format!("### `{}`\n\n", entry.name));
        out.push_str(&format!("![{}]({reference})\n\n", entry.name));
    }
    out
}

/// Replace the catalog at `path` wholesale.
pub fn write_catalog(path: &Path, entries: &[CatalogEntry]) -> PathVizResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, render_catalog(entries)).map_err(|e| PathVizError::io(path, e))?;
    tracing::info!(path = %path.display(), entries = entries.len(), "wrote catalog");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/catalog.rs"]
mod tests;
