use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    foundation::error::{PathVizError, PathVizResult},
    pattern::model::PatternDocument,
};

/// `_KC_Pattern_Suite_dt<generation>.x_v<revision>_<stamp>.json`, with an optional `cp` after `dt`.
static SOURCE_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^_KC_Pattern_Suite_dt(?:cp)?(\d+)\.x_v(\d+)_\d+\.json$")
        .expect("source file name regex is valid")
});

/// Version embedded in a pattern source file name. Ordered by generation, then revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceVersion {
    pub generation: u32,
    pub revision: u32,
}

impl SourceVersion {
    pub fn new(generation: u32, revision: u32) -> Self {
        Self {
            generation,
            revision,
        }
    }

    /// Parse a bare file name; `None` for anything that does not follow the naming scheme.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let caps = SOURCE_FILE_NAME.captures(file_name)?;
        let generation = caps[1].parse().ok()?;
        let revision = caps[2].parse().ok()?;
        Some(Self::new(generation, revision))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceCandidate {
    pub version: SourceVersion,
    pub path: PathBuf,
}

/// Pick the newest candidate: highest generation, then highest revision.
///
/// Equal versions fall back to file name order so the pick is deterministic.
pub fn select_latest(mut candidates: Vec<SourceCandidate>) -> Option<SourceCandidate> {
    candidates.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
    });
    candidates.pop()
}

/// List versioned pattern sources directly inside `dir`.
pub fn scan_sources(dir: &Path) -> PathVizResult<Vec<SourceCandidate>> {
    let entries = std::fs::read_dir(dir).map_err(|e| PathVizError::io(dir, e))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PathVizError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(version) = entry.file_name().to_str().and_then(SourceVersion::from_file_name)
        else {
            continue;
        };
        out.push(SourceCandidate { version, path });
    }
    Ok(out)
}

/// Resolve the pattern source to render, or `None` when `dir` holds no versioned source.
#[tracing::instrument(level = "debug")]
pub fn find_latest_source(dir: &Path) -> PathVizResult<Option<PathBuf>> {
    let candidates = scan_sources(dir)?;
    tracing::debug!(count = candidates.len(), "found versioned pattern sources");
    Ok(select_latest(candidates).map(|c| c.path))
}

#[tracing::instrument(level = "debug")]
pub fn load_document(path: &Path) -> PathVizResult<PatternDocument> {
    let text = std::fs::read_to_string(path).map_err(|e| PathVizError::io(path, e))?;
    PatternDocument::from_json_str(&text).map_err(|e| match e {
        PathVizError::Parse(msg) => PathVizError::parse(format!("{}: {msg}", path.display())),
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/source.rs"]
mod tests;
