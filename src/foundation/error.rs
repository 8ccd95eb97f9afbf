use std::path::PathBuf;

/// Result alias used across the crate.
pub type PathVizResult<T> = Result<T, PathVizError>;

/// Errors produced while loading, rendering, or encoding patterns.
#[derive(thiserror::Error, Debug)]
pub enum PathVizError {
    /// Invalid configuration or drawing input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Pattern source that is not valid JSON or has neither accepted shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// GIF encoding failure or frame sink contract violation.
    #[error("encode error: {0}")]
    Encode(String),

    /// Filesystem failure at `path`.
    #[error("io error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PathVizError {
    /// Build a [`PathVizError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PathVizError::Parse`].
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`PathVizError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PathVizError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PathVizError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Filesystem-level failures abort the whole run; everything else is scoped to one pattern.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Other(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
