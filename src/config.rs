use std::path::PathBuf;

use crate::{
    foundation::error::{PathVizError, PathVizResult},
    render::backend::RenderStyle,
};

/// Directory holding the versioned pattern sources.
pub const DEFAULT_PATTERN_DIR: &str = "KC-Config-Suite/Pattern_Suite";
/// Directory receiving one GIF per pattern.
pub const DEFAULT_OUTPUT_DIR: &str = "assets/pattern_suite/path_visualizations";
/// Catalog written next to the sources.
pub const DEFAULT_CATALOG_PATH: &str = "KC-Config-Suite/Pattern_Suite/README.md";
/// Display time of each animation frame.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;
/// GIF quantizer speed (1 = best quality, 30 = fastest).
pub const DEFAULT_GIF_SPEED: i32 = 10;

/// Everything one visualization run needs. `Default` is the fixed layout the repository expects.
#[derive(Clone, Debug, PartialEq)]
pub struct VizConfig {
    /// Directory scanned for `_KC_Pattern_Suite_*.json` sources.
    pub pattern_dir: PathBuf,
    /// Render this file instead of discovering the newest one in `pattern_dir`.
    pub source: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub style: RenderStyle,
    pub frame_delay_ms: u32,
    pub gif_speed: i32,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            pattern_dir: PathBuf::from(DEFAULT_PATTERN_DIR),
            source: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            style: RenderStyle::default(),
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            gif_speed: DEFAULT_GIF_SPEED,
        }
    }
}

impl VizConfig {
    pub fn validate(&self) -> PathVizResult<()> {
        self.style.validate()?;
        if self.frame_delay_ms == 0 {
            return Err(PathVizError::validation("frame_delay_ms must be > 0"));
        }
        if !(1..=30).contains(&self.gif_speed) {
            return Err(PathVizError::validation("gif_speed must be within 1..=30"));
        }
        Ok(())
    }
}
