//! kc-pathviz renders recorded movement patterns as animated trajectory GIFs.
//!
//! A pattern is a named sequence of key events such as `w`, `shift+a` or `w+d`, each optionally
//! held for a duration in milliseconds. The pipeline turns it into pixels in five steps:
//!
//! 1. **Load**: pick the newest `_KC_Pattern_Suite_*` source and parse it into [`Pattern`]s
//!    (structured `{name, pattern: [...]}` files and legacy `{name: [codes]}` files).
//! 2. **Resolve**: map each key to a [`MovementVector`] and each duration to a step length.
//! 3. **Build**: integrate the steps into a [`Trajectory`] from the canvas center.
//! 4. **Render**: draw one fresh frame per segment and stream them into a looping GIF.
//! 5. **Catalog**: list every rendered GIF in a Markdown file.
//!
//! Parsing is lenient: keys without a direction and durations that are not integers degrade to
//! "no movement" and the default step instead of failing. Filesystem errors are fatal.
#![forbid(unsafe_code)]

mod catalog;
mod config;
mod encode;
mod foundation;
mod pattern;
mod pipeline;
mod render;
mod trajectory;

pub use catalog::{CATALOG_TITLE, CatalogEntry, artifact_reference, render_catalog, write_catalog};
pub use config::{
    DEFAULT_CATALOG_PATH, DEFAULT_FRAME_DELAY_MS, DEFAULT_GIF_SPEED, DEFAULT_OUTPUT_DIR,
    DEFAULT_PATTERN_DIR, VizConfig,
};
pub use encode::gif::{GifSink, GifSinkOpts, artifact_file_name, ensure_parent_dir};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{BezPath, Canvas, FrameIndex, PathPoint, Point, Rgba8};
pub use foundation::error::{PathVizError, PathVizResult};
pub use pattern::direction::{MovementVector, resolve_direction};
pub use pattern::model::{
    DEFAULT_PATTERN_NAME, HoldDuration, Pattern, PatternDocument, PatternEvent, SourceForm,
};
pub use pattern::source::{
    SourceCandidate, SourceVersion, find_latest_source, load_document, scan_sources,
    select_latest,
};
pub use pattern::step::{DEFAULT_STEP, DURATION_DIVISOR, MAX_STEP, MIN_STEP, step_magnitude};
pub use pipeline::{
    PatternOutcome, PatternReport, RunReport, artifact_path, render_pattern, run,
};
pub use render::animate::render_trajectory;
pub use render::backend::{FrameRGBA, FrameRasterizer, RenderStyle};
pub use render::cpu::CpuRasterizer;
pub use trajectory::{ResolvedStep, Trajectory, resolve_steps};
