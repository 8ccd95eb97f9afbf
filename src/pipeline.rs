use std::path::{Path, PathBuf};

use crate::{
    catalog::{CatalogEntry, write_catalog},
    config::VizConfig,
    encode::gif::{GifSink, GifSinkOpts, artifact_file_name},
    foundation::error::{PathVizError, PathVizResult},
    pattern::{
        model::{Pattern, SourceForm},
        source::{find_latest_source, load_document},
    },
    render::{animate::render_trajectory, backend::FrameRasterizer, cpu::CpuRasterizer},
    trajectory::{Trajectory, resolve_steps},
};

/// What happened to one pattern during a run.
#[derive(Debug)]
pub enum PatternOutcome {
    /// A GIF was written.
    Rendered { artifact: PathBuf, frames: usize },
    /// No event resolved to a movement, so there was nothing to animate.
    Skipped,
    /// Rendering failed; siblings were still processed.
    Failed(PathVizError),
}

#[derive(Debug)]
pub struct PatternReport {
    /// Name as found in the source.
    pub name: String,
    /// Trimmed name used for headings.
    pub display_name: String,
    pub events: usize,
    pub steps: usize,
    pub outcome: PatternOutcome,
}

#[derive(Debug, Default)]
pub struct RunReport {
    /// Source that was rendered; `None` when no source was available.
    pub source: Option<PathBuf>,
    pub form: Option<SourceForm>,
    pub patterns: Vec<PatternReport>,
    /// Catalog written at the end of the run.
    pub catalog: Option<PathBuf>,
}

impl RunReport {
    /// Rendered artifacts in processing order.
    pub fn catalog_entries(&self) -> Vec<CatalogEntry> {
        self.patterns
            .iter()
            .filter_map(|p| match &p.outcome {
                PatternOutcome::Rendered { artifact, .. } => Some(CatalogEntry {
                    name: p.display_name.clone(),
                    artifact: artifact.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn rendered_count(&self) -> usize {
        self.count(|o| matches!(o, PatternOutcome::Rendered { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, PatternOutcome::Skipped))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, PatternOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&PatternOutcome) -> bool) -> usize {
        self.patterns.iter().filter(|p| pred(&p.outcome)).count()
    }
}

/// Render every pattern of the newest source and regenerate the catalog.
///
/// A missing source ends the run quietly with nothing written. Failures scoped to one pattern are
/// recorded in the report; filesystem failures abort the run.
#[tracing::instrument(skip(cfg), fields(pattern_dir = %cfg.pattern_dir.display()))]
pub fn run(cfg: &VizConfig) -> PathVizResult<RunReport> {
    cfg.validate()?;

    let source = match &cfg.source {
        Some(path) => Some(path.clone()),
        None => find_latest_source(&cfg.pattern_dir)?,
    };
    let Some(source) = source else {
        tracing::warn!("no valid pattern source found; nothing to render");
        return Ok(RunReport::default());
    };
    tracing::info!(source = %source.display(), "rendering pattern source");

    let document = load_document(&source)?;
    let form = document.form();
    let patterns = document.into_patterns();
    tracing::debug!(?form, count = patterns.len(), "loaded patterns");

    std::fs::create_dir_all(&cfg.output_dir).map_err(|e| PathVizError::io(&cfg.output_dir, e))?;

    let mut rasterizer = CpuRasterizer::new(cfg.style.canvas)?;
    let mut reports = Vec::with_capacity(patterns.len());
    for pattern in &patterns {
        let report = render_pattern(pattern, cfg, &mut rasterizer)?;
        reports.push(report);
    }

    let mut report = RunReport {
        source: Some(source),
        form: Some(form),
        patterns: reports,
        catalog: None,
    };
    write_catalog(&cfg.catalog_path, &report.catalog_entries())?;
    report.catalog = Some(cfg.catalog_path.clone());

    tracing::info!(
        rendered = report.rendered_count(),
        skipped = report.skipped_count(),
        failed = report.failed_count(),
        "visualization run finished"
    );
    Ok(report)
}

/// Render one pattern into `cfg.output_dir`. Only fatal errors are returned as `Err`.
pub fn render_pattern<R: FrameRasterizer + ?Sized>(
    pattern: &Pattern,
    cfg: &VizConfig,
    rasterizer: &mut R,
) -> PathVizResult<PatternReport> {
    let steps = resolve_steps(&pattern.events);
    let trajectory = Trajectory::build(cfg.style.canvas, &steps);

    let outcome = if trajectory.is_animatable() {
        let artifact = artifact_path(&cfg.output_dir, &pattern.name);
        match render_to_gif(&trajectory, cfg, rasterizer, &artifact) {
            Ok(frames) => {
                tracing::info!(
                    pattern = pattern.display_name(),
                    frames,
                    path = %artifact.display(),
                    "rendered pattern"
                );
                PatternOutcome::Rendered { artifact, frames }
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!(pattern = pattern.display_name(), error = %e, "pattern failed");
                PatternOutcome::Failed(e)
            }
        }
    } else {
        tracing::info!(
            pattern = pattern.display_name(),
            "no movement in pattern; skipping"
        );
        PatternOutcome::Skipped
    };

    Ok(PatternReport {
        name: pattern.name.clone(),
        display_name: pattern.display_name().to_string(),
        events: pattern.events.len(),
        steps: steps.len(),
        outcome,
    })
}

pub fn artifact_path(output_dir: &Path, pattern_name: &str) -> PathBuf {
    output_dir.join(artifact_file_name(pattern_name))
}

fn render_to_gif<R: FrameRasterizer + ?Sized>(
    trajectory: &Trajectory,
    cfg: &VizConfig,
    rasterizer: &mut R,
    artifact: &Path,
) -> PathVizResult<usize> {
    let mut sink = GifSink::new(GifSinkOpts {
        out_path: artifact.to_path_buf(),
        speed: cfg.gif_speed,
    });
    render_trajectory(
        trajectory,
        &cfg.style,
        cfg.frame_delay_ms,
        rasterizer,
        &mut sink,
    )
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
