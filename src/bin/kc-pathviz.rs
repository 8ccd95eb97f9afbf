use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kc_pathviz::FrameRasterizer as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "kc-pathviz",
    version,
    about = "Render movement patterns as animated trajectory GIFs",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of a pattern as a PNG.
    Frame(FrameArgs),
}

/// Running without a subcommand renders the newest source with these settings.
#[derive(Parser, Debug)]
struct RunArgs {
    /// Directory scanned for versioned pattern sources.
    #[arg(long, default_value = kc_pathviz::DEFAULT_PATTERN_DIR)]
    pattern_dir: PathBuf,

    /// Render this source file instead of the newest one in --pattern-dir.
    #[arg(long)]
    source: Option<PathBuf>,

    /// Directory receiving the GIFs.
    #[arg(long, default_value = kc_pathviz::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Markdown catalog to regenerate.
    #[arg(long, default_value = kc_pathviz::DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Display time of each frame in milliseconds.
    #[arg(long, default_value_t = kc_pathviz::DEFAULT_FRAME_DELAY_MS)]
    frame_delay_ms: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Pattern source JSON (structured or legacy).
    #[arg(long)]
    source: PathBuf,

    /// Pattern name, raw or trimmed. Defaults to the first pattern in the source.
    #[arg(long)]
    pattern: Option<String>,

    /// Frame to render, 1-based. Defaults to the last frame.
    #[arg(long)]
    step: Option<usize>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Some(Command::Frame(args)) => cmd_frame(args),
        None => cmd_run(cli.run),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = kc_pathviz::VizConfig {
        pattern_dir: args.pattern_dir,
        source: args.source,
        output_dir: args.output_dir,
        catalog_path: args.catalog,
        frame_delay_ms: args.frame_delay_ms,
        ..kc_pathviz::VizConfig::default()
    };

    let report = kc_pathviz::run(&cfg).context("visualization run failed")?;
    if report.source.is_none() {
        eprintln!("no valid pattern source found");
        return Ok(());
    }

    for p in &report.patterns {
        match &p.outcome {
            kc_pathviz::PatternOutcome::Rendered { artifact, frames } => {
                eprintln!("wrote {} ({frames} frames)", artifact.display());
            }
            kc_pathviz::PatternOutcome::Skipped => {
                eprintln!("skipped {} (no movement)", p.display_name);
            }
            kc_pathviz::PatternOutcome::Failed(e) => {
                eprintln!("failed {}: {e}", p.display_name);
            }
        }
    }
    if let Some(catalog) = &report.catalog {
        eprintln!("wrote {}", catalog.display());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let document = kc_pathviz::load_document(&args.source)
        .with_context(|| format!("load pattern source '{}'", args.source.display()))?;
    let patterns = document.into_patterns();

    let pattern = match &args.pattern {
        Some(name) => patterns
            .iter()
            .find(|p| p.name == *name || p.display_name() == name.as_str())
            .with_context(|| format!("pattern '{name}' not found in source"))?,
        None => patterns.first().context("source holds no patterns")?,
    };

    let style = kc_pathviz::RenderStyle::default();
    let steps = kc_pathviz::resolve_steps(&pattern.events);
    let trajectory = kc_pathviz::Trajectory::build(style.canvas, &steps);
    if !trajectory.is_animatable() {
        anyhow::bail!("pattern '{}' has no movement to draw", pattern.display_name());
    }

    let last = trajectory.segment_count();
    let step = args.step.unwrap_or(last);
    if !(1..=last).contains(&step) {
        anyhow::bail!("--step must be within 1..={last}");
    }

    let mut rasterizer = kc_pathviz::CpuRasterizer::new(style.canvas)?;
    let frame = rasterizer.draw_frame(&style, &trajectory, step)?;
    let pixels = frame.to_opaque_rgba8(style.background)?;

    kc_pathviz::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        pixels.as_raw(),
        pixels.width(),
        pixels.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
