use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::FrameIndex,
        error::{PathVizError, PathVizResult},
    },
    render::backend::FrameRGBA,
};

/// Fallback stem when a pattern name has nothing usable left after trimming.
const FALLBACK_STEM: &str = "pattern";

/// Options for [`GifSink`] output.
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Final artifact path.
    pub out_path: PathBuf,
    /// Quantizer speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl GifSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            speed: 10,
        }
    }
}

/// Sink that streams frames into a looping GIF.
///
/// Frames go to `<out_path>.part`; `end` moves the finished file into place, so the artifact at
/// `out_path` is only ever written once and complete. A sink dropped before `end` removes its
/// partial file.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    part_path: PathBuf,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    frames_written: u64,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        let part_path = part_path_for(&opts.out_path);
        Self {
            opts,
            encoder: None,
            part_path,
            cfg: None,
            last_idx: None,
            frames_written: 0,
        }
    }

    fn encode_err(&self, err: image::ImageError) -> PathVizError {
        match err {
            image::ImageError::IoError(e) => PathVizError::io(&self.part_path, e),
            other => PathVizError::encode(format!("gif encoding failed: {other}")),
        }
    }

    fn discard_partial(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            drop(encoder);
            let _ = std::fs::remove_file(&self.part_path);
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> PathVizResult<()> {
        if self.encoder.is_some() {
            return Err(PathVizError::encode("gif sink already started"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(PathVizError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(PathVizError::validation(
                "gif sink width/height must fit in 16 bits",
            ));
        }
        if cfg.frame_delay_ms == 0 {
            return Err(PathVizError::validation("frame delay must be non-zero"));
        }
        if !(1..=30).contains(&self.opts.speed) {
            return Err(PathVizError::validation("gif speed must be within 1..=30"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        let file = File::create(&self.part_path).map_err(|e| PathVizError::io(&self.part_path, e))?;
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), self.opts.speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| self.encode_err(e))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PathVizResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| PathVizError::encode("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(PathVizError::encode(
                "gif sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(PathVizError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let pixels = frame.to_opaque_rgba8(cfg.background)?;
        let delay = image::Delay::from_numer_denom_ms(cfg.frame_delay_ms, 1);
        let gif_frame = image::Frame::from_parts(pixels, 0, 0, delay);

        let result = match self.encoder.as_mut() {
            Some(encoder) => encoder.encode_frame(gif_frame),
            None => return Err(PathVizError::encode("gif sink is already finalized")),
        };
        result.map_err(|e| self.encode_err(e))?;

        self.last_idx = Some(idx);
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> PathVizResult<()> {
        if self.frames_written == 0 {
            self.discard_partial();
            return Err(PathVizError::encode("gif sink finished without frames"));
        }

        // Dropping the encoder writes the GIF trailer and flushes the buffered file.
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| PathVizError::encode("gif sink not started"))?;
        drop(encoder);

        std::fs::rename(&self.part_path, &self.opts.out_path)
            .map_err(|e| PathVizError::io(&self.opts.out_path, e))?;
        tracing::debug!(
            path = %self.opts.out_path.display(),
            frames = self.frames_written,
            "wrote gif"
        );

        self.cfg = None;
        Ok(())
    }
}

impl Drop for GifSink {
    fn drop(&mut self) {
        self.discard_partial();
    }
}

/// Artifact file name for a pattern: outer underscores trimmed, path separators neutralized.
pub fn artifact_file_name(pattern_name: &str) -> String {
    let stem: String = pattern_name
        .trim_matches('_')
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    let stem = match stem.as_str() {
        "" | "." | ".." => FALLBACK_STEM,
        s => s,
    };
    format!("{stem}.gif")
}

fn part_path_for(out_path: &Path) -> PathBuf {
    let mut name = out_path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> PathVizResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PathVizError::io(parent, e))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
