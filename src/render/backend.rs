use crate::{
    foundation::{
        core::{Canvas, Rgba8},
        error::{PathVizError, PathVizResult},
        math::flatten_premul_over_bg,
    },
    trajectory::Trajectory,
};

/// A rendered frame as RGBA8 pixels.
///
/// Rasterizers emit premultiplied alpha; the flag keeps that explicit at sink boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Opaque straight-alpha copy, flattening any transparency over `bg`.
    pub fn to_opaque_rgba8(&self, bg: Rgba8) -> PathVizResult<image::RgbaImage> {
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected {
            return Err(PathVizError::render(format!(
                "frame data is {} bytes, expected {expected} for {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }

        let mut out = vec![0u8; expected];
        if self.premultiplied {
            flatten_premul_over_bg(&mut out, &self.data, [bg.r, bg.g, bg.b]);
        } else {
            out.copy_from_slice(&self.data);
            for px in out.chunks_exact_mut(4) {
                px[3] = 255;
            }
        }

        image::RgbaImage::from_raw(self.width, self.height, out)
            .ok_or_else(|| PathVizError::render("frame buffer does not match its dimensions"))
    }
}

/// Visual style for trajectory frames.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    pub canvas: Canvas,
    pub background: Rgba8,
    pub line: Rgba8,
    pub line_width: f64,
    pub marker: Rgba8,
    pub marker_radius: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            background: Rgba8::WHITE,
            line: Rgba8::BLUE,
            line_width: 3.0,
            marker: Rgba8::RED,
            marker_radius: 4.0,
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> PathVizResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(PathVizError::validation("line_width must be a positive number"));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius >= 0.0) {
            return Err(PathVizError::validation(
                "marker_radius must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Draws one frame of a trajectory animation.
///
/// Frame `head` shows the polyline through `points[0..=head]` and a marker at `points[head]`.
/// Each call starts from a fresh canvas.
pub trait FrameRasterizer {
    fn draw_frame(
        &mut self,
        style: &RenderStyle,
        trajectory: &Trajectory,
        head: usize,
    ) -> PathVizResult<FrameRGBA>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
