use kurbo::Shape as _;

use crate::{
    foundation::{
        core::{BezPath, Canvas, Point, Rgba8},
        error::{PathVizError, PathVizResult},
    },
    render::backend::{FrameRGBA, FrameRasterizer, RenderStyle},
    trajectory::Trajectory,
};

const MARKER_TOLERANCE: f64 = 0.1;

/// CPU rasterizer powered by `vello_cpu`.
pub struct CpuRasterizer {
    width: u16,
    height: u16,
}

impl CpuRasterizer {
    pub fn new(canvas: Canvas) -> PathVizResult<Self> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| PathVizError::validation("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| PathVizError::validation("canvas height exceeds u16"))?;
        Ok(Self { width, height })
    }
}

impl FrameRasterizer for CpuRasterizer {
    fn draw_frame(
        &mut self,
        style: &RenderStyle,
        trajectory: &Trajectory,
        head: usize,
    ) -> PathVizResult<FrameRGBA> {
        if u32::from(self.width) != style.canvas.width
            || u32::from(self.height) != style.canvas.height
        {
            return Err(PathVizError::render(format!(
                "rasterizer is {}x{} but style canvas is {}x{}",
                self.width, self.height, style.canvas.width, style.canvas.height
            )));
        }
        let Some(head_point) = trajectory.points().get(head).copied() else {
            return Err(PathVizError::render(format!(
                "frame head {head} is past the trajectory end ({} points)",
                trajectory.len()
            )));
        };
        if head == 0 {
            return Err(PathVizError::render("frame head must be at least 1"));
        }

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_paint(color_to_cpu(style.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.line_width));
        ctx.set_paint(color_to_cpu(style.line));
        ctx.stroke_path(&bezpath_to_cpu(&trajectory.polyline(head)));

        if style.marker_radius > 0.0 {
            let marker = kurbo::Circle::new(head_point.to_point(), style.marker_radius)
                .to_path(MARKER_TOLERANCE);
            ctx.set_paint(color_to_cpu(style.marker));
            ctx.fill_path(&bezpath_to_cpu(&marker));
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
