use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{core::FrameIndex, error::PathVizResult},
    render::backend::{FrameRasterizer, RenderStyle},
    trajectory::Trajectory,
};

/// Stream one frame per trajectory segment into `sink`, in order.
///
/// Returns the number of frames written. Trajectories with fewer than two points have nothing to
/// animate: the sink is left untouched and `0` is returned.
pub fn render_trajectory<R, S>(
    trajectory: &Trajectory,
    style: &RenderStyle,
    frame_delay_ms: u32,
    rasterizer: &mut R,
    sink: &mut S,
) -> PathVizResult<usize>
where
    R: FrameRasterizer + ?Sized,
    S: FrameSink + ?Sized,
{
    if !trajectory.is_animatable() {
        return Ok(0);
    }

    sink.begin(SinkConfig {
        width: style.canvas.width,
        height: style.canvas.height,
        frame_delay_ms,
        background: style.background,
    })?;

    for head in 1..trajectory.len() {
        let frame = rasterizer.draw_frame(style, trajectory, head)?;
        sink.push_frame(FrameIndex((head - 1) as u64), &frame)?;
    }

    sink.end()?;
    Ok(trajectory.segment_count())
}

#[cfg(test)]
#[path = "../../tests/unit/render/animate.rs"]
mod tests;
