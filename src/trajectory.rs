use crate::{
    foundation::core::{BezPath, Canvas, PathPoint},
    pattern::{
        direction::{MovementVector, resolve_direction},
        model::PatternEvent,
        step::step_magnitude,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedStep {
    pub vector: MovementVector,
    pub magnitude: i32,
}

impl ResolvedStep {
    pub fn delta(self) -> (i32, i32) {
        (
            self.vector.dx().saturating_mul(self.magnitude),
            self.vector.dy().saturating_mul(self.magnitude),
        )
    }
}

/// Resolve events into steps. Events without a direction are dropped.
pub fn resolve_steps(events: &[PatternEvent]) -> Vec<ResolvedStep> {
    events
        .iter()
        .filter_map(|ev| {
            let vector = resolve_direction(&ev.key)?;
            Some(ResolvedStep {
                vector,
                magnitude: step_magnitude(ev.duration.as_ref()),
            })
        })
        .collect()
}

/// Polyline from the canvas center. Always holds `steps + 1` points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trajectory {
    points: Vec<PathPoint>,
}

impl Trajectory {
    pub fn build(canvas: Canvas, steps: &[ResolvedStep]) -> Self {
        let mut points = Vec::with_capacity(steps.len() + 1);
        let mut head = canvas.center();
        points.push(head);
        for step in steps {
            let (dx, dy) = step.delta();
            head = head.offset(dx, dy);
            points.push(head);
        }
        Self { points }
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of drawable segments, i.e. animation frames.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn is_animatable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Open polyline through `points[0..=upto]`.
    pub fn polyline(&self, upto: usize) -> BezPath {
        let mut path = BezPath::new();
        let end = upto.min(self.points.len().saturating_sub(1));
        for (i, p) in self.points.iter().take(end + 1).enumerate() {
            if i == 0 {
                path.move_to(p.to_point());
            } else {
                path.line_to(p.to_point());
            }
        }
        path
    }
}

#[cfg(test)]
#[path = "../tests/unit/trajectory.rs"]
mod tests;
