use crate::pattern::model::HoldDuration;

pub const DEFAULT_STEP: i32 = 20;
pub const MIN_STEP: i32 = 5;
pub const MAX_STEP: i32 = 100;
pub const DURATION_DIVISOR: i64 = 10;

impl HoldDuration {
    /// Integer reading of the authored value, if it has one.
    ///
    /// Fractional numbers truncate toward zero, strings must hold a base-10 integer, and
    /// booleans count as 0/1.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Fractional(v) if v.is_finite() => Some(v.trunc() as i64),
            Self::Fractional(_) => None,
            Self::Flag(v) => Some(i64::from(*v)),
            Self::Text(s) => s.trim().parse::<i64>().ok(),
            Self::Other(_) => None,
        }
    }
}

/// Pixel length of one step for an event held `duration` milliseconds.
///
/// `clamp(floor(duration / 10), 5, 100)` for integer-like durations, [`DEFAULT_STEP`] otherwise.
pub fn step_magnitude(duration: Option<&HoldDuration>) -> i32 {
    let Some(ms) = duration.and_then(HoldDuration::as_integer) else {
        return DEFAULT_STEP;
    };
    let scaled = ms
        .div_euclid(DURATION_DIVISOR)
        .clamp(i64::from(MIN_STEP), i64::from(MAX_STEP));
    scaled as i32
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/step.rs"]
mod tests;
