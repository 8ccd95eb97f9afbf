/// A single cardinal or diagonal unit step, `(dx, dy)` in `{-1, 0, 1}²` minus the origin.
///
/// Screen coordinates: `dy = -1` points up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MovementVector {
    dx: i8,
    dy: i8,
}

impl MovementVector {
    pub const UP: Self = Self { dx: 0, dy: -1 };
    pub const LEFT: Self = Self { dx: -1, dy: 0 };
    pub const DOWN: Self = Self { dx: 0, dy: 1 };
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };

    pub fn dx(self) -> i32 {
        i32::from(self.dx)
    }

    pub fn dy(self) -> i32 {
        i32::from(self.dy)
    }

    pub fn as_tuple(self) -> (i32, i32) {
        (self.dx(), self.dy())
    }

    /// Sum of two cardinals on different axes; `None` for same-axis pairs.
    fn combine(self, other: Self) -> Option<Self> {
        let same_axis = (self.dx == 0) == (other.dx == 0);
        if same_axis {
            return None;
        }
        Some(Self {
            dx: self.dx + other.dx,
            dy: self.dy + other.dy,
        })
    }
}

/// Map one lower-cased token to its cardinal direction (QWERTY WASD).
fn cardinal(token: &str) -> Option<MovementVector> {
    match token {
        "w" => Some(MovementVector::UP),
        "a" => Some(MovementVector::LEFT),
        "s" => Some(MovementVector::DOWN),
        "d" => Some(MovementVector::RIGHT),
        _ => None,
    }
}

/// Resolve a raw `key` such as `"W"`, `"shift+a"` or `"w+a"` to a movement vector.
///
/// Non-direction tokens are ignored. One direction letter yields a cardinal; exactly two yield a
/// diagonal when they lie on different axes. Anything else (no letters, opposite or repeated
/// letters, three or more letters) yields `None`.
pub fn resolve_direction(key: &str) -> Option<MovementVector> {
    let mut dirs = key
        .split('+')
        .filter_map(|token| cardinal(&token.to_ascii_lowercase()));

    let first = dirs.next()?;
    let Some(second) = dirs.next() else {
        return Some(first);
    };
    if dirs.next().is_some() {
        return None;
    }
    first.combine(second)
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/direction.rs"]
mod tests;
