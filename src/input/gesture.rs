use std::time::Instant;

use crate::input::Direction;

/// Horizontal displacement needed for a drag release to commit.
pub const DRAG_COMMIT: i32 = 100;
/// Displacement past which the lean indicator activates mid-drag.
pub const LEAN_THRESHOLD: i32 = 50;
/// Total movement at or below this counts as a tap.
pub const TAP_TOLERANCE: i32 = 10;
/// Press-to-release window for swipe recognition.
pub const SWIPE_MAX_MS: u128 = 300;
/// Minimum dominant-axis displacement for a swipe.
pub const SWIPE_MIN_DIST: i32 = 30;

/// Mid-drag visual hint shown while the card is pulled past [`LEAN_THRESHOLD`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lean {
    Left,
    Right,
}

/// Tracks one pointer interaction from press to release and resolves it into a
/// tap, swipe, or drag. Coordinates are in abstract units, not terminal cells;
/// the caller scales before feeding positions in.
///
/// Resolution order at release: tap (movement within [`TAP_TOLERANCE`]), then
/// swipe (fast release past [`SWIPE_MIN_DIST`]), then the horizontal drag
/// thresholds. Anything else is a no-op.
#[derive(Debug, Default)]
pub struct GestureTracker {
    origin: Option<(i32, i32)>,
    pressed_at: Option<Instant>,
    lean: Option<Lean>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lean(&self) -> Option<Lean> {
        self.lean
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    pub fn press(&mut self, x: i32, y: i32, now: Instant) {
        self.origin = Some((x, y));
        self.pressed_at = Some(now);
        self.lean = None;
    }

    /// Update the lean indicator mid-drag. The indicator is sticky: once set it
    /// only changes when the opposite threshold is crossed, and only release or
    /// cancel clears it.
    pub fn drag_to(&mut self, x: i32, _y: i32) {
        let Some((ox, _)) = self.origin else {
            return;
        };
        let dx = x - ox;
        if dx > LEAN_THRESHOLD && self.lean != Some(Lean::Right) {
            self.lean = Some(Lean::Right);
        } else if dx < -LEAN_THRESHOLD && self.lean != Some(Lean::Left) {
            self.lean = Some(Lean::Left);
        }
    }

    pub fn release(&mut self, x: i32, y: i32, now: Instant) -> Option<Direction> {
        let (ox, oy) = self.origin.take()?;
        let pressed_at = self.pressed_at.take();
        self.lean = None;

        let dx = x - ox;
        let dy = y - oy;

        if dx.abs() <= TAP_TOLERANCE && dy.abs() <= TAP_TOLERANCE {
            return Some(Direction::Up);
        }

        let elapsed_ms = pressed_at.map(|t| now.duration_since(t).as_millis());
        if elapsed_ms.is_some_and(|ms| ms <= SWIPE_MAX_MS) {
            if dx.abs() >= dy.abs() && dx.abs() >= SWIPE_MIN_DIST {
                return Some(if dx > 0 { Direction::Right } else { Direction::Left });
            }
            if dy.abs() > dx.abs() && dy.abs() >= SWIPE_MIN_DIST {
                // Terminal rows grow downward
                return Some(if dy > 0 { Direction::Down } else { Direction::Up });
            }
        }

        if dx > DRAG_COMMIT {
            Some(Direction::Right)
        } else if dx < -DRAG_COMMIT {
            Some(Direction::Left)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.pressed_at = None;
        self.lean = None;
    }
}
