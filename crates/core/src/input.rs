use serde::{Deserialize, Serialize};

/// Accumulated wheel delta required before a discrete intent fires.
/// Higher values give scrolling a slower, heavier feel.
pub const SCROLL_THRESHOLD: f64 = 150.0;

/// Minimum vertical swipe distance, in pixels, to count as a gesture.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// A normalized discrete navigation signal derived from raw gesture input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Advance,
    Retreat,
}

impl Intent {
    /// Signed index step: +1 for advance, -1 for retreat.
    pub fn step(self) -> isize {
        match self {
            Intent::Advance => 1,
            Intent::Retreat => -1,
        }
    }
}

/// Accumulates raw wheel deltas and emits at most one intent per
/// threshold crossing.
///
/// The sign of the emitted intent equals the sign of the accumulator at
/// crossing time; the accumulator resets to zero on every emit. Knows
/// nothing about sections or carousel — gating while the consumer is
/// busy is the coordinator's job.
#[derive(Debug, Default)]
pub struct WheelAccumulator {
    accumulated: f64,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw `deltaY`; returns an intent when the threshold is crossed.
    pub fn push(&mut self, delta_y: f64) -> Option<Intent> {
        self.accumulated += delta_y;
        if self.accumulated.abs() < SCROLL_THRESHOLD {
            return None;
        }
        let intent = if self.accumulated > 0.0 {
            Intent::Advance
        } else {
            Intent::Retreat
        };
        self.accumulated = 0.0;
        Some(intent)
    }
}

/// Tracks a single touch gesture from start to end.
///
/// No accumulation across gestures: each touch-end either emits one
/// intent or nothing. Swipe up (start above end) advances.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_y: Option<f64>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, screen_y: f64) {
        self.start_y = Some(screen_y);
    }

    pub fn touch_end(&mut self, screen_y: f64) -> Option<Intent> {
        let start = self.start_y.take()?;
        let distance = start - screen_y;
        if distance.abs() < SWIPE_THRESHOLD {
            return None;
        }
        Some(if distance > 0.0 {
            Intent::Advance
        } else {
            Intent::Retreat
        })
    }
}
