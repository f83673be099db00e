use std::time::Duration;

/// Time between automatic swaps while idle.
pub const SWAP_INTERVAL: Duration = Duration::from_millis(5000);

/// Elastic-easing timings: the front card drops, the rest promote one
/// slot (staggered), then the dropped card returns to the back.
const DROP_DURATION: Duration = Duration::from_millis(1200);
const MOVE_DURATION: Duration = Duration::from_millis(1200);
const RETURN_DURATION: Duration = Duration::from_millis(1200);
/// Promotion starts this far into the drop (overlap factor 0.9).
const PROMOTE_OVERLAP: Duration = Duration::from_millis(1080);
const PROMOTE_STAGGER: Duration = Duration::from_millis(150);
/// Gap between the last promotion and the return (delay factor 0.05).
const RETURN_DELAY: Duration = Duration::from_millis(60);

/// Where the swap animation currently is. Renderers map phases plus
/// [`CardSwap::phase_progress`] onto their own easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapPhase {
    Idle,
    Dropping,
    Promoting,
    Returning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle { next_swap: Duration },
    Dropping { since: Duration },
    Promoting { since: Duration },
    Returning { since: Duration },
}

/// Self-rotating card stack.
///
/// Every few seconds the front card drops away, the remaining cards
/// promote one slot, and the dropped card rejoins at the back; the
/// display order rotates by one. Swaps cannot overlap, and a paused
/// stack (pointer hover) finishes its in-flight swap but schedules no
/// new one.
#[derive(Debug)]
pub struct CardSwap {
    order: Vec<usize>,
    phase: Phase,
    paused: bool,
}

impl CardSwap {
    pub fn new(card_count: usize, now: Duration) -> Self {
        Self {
            order: (0..card_count).collect(),
            phase: Phase::Idle {
                next_swap: now + SWAP_INTERVAL,
            },
            paused: false,
        }
    }

    /// Card indices front to back.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn phase(&self) -> SwapPhase {
        match self.phase {
            Phase::Idle { .. } => SwapPhase::Idle,
            Phase::Dropping { .. } => SwapPhase::Dropping,
            Phase::Promoting { .. } => SwapPhase::Promoting,
            Phase::Returning { .. } => SwapPhase::Returning,
        }
    }

    /// Progress through the current phase in `[0, 1]`; `1.0` while idle.
    pub fn phase_progress(&self, now: Duration) -> f32 {
        let fraction = |since: Duration, len: Duration| {
            (now.saturating_sub(since).as_secs_f32() / len.as_secs_f32()).clamp(0.0, 1.0)
        };
        match self.phase {
            Phase::Idle { .. } => 1.0,
            Phase::Dropping { since } => fraction(since, PROMOTE_OVERLAP),
            Phase::Promoting { since } => fraction(since, self.promote_total()),
            Phase::Returning { since } => fraction(since, RETURN_DELAY + RETURN_DURATION),
        }
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, Phase::Idle { .. })
    }

    /// Stop scheduling new swaps; an in-flight swap still completes.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self, now: Duration) {
        if self.paused {
            self.paused = false;
            if let Phase::Idle { next_swap } = &mut self.phase {
                *next_swap = now + SWAP_INTERVAL;
            }
        }
    }

    /// Start a swap immediately. Declined while one is in flight or the
    /// stack has fewer than two cards.
    pub fn swap_now(&mut self, now: Duration) -> bool {
        if self.is_animating() || self.order.len() < 2 {
            return false;
        }
        self.phase = Phase::Dropping { since: now };
        true
    }

    pub fn tick(&mut self, now: Duration) {
        match self.phase {
            Phase::Idle { next_swap } => {
                if !self.paused && self.order.len() >= 2 && now >= next_swap {
                    self.phase = Phase::Dropping { since: now };
                }
            }
            Phase::Dropping { since } => {
                if now.saturating_sub(since) >= PROMOTE_OVERLAP {
                    self.phase = Phase::Promoting { since: now };
                }
            }
            Phase::Promoting { since } => {
                if now.saturating_sub(since) >= self.promote_total() {
                    self.phase = Phase::Returning { since: now };
                }
            }
            Phase::Returning { since } => {
                if now.saturating_sub(since) >= RETURN_DELAY + RETURN_DURATION {
                    self.order.rotate_left(1);
                    self.phase = Phase::Idle {
                        next_swap: now + SWAP_INTERVAL,
                    };
                }
            }
        }
    }

    /// Total promotion time: the last card starts after the full stagger
    /// ramp and still runs its whole move.
    fn promote_total(&self) -> Duration {
        let staggers = self.order.len().saturating_sub(2) as u32;
        MOVE_DURATION + PROMOTE_STAGGER * staggers
    }
}
