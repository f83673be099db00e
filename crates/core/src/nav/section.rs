use std::time::Duration;

use termfolio_protocol::{NavEvent, SectionId};

/// Fixed wait after a transition begins before the incoming section is
/// shown. Long enough for the outgoing hide animation to complete, so
/// the two sections never overlap on screen.
pub const SETTLE_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Transitioning {
        to: SectionId,
        since: Duration,
    },
}

/// Two-phase hide-then-show navigator over the fixed section list.
///
/// `Idle(current)` → `Transitioning { from, to }` → `Idle(to)`. The
/// outgoing section is hidden the instant a transition is accepted; the
/// incoming one becomes active only after [`SETTLE_DELAY`] of ticks.
/// The show phase is gated on elapsed time rather than an
/// animation-completion callback, so a dropped animation event can
/// never wedge the machine.
///
/// Requests arriving mid-transition are dropped, not queued.
#[derive(Debug)]
pub struct SectionNavigator {
    current: SectionId,
    phase: Phase,
}

impl SectionNavigator {
    pub fn new() -> Self {
        Self {
            current: SectionId::Hero,
            phase: Phase::Idle,
        }
    }

    /// Index of the current section (the committed one while idle, the
    /// outgoing one mid-transition).
    pub fn current(&self) -> SectionId {
        self.current
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// The single active (visible) section, or `None` mid-transition —
    /// at no instant are two sections active.
    pub fn active(&self) -> Option<SectionId> {
        match self.phase {
            Phase::Idle => Some(self.current),
            Phase::Transitioning { .. } => None,
        }
    }

    /// Request a transition to the section at `target`.
    ///
    /// Rejected (returns `false`, nothing queued) when the target is the
    /// current section, out of range, or another transition is in
    /// flight. On accept the outgoing section is hidden immediately and
    /// `SectionChanged` is emitted.
    pub fn request_transition(
        &mut self,
        target: usize,
        now: Duration,
        events: &mut Vec<NavEvent>,
    ) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let Some(to) = SectionId::from_index(target) else {
            return false;
        };
        if to == self.current {
            return false;
        }
        events.push(NavEvent::SectionChanged {
            from: self.current,
            to,
        });
        self.phase = Phase::Transitioning { to, since: now };
        true
    }

    /// Advance time; settles a pending transition once the delay elapses,
    /// committing the index and emitting `SectionSettled`.
    pub fn tick(&mut self, now: Duration, events: &mut Vec<NavEvent>) {
        if let Phase::Transitioning { to, since } = self.phase
            && now.saturating_sub(since) >= SETTLE_DELAY
        {
            self.current = to;
            self.phase = Phase::Idle;
            events.push(NavEvent::SectionSettled { section: to });
        }
    }
}

impl Default for SectionNavigator {
    fn default() -> Self {
        Self::new()
    }
}
