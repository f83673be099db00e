use std::time::Duration;

use rand::Rng;
use termfolio_protocol::NavEvent;

/// Lines typed into the boot terminal, in order.
pub static BOOT_LOG: [&str; 3] = [
    "LOADING PORTFOLIO...",
    "INITIALIZING INTERFACE...",
    "WELCOME.",
];

/// Delay before the first line appears.
const FIRST_LINE_DELAY: Duration = Duration::from_millis(500);
/// Randomized gap between consecutive lines.
const LINE_GAP_MIN_MS: u64 = 100;
const LINE_GAP_MAX_MS: u64 = 400;
/// Gap between the last line and the enter prompt.
pub const PROMPT_DELAY: Duration = Duration::from_millis(500);

/// The boot-screen typing sequence and enter gate.
///
/// Line reveal times are drawn once at construction, so the schedule is
/// fixed data and ticking is a pure comparison. All navigation input is
/// ignored until `enter` succeeds, which it can only do once the prompt
/// is on screen.
#[derive(Debug)]
pub struct BootSequence {
    line_at: Vec<Duration>,
    prompt_at: Duration,
    started: Option<Duration>,
    booted: bool,
}

impl BootSequence {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut at = FIRST_LINE_DELAY;
        let mut line_at = Vec::with_capacity(BOOT_LOG.len());
        for i in 0..BOOT_LOG.len() {
            if i > 0 {
                at += Duration::from_millis(rng.random_range(LINE_GAP_MIN_MS..LINE_GAP_MAX_MS));
            }
            line_at.push(at);
        }
        Self {
            line_at,
            prompt_at: at + PROMPT_DELAY,
            started: None,
            booted: false,
        }
    }

    /// Record the start of the sequence; later calls are no-ops.
    pub fn start(&mut self, now: Duration) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    /// Log lines revealed so far.
    pub fn visible_lines(&self, now: Duration) -> &'static [&'static str] {
        let Some(started) = self.started else {
            return &[];
        };
        let elapsed = now.saturating_sub(started);
        let visible = self.line_at.iter().filter(|at| **at <= elapsed).count();
        &BOOT_LOG[..visible]
    }

    /// Whether the enter prompt is on screen.
    pub fn prompt_visible(&self, now: Duration) -> bool {
        self.started
            .is_some_and(|started| now.saturating_sub(started) >= self.prompt_at)
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// Accept the enter gesture. Honored only once, and only while the
    /// prompt is visible; returns whether boot completed.
    pub fn enter(&mut self, now: Duration, events: &mut Vec<NavEvent>) -> bool {
        if self.booted || !self.prompt_visible(now) {
            return false;
        }
        self.booted = true;
        events.push(NavEvent::Booted);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn booted_sequence() -> BootSequence {
        let mut rng = StdRng::seed_from_u64(42);
        BootSequence::new(&mut rng)
    }

    #[test]
    fn lines_reveal_in_order() {
        let mut boot = booted_sequence();
        boot.start(ms(0));

        assert!(boot.visible_lines(ms(0)).is_empty());
        assert_eq!(boot.visible_lines(ms(500)).len(), 1);

        // Every line is out by the upper bound of the schedule.
        let all_by = 500 + 400 * (BOOT_LOG.len() as u64 - 1);
        assert_eq!(boot.visible_lines(ms(all_by)).len(), BOOT_LOG.len());
        assert_eq!(boot.visible_lines(ms(all_by))[0], "LOADING PORTFOLIO...");
    }

    #[test]
    fn prompt_follows_last_line() {
        let mut boot = booted_sequence();
        boot.start(ms(0));
        let all_by = 500 + 400 * (BOOT_LOG.len() as u64 - 1);
        assert!(!boot.prompt_visible(ms(500)));
        assert!(boot.prompt_visible(ms(all_by + 500)));
    }

    #[test]
    fn enter_gated_on_prompt_and_single_use() {
        let mut boot = booted_sequence();
        let mut events = Vec::new();
        boot.start(ms(0));

        assert!(!boot.enter(ms(100), &mut events));
        assert!(!boot.is_booted());

        let ready = ms(500 + 400 * (BOOT_LOG.len() as u64 - 1) + 500);
        assert!(boot.enter(ready, &mut events));
        assert!(boot.is_booted());
        assert_eq!(events, vec![NavEvent::Booted]);

        assert!(!boot.enter(ready + ms(10), &mut events));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn nothing_visible_before_start() {
        let boot = booted_sequence();
        assert!(boot.visible_lines(ms(10_000)).is_empty());
        assert!(!boot.prompt_visible(ms(10_000)));
    }
}
