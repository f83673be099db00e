use std::time::Duration;

use rand::Rng;

/// Per-character scramble window and cadence.
const DEFAULT_STAGGER: Duration = Duration::from_millis(30);
const DEFAULT_DURATION: Duration = Duration::from_millis(350);
const SCRAMBLE_FRAME: Duration = Duration::from_millis(50);

const DEFAULT_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+-=[]{}|;:,.<>?/";

#[derive(Debug, Clone)]
pub struct ShuffleOptions {
    /// Delay between the start of consecutive characters.
    pub stagger: Duration,
    /// How long each character scrambles before settling.
    pub duration: Duration,
    /// Re-trigger automatically this long after settling.
    pub loop_delay: Option<Duration>,
    pub charset: Vec<char>,
}

impl Default for ShuffleOptions {
    fn default() -> Self {
        Self {
            stagger: DEFAULT_STAGGER,
            duration: DEFAULT_DURATION,
            loop_delay: None,
            charset: DEFAULT_CHARSET.chars().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { started: Duration },
    LoopWait { until: Duration },
}

/// Character-shuffle text effect.
///
/// Each character scrambles through random glyphs for a fixed window,
/// starting staggered left to right, then settles on the real one.
/// Spaces never scramble. Triggering while a run is active is a no-op.
#[derive(Debug)]
pub struct TextShuffle {
    original: Vec<char>,
    display: Vec<char>,
    next_scramble: Vec<Duration>,
    phase: Phase,
    has_run: bool,
    options: ShuffleOptions,
}

impl TextShuffle {
    pub fn new(text: &str, options: ShuffleOptions) -> Self {
        let original: Vec<char> = text.chars().collect();
        Self {
            display: original.clone(),
            next_scramble: vec![Duration::ZERO; original.len()],
            original,
            phase: Phase::Idle,
            has_run: false,
            options,
        }
    }

    /// Currently displayed characters.
    pub fn display(&self) -> &[char] {
        &self.display
    }

    pub fn text(&self) -> String {
        self.display.iter().collect()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Start a shuffle. Returns `false` (and does nothing) while one is
    /// already running.
    pub fn trigger(&mut self, now: Duration) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = Phase::Running { started: now };
        for slot in &mut self.next_scramble {
            *slot = Duration::ZERO;
        }
        true
    }

    pub fn tick<R: Rng>(&mut self, now: Duration, rng: &mut R) {
        match self.phase {
            Phase::Idle => {}
            Phase::LoopWait { until } => {
                if now >= until {
                    self.phase = Phase::Running { started: now };
                    for slot in &mut self.next_scramble {
                        *slot = Duration::ZERO;
                    }
                }
            }
            Phase::Running { started } => {
                let mut all_settled = true;
                for (i, (display, original)) in self
                    .display
                    .iter_mut()
                    .zip(&self.original)
                    .enumerate()
                {
                    let begin = started + self.options.stagger * i as u32;
                    let end = begin + self.options.duration;
                    if now >= end {
                        *display = *original;
                    } else {
                        all_settled = false;
                        if now >= begin && *original != ' ' && now >= self.next_scramble[i] {
                            let charset = &self.options.charset;
                            *display = charset[rng.random_range(0..charset.len())];
                            self.next_scramble[i] = now + SCRAMBLE_FRAME;
                        }
                    }
                }
                if all_settled {
                    self.has_run = true;
                    self.phase = match self.options.loop_delay {
                        Some(delay) => Phase::LoopWait { until: now + delay },
                        None => Phase::Idle,
                    };
                }
            }
        }
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

    fn run_until(shuffle: &mut TextShuffle, rng: &mut StdRng, from_ms: u64, to_ms: u64) {
        for t in (from_ms..=to_ms).step_by(10) {
            shuffle.tick(ms(t), rng);
        }
    }

    #[test]
    fn settles_back_to_original_text() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut shuffle = TextShuffle::new("HELLO WORLD", ShuffleOptions::default());
        assert!(shuffle.trigger(ms(0)));
        run_until(&mut shuffle, &mut rng, 0, 2000);
        assert_eq!(shuffle.text(), "HELLO WORLD");
        assert!(!shuffle.is_running());
        assert!(shuffle.has_run());
    }

    #[test]
    fn scrambles_mid_run_but_not_spaces() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut shuffle = TextShuffle::new("AB CD", ShuffleOptions::default());
        assert!(shuffle.trigger(ms(0)));
        let mut saw_scramble = false;
        for t in (0..300).step_by(10) {
            shuffle.tick(ms(t), &mut rng);
            let display = shuffle.display();
            assert_eq!(display[2], ' ');
            if shuffle.text() != "AB CD" {
                saw_scramble = true;
            }
        }
        assert!(saw_scramble);
    }

    #[test]
    fn trigger_is_reentrancy_guarded() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut shuffle = TextShuffle::new("ABC", ShuffleOptions::default());
        assert!(shuffle.trigger(ms(0)));
        shuffle.tick(ms(10), &mut rng);
        assert!(!shuffle.trigger(ms(20)));
    }

    #[test]
    fn loop_mode_retriggers_after_delay() {
        let mut rng = StdRng::seed_from_u64(3);
        let options = ShuffleOptions {
            loop_delay: Some(ms(100)),
            ..ShuffleOptions::default()
        };
        let mut shuffle = TextShuffle::new("AB", options);
        assert!(shuffle.trigger(ms(0)));
        run_until(&mut shuffle, &mut rng, 0, 1000);
        assert!(!shuffle.is_running());
        run_until(&mut shuffle, &mut rng, 1000, 1200);
        assert!(shuffle.is_running() || shuffle.has_run());
    }
}
