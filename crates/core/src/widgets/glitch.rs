use std::time::Duration;

use rand::Rng;
use termfolio_protocol::Color;

/// Fraction of cells re-randomized on each glitch pass.
const CHURN_FRACTION: f64 = 0.05;
/// Color fade progress added per tick when smoothing is on.
const FADE_STEP: f32 = 0.05;

const DEFAULT_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ!@#$&*()-_+=/[]{};:<>.,0123456789";

#[derive(Debug, Clone)]
pub struct GlitchOptions {
    pub colors: Vec<Color>,
    /// Minimum time between glitch passes.
    pub interval: Duration,
    /// Fade churned cells toward their new color instead of snapping.
    pub smooth: bool,
    pub charset: Vec<char>,
}

impl Default for GlitchOptions {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::GREEN,
                Color::rgb(0x00, 0xFF, 0x00),
                Color::rgb(0x32, 0xCD, 0x32),
            ],
            interval: Duration::from_millis(50),
            smooth: true,
            charset: DEFAULT_CHARSET.chars().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GlitchCell {
    pub ch: char,
    from: Color,
    target: Color,
    progress: f32,
}

impl GlitchCell {
    /// Currently displayed color, interpolated mid-fade.
    pub fn color(&self) -> Color {
        lerp(self.from, self.target, self.progress.clamp(0.0, 1.0))
    }
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    let mix = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    Color::rgb(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

/// Letter-glitch background grid.
///
/// Every pass a small fraction of cells get a new character and a new
/// target color; with smoothing on, the displayed color fades toward
/// the target over subsequent ticks.
#[derive(Debug)]
pub struct LetterGlitch {
    options: GlitchOptions,
    cells: Vec<GlitchCell>,
    columns: usize,
    rows: usize,
    last_glitch: Option<Duration>,
}

impl LetterGlitch {
    pub fn new<R: Rng>(options: GlitchOptions, columns: usize, rows: usize, rng: &mut R) -> Self {
        let mut glitch = Self {
            options,
            cells: Vec::new(),
            columns: 0,
            rows: 0,
            last_glitch: None,
        };
        glitch.resize(columns, rows, rng);
        glitch
    }

    /// Rebuild the grid for new dimensions, re-randomizing every cell.
    pub fn resize<R: Rng>(&mut self, columns: usize, rows: usize, rng: &mut R) {
        self.columns = columns;
        self.rows = rows;
        self.cells = (0..columns * rows)
            .map(|_| {
                let color = self.options.colors[rng.random_range(0..self.options.colors.len())];
                GlitchCell {
                    ch: self.options.charset[rng.random_range(0..self.options.charset.len())],
                    from: color,
                    target: color,
                    progress: 1.0,
                }
            })
            .collect();
        self.last_glitch = None;
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[GlitchCell] {
        &self.cells
    }

    pub fn tick<R: Rng>(&mut self, now: Duration, rng: &mut R) {
        if self.cells.is_empty() {
            return;
        }
        let due = match self.last_glitch {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.options.interval,
        };
        if due {
            self.churn(rng);
            self.last_glitch = Some(now);
        }
        if self.options.smooth {
            for cell in &mut self.cells {
                if cell.progress < 1.0 {
                    cell.progress = (cell.progress + FADE_STEP).min(1.0);
                }
            }
        }
    }

    fn churn<R: Rng>(&mut self, rng: &mut R) {
        let count = ((self.cells.len() as f64 * CHURN_FRACTION) as usize).max(1);
        for _ in 0..count {
            let index = rng.random_range(0..self.cells.len());
            let cell = &mut self.cells[index];
            cell.ch = self.options.charset[rng.random_range(0..self.options.charset.len())];
            let target = self.options.colors[rng.random_range(0..self.options.colors.len())];
            if self.options.smooth {
                cell.from = cell.color();
                cell.target = target;
                cell.progress = 0.0;
            } else {
                cell.from = target;
                cell.target = target;
                cell.progress = 1.0;
            }
        }
    }
}
