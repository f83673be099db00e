use std::time::Duration;

use serde::{Deserialize, Serialize};
use termfolio_protocol::NavEvent;

use crate::input::Intent;

/// Duration renderers use for the card glide between indices. The
/// controller itself never blocks on it; consecutive moves are legal.
pub const TRANSITION: Duration = Duration::from_millis(600);

/// Helix geometry: rotation between adjacent cards, vertical drop per
/// card, and the ring radius the cards sit on.
pub const ANGLE_STEP_DEG: f32 = 90.0;
pub const VERTICAL_SPACING: f32 = 150.0;
pub const RADIUS: f32 = 280.0;

/// Per-card presentation state, banded by distance from the active card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardVisual {
    pub opacity: f32,
    pub scale: f32,
    pub angle_deg: f32,
    pub y_offset: f32,
}

/// Bounded, non-wrapping index over the project cards.
///
/// This is a helix, not a ring: at either end the controller declines
/// the intent instead of wrapping, signalling the coordinator to fall
/// through to section navigation. The no-wrap invariant is tested
/// explicitly — a modulo step here would silently break the gallery's
/// exit gesture.
#[derive(Debug)]
pub struct CarouselController {
    index: usize,
    visuals: Vec<CardVisual>,
}

impl CarouselController {
    pub fn new(card_count: usize) -> Self {
        let mut controller = Self {
            index: 0,
            visuals: vec![
                CardVisual {
                    opacity: 0.0,
                    scale: 0.0,
                    angle_deg: 0.0,
                    y_offset: 0.0,
                };
                card_count
            ],
        };
        controller.recompute_visuals();
        controller
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn card_count(&self) -> usize {
        self.visuals.len()
    }

    /// Current per-card visual state, in display order.
    pub fn visuals(&self) -> &[CardVisual] {
        &self.visuals
    }

    /// Offer an intent to the carousel.
    ///
    /// Returns `true` when consumed (the carousel stepped) and `false`
    /// on a boundary decline, in which case the caller routes the intent
    /// to section navigation instead.
    pub fn try_consume(&mut self, intent: Intent, events: &mut Vec<NavEvent>) -> bool {
        match intent {
            Intent::Advance if self.index + 1 >= self.card_count() => return false,
            Intent::Retreat if self.index == 0 => return false,
            _ => {}
        }
        self.index = self.index.saturating_add_signed(intent.step());
        self.recompute_visuals();
        events.push(NavEvent::CarouselMoved { index: self.index });
        true
    }

    /// Recompute the per-card opacity/scale banding and helix placement.
    ///
    /// Idempotent: with no index change the output is identical, so
    /// renderers may call through this at any cadence.
    pub fn recompute_visuals(&mut self) {
        let index = self.index;
        for (i, visual) in self.visuals.iter_mut().enumerate() {
            let (opacity, scale) = match index.abs_diff(i) {
                0 => (1.0, 1.0),
                1 => (0.5, 0.95),
                _ => (0.2, 0.9),
            };
            *visual = CardVisual {
                opacity,
                scale,
                angle_deg: ANGLE_STEP_DEG * i as f32,
                y_offset: VERTICAL_SPACING * i as f32,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(c: &mut CarouselController) -> bool {
        c.try_consume(Intent::Advance, &mut Vec::new())
    }

    fn retreat(c: &mut CarouselController) -> bool {
        c.try_consume(Intent::Retreat, &mut Vec::new())
    }

    #[test]
    fn index_is_monotonic_until_boundary() {
        let mut carousel = CarouselController::new(8);
        for expected in 1..=7 {
            assert!(advance(&mut carousel));
            assert_eq!(carousel.index(), expected);
        }
        // Boundary reached: declines forever until a retreat occurs.
        for _ in 0..5 {
            assert!(!advance(&mut carousel));
            assert_eq!(carousel.index(), 7);
        }
        assert!(retreat(&mut carousel));
        assert_eq!(carousel.index(), 6);
        assert!(advance(&mut carousel));
        assert_eq!(carousel.index(), 7);
    }

    #[test]
    fn never_wraps_at_start() {
        let mut carousel = CarouselController::new(8);
        for _ in 0..5 {
            assert!(!retreat(&mut carousel));
            assert_eq!(carousel.index(), 0);
        }
    }

    #[test]
    fn single_card_declines_both_directions() {
        let mut carousel = CarouselController::new(1);
        assert!(!advance(&mut carousel));
        assert!(!retreat(&mut carousel));
    }

    #[test]
    fn visual_tiers_band_by_distance() {
        let mut carousel = CarouselController::new(8);
        assert!(advance(&mut carousel));
        assert!(advance(&mut carousel)); // index 2

        let visuals = carousel.visuals();
        assert_eq!((visuals[2].opacity, visuals[2].scale), (1.0, 1.0));
        assert_eq!((visuals[1].opacity, visuals[1].scale), (0.5, 0.95));
        assert_eq!((visuals[3].opacity, visuals[3].scale), (0.5, 0.95));
        assert_eq!((visuals[0].opacity, visuals[0].scale), (0.2, 0.9));
        assert_eq!((visuals[7].opacity, visuals[7].scale), (0.2, 0.9));
    }

    #[test]
    fn helix_placement_is_per_slot() {
        let carousel = CarouselController::new(3);
        let visuals = carousel.visuals();
        assert_eq!(visuals[0].angle_deg, 0.0);
        assert_eq!(visuals[1].angle_deg, 90.0);
        assert_eq!(visuals[2].angle_deg, 180.0);
        assert_eq!(visuals[2].y_offset, 300.0);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut carousel = CarouselController::new(8);
        assert!(advance(&mut carousel));
        let first = carousel.visuals().to_vec();
        carousel.recompute_visuals();
        assert_eq!(carousel.visuals(), first.as_slice());
    }

    #[test]
    fn moves_emit_events_and_declines_do_not() {
        let mut carousel = CarouselController::new(2);
        let mut events = Vec::new();
        assert!(carousel.try_consume(Intent::Advance, &mut events));
        assert!(!carousel.try_consume(Intent::Advance, &mut events));
        assert_eq!(events, vec![NavEvent::CarouselMoved { index: 1 }]);
    }
}
