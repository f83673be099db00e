use std::time::Duration;

use termfolio_protocol::{NavEvent, SectionId};

use crate::input::{Intent, SwipeTracker, WheelAccumulator};
use crate::nav::carousel::CarouselController;
use crate::nav::section::SectionNavigator;

/// Routes normalized intents through the nested navigable surfaces.
///
/// Two-tier dispatch: while the gallery section is active the carousel
/// gets first refusal; a boundary decline (or any other section) falls
/// through to section navigation. All navigation state lives here as
/// one explicit struct — no ambient globals.
///
/// While a section transition is in flight every arriving input is
/// dropped, not queued: rapid gestures during the settle window are
/// silently discarded.
#[derive(Debug)]
pub struct NavigationCoordinator {
    wheel: WheelAccumulator,
    swipe: SwipeTracker,
    sections: SectionNavigator,
    carousel: CarouselController,
}

impl NavigationCoordinator {
    pub fn new(card_count: usize) -> Self {
        Self {
            wheel: WheelAccumulator::new(),
            swipe: SwipeTracker::new(),
            sections: SectionNavigator::new(),
            carousel: CarouselController::new(card_count),
        }
    }

    pub fn sections(&self) -> &SectionNavigator {
        &self.sections
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    /// Feed one raw wheel delta. While transitioning the delta is not
    /// even accumulated — the gesture is discarded wholesale.
    pub fn on_wheel(&mut self, delta_y: f64, now: Duration, events: &mut Vec<NavEvent>) {
        if self.sections.is_transitioning() {
            return;
        }
        if let Some(intent) = self.wheel.push(delta_y) {
            self.on_intent(intent, now, events);
        }
    }

    /// Touch-start is always recorded; only the emit side is gated.
    pub fn on_touch_start(&mut self, screen_y: f64) {
        self.swipe.touch_start(screen_y);
    }

    pub fn on_touch_end(&mut self, screen_y: f64, now: Duration, events: &mut Vec<NavEvent>) {
        let Some(intent) = self.swipe.touch_end(screen_y) else {
            return;
        };
        if self.sections.is_transitioning() {
            return;
        }
        self.on_intent(intent, now, events);
    }

    /// Dispatch one discrete intent: carousel first in the gallery,
    /// section navigation otherwise. Out-of-range section steps are a
    /// silent no-op.
    pub fn on_intent(&mut self, intent: Intent, now: Duration, events: &mut Vec<NavEvent>) {
        if self.sections.is_transitioning() {
            return;
        }
        if self.sections.current() == SectionId::Projects
            && self.carousel.try_consume(intent, events)
        {
            return;
        }
        let next = self.sections.current().index() as isize + intent.step();
        if next >= 0 {
            self.sections
                .request_transition(next as usize, now, events);
        }
    }

    /// Direct jump from the side HUD. Same guards as gesture navigation.
    pub fn select_section(
        &mut self,
        index: usize,
        now: Duration,
        events: &mut Vec<NavEvent>,
    ) -> bool {
        self.sections.request_transition(index, now, events)
    }

    pub fn tick(&mut self, now: Duration, events: &mut Vec<NavEvent>) {
        self.sections.tick(now, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Drive the coordinator into the gallery section.
    fn goto_projects(coordinator: &mut NavigationCoordinator, events: &mut Vec<NavEvent>) {
        let projects = SectionId::Projects.index();
        assert!(coordinator.select_section(projects, ms(0), events));
        coordinator.tick(ms(800), events);
        assert_eq!(coordinator.sections().current(), SectionId::Projects);
    }

    #[test]
    fn wheel_threshold_drives_section_change() {
        let mut coordinator = NavigationCoordinator::new(8);
        let mut events = Vec::new();

        coordinator.on_wheel(100.0, ms(0), &mut events);
        assert!(events.is_empty());
        coordinator.on_wheel(50.0, ms(10), &mut events);
        assert_eq!(
            events,
            vec![NavEvent::SectionChanged {
                from: SectionId::Hero,
                to: SectionId::About,
            }]
        );
    }

    #[test]
    fn input_during_transition_is_dropped_not_queued() {
        let mut coordinator = NavigationCoordinator::new(8);
        let mut events = Vec::new();

        coordinator.on_wheel(150.0, ms(0), &mut events);
        // A full threshold's worth of scrolling mid-transition.
        coordinator.on_wheel(300.0, ms(100), &mut events);
        coordinator.on_wheel(300.0, ms(200), &mut events);

        coordinator.tick(ms(800), &mut events);
        assert_eq!(coordinator.sections().current(), SectionId::About);
        // Nothing queued: no second transition starts on its own.
        coordinator.tick(ms(1600), &mut events);
        assert_eq!(coordinator.sections().current(), SectionId::About);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, NavEvent::SectionChanged { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn gallery_intents_go_to_carousel_first() {
        let mut coordinator = NavigationCoordinator::new(8);
        let mut events = Vec::new();
        goto_projects(&mut coordinator, &mut events);
        events.clear();

        coordinator.on_intent(Intent::Advance, ms(1000), &mut events);
        assert_eq!(events, vec![NavEvent::CarouselMoved { index: 1 }]);
        assert!(!coordinator.sections().is_transitioning());
    }

    #[test]
    fn boundary_decline_falls_through_to_section_change() {
        let mut coordinator = NavigationCoordinator::new(3);
        let mut events = Vec::new();
        goto_projects(&mut coordinator, &mut events);

        for _ in 0..2 {
            coordinator.on_intent(Intent::Advance, ms(1000), &mut events);
        }
        assert_eq!(coordinator.carousel().index(), 2);
        events.clear();

        coordinator.on_intent(Intent::Advance, ms(1100), &mut events);
        assert_eq!(
            events,
            vec![NavEvent::SectionChanged {
                from: SectionId::Projects,
                to: SectionId::Contact,
            }]
        );
        // The declined intent did not move the carousel.
        assert_eq!(coordinator.carousel().index(), 2);
    }

    #[test]
    fn retreat_at_first_card_exits_backward() {
        let mut coordinator = NavigationCoordinator::new(3);
        let mut events = Vec::new();
        goto_projects(&mut coordinator, &mut events);
        events.clear();

        coordinator.on_intent(Intent::Retreat, ms(1000), &mut events);
        assert_eq!(
            events,
            vec![NavEvent::SectionChanged {
                from: SectionId::Projects,
                to: SectionId::About,
            }]
        );
        assert_eq!(coordinator.carousel().index(), 0);
    }

    #[test]
    fn retreat_from_first_section_is_noop() {
        let mut coordinator = NavigationCoordinator::new(8);
        let mut events = Vec::new();
        coordinator.on_intent(Intent::Retreat, ms(0), &mut events);
        assert!(events.is_empty());
        assert_eq!(coordinator.sections().current(), SectionId::Hero);
    }

    #[test]
    fn swipe_gesture_navigates() {
        let mut coordinator = NavigationCoordinator::new(8);
        let mut events = Vec::new();
        coordinator.on_touch_start(500.0);
        coordinator.on_touch_end(420.0, ms(0), &mut events);
        assert_eq!(
            events,
            vec![NavEvent::SectionChanged {
                from: SectionId::Hero,
                to: SectionId::About,
            }]
        );
    }

    #[test]
    fn hud_select_rejected_mid_transition() {
        let mut coordinator = NavigationCoordinator::new(8);
        let mut events = Vec::new();
        assert!(coordinator.select_section(2, ms(0), &mut events));
        assert!(!coordinator.select_section(3, ms(100), &mut events));
        coordinator.tick(ms(800), &mut events);
        assert_eq!(coordinator.sections().current(), SectionId::Projects);
    }
}
