//! End-to-end navigation scenarios driven through the engine, the way a
//! renderer's event loop would drive it.

use std::time::Duration;

use termfolio_core::content::ProjectStore;
use termfolio_core::{Engine, EngineOptions, InputEvent};
use termfolio_protocol::{LayoutKind, NavEvent, SectionId, ThemeToken};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn booted_engine() -> (Engine, Duration) {
    let mut engine = Engine::new(
        ProjectStore::builtin(),
        EngineOptions {
            particle_count: 50,
            seed: Some(5),
            ..EngineOptions::default()
        },
    );
    engine.tick(ms(0));
    // Past the whole boot schedule (worst case 1300ms lines + 500ms prompt).
    let now = ms(3000);
    engine.tick(now);
    engine.handle(InputEvent::Enter, now);
    engine.tick(now);
    assert!(engine.is_booted());
    (engine, now)
}

/// Scroll past the threshold once and let the transition settle.
fn scroll_and_settle(engine: &mut Engine, delta: f64, mut now: Duration) -> (Vec<NavEvent>, Duration) {
    engine.handle(InputEvent::Wheel { delta_y: delta }, now);
    let mut events = engine.tick(now);
    now += ms(800);
    events.extend(engine.tick(now));
    (events, now)
}

#[test]
fn advance_from_hero_settles_on_about() {
    let (mut engine, now) = booted_engine();
    assert_eq!(engine.snapshot(now).active_section, Some(SectionId::Hero));

    let (events, now) = scroll_and_settle(&mut engine, 150.0, now);
    assert!(events.contains(&NavEvent::SectionChanged {
        from: SectionId::Hero,
        to: SectionId::About,
    }));
    assert!(events.contains(&NavEvent::SectionSettled {
        section: SectionId::About,
    }));

    let snap = engine.snapshot(now);
    assert_eq!(snap.section, SectionId::About);
    assert_eq!(snap.active_section, Some(SectionId::About));
    assert!(!snap.transitioning);
}

#[test]
fn eight_advances_through_the_gallery_exit_to_contact() {
    let (mut engine, start) = booted_engine();

    // hero -> about -> projects
    let (_, now) = scroll_and_settle(&mut engine, 150.0, start);
    let (_, mut now) = scroll_and_settle(&mut engine, 150.0, now);
    assert_eq!(engine.snapshot(now).active_section, Some(SectionId::Projects));

    // Eight advances: exactly seven consumed by the carousel, the
    // eighth declined at the boundary and turned into a section change.
    let mut moved = 0;
    let mut all_events = Vec::new();
    for _ in 0..8 {
        engine.handle(InputEvent::Wheel { delta_y: 150.0 }, now);
        let events = engine.tick(now);
        moved += events
            .iter()
            .filter(|e| matches!(e, NavEvent::CarouselMoved { .. }))
            .count();
        all_events.extend(events);
        now += ms(10);
    }
    assert_eq!(moved, 7);
    assert!(all_events.contains(&NavEvent::SectionChanged {
        from: SectionId::Projects,
        to: SectionId::Contact,
    }));

    // The declined advance left the carousel where it was.
    now += ms(800);
    engine.tick(now);
    let snap = engine.snapshot(now);
    assert_eq!(snap.active_section, Some(SectionId::Contact));
    assert_eq!(snap.carousel_index, 7);
}

#[test]
fn background_explodes_then_rebuilds_on_settle() {
    let (mut engine, now) = booted_engine();
    assert_eq!(engine.snapshot(now).target, LayoutKind::Sphere);

    engine.handle(InputEvent::Wheel { delta_y: 150.0 }, now);
    engine.tick(now);
    let snap = engine.snapshot(now);
    // Mid-transition: scattered, already wearing the incoming accent.
    assert_eq!(snap.target, LayoutKind::Explosion);
    assert_eq!(snap.accent, ThemeToken::AccentWhite);

    let now = now + ms(800);
    engine.tick(now);
    let snap = engine.snapshot(now);
    assert_eq!(snap.target, LayoutKind::Sphere);
    assert_eq!(snap.accent, ThemeToken::AccentWhite);
}

#[test]
fn rapid_scrolling_during_settle_is_discarded() {
    let (mut engine, now) = booted_engine();

    engine.handle(InputEvent::Wheel { delta_y: 150.0 }, now);
    engine.tick(now);

    // A storm of gestures inside the settle window.
    for i in 1..10 {
        engine.handle(InputEvent::Wheel { delta_y: 300.0 }, now + ms(i * 50));
        engine.tick(now + ms(i * 50));
    }

    let mut now = now + ms(800);
    engine.tick(now);
    assert_eq!(engine.snapshot(now).section, SectionId::About);

    // Nothing was queued: the machine stays put afterwards.
    now += ms(800);
    engine.tick(now);
    assert_eq!(engine.snapshot(now).section, SectionId::About);
}

#[test]
fn hud_jump_skips_intermediate_sections() {
    let (mut engine, now) = booted_engine();
    engine.handle(
        InputEvent::SelectSection {
            index: SectionId::Contact.index(),
        },
        now,
    );
    engine.tick(now);
    let now = now + ms(800);
    engine.tick(now);
    assert_eq!(engine.snapshot(now).active_section, Some(SectionId::Contact));
}

#[test]
fn overlay_flow_open_navigate_close() {
    let (mut engine, start) = booted_engine();
    let (_, now) = scroll_and_settle(&mut engine, 150.0, start);
    let (_, now) = scroll_and_settle(&mut engine, 150.0, now);

    // Enter opens the active card's project (display position 0 = id 8).
    engine.handle(InputEvent::Enter, now);
    let events = engine.tick(now);
    assert!(events.contains(&NavEvent::ProjectOpened { id: 8 }));

    // Arrow navigation wraps backwards to the last project (id 1).
    engine.handle(InputEvent::Prev, now);
    engine.tick(now);
    let snap = engine.snapshot(now);
    assert_eq!(snap.overlay.as_ref().map(|o| o.id), Some(1));

    // Escape begins the close; 400ms later the overlay is gone.
    engine.handle(InputEvent::Escape, now);
    engine.tick(now);
    assert!(engine.snapshot(now).overlay.is_some_and(|o| o.closing));
    let now = now + ms(400);
    engine.tick(now);
    assert!(engine.snapshot(now).overlay.is_none());
}

#[test]
fn custom_catalog_drives_carousel_length() {
    let data = br#"{
        "projects": [
            {"id": 10, "title": "ONE", "role": "R", "year": "2024", "description": "d"},
            {"id": 20, "title": "TWO", "role": "R", "year": "2025", "description": "d"}
        ]
    }"#;
    let store = ProjectStore::from_json(data).unwrap();
    let mut engine = Engine::new(
        store,
        EngineOptions {
            particle_count: 10,
            seed: Some(9),
            ..EngineOptions::default()
        },
    );
    engine.tick(ms(0));
    engine.tick(ms(3000));
    engine.handle(InputEvent::Enter, ms(3000));
    engine.tick(ms(3000));

    let snap = engine.snapshot(ms(3000));
    assert_eq!(snap.cards.len(), 2);
    assert_eq!(snap.cards[0].title, "ONE");
}
