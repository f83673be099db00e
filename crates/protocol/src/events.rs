use serde::{Deserialize, Serialize};

use crate::types::SectionId;

/// A committed navigation fact, emitted by the core and consumed by
/// renderers, the HUD, and the background driver.
///
/// Events describe what already happened — rejected or dropped requests
/// never produce one. The two-phase section pair (`SectionChanged` at
/// transition start, `SectionSettled` once the incoming section is
/// active) lets subscribers sequence off the navigator's clock instead
/// of duplicating its settle constant in their own timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavEvent {
    /// Boot sequence completed; navigation is live.
    Booted,
    /// A section transition was accepted; the outgoing section is
    /// already hidden, the incoming one not yet shown.
    SectionChanged { from: SectionId, to: SectionId },
    /// The incoming section is now the single active section.
    SectionSettled { section: SectionId },
    /// The project carousel stepped to a new index.
    CarouselMoved { index: usize },
    /// The detail overlay opened on a project.
    ProjectOpened { id: u32 },
    /// The detail overlay began closing.
    ProjectClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_round_trip_through_json() {
        let events = [
            NavEvent::Booted,
            NavEvent::SectionChanged {
                from: SectionId::Hero,
                to: SectionId::About,
            },
            NavEvent::SectionSettled {
                section: SectionId::About,
            },
            NavEvent::CarouselMoved { index: 3 },
            NavEvent::ProjectOpened { id: 8 },
            NavEvent::ProjectClosed,
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: NavEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event);
        }
    }
}
