use std::time::Duration;

use termfolio_protocol::NavEvent;

use crate::content::ProjectStore;

/// How long the close animation runs before the overlay is hidden.
pub const CLOSE_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Hidden,
    Open,
    Closing { since: Duration },
}

/// Project detail overlay with an optional media lightbox on top.
///
/// Prev/next here wraps at both ends — the opposite of the carousel's
/// boundary decline. Unknown project ids and out-of-range media indices
/// are silent no-ops: the overlay is cosmetic and never fails loudly.
#[derive(Debug)]
pub struct Overlay {
    phase: Phase,
    project: Option<u32>,
    lightbox: Option<usize>,
}

impl Overlay {
    pub fn new() -> Self {
        Self {
            phase: Phase::Hidden,
            project: None,
            lightbox: None,
        }
    }

    /// Whether the overlay is on screen (open or animating out).
    pub fn is_visible(&self) -> bool {
        !matches!(self.phase, Phase::Hidden)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open)
    }

    pub fn project(&self) -> Option<u32> {
        self.project
    }

    pub fn lightbox_index(&self) -> Option<usize> {
        self.lightbox
    }

    /// Open the overlay on a project. Reopening on another id while
    /// already open repopulates in place (used by prev/next).
    pub fn open(&mut self, id: u32, store: &ProjectStore, events: &mut Vec<NavEvent>) {
        if store.get(id).is_none() {
            return;
        }
        self.project = Some(id);
        self.lightbox = None;
        self.phase = Phase::Open;
        events.push(NavEvent::ProjectOpened { id });
    }

    /// Begin the close animation. The project stays set until the
    /// animation finishes so the outgoing frame still has content.
    pub fn close(&mut self, now: Duration, events: &mut Vec<NavEvent>) {
        if !matches!(self.phase, Phase::Open) {
            return;
        }
        self.lightbox = None;
        self.phase = Phase::Closing { since: now };
        events.push(NavEvent::ProjectClosed);
    }

    pub fn tick(&mut self, now: Duration) {
        if let Phase::Closing { since } = self.phase
            && now.saturating_sub(since) >= CLOSE_DELAY
        {
            self.phase = Phase::Hidden;
            self.project = None;
        }
    }

    /// Step to the previous/next project in display order, wrapping at
    /// both ends.
    pub fn navigate_project(&mut self, step: isize, store: &ProjectStore, events: &mut Vec<NavEvent>) {
        if !matches!(self.phase, Phase::Open) || store.is_empty() {
            return;
        }
        let Some(position) = self.project.and_then(|id| store.position_of(id)) else {
            return;
        };
        let len = store.len() as isize;
        let next = (position as isize + step).rem_euclid(len) as usize;
        if let Some(project) = store.by_position(next) {
            self.open(project.id, store, events);
        }
    }

    /// Open the lightbox on one of the current project's media entries.
    pub fn open_lightbox(&mut self, media_index: usize, store: &ProjectStore) {
        if !matches!(self.phase, Phase::Open) {
            return;
        }
        let Some(project) = self.project.and_then(|id| store.get(id)) else {
            return;
        };
        if media_index < project.media.len() {
            self.lightbox = Some(media_index);
        }
    }

    /// Step the lightbox through the media list, wrapping at both ends.
    pub fn navigate_media(&mut self, step: isize, store: &ProjectStore) {
        let Some(index) = self.lightbox else {
            return;
        };
        let Some(project) = self.project.and_then(|id| store.get(id)) else {
            return;
        };
        let len = project.media.len() as isize;
        if len == 0 {
            return;
        }
        self.lightbox = Some((index as isize + step).rem_euclid(len) as usize);
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}
