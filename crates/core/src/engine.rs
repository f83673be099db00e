use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use termfolio_protocol::{LayoutKind, NavEvent, ParticleLayout, SectionId, ThemeToken, Vec3};

use crate::background::BackgroundDriver;
use crate::boot::BootSequence;
use crate::content::{MediaItem, ProjectStore};
use crate::nav::carousel::CardVisual;
use crate::nav::{NavigationCoordinator, Overlay};
use crate::particles::{self, ParticleField};
use crate::widgets::{CardSwap, GlitchOptions, LetterGlitch, ShuffleOptions, TextShuffle};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub particle_count: usize,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Hero headline run through the shuffle effect.
    pub headline: String,
    /// Number of cards in the about-section stack.
    pub about_cards: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            particle_count: particles::DEFAULT_COUNT,
            seed: None,
            headline: "INTERACTIVE PORTFOLIO".into(),
            about_cards: 3,
        }
    }
}

/// One raw input occurrence, as delivered by a renderer's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchEnd { y: f64 },
    /// Direct section jump from the side HUD.
    SelectSection { index: usize },
    /// Boot-screen enter, or open the active gallery card.
    Enter,
    OpenProject { id: u32 },
    OpenLightbox { media_index: usize },
    Prev,
    Next,
    Escape,
    /// Pointer position in particle world units.
    PointerMove { x: f32, y: f32 },
    PointerLeft,
}

/// Everything a renderer needs to draw one frame, flattened into plain
/// serializable data.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub booted: bool,
    pub boot_lines: Vec<&'static str>,
    pub boot_prompt: bool,
    pub headline: String,
    pub section: SectionId,
    /// `None` mid-transition: neither section is shown.
    pub active_section: Option<SectionId>,
    pub transitioning: bool,
    pub carousel_index: usize,
    pub year_label: Option<String>,
    pub cards: Vec<CardSnapshot>,
    pub about_stack: Vec<usize>,
    pub accent: ThemeToken,
    pub target: LayoutKind,
    pub particles: Vec<Vec3>,
    pub overlay: Option<OverlaySnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardSnapshot {
    pub id: u32,
    pub title: String,
    pub year: String,
    pub visual: CardVisual,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlaySnapshot {
    pub id: u32,
    pub title: String,
    pub role: String,
    pub year: String,
    pub description: String,
    pub tech: Vec<String>,
    pub media: Vec<MediaItem>,
    pub try_it_url: Option<String>,
    /// Animating out; renderers fade rather than pop.
    pub closing: bool,
    pub lightbox: Option<usize>,
}

/// Owns every scene subsystem and routes input between them.
///
/// Input precedence mirrors the page's key handling: lightbox first,
/// then the detail overlay, then navigation; and nothing but enter (and
/// the pointer) is live until the boot sequence completes. All state
/// advances through `tick(now)` — the engine never reads a clock.
pub struct Engine {
    rng: StdRng,
    store: ProjectStore,
    boot: BootSequence,
    coordinator: NavigationCoordinator,
    background: BackgroundDriver,
    overlay: Overlay,
    sphere: ParticleLayout,
    explosion: ParticleLayout,
    field: ParticleField,
    glitch: LetterGlitch,
    shuffle: TextShuffle,
    card_swap: CardSwap,
    pointer: Option<Vec3>,
    events: Vec<NavEvent>,
}

impl Engine {
    pub fn new(store: ProjectStore, options: EngineOptions) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let sphere = particles::sphere_layout(&mut rng, options.particle_count);
        let explosion = particles::explosion_layout(&mut rng, options.particle_count);
        // The field starts scattered and stays that way until enter.
        let field = ParticleField::from_layout(&explosion);
        let boot = BootSequence::new(&mut rng);
        let glitch = LetterGlitch::new(GlitchOptions::default(), 0, 0, &mut rng);
        let shuffle = TextShuffle::new(&options.headline, ShuffleOptions::default());
        let card_count = store.len();

        Self {
            rng,
            store,
            boot,
            coordinator: NavigationCoordinator::new(card_count),
            background: BackgroundDriver::new(),
            overlay: Overlay::new(),
            sphere,
            explosion,
            field,
            glitch,
            shuffle,
            card_swap: CardSwap::new(options.about_cards, Duration::ZERO),
            pointer: None,
            events: Vec::new(),
        }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn is_booted(&self) -> bool {
        self.boot.is_booted()
    }

    /// Glitch backdrop grid; renderers size it to their surface.
    pub fn glitch(&self) -> &LetterGlitch {
        &self.glitch
    }

    pub fn resize_glitch(&mut self, columns: usize, rows: usize) {
        self.glitch.resize(columns, rows, &mut self.rng);
    }

    pub fn handle(&mut self, event: InputEvent, now: Duration) {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.pointer = Some(Vec3::new(x, y, 0.0));
            }
            InputEvent::PointerLeft => {
                self.pointer = None;
            }
            InputEvent::Enter => self.on_enter(now),
            // Everything below is dead until boot completes.
            _ if !self.boot.is_booted() => {}
            InputEvent::Wheel { delta_y } => {
                self.coordinator.on_wheel(delta_y, now, &mut self.events);
            }
            InputEvent::TouchStart { y } => self.coordinator.on_touch_start(y),
            InputEvent::TouchEnd { y } => {
                self.coordinator.on_touch_end(y, now, &mut self.events);
            }
            InputEvent::SelectSection { index } => {
                self.coordinator.select_section(index, now, &mut self.events);
            }
            InputEvent::OpenProject { id } => {
                self.overlay.open(id, &self.store, &mut self.events);
            }
            InputEvent::OpenLightbox { media_index } => {
                self.overlay.open_lightbox(media_index, &self.store);
            }
            InputEvent::Prev => self.on_step(-1),
            InputEvent::Next => self.on_step(1),
            InputEvent::Escape => {
                if self.overlay.lightbox_index().is_some() {
                    self.overlay.close_lightbox();
                } else {
                    self.overlay.close(now, &mut self.events);
                }
            }
        }
    }

    fn on_enter(&mut self, now: Duration) {
        if !self.boot.is_booted() {
            if self.boot.enter(now, &mut self.events) {
                self.shuffle.trigger(now);
            }
            return;
        }
        // In the gallery, enter opens the active card's project.
        if !self.overlay.is_visible()
            && self.coordinator.sections().active() == Some(SectionId::Projects)
        {
            let index = self.coordinator.carousel().index();
            if let Some(project) = self.store.by_position(index) {
                self.overlay.open(project.id, &self.store, &mut self.events);
            }
        }
    }

    /// Arrow-key step: lightbox media first, then overlay projects.
    fn on_step(&mut self, step: isize) {
        if self.overlay.lightbox_index().is_some() {
            self.overlay.navigate_media(step, &self.store);
        } else if self.overlay.is_open() {
            self.overlay
                .navigate_project(step, &self.store, &mut self.events);
        }
    }

    /// Advance every subsystem to `now` and return the navigation events
    /// committed since the previous tick, already applied to the
    /// background driver.
    pub fn tick(&mut self, now: Duration) -> Vec<NavEvent> {
        self.boot.start(now);
        self.coordinator.tick(now, &mut self.events);
        self.overlay.tick(now);

        let events = std::mem::take(&mut self.events);
        for event in &events {
            self.background.observe(event);
            if let NavEvent::SectionSettled {
                section: SectionId::Hero,
            } = event
                && !self.shuffle.has_run()
            {
                self.shuffle.trigger(now);
            }
        }

        let target = match self.background.target() {
            LayoutKind::Sphere => &self.sphere,
            LayoutKind::Explosion => &self.explosion,
        };
        self.field.step(target, self.pointer);
        self.glitch.tick(now, &mut self.rng);
        self.shuffle.tick(now, &mut self.rng);
        self.card_swap.tick(now);

        events
    }

    pub fn snapshot(&self, now: Duration) -> SceneSnapshot {
        let sections = self.coordinator.sections();
        let carousel = self.coordinator.carousel();

        let cards = self
            .store
            .projects()
            .iter()
            .zip(carousel.visuals())
            .map(|(project, visual)| CardSnapshot {
                id: project.id,
                title: project.title.clone(),
                year: project.year.clone(),
                visual: *visual,
            })
            .collect();

        let overlay = self
            .overlay
            .project()
            .and_then(|id| self.store.get(id))
            .map(|project| OverlaySnapshot {
                id: project.id,
                title: project.title.clone(),
                role: project.role.clone(),
                year: project.year.clone(),
                description: project.description.clone(),
                tech: project.tech.clone(),
                media: project.media.clone(),
                try_it_url: project.try_it_url.clone(),
                closing: !self.overlay.is_open(),
                lightbox: self.overlay.lightbox_index(),
            });

        SceneSnapshot {
            booted: self.boot.is_booted(),
            boot_lines: self.boot.visible_lines(now).to_vec(),
            boot_prompt: self.boot.prompt_visible(now),
            headline: self.shuffle.text(),
            section: sections.current(),
            active_section: sections.active(),
            transitioning: sections.is_transitioning(),
            carousel_index: carousel.index(),
            year_label: self
                .store
                .by_position(carousel.index())
                .map(|p| p.year.clone()),
            cards,
            about_stack: self.card_swap.order().to_vec(),
            accent: self.background.accent(),
            target: self.background.target(),
            particles: self.field.positions().to_vec(),
            overlay,
        }
    }
}
