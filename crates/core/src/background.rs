use termfolio_protocol::{LayoutKind, NavEvent, ThemeToken};

/// Drives the particle field's target handoff from navigation events.
///
/// `SectionChanged` scatters the field and adopts the incoming
/// section's accent; `SectionSettled` starts the sphere rebuild. The
/// driver subscribes to the navigator's events instead of running its
/// own settle timer, so there is exactly one settle constant in the
/// system and the two machines cannot drift apart.
///
/// Only the target discriminant and the color token are ever written —
/// a single reference swap per event. Per-particle state belongs to the
/// renderer's smoothing loop, which reads the target every tick.
#[derive(Debug)]
pub struct BackgroundDriver {
    target: LayoutKind,
    accent: ThemeToken,
}

impl BackgroundDriver {
    /// The field starts scattered and stays scattered until boot
    /// completes and triggers the first sphere build.
    pub fn new() -> Self {
        Self {
            target: LayoutKind::Explosion,
            accent: ThemeToken::AccentGreen,
        }
    }

    /// Layout the renderer should currently be morphing toward.
    pub fn target(&self) -> LayoutKind {
        self.target
    }

    pub fn accent(&self) -> ThemeToken {
        self.accent
    }

    /// Apply one committed navigation event. Fire-and-forget: no
    /// completion callback is awaited.
    pub fn observe(&mut self, event: &NavEvent) {
        match event {
            NavEvent::Booted => {
                self.target = LayoutKind::Sphere;
                self.accent = ThemeToken::AccentGreen;
            }
            NavEvent::SectionChanged { to, .. } => {
                self.target = LayoutKind::Explosion;
                self.accent = to.accent();
            }
            NavEvent::SectionSettled { .. } => {
                self.target = LayoutKind::Sphere;
            }
            NavEvent::CarouselMoved { .. }
            | NavEvent::ProjectOpened { .. }
            | NavEvent::ProjectClosed => {}
        }
    }
}

impl Default for BackgroundDriver {
    fn default() -> Self {
        Self::new()
    }
}
