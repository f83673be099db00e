pub mod events;
pub mod layout;
pub mod theme;
pub mod types;

pub use events::NavEvent;
pub use layout::{LayoutKind, ParticleLayout};
pub use theme::ThemeToken;
pub use types::{Color, SectionId, Vec3};
