pub mod card_swap;
pub mod glitch;
pub mod shuffle;

pub use card_swap::CardSwap;
pub use glitch::{GlitchOptions, LetterGlitch};
pub use shuffle::{ShuffleOptions, TextShuffle};
