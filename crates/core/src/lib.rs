pub mod background;
pub mod boot;
pub mod content;
pub mod engine;
pub mod input;
pub mod nav;
pub mod particles;
pub mod widgets;

pub use engine::{Engine, EngineOptions, InputEvent, SceneSnapshot};
