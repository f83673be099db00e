pub mod carousel;
pub mod coordinator;
pub mod overlay;
pub mod section;

pub use carousel::{CardVisual, CarouselController};
pub use coordinator::NavigationCoordinator;
pub use overlay::Overlay;
pub use section::SectionNavigator;
