mod checkpoint;
mod controller;
mod placement;
mod popup;
mod schedule;
mod state;

pub use checkpoint::Checkpoint;
pub use controller::TutorialController;
pub use placement::{Orientation, place_in_viewport, place_popup};
pub use popup::PopupRequest;
pub use schedule::{DEFAULT_POPUP_DELAY, PopupSchedule};
pub use state::{TutorialError, TutorialState};
