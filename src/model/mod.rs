mod cost;
mod geometry;
mod kinds;

pub use cost::Cost;
pub use geometry::{ScreenPoint, ScreenRect, ScreenSize};
pub use kinds::{Anchor, Building, Category, Feature, ResourceKind, Role, Tab};
