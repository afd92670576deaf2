//! Pop-up placement geometry.
//!
//! Pure functions of rectangles and sizes; callers supply live measurements
//! and apply the returned position themselves.

use crate::model::{ScreenPoint, ScreenRect, ScreenSize};

/// Which axis placement tries first.
///
/// `Portrait` is chosen when the viewport is at least as wide as it is tall.
/// That is the reverse of the usual meaning of the word, and it is kept
/// because it decides the axis: `Portrait` places beside the target,
/// `Landscape` places above or below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn from_viewport(viewport: ScreenSize) -> Self {
        if viewport.width >= viewport.height {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }
}

/// Top-left position for a pop-up of size `popup`.
///
/// Without a target the pop-up is centered and not clamped. With a target it
/// goes right of (or below) the target, falls back to left of (or above) it
/// when that would overflow, and is then clamped so it stays on screen.
pub fn place_popup(
    target: Option<ScreenRect>,
    popup: ScreenSize,
    viewport: ScreenSize,
    margin: f64,
    orientation: Orientation,
) -> ScreenPoint {
    let Some(target) = target else {
        return ScreenPoint::new(
            viewport.width / 2.0 - popup.width / 2.0,
            viewport.height / 2.0 - popup.height / 2.0,
        );
    };

    let mut left = target.left;
    let mut top = target.top;

    match orientation {
        Orientation::Portrait => {
            left += target.width;
            if left + margin + popup.width > viewport.width {
                left = target.left - margin * 2.0 - popup.width;
            }
        }
        Orientation::Landscape => {
            top += target.height;
            if top + margin + popup.height > viewport.height {
                top = target.top - margin * 2.0 - popup.height;
            }
        }
    }

    ScreenPoint::new(
        clamp_axis(left, viewport.width - popup.width - margin * 2.0),
        clamp_axis(top, viewport.height - popup.height - margin * 2.0),
    )
}

/// Same as [`place_popup`] with the orientation read off the viewport.
pub fn place_in_viewport(
    target: Option<ScreenRect>,
    popup: ScreenSize,
    viewport: ScreenSize,
    margin: f64,
) -> ScreenPoint {
    place_popup(
        target,
        popup,
        viewport,
        margin,
        Orientation::from_viewport(viewport),
    )
}

// Lower bound first, then upper. A pop-up larger than the viewport ends up at
// the (negative) upper bound rather than panicking like `f64::clamp`.
fn clamp_axis(value: f64, upper: f64) -> f64 {
    value.max(0.0).min(upper)
}
