//! View model types representing the renderable toaster.
//!
//! View models are created by `ToasterState::compute_view()` and consumed by a
//! renderer, either [`render`](super::render) or a host's own. They contain no
//! behavior beyond naming, only display-ready data.

use crate::domain::{AnimationFamily, Direction, Position, ToastId, ToastKind};
use std::fmt;

/// Whether the overlay swallows pointer input behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerPolicy {
    /// The overlay blocks interaction with content underneath.
    Capture,

    /// Pointer events reach content underneath; only toast controls are live.
    #[default]
    PassThrough,
}

/// Complete view of the toaster overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToasterView {
    pub pointer: PointerPolicy,

    /// Active toasts in store order, confirm toasts first.
    pub toasts: Vec<ToastView>,
}

impl ToasterView {
    #[must_use]
    pub fn blocks_pointer(&self) -> bool {
        self.pointer == PointerPolicy::Capture
    }

    /// Toasts anchored at `position`, in stacking order.
    pub fn at(&self, position: Position) -> impl Iterator<Item = &ToastView> {
        self.toasts.iter().filter(move |t| t.position == position)
    }
}

/// Display information for one toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,

    /// Resolved placement (toast override or surface default).
    pub position: Position,

    pub animation: Animation,

    /// Show the "×" control.
    pub dismiss_button: bool,

    /// Show the confirm and decline controls.
    pub confirm_buttons: bool,
}

impl ToastView {
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.animation.direction == Direction::Out
    }
}

/// The animation a toast should currently be playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub family: AnimationFamily,
    pub direction: Direction,
}

impl Animation {
    /// Stable animation name, e.g. `fade-in` or `slide-out-right`.
    #[must_use]
    pub fn name(&self) -> String {
        let direction = match self.direction {
            Direction::In => "in",
            Direction::Out => "out",
        };
        match self.family {
            AnimationFamily::Fade => format!("fade-{direction}"),
            AnimationFamily::SlideTop => format!("slide-{direction}-top"),
            AnimationFamily::SlideBottom => format!("slide-{direction}-bottom"),
            AnimationFamily::SlideLeft => format!("slide-{direction}-left"),
            AnimationFamily::SlideRight => format!("slide-{direction}-right"),
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_names() {
        let cases = [
            (Position::Center, Direction::In, "fade-in"),
            (Position::BottomRight, Direction::Out, "slide-out-right"),
            (Position::Top, Direction::In, "slide-in-top"),
            (Position::BottomLeft, Direction::In, "slide-in-left"),
            (Position::Bottom, Direction::Out, "slide-out-bottom"),
        ];
        for (position, direction, expected) in cases {
            let animation = Animation {
                family: position.animation_family(),
                direction,
            };
            assert_eq!(animation.name(), expected, "{position}");
        }
    }
}
