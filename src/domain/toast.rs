//! Toast domain model.
//!
//! [`ToastDetails`] is what an issuer asks for; [`Toast`] is the mutable record
//! the surface keeps in its store while the toast is on screen. Field names on
//! the wire follow the event payloads (`type`, `displayTime`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Process-unique toast identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
    /// Generates a fresh random identifier (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Severity or intent of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Neutral information.
    Info,
    /// A completed operation.
    Success,
    /// Something worth attention.
    Warning,
    /// A failure reported to the user.
    Error,
    /// A question that requires an explicit confirm or decline.
    ///
    /// Confirm toasts are never auto-dismissed and always sort first.
    Confirm,
}

impl ToastKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Info,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Confirm,
    ];

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Confirm => "confirm",
        }
    }
}

impl FromStr for ToastKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown toast type `{s}`"))
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the nine anchored placements on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    #[default]
    BottomRight,
}

impl Position {
    /// All placements, row by row from the top-left corner.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Center,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    /// Wire name of the placement.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::BottomLeft => "bottom-left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom-right",
        }
    }

    /// The animation family for this placement.
    ///
    /// Corners animate along their horizontal edge (`bottom-right` slides
    /// from the right), edge-centers along their own edge, and the center
    /// placement fades.
    #[must_use]
    pub const fn animation_family(self) -> AnimationFamily {
        match self {
            Self::Top => AnimationFamily::SlideTop,
            Self::Bottom => AnimationFamily::SlideBottom,
            Self::TopLeft | Self::Left | Self::BottomLeft => AnimationFamily::SlideLeft,
            Self::TopRight | Self::Right | Self::BottomRight => AnimationFamily::SlideRight,
            Self::Center => AnimationFamily::Fade,
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| format!("unknown toast position `{s}`"))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry/exit animation style selected by a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationFamily {
    Fade,
    SlideTop,
    SlideBottom,
    SlideLeft,
    SlideRight,
}

/// Lifecycle direction of a toast: entering or exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

/// Immutable description of a toast, created by the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastDetails {
    /// Unique identifier.
    pub id: ToastId,

    /// Toast kind.
    #[serde(rename = "type")]
    pub kind: ToastKind,

    /// Text shown to the user.
    pub message: String,

    /// Placement override; the surface default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Whether a dismiss control is shown. Absent means `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissable: Option<bool>,

    /// Auto-dismiss delay override in milliseconds.
    #[serde(
        default,
        rename = "displayTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_time: Option<u64>,
}

impl ToastDetails {
    /// Creates details with no overrides.
    #[must_use]
    pub fn new(id: ToastId, kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
            position: None,
            dismissable: None,
            display_time: None,
        }
    }

    /// Effective dismissability.
    #[must_use]
    pub fn is_dismissable(&self) -> bool {
        self.dismissable.unwrap_or(true)
    }

    /// Per-toast auto-dismiss delay, if overridden.
    #[must_use]
    pub fn display_time(&self) -> Option<Duration> {
        self.display_time.map(Duration::from_millis)
    }
}

/// A toast record as held by the surface's store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// The details the toast was shown with.
    #[serde(flatten)]
    pub details: ToastDetails,

    /// Whether the toast is entering or exiting.
    pub direction: Direction,

    /// The user's decision on a confirm toast, set when it starts exiting.
    ///
    /// `None` means it was dismissed without a decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
}

impl Toast {
    /// Creates an entering toast from its details.
    #[must_use]
    pub const fn entering(details: ToastDetails) -> Self {
        Self {
            details,
            direction: Direction::In,
            confirmed: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ToastId {
        &self.details.id
    }

    #[must_use]
    pub const fn kind(&self) -> ToastKind {
        self.details.kind
    }

    #[must_use]
    pub fn is_confirm(&self) -> bool {
        self.details.kind == ToastKind::Confirm
    }

    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.direction == Direction::Out
    }

    /// Merges the present fields of `patch` into this toast.
    pub fn apply(&mut self, patch: &ToastPatch) {
        if let Some(message) = &patch.message {
            self.details.message.clone_from(message);
        }
        if let Some(position) = patch.position {
            self.details.position = Some(position);
        }
        if let Some(dismissable) = patch.dismissable {
            self.details.dismissable = Some(dismissable);
        }
        if let Some(direction) = patch.direction {
            self.direction = direction;
        }
        if let Some(confirmed) = patch.confirmed {
            self.confirmed = Some(confirmed);
        }
    }
}

/// Partial update of a toast; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastPatch {
    pub message: Option<String>,
    pub position: Option<Position>,
    pub dismissable: Option<bool>,
    pub direction: Option<Direction>,
    pub confirmed: Option<bool>,
}

impl ToastPatch {
    /// Patch that starts the exit transition, optionally recording a decision.
    #[must_use]
    pub fn exit(confirmed: Option<bool>) -> Self {
        Self {
            direction: Some(Direction::Out),
            confirmed,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_animate_along_horizontal_edge() {
        assert_eq!(Position::BottomRight.animation_family(), AnimationFamily::SlideRight);
        assert_eq!(Position::TopLeft.animation_family(), AnimationFamily::SlideLeft);
        assert_eq!(Position::Top.animation_family(), AnimationFamily::SlideTop);
        assert_eq!(Position::Center.animation_family(), AnimationFamily::Fade);
    }

    #[test]
    fn details_use_wire_field_names() {
        let mut details = ToastDetails::new("t1".into(), ToastKind::Confirm, "Delete item?");
        details.display_time = Some(500);

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["type"], "confirm");
        assert_eq!(json["displayTime"], 500);
        assert!(json.get("position").is_none());
        assert!(json.get("dismissable").is_none());
    }

    #[test]
    fn dismissed_toast_omits_absent_decision() {
        let mut toast = Toast::entering(ToastDetails::new("t1".into(), ToastKind::Info, "Saved"));
        toast.apply(&ToastPatch::exit(None));

        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["direction"], "out");
        assert_eq!(json["id"], "t1");
        assert!(json.get("confirmed").is_none());
    }

    #[test]
    fn parses_positions_and_kinds() {
        assert_eq!("top-right".parse::<Position>(), Ok(Position::TopRight));
        assert_eq!("warning".parse::<ToastKind>(), Ok(ToastKind::Warning));
        assert!("middle".parse::<Position>().is_err());
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ToastId::generate(), ToastId::generate());
    }
}
