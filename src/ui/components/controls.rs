//! Toast controls: the dismiss marker and the confirm/decline buttons.

use crate::ui::helpers::display_width;
use crate::ui::theme::Theme;

/// Dismiss marker drawn in the top-right corner of the message.
pub const DISMISS_MARKER: &str = "×";

const CONFIRM: &str = " Confirm ";
const DECLINE: &str = " Decline ";
const CONFIRM_SHORT: &str = " Y ";
const DECLINE_SHORT: &str = " N ";

/// A styled control row and its visible width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRow {
    pub styled: String,
    pub width: usize,
}

/// Confirm and decline buttons, shortened when `available` is too narrow.
///
/// `box_style` is restored between and after the buttons.
#[must_use]
pub fn confirm_buttons(theme: &Theme, box_style: &str, available: usize) -> ControlRow {
    let (confirm, decline) = if display_width(CONFIRM) + 1 + display_width(DECLINE) <= available {
        (CONFIRM, DECLINE)
    } else {
        (CONFIRM_SHORT, DECLINE_SHORT)
    };

    let button = format!("{}{}", Theme::bg(&theme.colors.button_bg), Theme::fg(&theme.colors.button_fg));
    let reset = Theme::reset();
    let styled = format!("{button}{confirm}{reset}{box_style} {button}{decline}{reset}{box_style}");

    ControlRow {
        styled,
        width: display_width(confirm) + 1 + display_width(decline),
    }
}
