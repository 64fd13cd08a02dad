//! A single toast drawn as a rounded box on its kind's accent color.
//!
//! ```text
//! ╭──────────────────────────────╮
//! │ Delete this item?          × │
//! │  Confirm   Decline           │
//! ╰──────────────────────────────╯
//! ```

use super::controls::{confirm_buttons, DISMISS_MARKER};
use crate::ui::helpers::{display_width, pad_to_width, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastView;

/// Narrowest box that still fits the compact confirm controls.
pub const MIN_BOX_WIDTH: usize = 11;

/// Renders `toast` as lines of exactly `width` display columns
/// (at least [`MIN_BOX_WIDTH`]).
#[must_use]
pub fn render_toast(toast: &ToastView, theme: &Theme, width: usize) -> Vec<String> {
    let width = width.max(MIN_BOX_WIDTH);
    let inner = width - 4;
    let reset = Theme::reset();
    let border = Theme::fg(&theme.colors.border);

    let mut style = format!("{}{}", Theme::bg(theme.accent(toast.kind)), Theme::fg(&theme.colors.text));
    if toast.is_exiting() {
        style = format!("{style}{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    }

    let marker_width = if toast.dismiss_button {
        display_width(DISMISS_MARKER) + 1
    } else {
        0
    };
    let text_width = inner - marker_width;

    let mut lines = vec![format!("{style}{border}╭{}╮{reset}", "─".repeat(width - 2))];

    for (index, text) in wrap_text(&toast.message, text_width).iter().enumerate() {
        let trailing = if toast.dismiss_button && index == 0 {
            format!(" {}{DISMISS_MARKER}{reset}{style}", Theme::bold())
        } else {
            " ".repeat(marker_width)
        };
        lines.push(format!(
            "{style}{border}│{style} {}{trailing} {border}│{reset}",
            pad_to_width(text, text_width)
        ));
    }

    if toast.confirm_buttons {
        let row = confirm_buttons(theme, &style, inner);
        lines.push(format!(
            "{style}{border}│{style} {}{} {border}│{reset}",
            row.styled,
            " ".repeat(inner.saturating_sub(row.width))
        ));
    }

    lines.push(format!("{style}{border}╰{}╯{reset}", "─".repeat(width - 2)));
    lines
}
