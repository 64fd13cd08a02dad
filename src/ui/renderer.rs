//! Top-level rendering coordinator.
//!
//! Groups toasts by their resolved position, renders each as a box, and places
//! the boxes on screen with cursor-addressed ANSI output:
//!
//! - `top*` positions stack downward from the first row,
//! - `bottom*` positions stack upward from the last row,
//! - `left`, `right` and `center` stack downward from a vertically centered start.
//!
//! The first toast in store order sits closest to its anchor edge. Lines that
//! fall outside the terminal are clipped.

use crate::domain::Position;
use crate::ui::components::render_toast;
use crate::ui::components::toast::MIN_BOX_WIDTH;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToasterView;

/// Widest a toast box grows.
pub const MAX_TOAST_WIDTH: usize = 48;

/// Columns kept free between a box and the left or right terminal edge.
const MARGIN: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Middle,
    End,
}

const fn vertical_anchor(position: Position) -> Anchor {
    match position {
        Position::Top | Position::TopLeft | Position::TopRight => Anchor::Start,
        Position::Bottom | Position::BottomLeft | Position::BottomRight => Anchor::End,
        Position::Left | Position::Right | Position::Center => Anchor::Middle,
    }
}

const fn horizontal_anchor(position: Position) -> Anchor {
    match position {
        Position::TopLeft | Position::Left | Position::BottomLeft => Anchor::Start,
        Position::TopRight | Position::Right | Position::BottomRight => Anchor::End,
        Position::Top | Position::Bottom | Position::Center => Anchor::Middle,
    }
}

/// Renders the toaster overlay for a `rows` × `cols` terminal.
///
/// Returns an empty string when there is nothing to draw or the terminal is
/// too small for a single box.
#[must_use]
pub fn render(view: &ToasterView, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::new();
    if rows == 0 || cols < MIN_BOX_WIDTH + 2 * MARGIN {
        return out;
    }

    let width = MAX_TOAST_WIDTH.min(cols - 2 * MARGIN);
    let rows_i = isize::try_from(rows).unwrap_or(isize::MAX);

    for position in Position::ALL {
        let boxes: Vec<Vec<String>> = view
            .at(position)
            .map(|toast| render_toast(toast, theme, width))
            .collect();
        if boxes.is_empty() {
            continue;
        }

        let col = match horizontal_anchor(position) {
            Anchor::Start => 1 + MARGIN,
            Anchor::Middle => (cols - width) / 2 + 1,
            Anchor::End => cols - width + 1 - MARGIN,
        };

        for (row, line) in place(vertical_anchor(position), &boxes, rows_i) {
            if (1..=rows_i).contains(&row) {
                out.push_str(&position_cursor(row.unsigned_abs(), col));
                out.push_str(line);
            }
        }
    }

    out
}

/// Assigns a 1-indexed row (possibly off screen) to every line of every box.
fn place(anchor: Anchor, boxes: &[Vec<String>], rows: isize) -> Vec<(isize, &str)> {
    let height = |lines: &Vec<String>| isize::try_from(lines.len()).unwrap_or(isize::MAX);
    let mut placed = Vec::new();

    match anchor {
        Anchor::End => {
            let mut bottom = rows;
            for lines in boxes {
                let top = bottom - height(lines) + 1;
                placed.extend((top..).zip(lines.iter().map(String::as_str)));
                bottom = top - 1;
            }
        }
        Anchor::Start | Anchor::Middle => {
            let mut top = if anchor == Anchor::Start {
                1
            } else {
                let total: isize = boxes.iter().map(height).sum();
                ((rows - total) / 2 + 1).max(1)
            };
            for lines in boxes {
                placed.extend((top..).zip(lines.iter().map(String::as_str)));
                top += height(lines);
            }
        }
    }

    placed
}
