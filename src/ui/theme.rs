//! Theme management and ANSI escape sequence generation.
//!
//! Every toast kind has its own accent color, used as the box background. The
//! built-in default mirrors the Tailwind 500 palette; Catppuccin variants are
//! bundled as TOML and custom themes can be loaded from a file.
//!
//! # Built-in Themes
//!
//! - `tailwind`: blue / green / yellow / red accents (default)
//! - `catppuccin-mocha`: dark pastels
//! - `catppuccin-latte`: light pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! info = "#3b82f6"
//! success = "#22c55e"
//! warning = "#eab308"
//! error = "#ef4444"
//! confirm = "#eab308"
//! text = "#ffffff"
//! text_dim = "#e5e7eb"
//! border = "#111827"
//! button_fg = "#111827"
//! button_bg = "#ffffff"
//! ```

use crate::domain::{Result, ToastKind, ToasterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "tailwind";

/// Color scheme for the terminal renderer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub info: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub confirm: String,

    /// Message text drawn on the accent background.
    pub text: String,
    /// Text of exiting toasts.
    pub text_dim: String,

    pub border: String,

    /// Dismiss, confirm and decline controls.
    pub button_fg: String,
    pub button_bg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            DEFAULT_THEME => return Some(Self::default()),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ToasterError::Theme`] if the file cannot be read or is not a
    /// complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ToasterError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| ToasterError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Accent color for a toast kind.
    #[must_use]
    pub fn accent(&self, kind: ToastKind) -> &str {
        match kind {
            ToastKind::Info => &self.colors.info,
            ToastKind::Success => &self.colors.success,
            ToastKind::Warning => &self.colors.warning,
            ToastKind::Error => &self.colors.error,
            ToastKind::Confirm => &self.colors.confirm,
        }
    }

    /// Parses `#rrggbb`, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `tailwind` theme.
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                info: "#3b82f6".to_string(),
                success: "#22c55e".to_string(),
                warning: "#eab308".to_string(),
                error: "#ef4444".to_string(),
                confirm: "#eab308".to_string(),
                text: "#ffffff".to_string(),
                text_dim: "#e5e7eb".to_string(),
                border: "#111827".to_string(),
                button_fg: "#111827".to_string(),
                button_bg: "#ffffff".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_themes_parse() {
        for name in ["tailwind", "catppuccin-mocha", "catppuccin-latte"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn accents_follow_kind() {
        let theme = Theme::default();
        assert_eq!(theme.accent(ToastKind::Info), "#3b82f6");
        assert_eq!(theme.accent(ToastKind::Error), "#ef4444");
        assert_eq!(theme.accent(ToastKind::Confirm), theme.accent(ToastKind::Warning));
    }

    #[test]
    fn ansi_escapes() {
        assert_eq!(Theme::fg("#3b82f6"), "\u{1b}[38;2;59;130;246m");
        assert_eq!(Theme::bg("ef4444"), "\u{1b}[48;2;239;68;68m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn custom_theme_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut source = toml::to_string(&Theme::default()).unwrap();
        source = source.replace("name = \"tailwind\"", "name = \"mine\"");
        file.write_all(source.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
    }

    #[test]
    fn incomplete_theme_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n[colors]\ninfo = \"#000000\"\n").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(ToasterError::Theme(_))));
        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(ToasterError::Theme(_))
        ));
    }
}
