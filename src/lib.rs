//! Toaster: an in-process toast notification engine.
//!
//! Toasts are short, optionally interactive notifications. Producers never
//! talk to the component that shows them; they publish signals on a
//! [`SignalBus`] and a single [`ToasterSurface`] subscribed to that bus owns
//! the queue, the timers and the animation lifecycle:
//!
//! - `toaster` shows a toast,
//! - `toaster-dismiss` asks for one to leave,
//! - `toaster-dismissed` reports that one has left, with the user's decision
//!   for confirm toasts.
//!
//! [`ToastIssuer`] wraps the producer side: it issues toasts, hands back a
//! cancel handle, and resolves only the toasts it issued.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  toaster / toaster-dismiss   ┌──────────────────────────┐
//! │ ToastIssuer  │ ───────────────────────────► │ ToasterSurface (app/)    │
//! │ producers    │                              │ - handler + state        │
//! │ (app/issuer) │ ◄─────────────────────────── │ - store (reducer)        │
//! └──────────────┘      toaster-dismissed       │ - timers + clock         │
//!         │                                     └──────────────────────────┘
//!         │              SignalBus (protocol/)               │
//!         └──────────────────────────────────────────────────┘
//!                                                            │ ToasterView
//!                                                  ┌──────────────────┐
//!                                                  │ ui/ (terminal)   │
//!                                                  └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Surface, issuer, state machine, store and timers
//! - [`domain`]: Toast records, placements and errors
//! - [`protocol`]: Signals, wire format and the bus
//! - [`ui`]: View model, themes and terminal rendering
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! [`Config`] is read from a TOML file or from a flat key/value map supplied by
//! a host:
//!
//! ```toml
//! position = "top-right"
//! display_time = 3000      # milliseconds
//! animation_time = 200     # optional; the surface times exit animations itself
//! theme = "catppuccin-mocha"
//! theme_file = "~/.config/toaster/theme.toml"
//! trace_level = "debug"
//! trace_file = "~/toaster-otlp.json"
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use toaster::{Config, ManualClock, SignalBus, ToastIssuer, ToastKind, ToasterSurface};
//!
//! let bus = SignalBus::new();
//! let clock = Rc::new(ManualClock::new());
//! let surface = ToasterSurface::attach(&bus, Config::default().surface(), clock.clone())?;
//!
//! let decision = Rc::new(Cell::new(None));
//! let issuer = {
//!     let decision = Rc::clone(&decision);
//!     ToastIssuer::with_callback(&bus, move |toast| decision.set(toast.confirmed))
//! };
//!
//! let handle = issuer.issue(ToastKind::Confirm, "Delete item?", None, None);
//! surface.confirm(handle.id());
//! surface.animation_ended(handle.id());
//! assert_eq!(decision.get(), Some(true));
//! # Ok::<(), toaster::ToasterError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod protocol;
pub mod ui;

pub use app::{
    CancelToast, Clock, ManualClock, SurfaceConfig, SystemClock, ToastIssuer, ToastRequest,
    ToasterSurface,
};
pub use domain::{Direction, Position, Result, Toast, ToastDetails, ToastId, ToastKind, ToasterError};
pub use protocol::{Envelope, Signal, SignalBus, SignalKind};
pub use ui::Theme;

use app::{DEFAULT_ANIMATION_TIME, DEFAULT_DISPLAY_TIME};
use infrastructure::expand_tilde;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Engine and tooling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Placement for toasts that do not set one. Default: `bottom-right`.
    pub position: Position,

    /// Auto-dismiss delay for toasts that do not set one. Default: 3000 ms.
    pub display_time: Duration,

    /// Let the surface finish exit animations after this long instead of
    /// waiting for the host. Default: unset.
    pub animation_time: Option<Duration>,

    /// Built-in theme name (`tailwind`, `catppuccin-mocha`,
    /// `catppuccin-latte`). Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Custom TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// `trace`, `debug`, `info`, `warn` or `error`. Default: `info`.
    pub trace_level: Option<String>,

    /// OTLP/JSON trace output. Default: `toaster-otlp.json` in the data directory.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            position: Position::default(),
            display_time: DEFAULT_DISPLAY_TIME,
            animation_time: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            trace_file: None,
        }
    }
}

/// On-disk form of [`Config`]; durations are milliseconds.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    position: Option<Position>,
    display_time: Option<u64>,
    animation_time: Option<u64>,
    theme: Option<String>,
    theme_file: Option<String>,
    trace_level: Option<String>,
    trace_file: Option<String>,
}

impl Config {
    /// Parses a host-supplied key/value map, falling back to defaults for
    /// missing or malformed values.
    ///
    /// Recognized keys match the TOML form. `animation_time` also accepts
    /// `true` for the default animation length; `0` or `false` disables it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use toaster::{Config, Position};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("position".to_string(), "top".to_string());
    /// map.insert("display_time".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.position, Position::Top);
    /// assert_eq!(config.display_time, Duration::from_millis(3000));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let position = map
            .get("position")
            .and_then(|s| lenient(s.trim().parse::<Position>(), "position", s))
            .unwrap_or(defaults.position);

        let display_time = map
            .get("display_time")
            .and_then(|s| lenient(s.trim().parse::<u64>(), "display_time", s))
            .map_or(defaults.display_time, Duration::from_millis);

        let animation_time = map.get("animation_time").and_then(|s| match s.trim() {
            "true" | "on" => Some(DEFAULT_ANIMATION_TIME),
            "false" | "off" | "0" => None,
            other => lenient(other.parse::<u64>(), "animation_time", s).map(Duration::from_millis),
        });

        let non_empty = |key: &str| map.get(key).map(|s| s.trim()).filter(|s| !s.is_empty());

        Self {
            position,
            display_time,
            animation_time,
            theme_name: non_empty("theme").map(String::from),
            theme_file: non_empty("theme_file").map(expand_tilde),
            trace_level: non_empty("trace_level").map(String::from),
            trace_file: non_empty("trace_file").map(expand_tilde),
        }
    }

    /// Parses a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ToasterError::Config`] for malformed TOML, unknown keys or
    /// values of the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(source).map_err(|e| ToasterError::Config(e.to_string()))?;
        let defaults = Self::default();

        Ok(Self {
            position: file.position.unwrap_or(defaults.position),
            display_time: file.display_time.map_or(defaults.display_time, Duration::from_millis),
            animation_time: file.animation_time.filter(|&ms| ms > 0).map(Duration::from_millis),
            theme_name: file.theme,
            theme_file: file.theme_file.as_deref().map(expand_tilde),
            trace_level: file.trace_level,
            trace_file: file.trace_file.as_deref().map(expand_tilde),
        })
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ToasterError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ToasterError::Config(format!("failed to read {}: {e}", path.display())))?;

        Self::from_toml_str(&source)
            .map_err(|e| ToasterError::Config(format!("{}: {e}", path.display())))
    }

    /// The settings a [`ToasterSurface`] is constructed with.
    #[must_use]
    pub const fn surface(&self) -> SurfaceConfig {
        SurfaceConfig {
            position: self.position,
            display_time: self.display_time,
            animation_time: self.animation_time,
        }
    }

    /// Resolves the theme: `theme_file`, then `theme_name`, then the default.
    ///
    /// Failures are logged and fall back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file.display(), error = %e, "failed to load theme file, using default");
                    return Theme::default();
                }
            }
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

fn lenient<T, E: std::fmt::Display>(parsed: std::result::Result<T, E>, key: &str, raw: &str) -> Option<T> {
    parsed
        .map_err(|e| tracing::debug!(key, value = %raw, error = %e, "ignoring malformed config value"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn map_values_override_defaults() {
        let config = Config::from_map(&map(&[
            ("position", "top-left"),
            ("display_time", "1500"),
            ("animation_time", "true"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.position, Position::TopLeft);
        assert_eq!(config.display_time, Duration::from_millis(1500));
        assert_eq!(config.animation_time, Some(DEFAULT_ANIMATION_TIME));
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_map_values_fall_back() {
        let config = Config::from_map(&map(&[
            ("position", "somewhere"),
            ("display_time", "-5"),
            ("animation_time", "soon"),
            ("theme", "  "),
        ]));

        assert_eq!(config, Config::default());
    }

    #[test]
    fn toml_is_strict() {
        let config = Config::from_toml_str("position = \"center\"\nanimation_time = 250\n").unwrap();
        assert_eq!(config.position, Position::Center);
        assert_eq!(config.animation_time, Some(Duration::from_millis(250)));
        assert_eq!(config.display_time, DEFAULT_DISPLAY_TIME);

        for bad in [
            "position = \"middle\"",
            "display_time = \"fast\"",
            "colour = \"red\"",
            "position = ",
        ] {
            assert!(
                matches!(Config::from_toml_str(bad), Err(ToasterError::Config(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn from_file_expands_home() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme_file = \"~/toaster/theme.toml\"\ndisplay_time = 500").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.display_time, Duration::from_millis(500));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.theme_file, Some(home.join("toaster/theme.toml")));
        }

        assert!(matches!(
            Config::from_file("/no/such/toaster.toml"),
            Err(ToasterError::Config(_))
        ));
    }

    #[test]
    fn surface_settings_mirror_config() {
        let config = Config {
            position: Position::Bottom,
            display_time: Duration::from_secs(5),
            animation_time: Some(Duration::from_millis(100)),
            ..Config::default()
        };
        let surface = config.surface();
        assert_eq!(surface.position, Position::Bottom);
        assert_eq!(surface.display_time, Duration::from_secs(5));
        assert_eq!(surface.animation_time, Some(Duration::from_millis(100)));
    }

    #[test]
    fn theme_resolution_falls_back() {
        let named = Config {
            theme_name: Some("catppuccin-mocha".to_string()),
            ..Config::default()
        };
        assert_eq!(named.theme().name, "catppuccin-mocha");

        let unknown = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(unknown.theme(), Theme::default());

        let missing_file = Config {
            theme_name: Some("catppuccin-mocha".to_string()),
            theme_file: Some(PathBuf::from("/no/such/theme.toml")),
            ..Config::default()
        };
        assert_eq!(missing_file.theme(), Theme::default());
    }
}
