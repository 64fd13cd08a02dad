//! Surface state and view model computation.
//!
//! [`ToasterState`] is the single source of truth behind a surface: the toast
//! store, the timer registry, and the configuration fixed at construction. It
//! is mutated only by [`handle_event`](super::handle_event); everything else
//! reads it, most often through [`ToasterState::compute_view`].

use super::store::ToastStore;
use super::timers::TimerRegistry;
use crate::domain::{Position, Toast, ToastDetails, ToastKind};
use crate::ui::viewmodel::{Animation, PointerPolicy, ToastView, ToasterView};
use std::time::Duration;

/// Default auto-dismiss delay.
pub const DEFAULT_DISPLAY_TIME: Duration = Duration::from_millis(3000);

/// Length of the slide/fade animations when the surface times them itself.
pub const DEFAULT_ANIMATION_TIME: Duration = Duration::from_millis(200);

/// Per-surface settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Placement for toasts without a position override.
    pub position: Position,

    /// Auto-dismiss delay for toasts without a display time override.
    pub display_time: Duration,

    /// When set, exit animations are considered finished after this long.
    ///
    /// Leave unset when the host reports animation completion itself.
    pub animation_time: Option<Duration>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            position: Position::BottomRight,
            display_time: DEFAULT_DISPLAY_TIME,
            animation_time: None,
        }
    }
}

/// Everything a surface owns.
#[derive(Debug, Clone, Default)]
pub struct ToasterState {
    pub config: SurfaceConfig,
    pub store: ToastStore,
    pub timers: TimerRegistry,
}

impl ToasterState {
    #[must_use]
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            store: ToastStore::new(),
            timers: TimerRegistry::new(),
        }
    }

    /// The placement a toast is rendered at.
    #[must_use]
    pub fn effective_position(&self, toast: &Toast) -> Position {
        toast.details.position.unwrap_or(self.config.position)
    }

    /// How long a toast stays before it is auto-dismissed.
    #[must_use]
    pub fn display_time_for(&self, details: &ToastDetails) -> Duration {
        details.display_time().unwrap_or(self.config.display_time)
    }

    /// Whether the overlay swallows pointer events.
    ///
    /// Only the foremost toast is considered: the overlay captures the
    /// pointer while it is a confirm toast.
    #[must_use]
    pub fn pointer_policy(&self) -> PointerPolicy {
        match self.store.first() {
            Some(toast) if toast.is_confirm() => PointerPolicy::Capture,
            _ => PointerPolicy::PassThrough,
        }
    }

    /// Builds the renderable view of every active toast, in store order.
    #[must_use]
    pub fn compute_view(&self) -> ToasterView {
        let toasts = self
            .store
            .toasts()
            .iter()
            .map(|toast| {
                let position = self.effective_position(toast);
                ToastView {
                    id: toast.id().clone(),
                    kind: toast.kind(),
                    message: toast.details.message.clone(),
                    position,
                    animation: Animation {
                        family: position.animation_family(),
                        direction: toast.direction,
                    },
                    dismiss_button: toast.details.is_dismissable(),
                    confirm_buttons: toast.kind() == ToastKind::Confirm,
                }
            })
            .collect();

        ToasterView {
            pointer: self.pointer_policy(),
            toasts,
        }
    }
}
