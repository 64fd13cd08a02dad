//! Application layer: the toaster surface, its state and the issuing side.
//!
//! Everything here is single-threaded and driven by the [`SignalBus`](crate::protocol::SignalBus).
//!
//! # Architecture
//!
//! The surface follows a unidirectional data flow:
//!
//! ```text
//! Signals / UI events / Tick → Event → handle_event → State mutations → Actions → Bus
//!        ↑                                                                         ↓
//!        └─────────────────────────── toaster-dismissed ───────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`clock`]: Time source abstraction for timers
//! - [`handler`]: Per-toast state transitions
//! - [`issuer`]: Call-site helper that issues toasts and resolves their outcome
//! - [`state`]: Surface state container and view model computation
//! - [`store`]: Ordered toast collection and its reducer
//! - [`surface`]: The bus subscriber that owns the toasts
//! - [`timers`]: One pending timer per toast

pub mod actions;
pub mod clock;
pub mod handler;
pub mod issuer;
pub mod state;
pub mod store;
pub mod surface;
pub mod timers;

pub use actions::Action;
pub use clock::{Clock, ManualClock, SystemClock};
pub use handler::{handle_event, Event};
pub use issuer::{CancelToast, ToastIssuer, ToastRequest};
pub use state::{SurfaceConfig, ToasterState, DEFAULT_ANIMATION_TIME, DEFAULT_DISPLAY_TIME};
pub use store::{reduce, StoreAction, ToastStore};
pub use surface::ToasterSurface;
pub use timers::{Timer, TimerKind, TimerRegistry};
