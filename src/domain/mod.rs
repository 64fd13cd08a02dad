//! Domain layer for the toaster crate.
//!
//! This module contains the core data types of the engine, independent of the
//! bus, timers, or any rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`toast`]: Toast details, lifecycle record, and placement types
//!
//! # Examples
//!
//! ```
//! use toaster::domain::{Toast, ToastDetails, ToastKind, Direction};
//!
//! let details = ToastDetails::new("t1".into(), ToastKind::Info, "Saved");
//! let toast = Toast::entering(details);
//! assert_eq!(toast.direction, Direction::In);
//! assert!(toast.details.is_dismissable());
//! ```

pub mod error;
pub mod toast;

pub use error::{Result, ToasterError};
pub use toast::{
    AnimationFamily, Direction, Position, Toast, ToastDetails, ToastId, ToastKind, ToastPatch,
};
