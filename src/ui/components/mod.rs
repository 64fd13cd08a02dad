//! Composable pieces of the toaster overlay.
//!
//! Components produce styled lines of a fixed display width; placing them on
//! screen is the renderer's job.
//!
//! - [`toast`]: A single bordered toast box
//! - [`controls`]: Dismiss and confirm/decline buttons

pub mod controls;
pub mod toast;

pub use toast::render_toast;
