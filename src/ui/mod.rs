//! Terminal rendering of the toaster overlay.
//!
//! Hosts with their own UI only need [`viewmodel`]; the rest turns a
//! [`ToasterView`] into ANSI output for terminal hosts and the demo binary.
//!
//! ```text
//! ToasterState → compute_view → ToasterView → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Renderable toaster state
//! - [`renderer`]: Placement and stacking of toast boxes
//! - [`components`]: Toast box and control renderers
//! - [`helpers`]: Cursor addressing, display width and word wrap
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Animation, PointerPolicy, ToastView, ToasterView};
