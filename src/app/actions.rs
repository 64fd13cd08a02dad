//! Side effects requested by the event handler.
//!
//! The handler mutates [`ToasterState`](super::ToasterState) but never touches
//! the bus. Anything that must leave the surface is returned as an [`Action`]
//! and executed by the surface after its state borrow has been released.

use crate::protocol::Signal;

/// Commands produced by [`handle_event`](super::handle_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Broadcasts a signal on the surface's bus.
    ///
    /// The handler only ever produces `Dismissed` signals this way.
    Publish(Signal),
}
