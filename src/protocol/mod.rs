//! Event protocol: the signals and the bus that carries them.
//!
//! Producers, issuers and the surface never hold references to each other; every
//! interaction is a [`Signal`] published on a [`SignalBus`].
//!
//! # Architecture
//!
//! - `signals`: the `toaster`, `toaster-dismiss` and `toaster-dismissed` signals,
//!   their JSON wire form, and trace context propagation
//! - `bus`: synchronous in-process publish/subscribe with RAII subscriptions

pub mod bus;
pub mod signals;

pub use bus::{ListenerId, SignalBus, Subscription, SurfaceClaim, WeakSignalBus};
pub use signals::{DismissRequest, Envelope, Signal, SignalKind, TraceContext};
