//! Single-threaded publish/subscribe channel for toast signals.
//!
//! The bus is a cheap-to-clone handle over shared listener state. Delivery is
//! synchronous and follows registration order. A signal published while another
//! one is being delivered is queued and delivered right after it, so listeners
//! never run nested inside each other and may freely publish from their
//! callbacks.
//!
//! Listeners are removed when their [`Subscription`] guard is dropped.

use super::signals::{Envelope, Signal, SignalKind};
use crate::domain::{Result, ToasterError};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifier of a registered listener.
pub type ListenerId = u64;

type Callback = Rc<dyn Fn(&Signal)>;

struct Listener {
    id: ListenerId,
    kind: SignalKind,
    callback: Callback,
}

#[derive(Default)]
struct BusInner {
    listeners: RefCell<Vec<Listener>>,
    queue: RefCell<VecDeque<Envelope>>,
    dispatching: Cell<bool>,
    next_id: Cell<ListenerId>,
    surface_attached: Cell<bool>,
}

/// Handle to a signal bus.
///
/// Cloning the handle shares the same bus.
#[derive(Clone, Default)]
pub struct SignalBus {
    inner: Rc<BusInner>,
}

impl SignalBus {
    /// Creates a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for signals of `kind`.
    ///
    /// The listener stays registered for as long as the returned guard lives.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, kind: SignalKind, callback: impl Fn(&Signal) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().push(Listener {
            id,
            kind,
            callback: Rc::new(callback),
        });

        tracing::debug!(listener_id = id, event = kind.name(), "listener subscribed");

        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Publishes a signal under the current trace context.
    pub fn publish(&self, signal: Signal) {
        self.publish_envelope(Envelope::new(signal));
    }

    /// Publishes an already-enveloped signal.
    pub fn publish_envelope(&self, envelope: Envelope) {
        self.inner.queue.borrow_mut().push_back(envelope);
        self.drain();
    }

    /// Decodes a JSON envelope and publishes it.
    ///
    /// # Errors
    ///
    /// Returns [`ToasterError::Decode`] if `json` is not a valid signal; nothing
    /// is published in that case.
    pub fn publish_json(&self, json: &str) -> Result<()> {
        let envelope = Envelope::from_json(json)?;
        self.publish_envelope(envelope);
        Ok(())
    }

    /// Number of listeners currently registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: SignalKind) -> usize {
        self.inner
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    /// Returns a weak handle that does not keep the bus alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakSignalBus {
        WeakSignalBus {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Reserves the bus for a single surface.
    ///
    /// # Errors
    ///
    /// Returns [`ToasterError::SurfaceAttached`] while another claim is alive.
    pub fn claim_surface(&self) -> Result<SurfaceClaim> {
        if self.inner.surface_attached.replace(true) {
            return Err(ToasterError::SurfaceAttached);
        }
        Ok(SurfaceClaim {
            bus: Rc::downgrade(&self.inner),
        })
    }

    fn drain(&self) {
        if self.inner.dispatching.replace(true) {
            return;
        }
        let _reset = DispatchGuard(&self.inner.dispatching);

        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(envelope) = next else {
                break;
            };
            self.deliver(&envelope);
        }
    }

    fn deliver(&self, envelope: &Envelope) {
        let _context_guard = envelope.trace_context.as_ref().and_then(|cx| cx.attach());

        let kind = envelope.signal.kind();
        let span = tracing::debug_span!(
            "deliver_signal",
            event = kind.name(),
            toast_id = %envelope.signal.toast_id()
        );
        let _guard = span.entered();

        // Snapshot so callbacks may subscribe or unsubscribe while we iterate.
        let snapshot: Vec<Callback> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.kind == kind)
            .map(|listener| Rc::clone(&listener.callback))
            .collect();

        if snapshot.is_empty() {
            tracing::debug!("signal had no listeners");
        }

        for callback in snapshot {
            callback(&envelope.signal);
        }
    }
}

impl fmt::Debug for SignalBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalBus")
            .field("listeners", &self.inner.listeners.borrow().len())
            .field("queued", &self.inner.queue.borrow().len())
            .field("surface_attached", &self.inner.surface_attached.get())
            .finish()
    }
}

struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Weak handle to a [`SignalBus`].
///
/// Used by listeners and cancel handles that live inside the bus's own
/// callbacks, where a strong handle would form a reference cycle.
#[derive(Clone, Debug, Default)]
pub struct WeakSignalBus {
    inner: Weak<BusInner>,
}

impl WeakSignalBus {
    /// Upgrades to a strong handle if the bus is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<SignalBus> {
        self.inner.upgrade().map(|inner| SignalBus { inner })
    }
}

/// RAII guard for a registered listener.
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    bus: Weak<BusInner>,
}

impl Subscription {
    /// Identifier of the listener this guard owns.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.listeners.borrow_mut().retain(|listener| listener.id != self.id);
            tracing::debug!(listener_id = self.id, "listener unsubscribed");
        }
    }
}

/// Exclusive reservation of a bus by one surface; released on drop.
#[derive(Debug)]
pub struct SurfaceClaim {
    bus: Weak<BusInner>,
}

impl Drop for SurfaceClaim {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.surface_attached.set(false);
        }
    }
}
