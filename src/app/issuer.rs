//! Call-site helper for issuing toasts and observing their resolution.
//!
//! A [`ToastIssuer`] publishes `toaster` signals, remembers the ids it issued,
//! and calls its resolution callback when one of *those* toasts is
//! dismissed. Dismissals of toasts issued elsewhere are ignored.

use crate::domain::{Position, Toast, ToastDetails, ToastId, ToastKind};
use crate::protocol::{Signal, SignalBus, SignalKind, Subscription, WeakSignalBus};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Everything needed to issue a toast except its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    pub kind: ToastKind,
    pub message: String,
    pub position: Option<Position>,
    pub dismissable: Option<bool>,
    pub display_time: Option<Duration>,
}

impl ToastRequest {
    #[must_use]
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
            dismissable: None,
            display_time: None,
        }
    }

    #[must_use]
    pub const fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub const fn dismissable(mut self, dismissable: bool) -> Self {
        self.dismissable = Some(dismissable);
        self
    }

    /// Overrides the surface's auto-dismiss delay for this toast.
    #[must_use]
    pub const fn display_time(mut self, display_time: Duration) -> Self {
        self.display_time = Some(display_time);
        self
    }

    fn into_details(self, id: ToastId) -> ToastDetails {
        ToastDetails {
            id,
            kind: self.kind,
            message: self.message,
            position: self.position,
            dismissable: self.dismissable,
            display_time: self
                .display_time
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

/// Handle returned by [`ToastIssuer::issue`] that requests dismissal.
///
/// Cancelling is idempotent: the surface ignores requests for toasts that are
/// already exiting or gone.
#[derive(Debug, Clone)]
pub struct CancelToast {
    id: ToastId,
    bus: WeakSignalBus,
}

impl CancelToast {
    /// The toast this handle cancels.
    #[must_use]
    pub const fn id(&self) -> &ToastId {
        &self.id
    }

    /// Publishes `toaster-dismiss` for the toast.
    pub fn cancel(&self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.publish(Signal::request_dismiss(self.id.clone()));
        }
    }
}

type Resolver = Box<dyn FnMut(&Toast)>;

/// Issues toasts and resolves the ones it owns.
pub struct ToastIssuer {
    bus: SignalBus,
    owned: Rc<RefCell<HashSet<ToastId>>>,
    _subscription: Subscription,
}

impl ToastIssuer {
    /// Creates an issuer without a resolution callback.
    #[must_use]
    pub fn new(bus: &SignalBus) -> Self {
        Self::build(bus, None)
    }

    /// Creates an issuer that calls `on_resolved` with the final state of each
    /// toast it issued, once, after the toast is dismissed.
    #[must_use]
    pub fn with_callback(bus: &SignalBus, on_resolved: impl FnMut(&Toast) + 'static) -> Self {
        Self::build(bus, Some(Box::new(on_resolved)))
    }

    fn build(bus: &SignalBus, resolver: Option<Resolver>) -> Self {
        let owned: Rc<RefCell<HashSet<ToastId>>> = Rc::default();
        let resolver = RefCell::new(resolver);

        let subscription = {
            let owned = Rc::clone(&owned);
            bus.subscribe(SignalKind::Dismissed, move |signal| {
                let Signal::Dismissed(toast) = signal else {
                    return;
                };
                if !owned.borrow_mut().remove(toast.id()) {
                    return;
                }

                tracing::debug!(toast_id = %toast.id(), confirmed = ?toast.confirmed, "issued toast resolved");
                if let Some(resolve) = resolver.borrow_mut().as_mut() {
                    resolve(toast);
                }
            })
        };

        Self {
            bus: bus.clone(),
            owned,
            _subscription: subscription,
        }
    }

    /// Shows a toast and returns a handle that dismisses it.
    pub fn issue(
        &self,
        kind: ToastKind,
        message: impl Into<String>,
        position: Option<Position>,
        dismissable: Option<bool>,
    ) -> CancelToast {
        self.issue_request(ToastRequest {
            position,
            dismissable,
            ..ToastRequest::new(kind, message)
        })
    }

    /// Shows a toast described by `request`.
    pub fn issue_request(&self, request: ToastRequest) -> CancelToast {
        let id = ToastId::generate();
        self.owned.borrow_mut().insert(id.clone());

        tracing::debug!(toast_id = %id, kind = %request.kind, "issuing toast");
        self.bus.publish(Signal::Show(request.into_details(id.clone())));

        CancelToast {
            id,
            bus: self.bus.downgrade(),
        }
    }

    /// Whether `id` was issued here and has not resolved yet.
    #[must_use]
    pub fn owns(&self, id: &ToastId) -> bool {
        self.owned.borrow().contains(id)
    }

    /// Number of issued toasts still awaiting resolution.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.owned.borrow().len()
    }
}

impl fmt::Debug for ToastIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastIssuer")
            .field("owned", &self.owned.borrow().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    fn capture_shows(bus: &SignalBus) -> (Rc<RefCell<Vec<ToastDetails>>>, Subscription) {
        let shows = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let shows = Rc::clone(&shows);
            bus.subscribe(SignalKind::Show, move |signal| {
                if let Signal::Show(details) = signal {
                    shows.borrow_mut().push(details.clone());
                }
            })
        };
        (shows, sub)
    }

    fn finished(details: &ToastDetails, confirmed: Option<bool>) -> Toast {
        Toast {
            details: details.clone(),
            direction: Direction::Out,
            confirmed,
        }
    }

    #[test]
    fn issue_publishes_show_with_fresh_ids() {
        let bus = SignalBus::new();
        let (shows, _sub) = capture_shows(&bus);
        let issuer = ToastIssuer::new(&bus);

        let a = issuer.issue(ToastKind::Error, "Request failed", Some(Position::Top), Some(false));
        let b = issuer.issue(ToastKind::Error, "Request failed", None, None);

        let shows = shows.borrow();
        assert_eq!(shows.len(), 2);
        assert_eq!(&shows[0].id, a.id());
        assert_eq!(shows[0].position, Some(Position::Top));
        assert_eq!(shows[0].dismissable, Some(false));
        assert_ne!(a.id(), b.id());
        assert_eq!(issuer.pending(), 2);
    }

    #[test]
    fn request_builder_carries_display_time() {
        let bus = SignalBus::new();
        let (shows, _sub) = capture_shows(&bus);
        let issuer = ToastIssuer::new(&bus);

        issuer.issue_request(
            ToastRequest::new(ToastKind::Success, "Copied")
                .position(Position::Bottom)
                .display_time(Duration::from_millis(750)),
        );

        assert_eq!(shows.borrow()[0].display_time, Some(750));
    }

    #[test]
    fn resolves_only_owned_toasts_once() {
        let bus = SignalBus::new();
        let (shows, _sub) = capture_shows(&bus);
        let resolved = Rc::new(RefCell::new(Vec::new()));
        let issuer = {
            let resolved = Rc::clone(&resolved);
            ToastIssuer::with_callback(&bus, move |toast: &Toast| {
                resolved.borrow_mut().push(toast.clone());
            })
        };
        let other = ToastIssuer::new(&bus);

        issuer.issue(ToastKind::Confirm, "Delete item?", None, None);
        other.issue(ToastKind::Info, "Unrelated", None, None);

        let shows = shows.borrow().clone();
        let mine = finished(&shows[0], Some(true));
        let theirs = finished(&shows[1], None);

        bus.publish(Signal::Dismissed(theirs));
        assert!(resolved.borrow().is_empty());

        bus.publish(Signal::Dismissed(mine.clone()));
        bus.publish(Signal::Dismissed(mine));
        let resolved = resolved.borrow();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].confirmed, Some(true));
        assert_eq!(issuer.pending(), 0);
        assert_eq!(other.pending(), 0);
    }

    #[test]
    fn cancel_publishes_dismiss_request() {
        let bus = SignalBus::new();
        let requests = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let requests = Rc::clone(&requests);
            bus.subscribe(SignalKind::RequestDismiss, move |signal| {
                requests.borrow_mut().push(signal.toast_id().clone());
            })
        };
        let issuer = ToastIssuer::new(&bus);

        let cancel = issuer.issue(ToastKind::Warning, "Unsaved changes", None, None);
        cancel.cancel();
        assert_eq!(*requests.borrow(), vec![cancel.id().clone()]);
    }

    #[test]
    fn cancel_after_bus_is_gone_does_nothing() {
        let bus = SignalBus::new();
        let issuer = ToastIssuer::new(&bus);
        let cancel = issuer.issue(ToastKind::Info, "bye", None, None);

        drop(issuer);
        drop(bus);
        cancel.cancel();
    }
}
