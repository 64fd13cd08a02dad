//! The toaster surface: the bus subscriber that owns all active toasts.
//!
//! A [`ToasterSurface`] listens for `toaster` and `toaster-dismiss` signals,
//! feeds them through [`handle_event`] together with host UI events (button
//! presses, animation completion) and timer ticks, and broadcasts
//! `toaster-dismissed` when a toast leaves the store.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use toaster::app::{ManualClock, SurfaceConfig, ToastIssuer, ToasterSurface};
//! use toaster::domain::ToastKind;
//! use toaster::protocol::SignalBus;
//!
//! let bus = SignalBus::new();
//! let clock = Rc::new(ManualClock::new());
//! let surface = ToasterSurface::attach(&bus, SurfaceConfig::default(), clock.clone())?;
//! let issuer = ToastIssuer::new(&bus);
//!
//! issuer.issue(ToastKind::Info, "Saved", None, None);
//! assert_eq!(surface.toasts().len(), 1);
//!
//! clock.advance(Duration::from_millis(3000));
//! surface.tick();
//! surface.animation_ended(&surface.toasts()[0].id().clone());
//! assert!(surface.toasts().is_empty());
//! # Ok::<(), toaster::ToasterError>(())
//! ```

use super::actions::Action;
use super::clock::Clock;
use super::handler::{handle_event, Event};
use super::state::{SurfaceConfig, ToasterState};
use crate::domain::{Result, Toast, ToastId};
use crate::protocol::{Signal, SignalBus, SignalKind, Subscription, SurfaceClaim};
use crate::ui::viewmodel::ToasterView;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// State shared between the surface handle and its bus listeners.
struct Shared {
    state: RefCell<ToasterState>,
    clock: Rc<dyn Clock>,
    dirty: Cell<bool>,
}

impl Shared {
    /// Runs one turn: applies `event`, then executes the resulting actions
    /// once the state borrow is released.
    fn run(&self, bus: &SignalBus, event: &Event) {
        let now = self.clock.now();
        let (render, actions) = {
            let mut state = self.state.borrow_mut();
            handle_event(&mut state, event, now)
        };

        if render {
            self.dirty.set(true);
        }

        for action in actions {
            match action {
                Action::Publish(signal) => bus.publish(signal),
            }
        }
    }
}

/// The single owner and renderer of a bus's toasts.
pub struct ToasterSurface {
    shared: Rc<Shared>,
    bus: SignalBus,
    _subscriptions: [Subscription; 2],
    _claim: SurfaceClaim,
}

impl ToasterSurface {
    /// Attaches a new surface to `bus`.
    ///
    /// The surface stays subscribed until it is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ToasterError::SurfaceAttached`](crate::ToasterError::SurfaceAttached)
    /// if another surface is already attached to the bus.
    pub fn attach(bus: &SignalBus, config: SurfaceConfig, clock: Rc<dyn Clock>) -> Result<Self> {
        let claim = bus.claim_surface()?;

        let shared = Rc::new(Shared {
            state: RefCell::new(ToasterState::new(config)),
            clock,
            dirty: Cell::new(false),
        });

        let on_show = {
            let shared = Rc::downgrade(&shared);
            let bus = bus.downgrade();
            move |signal: &Signal| {
                let (Some(shared), Some(bus)) = (shared.upgrade(), bus.upgrade()) else {
                    return;
                };
                if let Signal::Show(details) = signal {
                    shared.run(&bus, &Event::Show(details.clone()));
                }
            }
        };

        let on_dismiss = {
            let shared = Rc::downgrade(&shared);
            let bus = bus.downgrade();
            move |signal: &Signal| {
                let (Some(shared), Some(bus)) = (shared.upgrade(), bus.upgrade()) else {
                    return;
                };
                if let Signal::RequestDismiss(request) = signal {
                    shared.run(
                        &bus,
                        &Event::Dismiss {
                            id: request.id.clone(),
                            confirmed: None,
                        },
                    );
                }
            }
        };

        let subscriptions = [
            bus.subscribe(SignalKind::Show, on_show),
            bus.subscribe(SignalKind::RequestDismiss, on_dismiss),
        ];

        tracing::debug!(
            position = %config.position,
            display_time_ms = config.display_time.as_millis(),
            "toaster surface attached"
        );

        Ok(Self {
            shared,
            bus: bus.clone(),
            _subscriptions: subscriptions,
            _claim: claim,
        })
    }

    /// The dismiss control of a toast was pressed.
    pub fn dismiss(&self, id: &ToastId) {
        self.run(&Event::Dismiss {
            id: id.clone(),
            confirmed: None,
        });
    }

    /// The confirm control of a confirm toast was pressed.
    pub fn confirm(&self, id: &ToastId) {
        self.run(&Event::Dismiss {
            id: id.clone(),
            confirmed: Some(true),
        });
    }

    /// The decline control of a confirm toast was pressed.
    pub fn decline(&self, id: &ToastId) {
        self.run(&Event::Dismiss {
            id: id.clone(),
            confirmed: Some(false),
        });
    }

    /// The host finished playing an animation for `id`.
    ///
    /// After an exit animation this removes the toast and broadcasts
    /// `toaster-dismissed`.
    pub fn animation_ended(&self, id: &ToastId) {
        self.run(&Event::AnimationEnded(id.clone()));
    }

    /// Fires every timer that is due according to the surface's clock.
    pub fn tick(&self) {
        self.run(&Event::Tick);
    }

    /// When the next timer is due, for hosts that schedule wake-ups.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.shared.state.borrow().timers.next_deadline()
    }

    /// Snapshot of the active toasts in render order.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.shared.state.borrow().store.toasts().to_vec()
    }

    /// The renderable view of the current state.
    #[must_use]
    pub fn view(&self) -> ToasterView {
        self.shared.state.borrow().compute_view()
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn take_dirty(&self) -> bool {
        self.shared.dirty.replace(false)
    }

    #[must_use]
    pub fn config(&self) -> SurfaceConfig {
        self.shared.state.borrow().config
    }

    fn run(&self, event: &Event) {
        self.shared.run(&self.bus, event);
    }
}

impl fmt::Debug for ToasterSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToasterSurface")
            .field("state", &self.shared.state)
            .field("dirty", &self.shared.dirty)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::clock::ManualClock;
    use crate::domain::{Direction, ToastDetails, ToastKind};
    use crate::ui::viewmodel::PointerPolicy;
    use crate::ToasterError;
    use std::time::Duration;

    struct Harness {
        bus: SignalBus,
        clock: Rc<ManualClock>,
        surface: ToasterSurface,
        dismissed: Rc<RefCell<Vec<Toast>>>,
        _listener: Subscription,
    }

    fn harness() -> Harness {
        let bus = SignalBus::new();
        let clock = Rc::new(ManualClock::new());
        let surface = ToasterSurface::attach(&bus, SurfaceConfig::default(), clock.clone()).unwrap();
        let dismissed = Rc::new(RefCell::new(Vec::new()));
        let listener = {
            let dismissed = Rc::clone(&dismissed);
            bus.subscribe(SignalKind::Dismissed, move |signal| {
                if let Signal::Dismissed(toast) = signal {
                    dismissed.borrow_mut().push(toast.clone());
                }
            })
        };
        Harness {
            bus,
            clock,
            surface,
            dismissed,
            _listener: listener,
        }
    }

    fn show(bus: &SignalBus, id: &str, kind: ToastKind) {
        bus.publish(Signal::Show(ToastDetails::new(id.into(), kind, id)));
    }

    #[test]
    fn second_surface_is_rejected() {
        let h = harness();
        let clock = Rc::new(ManualClock::new());
        let second = ToasterSurface::attach(&h.bus, SurfaceConfig::default(), clock);
        assert!(matches!(second, Err(ToasterError::SurfaceAttached)));
    }

    #[test]
    fn show_signal_adds_toast_and_marks_dirty() {
        let h = harness();
        show(&h.bus, "a", ToastKind::Info);

        assert!(h.surface.take_dirty());
        assert!(!h.surface.take_dirty());
        assert_eq!(h.surface.toasts().len(), 1);
        assert_eq!(
            h.surface.next_deadline(),
            Some(h.clock.now() + Duration::from_millis(3000))
        );
    }

    #[test]
    fn dismiss_signal_for_unknown_id_is_harmless() {
        let h = harness();
        h.bus.publish(Signal::request_dismiss("ghost".into()));
        assert!(h.surface.toasts().is_empty());
        assert!(!h.surface.take_dirty());
    }

    #[test]
    fn decline_broadcasts_decision() {
        let h = harness();
        show(&h.bus, "q", ToastKind::Confirm);
        assert_eq!(h.surface.view().pointer, PointerPolicy::Capture);

        h.clock.advance(Duration::from_secs(30));
        h.surface.tick();
        assert!(h.dismissed.borrow().is_empty());

        h.surface.decline(&"q".into());
        assert_eq!(h.surface.toasts()[0].direction, Direction::Out);
        h.surface.animation_ended(&"q".into());

        let dismissed = h.dismissed.borrow();
        assert_eq!(dismissed.len(), 1);
        assert_eq!(dismissed[0].confirmed, Some(false));
        assert_eq!(h.surface.view().pointer, PointerPolicy::PassThrough);
    }

    #[test]
    fn dismissed_listener_may_show_another_toast() {
        let h = harness();
        let _chain = {
            let weak = h.bus.downgrade();
            h.bus.subscribe(SignalKind::Dismissed, move |signal| {
                if signal.toast_id().as_str() == "first" {
                    if let Some(bus) = weak.upgrade() {
                        show(&bus, "second", ToastKind::Success);
                    }
                }
            })
        };

        show(&h.bus, "first", ToastKind::Info);
        h.surface.dismiss(&"first".into());
        h.surface.animation_ended(&"first".into());

        let ids: Vec<String> = h.surface.toasts().iter().map(|t| t.id().to_string()).collect();
        assert_eq!(ids, vec!["second"]);
    }

    #[test]
    fn dropping_surface_releases_bus() {
        let h = harness();
        let Harness { bus, surface, .. } = h;
        drop(surface);

        assert_eq!(bus.listener_count(SignalKind::Show), 0);
        assert!(ToasterSurface::attach(&bus, SurfaceConfig::default(), Rc::new(ManualClock::new())).is_ok());
    }
}
