//! Event handling and per-toast state transitions.
//!
//! [`handle_event`] is the surface's transition function. It applies one event to
//! [`ToasterState`] at a given instant and returns whether the view changed plus
//! the side effects to run. Each toast moves through `in → out → removed`:
//!
//! ```text
//! Show ──► in ──(dismiss | auto-dismiss timer)──► out ──(animation ended)──► removed
//!                                                                             │
//!                                                                  Dismissed broadcast
//! ```
//!
//! Every event that names an unknown or already-removed toast is a no-op.

use super::actions::Action;
use super::state::ToasterState;
use super::store::StoreAction;
use super::timers::TimerKind;
use crate::domain::{Direction, Toast, ToastDetails, ToastId, ToastPatch};
use crate::protocol::Signal;
use std::time::Instant;

/// Inputs to the surface: signals from the bus, host UI events, and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A `toaster` signal arrived.
    Show(ToastDetails),

    /// Start the exit transition of a toast.
    ///
    /// `confirmed` is `Some` only when the request comes from a confirm or
    /// decline control; dismiss buttons, timers and `toaster-dismiss` signals
    /// leave it `None`.
    Dismiss {
        /// Toast to dismiss.
        id: ToastId,
        /// The user's decision on a confirm toast.
        confirmed: Option<bool>,
    },

    /// The host finished playing an entry or exit animation.
    AnimationEnded(ToastId),

    /// Fire every timer due at the event's instant.
    Tick,
}

/// Applies `event` at `now`, returning `(needs_render, actions)`.
pub fn handle_event(state: &mut ToasterState, event: &Event, now: Instant) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Show(details) => (show(state, details, now), vec![]),
        Event::Dismiss { id, confirmed } => (dismiss(state, id, *confirmed, now), vec![]),
        Event::AnimationEnded(id) => match animation_ended(state, id) {
            Some(action) => (true, vec![action]),
            None => (false, vec![]),
        },
        Event::Tick => tick(state, now),
    }
}

fn show(state: &mut ToasterState, details: &ToastDetails, now: Instant) -> bool {
    if state.store.contains(&details.id) {
        tracing::debug!(toast_id = %details.id, "ignoring show for an active toast id");
        return false;
    }

    let toast = Toast::entering(details.clone());
    let auto_dismiss = !toast.is_confirm();
    state.store.dispatch(StoreAction::Add(toast));

    if auto_dismiss {
        let deadline = now + state.display_time_for(details);
        state
            .timers
            .arm(details.id.clone(), TimerKind::AutoDismiss, deadline);
    }

    tracing::debug!(
        toast_id = %details.id,
        kind = %details.kind,
        auto_dismiss,
        active = state.store.len(),
        "toast shown"
    );
    true
}

fn dismiss(state: &mut ToasterState, id: &ToastId, confirmed: Option<bool>, now: Instant) -> bool {
    let Some(toast) = state.store.get(id) else {
        tracing::debug!(toast_id = %id, "ignoring dismiss for unknown toast");
        return false;
    };
    if toast.direction == Direction::Out {
        tracing::debug!(toast_id = %id, "toast is already exiting");
        return false;
    }
    let confirmed = if toast.is_confirm() { confirmed } else { None };

    state.timers.cancel(id);
    state
        .store
        .dispatch(StoreAction::Update(id.clone(), ToastPatch::exit(confirmed)));

    if let Some(animation_time) = state.config.animation_time {
        state
            .timers
            .arm(id.clone(), TimerKind::ExitAnimation, now + animation_time);
    }

    tracing::debug!(toast_id = %id, ?confirmed, "toast exiting");
    true
}

fn animation_ended(state: &mut ToasterState, id: &ToastId) -> Option<Action> {
    let toast = state.store.get(id)?.clone();
    if toast.direction == Direction::In {
        // Entry animation; the auto-dismiss timer was armed on show.
        return None;
    }

    state.store.dispatch(StoreAction::Remove(id.clone()));
    state.timers.cancel(id);

    tracing::debug!(
        toast_id = %id,
        confirmed = ?toast.confirmed,
        active = state.store.len(),
        "toast removed"
    );
    Some(Action::Publish(Signal::Dismissed(toast)))
}

fn tick(state: &mut ToasterState, now: Instant) -> (bool, Vec<Action>) {
    let mut changed = false;
    let mut actions = vec![];

    for (id, kind) in state.timers.take_expired(now) {
        match kind {
            TimerKind::AutoDismiss => {
                tracing::debug!(toast_id = %id, "auto-dismiss timer fired");
                changed |= dismiss(state, &id, None, now);
            }
            TimerKind::ExitAnimation => {
                if let Some(action) = animation_ended(state, &id) {
                    changed = true;
                    actions.push(action);
                }
            }
        }
    }

    (changed, actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::SurfaceConfig;
    use crate::domain::{Position, ToastKind};
    use std::time::Duration;

    fn details(id: &str, kind: ToastKind) -> ToastDetails {
        ToastDetails::new(id.into(), kind, format!("message {id}"))
    }

    fn dismissed(actions: &[Action]) -> Vec<Toast> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Publish(Signal::Dismissed(toast)) => Some(toast.clone()),
                Action::Publish(_) => None,
            })
            .collect()
    }

    #[test]
    fn show_arms_auto_dismiss_for_regular_toasts() {
        let now = Instant::now();
        let mut state = ToasterState::default();

        let (render, actions) = handle_event(&mut state, &Event::Show(details("a", ToastKind::Info)), now);
        assert!(render);
        assert!(actions.is_empty());

        let timer = state.timers.get(&"a".into()).copied().unwrap();
        assert_eq!(timer.kind, TimerKind::AutoDismiss);
        assert_eq!(timer.deadline, now + Duration::from_millis(3000));
    }

    #[test]
    fn confirm_toasts_get_no_timer() {
        let now = Instant::now();
        let mut state = ToasterState::default();
        handle_event(&mut state, &Event::Show(details("q", ToastKind::Confirm)), now);

        assert!(state.timers.is_empty());
        let (render, actions) = handle_event(&mut state, &Event::Tick, now + Duration::from_secs(60));
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.store.get(&"q".into()).map(|t| t.direction), Some(Direction::In));
    }

    #[test]
    fn show_with_duplicate_id_is_ignored() {
        let now = Instant::now();
        let mut state = ToasterState::default();
        handle_event(&mut state, &Event::Show(details("a", ToastKind::Info)), now);
        let (render, _) = handle_event(
            &mut state,
            &Event::Show(details("a", ToastKind::Error)),
            now + Duration::from_millis(10),
        );

        assert!(!render);
        assert_eq!(state.store.len(), 1);
        assert_eq!(
            state.timers.get(&"a".into()).map(|t| t.deadline),
            Some(now + Duration::from_millis(3000))
        );
    }

    #[test]
    fn timer_expiry_starts_exit_then_animation_end_removes() {
        let now = Instant::now();
        let mut state = ToasterState::default();
        handle_event(&mut state, &Event::Show(details("a", ToastKind::Success)), now);

        let (render, actions) = handle_event(&mut state, &Event::Tick, now + Duration::from_millis(2999));
        assert!(!render && actions.is_empty());

        let (render, actions) = handle_event(&mut state, &Event::Tick, now + Duration::from_millis(3000));
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.store.get(&"a".into()).map(|t| t.direction), Some(Direction::Out));
        assert!(state.timers.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::AnimationEnded("a".into()), now);
        let gone = dismissed(&actions);
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].confirmed, None);
        assert!(state.store.is_empty());
    }

    #[test]
    fn explicit_dismiss_cancels_timer() {
        let now = Instant::now();
        let mut state = ToasterState::default();
        handle_event(&mut state, &Event::Show(details("a", ToastKind::Info)), now);
        handle_event(
            &mut state,
            &Event::Dismiss { id: "a".into(), confirmed: None },
            now,
        );

        assert!(state.timers.is_empty());
        let (render, actions) = handle_event(&mut state, &Event::Tick, now + Duration::from_secs(10));
        assert!(!render && actions.is_empty());
    }

    #[test]
    fn decision_is_kept_only_for_confirm_toasts() {
        let now = Instant::now();
        let mut state = ToasterState::default();
        handle_event(&mut state, &Event::Show(details("q", ToastKind::Confirm)), now);
        handle_event(&mut state, &Event::Show(details("i", ToastKind::Info)), now);

        handle_event(&mut state, &Event::Dismiss { id: "q".into(), confirmed: Some(true) }, now);
        handle_event(&mut state, &Event::Dismiss { id: "i".into(), confirmed: Some(true) }, now);

        assert_eq!(state.store.get(&"q".into()).and_then(|t| t.confirmed), Some(true));
        assert_eq!(state.store.get(&"i".into()).and_then(|t| t.confirmed), None);
    }

    #[test]
    fn second_dismiss_keeps_first_decision() {
        let now = Instant::now();
        let mut state = ToasterState::default();
        handle_event(&mut state, &Event::Show(details("q", ToastKind::Confirm)), now);
        handle_event(&mut state, &Event::Dismiss { id: "q".into(), confirmed: Some(false) }, now);
        let (render, _) = handle_event(&mut state, &Event::Dismiss { id: "q".into(), confirmed: Some(true) }, now);

        assert!(!render);
        assert_eq!(state.store.get(&"q".into()).and_then(|t| t.confirmed), Some(false));
    }

    #[test]
    fn entry_animation_end_is_ignored() {
        let now = Instant::now();
        let mut state = ToasterState::default();
        handle_event(&mut state, &Event::Show(details("a", ToastKind::Info)), now);

        let (render, actions) = handle_event(&mut state, &Event::AnimationEnded("a".into()), now);
        assert!(!render && actions.is_empty());
        assert_eq!(state.store.len(), 1);
        assert!(state.timers.get(&"a".into()).is_some());
    }

    #[test]
    fn animation_end_broadcasts_once() {
        let now = Instant::now();
        let mut state = ToasterState::default();
        handle_event(&mut state, &Event::Show(details("a", ToastKind::Info)), now);
        handle_event(&mut state, &Event::Dismiss { id: "a".into(), confirmed: None }, now);

        let (_, first) = handle_event(&mut state, &Event::AnimationEnded("a".into()), now);
        let (_, second) = handle_event(&mut state, &Event::AnimationEnded("a".into()), now);
        assert_eq!(dismissed(&first).len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn timed_exit_animation_completes_on_tick() {
        let now = Instant::now();
        let mut state = ToasterState::new(SurfaceConfig {
            position: Position::Center,
            display_time: Duration::from_millis(1000),
            animation_time: Some(Duration::from_millis(200)),
        });
        handle_event(&mut state, &Event::Show(details("a", ToastKind::Warning)), now);

        handle_event(&mut state, &Event::Tick, now + Duration::from_millis(1000));
        assert_eq!(
            state.timers.get(&"a".into()).map(|t| t.kind),
            Some(TimerKind::ExitAnimation)
        );

        let (_, actions) = handle_event(&mut state, &Event::Tick, now + Duration::from_millis(1199));
        assert!(actions.is_empty());
        let (_, actions) = handle_event(&mut state, &Event::Tick, now + Duration::from_millis(1200));
        assert_eq!(dismissed(&actions).len(), 1);
        assert!(state.store.is_empty() && state.timers.is_empty());
    }
}
