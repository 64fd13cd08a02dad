//! Ordered toast collection and its pure reducer.
//!
//! [`reduce`] is the only way the collection changes. It has no side effects;
//! timers and broadcasts belong to the surface that owns the store.

use crate::domain::{Toast, ToastId, ToastPatch};

/// State transitions of the toast store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Appends a toast, keeping confirm toasts first.
    ///
    /// Ignored when a toast with the same id is already present.
    Add(Toast),

    /// Removes the toast with this id, if present.
    Remove(ToastId),

    /// Merges a patch into the toast with this id, if present.
    Update(ToastId, ToastPatch),
}

/// Applies `action` to `toasts` and returns the next collection.
///
/// `Add` performs a stable sort, so toasts of equal priority keep their
/// insertion order.
#[must_use]
pub fn reduce(mut toasts: Vec<Toast>, action: StoreAction) -> Vec<Toast> {
    match action {
        StoreAction::Add(toast) => {
            if toasts.iter().any(|existing| existing.id() == toast.id()) {
                return toasts;
            }
            toasts.push(toast);
            toasts.sort_by_key(|toast| !toast.is_confirm());
            toasts
        }
        StoreAction::Remove(id) => {
            toasts.retain(|toast| *toast.id() != id);
            toasts
        }
        StoreAction::Update(id, patch) => {
            if let Some(toast) = toasts.iter_mut().find(|toast| *toast.id() == id) {
                toast.apply(&patch);
            }
            toasts
        }
    }
}

/// The surface's toast collection.
#[derive(Debug, Clone, Default)]
pub struct ToastStore {
    toasts: Vec<Toast>,
}

impl ToastStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `action` through [`reduce`].
    pub fn dispatch(&mut self, action: StoreAction) {
        let toasts = std::mem::take(&mut self.toasts);
        self.toasts = reduce(toasts, action);
    }

    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ToastId) -> bool {
        self.get(id).is_some()
    }

    /// The foremost toast in render order.
    #[must_use]
    pub fn first(&self) -> Option<&Toast> {
        self.toasts.first()
    }

    /// Toasts in render order.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
