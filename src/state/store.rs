// ============================================================================
// STORE - Reducer-driven global state
// ============================================================================
// State only changes through `dispatch`; `reduce` is pure (no I/O).
// ============================================================================

use super::reactivity::ReactiveState;

pub trait Reducer: Clone + Default {
    type Action: std::fmt::Debug;

    fn reduce(self, action: Self::Action) -> Self;
}

pub struct Store<S: Reducer> {
    state: ReactiveState<S>,
}

impl<S: Reducer> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: ReactiveState::new(initial),
        }
    }

    pub fn dispatch(&self, action: S::Action) {
        log::debug!("[STORE] {:?}", action);
        self.state.update(|state| {
            let current = std::mem::take(state);
            *state = current.reduce(action);
        });
    }

    /// Snapshot of the current state
    pub fn get(&self) -> S {
        self.state.get()
    }

    pub fn select<R>(&self, selector: impl FnOnce(&S) -> R) -> R {
        self.state.with(selector)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback);
    }
}

impl<S: Reducer> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<S: Reducer> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
