// ============================================================================
// REACTIVITY - Shared value + change subscribers
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Value shared through `Rc<RefCell>`. Clones see the same value and subscribers.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Read through a closure without cloning the value
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Mutate in place and notify subscribers
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn notify(&self) {
        // Snapshot first: a callback may subscribe or read the value again
        let callbacks: Vec<Callback> = self.subscribers.borrow().iter().cloned().collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(1);
        let seen = Rc::new(Cell::new(0));
        let seen_cb = seen.clone();
        state.subscribe(move || seen_cb.set(seen_cb.get() + 1));

        let other = state.clone();
        other.set(5);
        other.update(|value| *value += 1);

        assert_eq!(state.get(), 6);
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn callback_may_read_state() {
        let state = ReactiveState::new(String::from("a"));
        let observed = Rc::new(RefCell::new(String::new()));
        let (reader, sink) = (state.clone(), observed.clone());
        state.subscribe(move || *sink.borrow_mut() = reader.get());

        state.set("b".to_string());
        assert_eq!(*observed.borrow(), "b");
    }
}
