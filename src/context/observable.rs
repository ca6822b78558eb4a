//! Single-threaded observable value cell.
//!
//! An [`Observable`] holds one value shared by every clone of the handle.
//! Observers register a callback with [`Observable::subscribe`] and keep the
//! returned [`Subscription`] alive for as long as they want notifications;
//! dropping it unsubscribes.
//!
//! Callbacks run after the new value is stored and after the internal borrow
//! is released, so an observer may read any observable (including the one
//! that notified it) from inside its callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    next_id: u64,
    observers: Vec<(u64, Callback<T>)>,
}

/// Shared value with change notification.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use vaultbar::context::Observable;
///
/// let term = Observable::new(String::new());
/// let seen = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&seen);
/// let _sub = term.subscribe(move |_| counter.set(counter.get() + 1));
///
/// term.set("abc".to_string());
/// term.set("abc".to_string()); // unchanged, no notification
/// assert_eq!(seen.get(), 1);
/// ```
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Creates a cell holding `value` with no observers.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                next_id: 0,
                observers: Vec::new(),
            })),
        }
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Stores `value` and notifies observers if it differs from the current one.
    ///
    /// Returns `true` when the value changed.
    pub fn set(&self, value: T) -> bool {
        let observers: Vec<Callback<T>> = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value.clone();
            inner.observers.iter().map(|(_, cb)| Rc::clone(cb)).collect()
        };

        for observer in observers {
            observer(&value);
        }
        true
    }

    /// Applies `f` to a copy of the current value and stores the result.
    ///
    /// Returns `true` when the value changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut value = self.get();
        f(&mut value);
        self.set(value)
    }

    /// Registers `callback` to run after every change.
    ///
    /// The registration lasts until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.push((id, Rc::new(callback)));

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().observers.retain(|(oid, _)| *oid != id);
                }
            })),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("observers", &inner.observers.len())
            .finish()
    }
}

/// Guard that keeps an observer registered.
///
/// Dropping it removes the observer. Outliving the observable is harmless.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn clones_share_the_value() {
        let a = Observable::new(1);
        let b = a.clone();
        b.set(7);
        assert_eq!(a.get(), 7);
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let cell = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.set(1);
        drop(sub);
        cell.set(2);

        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(cell.observer_count(), 0);
    }

    #[test]
    fn observer_can_read_during_notification() {
        let cell = Observable::new(String::new());
        let reader = cell.clone();
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        let _sub = cell.subscribe(move |_| *sink.borrow_mut() = reader.get());

        cell.set("abc".to_string());
        assert_eq!(*seen.borrow(), "abc");
    }

    #[test]
    fn subscription_outliving_cell_is_harmless() {
        let cell = Observable::new(0);
        let sub = cell.subscribe(|_| {});
        drop(cell);
        drop(sub);
    }

    #[test]
    fn update_reports_change() {
        let cell = Observable::new(String::from("ab"));
        assert!(cell.update(|s| s.push('c')));
        assert!(!cell.update(|_| {}));
        assert_eq!(cell.get(), "abc");
    }
}
