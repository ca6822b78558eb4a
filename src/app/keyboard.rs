//! Global key-press interception.
//!
//! The plugin receives every key press from the host and dispatches it
//! through a [`KeyChannel`]. The bar attaches one listener while mounted; on
//! the home screen that listener turns the cancel key into "cancel search" and
//! any other key into "start search".
//!
//! Listener registration is scoped: [`KeyChannel::attach`] returns a
//! [`KeyListenerGuard`] and dropping it detaches the listener, so a bar that is
//! unmounted (or unwinds) never leaves a handler behind. Channels are plain
//! values owned by a session, so independent sessions never share listeners.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::app::handler::Event;
use crate::navigation::{is_home, Router};

/// A key press as seen by the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// The dedicated cancel key (Esc).
    Cancel,
    /// A printable character (Enter is forwarded as `'\n'`).
    Printable(char),
}

type Listener<E> = Rc<dyn Fn(&KeyPress) -> Option<E>>;

struct ChannelInner<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

/// Registry of key listeners for one session.
///
/// Each listener maps a key press to an optional event; [`dispatch`] returns
/// the events produced by all listeners attached at the time of the call.
///
/// [`dispatch`]: KeyChannel::dispatch
pub struct KeyChannel<E> {
    inner: Rc<RefCell<ChannelInner<E>>>,
}

impl<E> Clone for KeyChannel<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: 'static> KeyChannel<E> {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ChannelInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Attaches `listener` until the returned guard is dropped.
    #[must_use = "dropping the guard immediately detaches the listener"]
    pub fn attach(&self, listener: impl Fn(&KeyPress) -> Option<E> + 'static) -> KeyListenerGuard {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        tracing::debug!(listener_id = id, listeners = inner.listeners.len(), "key listener attached");

        let weak: Weak<RefCell<ChannelInner<E>>> = Rc::downgrade(&self.inner);
        KeyListenerGuard {
            id,
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.borrow_mut();
                    inner.listeners.retain(|(lid, _)| *lid != id);
                    tracing::debug!(listener_id = id, listeners = inner.listeners.len(), "key listener detached");
                }
            })),
        }
    }

    /// Delivers `key` to every attached listener and collects their events.
    ///
    /// Listeners may attach or detach others while running; changes apply to
    /// the next dispatch.
    pub fn dispatch(&self, key: &KeyPress) -> Vec<E> {
        let listeners: Vec<Listener<E>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        listeners.iter().filter_map(|listener| listener(key)).collect()
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl<E: 'static> Default for KeyChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for KeyChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyChannel")
            .field("listeners", &self.inner.borrow().listeners.len())
            .finish()
    }
}

/// Keeps a key listener attached; detaches on drop.
pub struct KeyListenerGuard {
    id: u64,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Drop for KeyListenerGuard {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for KeyListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyListenerGuard").field("id", &self.id).finish()
    }
}

/// The bar's key listener slot.
///
/// Holds at most one guard, so mounting an already-mounted bar does not
/// register a second handler.
#[derive(Debug, Default)]
pub struct KeyboardIntercept {
    guard: Option<KeyListenerGuard>,
}

impl KeyboardIntercept {
    /// Creates a detached intercept.
    #[must_use]
    pub const fn new() -> Self {
        Self { guard: None }
    }

    /// Attaches the search-trigger listener to `channel`.
    ///
    /// Returns `false` (and does nothing) if already attached.
    pub fn attach(&mut self, channel: &KeyChannel<Event>, router: Rc<dyn Router>) -> bool {
        if self.guard.is_some() {
            tracing::debug!("key listener already attached");
            return false;
        }
        self.guard = Some(channel.attach(move |key| translate_key(&router.current_path(), *key)));
        true
    }

    /// Detaches the listener. Safe to call when not attached.
    pub fn detach(&mut self) {
        self.guard = None;
    }

    /// Whether a listener is currently attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.guard.is_some()
    }
}

/// Maps a key press on `route` to a search trigger.
///
/// Keys pressed off the home screen produce nothing.
#[must_use]
pub fn translate_key(route: &str, key: KeyPress) -> Option<Event> {
    if !is_home(route) {
        return None;
    }
    Some(match key {
        KeyPress::Cancel => Event::CancelSearch,
        KeyPress::Printable(_) => Event::StartSearch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{HistoryRouter, HOME, SETTINGS};

    #[test]
    fn keys_map_to_triggers_on_home_only() {
        assert_eq!(translate_key(HOME, KeyPress::Cancel), Some(Event::CancelSearch));
        assert_eq!(translate_key(HOME, KeyPress::Printable('g')), Some(Event::StartSearch));
        assert_eq!(translate_key(SETTINGS, KeyPress::Printable('g')), None);
        assert_eq!(translate_key(SETTINGS, KeyPress::Cancel), None);
    }

    #[test]
    fn double_attach_registers_one_listener() {
        let channel = KeyChannel::new();
        let router: Rc<dyn Router> = Rc::new(HistoryRouter::new());
        let mut intercept = KeyboardIntercept::new();

        assert!(intercept.attach(&channel, Rc::clone(&router)));
        assert!(!intercept.attach(&channel, router));
        assert_eq!(channel.listener_count(), 1);
        assert_eq!(channel.dispatch(&KeyPress::Printable('a')), vec![Event::StartSearch]);

        intercept.detach();
        assert_eq!(channel.listener_count(), 0);
        assert!(channel.dispatch(&KeyPress::Printable('a')).is_empty());
    }

    #[test]
    fn listener_follows_the_live_route() {
        let channel = KeyChannel::new();
        let router = Rc::new(HistoryRouter::new());
        let mut intercept = KeyboardIntercept::new();
        intercept.attach(&channel, router.clone());

        router.navigate(SETTINGS);
        assert!(channel.dispatch(&KeyPress::Cancel).is_empty());
        router.navigate_back();
        assert_eq!(channel.dispatch(&KeyPress::Cancel), vec![Event::CancelSearch]);
    }

    #[test]
    fn channels_are_independent() {
        let first: KeyChannel<u8> = KeyChannel::new();
        let second: KeyChannel<u8> = KeyChannel::new();
        let _guard = first.attach(|_| Some(1));

        assert_eq!(first.listener_count(), 1);
        assert_eq!(second.listener_count(), 0);
        assert!(second.dispatch(&KeyPress::Cancel).is_empty());
    }

    #[test]
    fn guard_released_during_unwind() {
        let channel: KeyChannel<u8> = KeyChannel::new();
        let inner = channel.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = inner.attach(|_| Some(1));
            panic!("screen crashed while mounted");
        }));
        assert!(result.is_err());
        assert_eq!(channel.listener_count(), 0);
    }

    #[test]
    fn listener_may_detach_during_dispatch() {
        let channel: KeyChannel<u8> = KeyChannel::new();
        let slot: Rc<RefCell<Option<KeyListenerGuard>>> = Rc::new(RefCell::new(None));
        let inner_slot = Rc::clone(&slot);
        let guard = channel.attach(move |_| {
            inner_slot.borrow_mut().take();
            Some(7)
        });
        *slot.borrow_mut() = Some(guard);

        assert_eq!(channel.dispatch(&KeyPress::Cancel), vec![7]);
        assert_eq!(channel.listener_count(), 0);
    }
}
