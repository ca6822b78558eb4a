//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never touches the router or the worker directly. It
//! returns a `Vec<Action>` that the session executes in order, which is what
//! gives each user action its ordering guarantee: state mutation happens
//! inside the handler, side effects only afterwards.
//!
//! # Example
//!
//! ```rust
//! use vaultbar::app::Action;
//! use vaultbar::navigation::SETTINGS;
//!
//! let actions = vec![Action::Navigate(SETTINGS.to_string())];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Navigates the router to a path.
    Navigate(String),

    /// Asks the router to go one step back.
    NavigateBack,

    /// Posts a message to the background worker.
    ///
    /// Used for loading preferences and entries and for the vault lock, all of
    /// which complete later as a worker response event.
    PostToWorker(WorkerMessage),
}
