//! Application layer: the bar's components, events, and actions.
//!
//! ```text
//! Key / Click / Route / Worker → Event → handle_event → AppBar mutation → Actions
//!                                  ↑                                        ↓
//!                                  └──────── RouteChanged, WorkerResponse ──┘
//! ```
//!
//! # Modules
//!
//! - [`modes`]: pure search-mode transition function
//! - [`search`]: search mode controller, sole writer of the search term
//! - [`keyboard`]: scoped key listener registry and the bar's key intercept
//! - [`menu`]: sort and overflow menu bookkeeping
//! - [`lock`]: vault lock tickets and outcome resolution
//! - [`entries`]: home entry list filtering and ordering
//! - [`state`]: [`AppBar`], composing the above
//! - [`handler`] and [`actions`]: event processing and its side effects

pub mod actions;
pub mod entries;
pub mod handler;
pub mod keyboard;
pub mod lock;
pub mod menu;
pub mod modes;
pub mod search;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keyboard::{KeyChannel, KeyPress, KeyboardIntercept};
pub use lock::{LockTicket, VaultLockInvoker};
pub use menu::{Anchor, MenuCoordinator, MenuKind, OverflowItem};
pub use modes::{transition, SearchMode, SearchTrigger};
pub use search::{SearchEdit, SearchModeController};
pub use state::AppBar;
