//! Terminal rendering of the bar.
//!
//! ```text
//! AppBar → compute_viewmodel → BarViewModel → render_frame → ANSI output
//!                                   ↓
//!                              hit_test (mouse clicks)
//! ```
//!
//! Rendering is deliberately plain: no colors beyond bold, dim and reverse.
//!
//! # Modules
//!
//! - [`viewmodel`]: renderable bar state
//! - [`layout`]: element positions and click hit-testing
//! - [`renderer`]: frame composition
//! - [`components`]: bar, list, menu and status renderers
//! - [`helpers`]: cursor positioning and text fitting

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod viewmodel;

pub use layout::{hit_test, BarLayout};
pub use renderer::render_frame;
pub use viewmodel::{BarViewModel, DisplayItem, Heading, HomeActions, MenuChoice, MenuItemView, MenuView};
