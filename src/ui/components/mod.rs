//! Component renderers.
//!
//! - [`bar`]: the top bar line and its separator
//! - [`list`]: home entry rows or the empty message
//! - [`menu`]: dropdown overlays, drawn last so they cover the list
//! - [`status`]: the diagnostic line at the bottom

mod bar;
mod list;
mod menu;
mod status;

pub use bar::render_bar;
pub use list::render_list;
pub use menu::render_menu;
pub use status::render_status;
