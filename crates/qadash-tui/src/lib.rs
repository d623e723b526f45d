//! qadash-tui - Terminal UI for qadash
//!
//! Creates an [`Engine`](qadash_app::Engine) and adds terminal rendering,
//! key polling and the explorer widgets.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
