//! qadash-app - Application state and orchestration for qadash
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! explorer views, the Engine shared by the TUI and headless runners,
//! configuration loading, and scoped polling tasks.

pub mod actions;
pub mod config;
pub mod engine;
pub mod explorer;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod polling;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use config::Settings;
pub use engine::Engine;
pub use explorer::{DetailState, ExplorerState};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use polling::PollHandle;
pub use state::{AppPhase, AppState, UiMode, ViewState};
