//! simcon-app - Application state and orchestration for the simulator console
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: per-view state, the update function, the background actions
//! that talk to the control API, and settings loading.

pub mod action_lock;
pub mod actions;
pub mod config;
pub mod config_editor;
pub mod confirm_dialog;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod paginator;
pub mod process;
pub mod signals;
pub mod state;
pub mod text_buffer;

// Re-export primary types
pub use action_lock::{ActionKind, ActionLock, ActionToken};
pub use config::Settings;
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, ViewId, ViewKind};
