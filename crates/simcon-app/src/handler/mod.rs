//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per view and mode
//! - `navigation`: View mount/unmount
//! - `dashboard`: Snapshot results and start/stop/reset dispatch
//! - `activity`: Activity paginator handlers
//! - `config`: Config editor handlers

pub(crate) mod activity;
pub(crate) mod config;
pub(crate) mod dashboard;
pub(crate) mod keys;
pub(crate) mod navigation;
pub(crate) mod update;


use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;

use crate::action_lock::{ActionKind, ActionToken};
use crate::confirm_dialog::ConfirmedReset;
use crate::message::Message;
use crate::paginator::PageRequest;
use crate::state::ViewId;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Delay before re-reading the config after a successful save
pub const CONFIG_REFETCH_DELAY: Duration = Duration::from_secs(2);

/// Extra time past the action timeout before the update loop force-releases
/// the action lock
pub const LOCK_GRACE: Duration = Duration::from_secs(5);

/// A start, stop or confirmed reset to send to the simulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Start,
    Stop,
    Reset(ConfirmedReset),
}

impl ControlCommand {
    pub fn kind(&self) -> ActionKind {
        match self {
            ControlCommand::Start => ActionKind::Start,
            ControlCommand::Stop => ActionKind::Stop,
            ControlCommand::Reset(confirmed) => confirmed.kind().action_kind(),
        }
    }
}

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Spawn the dashboard polling task; it runs until `shutdown_rx` fires
    StartPoller {
        view_id: ViewId,
        shutdown_rx: watch::Receiver<bool>,
    },

    /// One status + metrics fetch outside the poll schedule
    FetchSnapshot { view_id: ViewId },

    /// Send a control command while holding the action lock
    DispatchControl {
        token: ActionToken,
        command: ControlCommand,
    },

    FetchActivity {
        view_id: ViewId,
        request: PageRequest,
    },

    /// Fetch the config, optionally after a delay
    FetchConfig {
        view_id: ViewId,
        delay: Option<Duration>,
    },

    /// Send an edited config while holding the action lock
    SaveConfig {
        view_id: ViewId,
        token: ActionToken,
        config: Value,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
