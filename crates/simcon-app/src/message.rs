//! Message types for the application (TEA pattern)

use serde_json::Value;
use simcon_client::ApiError;
use simcon_core::{ActivityPage, ControlResponse, EventType};

use crate::action_lock::{ActionKind, ActionToken};
use crate::confirm_dialog::{ConfirmedReset, ResetKind};
use crate::input_key::InputKey;
use crate::state::{Snapshot, ViewId, ViewKind};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Quit the console (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Mount a view, unmounting the current one
    ShowView(ViewKind),
    NextView,
    PreviousView,

    /// Close the transient notice
    DismissNotice,

    // ─────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────
    /// Manual status + metrics refresh
    RefreshDashboard,

    /// Combined status + metrics result for a dashboard mount
    SnapshotFetched {
        view_id: ViewId,
        result: Result<Snapshot, ApiError>,
    },

    RequestStart,
    RequestStop,

    /// Open the confirmation dialog for a reset
    RequestReset(ResetKind),

    /// Emitted only by the reset confirmation dialog
    ConfirmReset(ConfirmedReset),

    /// Close the confirmation dialog without acting
    CancelDialog,

    /// A start/stop/reset finished (or timed out)
    ControlCompleted {
        token: ActionToken,
        kind: ActionKind,
        result: Result<ControlResponse, ApiError>,
    },

    // ─────────────────────────────────────────────────────────
    // Activity
    // ─────────────────────────────────────────────────────────
    SetActivityFilter(Option<EventType>),
    CycleActivityFilter,
    LoadMoreActivity,
    RefreshActivity,
    ActivitySelectNext,
    ActivitySelectPrevious,

    ActivityPageLoaded {
        view_id: ViewId,
        request_id: u64,
        result: Result<ActivityPage, ApiError>,
    },

    // ─────────────────────────────────────────────────────────
    // Config
    // ─────────────────────────────────────────────────────────
    FetchConfig,
    ConfigFetched {
        view_id: ViewId,
        result: Result<Value, ApiError>,
    },
    EditConfig,
    CancelEdit,
    RevertConfig,
    SaveConfig,
    /// Key routed to the config text buffer while editing
    EditorKey(InputKey),
    ConfigSaved {
        view_id: ViewId,
        token: ActionToken,
        result: Result<ControlResponse, ApiError>,
    },
}
