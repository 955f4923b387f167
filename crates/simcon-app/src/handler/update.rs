//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use simcon_client::ApiError;
use tracing::warn;

use crate::action_lock::ActionKind;
use crate::message::Message;
use crate::state::{AppPhase, AppState, Notice};

use super::{
    activity, config, dashboard, keys, navigation, ControlCommand, UpdateResult, LOCK_GRACE,
};

/// Process a message and update state
/// Returns an optional action for the event loop to perform
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match keys::handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => handle_tick(state, Instant::now()),

        Message::Quit => {
            state.phase = AppPhase::Quitting;
            state.dialog = None;
            state.unmount_all();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::ShowView(kind) => navigation::show_view(state, kind),
        Message::NextView => navigation::show_view(state, state.active.next()),
        Message::PreviousView => navigation::show_view(state, state.active.previous()),
        Message::DismissNotice => {
            state.notice = None;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Dashboard
        // ─────────────────────────────────────────────────────────
        Message::RefreshDashboard => dashboard::handle_refresh(state),
        Message::SnapshotFetched { view_id, result } => {
            dashboard::handle_snapshot(state, view_id, result)
        }
        Message::RequestStart => dashboard::handle_control_request(state, ControlCommand::Start),
        Message::RequestStop => dashboard::handle_control_request(state, ControlCommand::Stop),
        Message::RequestReset(kind) => dashboard::handle_reset_request(state, kind),
        Message::ConfirmReset(confirmed) => {
            state.dialog = None;
            dashboard::handle_control_request(state, ControlCommand::Reset(confirmed))
        }
        Message::CancelDialog => {
            state.dialog = None;
            UpdateResult::none()
        }
        Message::ControlCompleted {
            token,
            kind,
            result,
        } => dashboard::handle_control_completed(state, token, kind, result),

        // ─────────────────────────────────────────────────────────
        // Activity
        // ─────────────────────────────────────────────────────────
        Message::SetActivityFilter(filter) => activity::handle_set_filter(state, filter),
        Message::CycleActivityFilter => activity::handle_cycle_filter(state),
        Message::LoadMoreActivity => activity::handle_load_more(state),
        Message::RefreshActivity => activity::handle_refresh(state),
        Message::ActivitySelectNext => {
            if let Some(view) = state.activity.as_mut() {
                view.select_next();
            }
            UpdateResult::none()
        }
        Message::ActivitySelectPrevious => {
            if let Some(view) = state.activity.as_mut() {
                view.select_previous();
            }
            UpdateResult::none()
        }
        Message::ActivityPageLoaded {
            view_id,
            request_id,
            result,
        } => activity::handle_page_loaded(state, view_id, request_id, result),

        // ─────────────────────────────────────────────────────────
        // Config
        // ─────────────────────────────────────────────────────────
        Message::FetchConfig => config::handle_fetch(state),
        Message::ConfigFetched { view_id, result } => {
            config::handle_fetched(state, view_id, result)
        }
        Message::EditConfig => config::handle_edit(state),
        Message::CancelEdit => config::handle_cancel(state),
        Message::RevertConfig => config::handle_revert(state),
        Message::SaveConfig => config::handle_save(state),
        Message::EditorKey(key) => config::handle_editor_key(state, key),
        Message::ConfigSaved {
            view_id,
            token,
            result,
        } => config::handle_saved(state, view_id, token, result),
    }
}

/// Periodic housekeeping: notice expiry and the stuck-lock backstop.
pub(crate) fn handle_tick(state: &mut AppState, now: Instant) -> UpdateResult {
    if state.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
        state.notice = None;
    }

    let limit = state.settings.api.action_timeout() + LOCK_GRACE;
    if let Some(kind) = state.lock.expire_if_overdue(now, limit) {
        warn!("{} did not report back within {:?}; releasing action lock", kind.label(), limit);
        let message = ApiError::TimedOut.user_message();
        if kind == ActionKind::SaveConfig {
            if let Some(view) = state.config.as_mut() {
                view.editor.abandon_save(message.clone());
            }
        }
        state.set_notice(Notice::error(message));
    }

    UpdateResult::none()
}
