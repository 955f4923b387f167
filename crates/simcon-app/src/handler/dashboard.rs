//! Dashboard handlers: snapshot results and control actions

use simcon_client::ApiError;
use simcon_core::ControlResponse;
use tracing::{debug, info, warn};

use crate::action_lock::{ActionKind, ActionToken};
use crate::confirm_dialog::{ConfirmDialogState, ResetKind};
use crate::state::{AppState, Notice, Snapshot, ViewId};

use super::{ControlCommand, UpdateAction, UpdateResult};

/// Manual refresh, same combined fetch as the poller.
pub fn handle_refresh(state: &mut AppState) -> UpdateResult {
    match &state.dashboard {
        Some(view) => UpdateResult::action(UpdateAction::FetchSnapshot {
            view_id: view.view_id,
        }),
        None => UpdateResult::none(),
    }
}

pub fn handle_snapshot(
    state: &mut AppState,
    view_id: ViewId,
    result: Result<Snapshot, ApiError>,
) -> UpdateResult {
    match state.dashboard.as_mut() {
        Some(view) if view.view_id == view_id => {
            if let Err(e) = &result {
                debug!("Dashboard refresh failed: {}", e);
            }
            view.apply_snapshot(result);
        }
        _ => debug!("Discarding snapshot for unmounted view {:?}", view_id),
    }
    UpdateResult::none()
}

/// Try to dispatch `command`. Rejected without side effects when the
/// dashboard is not mounted, the command is not available for the current
/// status, or another action holds the lock.
pub fn handle_control_request(state: &mut AppState, command: ControlCommand) -> UpdateResult {
    let Some(view) = state.dashboard.as_ref() else {
        return UpdateResult::none();
    };

    let available = match &command {
        ControlCommand::Start => view.can_start(),
        ControlCommand::Stop => view.can_stop(),
        ControlCommand::Reset(_) => true,
    };
    if !available {
        debug!("{:?} not available for the current status", command.kind());
        return UpdateResult::none();
    }

    match state.lock.try_acquire(command.kind()) {
        Ok(token) => {
            info!("{}", command.kind().label());
            UpdateResult::action(UpdateAction::DispatchControl { token, command })
        }
        Err(held) => {
            debug!("Rejected {:?}: {:?} already in flight", command.kind(), held);
            UpdateResult::none()
        }
    }
}

/// Open the reset confirmation. This is the only way to a reset dispatch.
pub fn handle_reset_request(state: &mut AppState, kind: ResetKind) -> UpdateResult {
    if state.dashboard.is_none() || state.lock.is_held() {
        return UpdateResult::none();
    }
    state.dialog = Some(ConfirmDialogState::reset(kind));
    UpdateResult::none()
}

/// Release the lock, report the outcome and refresh the dashboard.
pub fn handle_control_completed(
    state: &mut AppState,
    token: ActionToken,
    kind: ActionKind,
    result: Result<ControlResponse, ApiError>,
) -> UpdateResult {
    if !state.lock.release(token) {
        debug!("{:?} completed after its lock was released", kind);
    }

    match result {
        Ok(response) => {
            let text = if response.message.trim().is_empty() {
                format!("{} completed", kind.label())
            } else {
                response.message
            };
            state.set_notice(Notice::info(text));
        }
        Err(e) => {
            warn!("{} failed: {}", kind.label(), e);
            state.set_notice(Notice::error(e.user_message()));
        }
    }

    handle_refresh(state)
}
