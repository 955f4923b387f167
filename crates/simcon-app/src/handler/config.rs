//! Config view handlers

use serde_json::Value;
use simcon_client::ApiError;
use simcon_core::ControlResponse;
use tracing::{debug, info, warn};

use crate::action_lock::{ActionKind, ActionToken};
use crate::config_editor::{EditorMode, SAVE_SUCCESS_FALLBACK};
use crate::input_key::InputKey;
use crate::state::{AppState, Notice, ViewId};

use super::{UpdateAction, UpdateResult, CONFIG_REFETCH_DELAY};

pub fn handle_fetch(state: &mut AppState) -> UpdateResult {
    let Some(view) = state.config.as_mut() else {
        return UpdateResult::none();
    };
    if view.editor.mode() == EditorMode::Viewing {
        view.editor.loading = true;
    }
    UpdateResult::action(UpdateAction::FetchConfig {
        view_id: view.view_id,
        delay: None,
    })
}

pub fn handle_fetched(
    state: &mut AppState,
    view_id: ViewId,
    result: Result<Value, ApiError>,
) -> UpdateResult {
    match state.config.as_mut() {
        Some(view) if view.view_id == view_id => view.editor.apply_fetch(result),
        _ => debug!("Discarding config for unmounted view {:?}", view_id),
    }
    UpdateResult::none()
}

pub fn handle_edit(state: &mut AppState) -> UpdateResult {
    if let Some(view) = state.config.as_mut() {
        view.editor.begin_edit();
    }
    UpdateResult::none()
}

pub fn handle_cancel(state: &mut AppState) -> UpdateResult {
    if let Some(view) = state.config.as_mut() {
        view.editor.cancel();
    }
    UpdateResult::none()
}

pub fn handle_revert(state: &mut AppState) -> UpdateResult {
    if let Some(view) = state.config.as_mut() {
        view.editor.revert();
    }
    UpdateResult::none()
}

/// Validate the buffer and, holding the action lock, send it.
pub fn handle_save(state: &mut AppState) -> UpdateResult {
    let Some(view) = state.config.as_mut() else {
        return UpdateResult::none();
    };
    if !view.editor.is_editing() {
        return UpdateResult::none();
    }
    let Some(config) = view.editor.validate() else {
        return UpdateResult::none();
    };

    match state.lock.try_acquire(ActionKind::SaveConfig) {
        Ok(token) => {
            info!("Saving configuration");
            view.editor.begin_save(config.clone());
            UpdateResult::action(UpdateAction::SaveConfig {
                view_id: view.view_id,
                token,
                config,
            })
        }
        Err(held) => {
            debug!("Rejected config save: {:?} already in flight", held);
            UpdateResult::none()
        }
    }
}

pub fn handle_saved(
    state: &mut AppState,
    view_id: ViewId,
    token: ActionToken,
    result: Result<ControlResponse, ApiError>,
) -> UpdateResult {
    if !state.lock.release(token) {
        debug!("Config save completed after its lock was released");
    }
    if let Err(e) = &result {
        warn!("Config save failed: {}", e);
    }

    match state.config.as_mut() {
        Some(view) if view.view_id == view_id => match view.editor.finish_save(result) {
            Some(text) => {
                state.set_notice(Notice::info(text));
                UpdateResult::action(UpdateAction::FetchConfig {
                    view_id,
                    delay: Some(CONFIG_REFETCH_DELAY),
                })
            }
            None => UpdateResult::none(),
        },
        _ => {
            // The editor is gone; still tell the operator how it went.
            let notice = match result {
                Ok(response) if !response.message.trim().is_empty() => {
                    Notice::info(response.message)
                }
                Ok(_) => Notice::info(SAVE_SUCCESS_FALLBACK),
                Err(e) => Notice::error(e.user_message()),
            };
            state.set_notice(notice);
            UpdateResult::none()
        }
    }
}

/// Edit the working buffer.
pub fn handle_editor_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(buffer) = state
        .config
        .as_mut()
        .and_then(|view| view.editor.buffer_mut())
    else {
        return UpdateResult::none();
    };

    match key {
        InputKey::Enter => buffer.insert_newline(),
        InputKey::Tab => buffer.insert_str("  "),
        InputKey::Backspace => buffer.backspace(),
        InputKey::Delete => buffer.delete(),
        InputKey::Left => buffer.move_left(),
        InputKey::Right => buffer.move_right(),
        InputKey::Up => buffer.move_up(),
        InputKey::Down => buffer.move_down(),
        InputKey::Home => buffer.move_home(),
        InputKey::End => buffer.move_end(),
        other => {
            if let Some(c) = other.printable() {
                buffer.insert_char(c);
            }
        }
    }
    UpdateResult::none()
}
