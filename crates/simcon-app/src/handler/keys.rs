//! Key event handlers for each view and mode

use crate::confirm_dialog::ResetKind;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, ViewKind};

/// Convert key events to messages based on current state
pub fn handle_key(state: &mut AppState, key: InputKey) -> Option<Message> {
    // Ctrl+C always quits
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    if state.dialog.is_some() {
        return handle_key_dialog(state, key);
    }

    if state.is_editing_config() {
        return handle_key_editing(key);
    }

    match key {
        InputKey::Char('q') => return Some(Message::Quit),
        InputKey::Tab => return Some(Message::NextView),
        InputKey::BackTab => return Some(Message::PreviousView),
        InputKey::Char('1') => return Some(Message::ShowView(ViewKind::Dashboard)),
        InputKey::Char('2') => return Some(Message::ShowView(ViewKind::Activity)),
        InputKey::Char('3') => return Some(Message::ShowView(ViewKind::Config)),
        InputKey::Esc if state.notice.is_some() => return Some(Message::DismissNotice),
        _ => {}
    }

    match state.active {
        ViewKind::Dashboard => handle_key_dashboard(key),
        ViewKind::Activity => handle_key_activity(key),
        ViewKind::Config => handle_key_config(key),
    }
}

fn handle_key_dialog(state: &mut AppState, key: InputKey) -> Option<Message> {
    let dialog = state.dialog.as_mut()?;
    match key {
        InputKey::Left | InputKey::Up | InputKey::BackTab => {
            dialog.select_previous();
            None
        }
        InputKey::Right | InputKey::Down | InputKey::Tab => {
            dialog.select_next();
            None
        }
        InputKey::Enter => dialog.selected_message(),
        InputKey::Esc | InputKey::Char('n') | InputKey::Char('q') => Some(Message::CancelDialog),
        _ => None,
    }
}

fn handle_key_editing(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CancelEdit),
        InputKey::CharCtrl('s') => Some(Message::SaveConfig),
        InputKey::CharCtrl('r') => Some(Message::RevertConfig),
        InputKey::CharCtrl(_) => None,
        other => Some(Message::EditorKey(other)),
    }
}

fn handle_key_dashboard(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('s') => Some(Message::RequestStart),
        InputKey::Char('x') => Some(Message::RequestStop),
        InputKey::Char('R') => Some(Message::RequestReset(ResetKind::State)),
        InputKey::Char('D') => Some(Message::RequestReset(ResetKind::WithData)),
        InputKey::Char('r') => Some(Message::RefreshDashboard),
        _ => None,
    }
}

fn handle_key_activity(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('f') => Some(Message::CycleActivityFilter),
        InputKey::Char('F') => Some(Message::SetActivityFilter(None)),
        InputKey::Char('m') => Some(Message::LoadMoreActivity),
        InputKey::Char('r') => Some(Message::RefreshActivity),
        InputKey::Down | InputKey::Char('j') => Some(Message::ActivitySelectNext),
        InputKey::Up | InputKey::Char('k') => Some(Message::ActivitySelectPrevious),
        _ => None,
    }
}

fn handle_key_config(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('e') | InputKey::Enter => Some(Message::EditConfig),
        InputKey::Char('r') => Some(Message::FetchConfig),
        _ => None,
    }
}
