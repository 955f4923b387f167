//! Full-frame render smoke tests

use super::*;
use crate::test_utils::{dashboard_state, test_app_state, TestTerminal};
use serde_json::json;
use simcon_app::confirm_dialog::ResetKind;
use simcon_app::handler::update;
use simcon_app::message::Message;
use simcon_app::state::Notice;
use simcon_core::RunStatus;

fn draw(state: &AppState) -> TestTerminal {
    let mut term = TestTerminal::with_size(100, 30);
    term.draw_with(|frame| view(frame, state));
    term
}

#[test]
fn test_dashboard_frame() {
    let state = dashboard_state(RunStatus::Running);
    let term = draw(&state);

    assert!(term.buffer_contains("Simulator Console"));
    assert!(term.buffer_contains("Control Panel"));
    assert!(term.buffer_contains("Generation Metrics"));
    assert!(term.buffer_contains("[q] Quit"));
}

#[test]
fn test_freshly_mounted_dashboard_shows_loading() {
    let mut state = test_app_state();
    update(&mut state, Message::ShowView(ViewKind::Dashboard));
    assert!(draw(&state).buffer_contains("Loading..."));
}

#[test]
fn test_activity_frame() {
    let mut state = test_app_state();
    update(&mut state, Message::ShowView(ViewKind::Activity));
    let term = draw(&state);
    assert!(term.buffer_contains("Recent Activity"));
    assert!(term.buffer_contains("Loading activity log..."));
}

#[test]
fn test_config_frame() {
    let mut state = test_app_state();
    update(&mut state, Message::ShowView(ViewKind::Config));
    let view_id = state.config.as_ref().unwrap().view_id;
    update(
        &mut state,
        Message::ConfigFetched {
            view_id,
            result: Ok(json!({"interval_minutes": 15})),
        },
    );

    let term = draw(&state);
    assert!(term.buffer_contains("Configuration"));
    assert!(term.buffer_contains("\"interval_minutes\": 15"));
    assert!(term.buffer_contains("[e] Edit"));
}

#[test]
fn test_dialog_overlays_view() {
    let mut state = dashboard_state(RunStatus::Running);
    update(&mut state, Message::RequestReset(ResetKind::WithData));

    let term = draw(&state);
    assert!(term.buffer_contains("CLEAR ALL GENERATED DATA"));
    assert!(term.buffer_contains("Confirm"));
}

#[test]
fn test_notice_line() {
    let mut state = dashboard_state(RunStatus::Stopped);
    state.set_notice(Notice::info("Simulator started"));
    assert!(draw(&state).buffer_contains("Simulator started"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut state = dashboard_state(RunStatus::Error);
    update(&mut state, Message::RequestReset(ResetKind::State));
    let mut term = TestTerminal::with_size(20, 6);
    term.draw_with(|frame| view(frame, &state));
}
