//! Activity view handlers

use simcon_client::ApiError;
use simcon_core::{ActivityPage, EventType};
use tracing::debug;

use crate::paginator::{next_filter, PageRequest};
use crate::state::{AppState, ViewId};

use super::{UpdateAction, UpdateResult};

fn fetch(view_id: ViewId, request: PageRequest) -> UpdateResult {
    UpdateResult::action(UpdateAction::FetchActivity { view_id, request })
}

pub fn handle_set_filter(state: &mut AppState, filter: Option<EventType>) -> UpdateResult {
    let Some(view) = state.activity.as_mut() else {
        return UpdateResult::none();
    };
    let request = view.window.set_filter(filter);
    view.selected = 0;
    fetch(view.view_id, request)
}

pub fn handle_cycle_filter(state: &mut AppState) -> UpdateResult {
    let next = match state.activity.as_ref() {
        Some(view) => next_filter(view.window.filter.as_ref()),
        None => return UpdateResult::none(),
    };
    handle_set_filter(state, next)
}

pub fn handle_refresh(state: &mut AppState) -> UpdateResult {
    let Some(view) = state.activity.as_mut() else {
        return UpdateResult::none();
    };
    let request = view.window.refresh();
    view.selected = 0;
    fetch(view.view_id, request)
}

pub fn handle_load_more(state: &mut AppState) -> UpdateResult {
    let Some(view) = state.activity.as_mut() else {
        return UpdateResult::none();
    };
    match view.window.load_more() {
        Some(request) => fetch(view.view_id, request),
        None => UpdateResult::none(),
    }
}

pub fn handle_page_loaded(
    state: &mut AppState,
    view_id: ViewId,
    request_id: u64,
    result: Result<ActivityPage, ApiError>,
) -> UpdateResult {
    match state.activity.as_mut() {
        Some(view) if view.view_id == view_id => {
            if view.window.apply_page(request_id, result) {
                view.clamp_selection();
            }
        }
        _ => debug!("Discarding activity page for unmounted view {:?}", view_id),
    }
    UpdateResult::none()
}
