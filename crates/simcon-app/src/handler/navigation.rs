//! View mount/unmount

use tracing::debug;

use crate::state::{ActivityView, AppState, ConfigView, DashboardView, PollerHandle, ViewKind};

use super::{UpdateAction, UpdateResult};

/// Mount `kind`, dropping whichever view was mounted before.
///
/// Re-selecting the mounted view is a no-op.
pub fn show_view(state: &mut AppState, kind: ViewKind) -> UpdateResult {
    let mounted = match kind {
        ViewKind::Dashboard => state.dashboard.is_some(),
        ViewKind::Activity => state.activity.is_some(),
        ViewKind::Config => state.config.is_some(),
    };
    if state.active == kind && mounted {
        return UpdateResult::none();
    }

    state.unmount_all();
    state.dialog = None;
    state.active = kind;
    let view_id = state.next_view_id();
    debug!("Mounting {} view ({:?})", kind.title(), view_id);

    match kind {
        ViewKind::Dashboard => {
            let mut view = DashboardView::new(view_id);
            let (handle, shutdown_rx) = PollerHandle::channel();
            view.attach_poller(handle);
            state.dashboard = Some(view);
            UpdateResult::action(UpdateAction::StartPoller {
                view_id,
                shutdown_rx,
            })
        }
        ViewKind::Activity => {
            let mut view = ActivityView::new(view_id, state.settings.activity.page_size);
            let request = view.window.set_filter(None);
            state.activity = Some(view);
            UpdateResult::action(UpdateAction::FetchActivity { view_id, request })
        }
        ViewKind::Config => {
            state.config = Some(ConfigView::new(view_id));
            UpdateResult::action(UpdateAction::FetchConfig {
                view_id,
                delay: None,
            })
        }
    }
}
