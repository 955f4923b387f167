//! Application state (Model in TEA pattern)
//!
//! Each view owns its state and exists only while mounted. Mounting creates
//! the view with a fresh [`ViewId`]; unmounting drops it, which also stops
//! the dashboard poller. Results tagged with an old `ViewId` find no view to
//! update and are discarded.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use simcon_core::{Metrics, SimulatorStatus};
use tokio::sync::watch;

use crate::action_lock::ActionLock;
use crate::config::Settings;
use crate::config_editor::ConfigEditor;
use crate::confirm_dialog::ConfirmDialogState;
use crate::paginator::ActivityWindow;

/// The three console views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    #[default]
    Dashboard,
    Activity,
    Config,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Dashboard, ViewKind::Activity, ViewKind::Config];

    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Dashboard => "Dashboard",
            ViewKind::Activity => "Activity",
            ViewKind::Config => "Config",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ViewKind::Dashboard => 0,
            ViewKind::Activity => 1,
            ViewKind::Config => 2,
        }
    }

    pub fn next(&self) -> ViewKind {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> ViewKind {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Identity of one mount of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Status and metrics fetched together
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub status: SimulatorStatus,
    pub metrics: Metrics,
}

/// Stops the dashboard poller when dropped
#[derive(Debug)]
pub struct PollerHandle {
    shutdown_tx: watch::Sender<bool>,
}

impl PollerHandle {
    /// Create the handle and the receiver to hand to the polling task.
    pub fn channel() -> (Self, watch::Receiver<bool>) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        (Self { shutdown_tx }, shutdown_rx)
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

#[derive(Debug)]
pub struct DashboardView {
    pub view_id: ViewId,
    pub status: Option<SimulatorStatus>,
    pub metrics: Option<Metrics>,
    /// True until the first snapshot (or failure) arrives
    pub loading: bool,
    pub error: Option<String>,
    pub consecutive_failures: u32,
    pub last_updated: Option<DateTime<Utc>>,
    poller: Option<PollerHandle>,
}

impl DashboardView {
    pub fn new(view_id: ViewId) -> Self {
        Self {
            view_id,
            status: None,
            metrics: None,
            loading: true,
            error: None,
            consecutive_failures: 0,
            last_updated: None,
            poller: None,
        }
    }

    pub fn attach_poller(&mut self, handle: PollerHandle) {
        self.poller = Some(handle);
    }

    pub fn has_poller(&self) -> bool {
        self.poller.is_some()
    }

    pub fn apply_snapshot(&mut self, result: Result<Snapshot, simcon_client::ApiError>) {
        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.status = Some(snapshot.status);
                self.metrics = Some(snapshot.metrics);
                self.error = None;
                self.consecutive_failures = 0;
                self.last_updated = Some(Utc::now());
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.status.is_running())
    }

    /// Start is offered unless the simulator is known to be running.
    pub fn can_start(&self) -> bool {
        !self.is_running()
    }

    /// Stop is offered only while the simulator is known to be running.
    pub fn can_stop(&self) -> bool {
        self.is_running()
    }

    pub fn is_degraded(&self, threshold: u32) -> bool {
        threshold > 0 && self.consecutive_failures >= threshold
    }
}

#[derive(Debug)]
pub struct ActivityView {
    pub view_id: ViewId,
    pub window: ActivityWindow,
    /// Index of the highlighted event
    pub selected: usize,
}

impl ActivityView {
    pub fn new(view_id: ViewId, page_size: u32) -> Self {
        Self {
            view_id,
            window: ActivityWindow::new(page_size),
            selected: 0,
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.window.events.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self
            .selected
            .min(self.window.events.len().saturating_sub(1));
    }

    pub fn selected_event(&self) -> Option<&simcon_core::ActivityEvent> {
        self.window.events.get(self.selected)
    }
}

#[derive(Debug)]
pub struct ConfigView {
    pub view_id: ViewId,
    pub editor: ConfigEditor,
}

impl ConfigView {
    pub fn new(view_id: ViewId) -> Self {
        Self {
            view_id,
            editor: ConfigEditor::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient status line message
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub created: Instant,
}

/// How long an info notice stays visible. Errors stay until replaced or
/// dismissed.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Info,
            created: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Error,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.level == NoticeLevel::Info && now.saturating_duration_since(self.created) >= NOTICE_TTL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,

    /// Control API base URL, for display
    pub base_url: String,

    pub phase: AppPhase,

    /// View currently shown
    pub active: ViewKind,

    pub dashboard: Option<DashboardView>,
    pub activity: Option<ActivityView>,
    pub config: Option<ConfigView>,

    /// Guard shared by start, stop, reset and config save
    pub lock: ActionLock,

    pub dialog: Option<ConfirmDialogState>,

    pub notice: Option<Notice>,

    next_view_id: u64,
}

impl AppState {
    pub fn new(settings: Settings, base_url: impl Into<String>) -> Self {
        Self {
            settings,
            base_url: base_url.into(),
            phase: AppPhase::Running,
            active: ViewKind::Dashboard,
            dashboard: None,
            activity: None,
            config: None,
            lock: ActionLock::new(),
            dialog: None,
            notice: None,
            next_view_id: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn next_view_id(&mut self) -> ViewId {
        self.next_view_id += 1;
        ViewId(self.next_view_id)
    }

    /// Drop every mounted view (stopping the poller).
    pub fn unmount_all(&mut self) {
        self.dashboard = None;
        self.activity = None;
        self.config = None;
    }

    /// Whether any view is currently mounted
    pub fn has_mounted_view(&self) -> bool {
        self.dashboard.is_some() || self.activity.is_some() || self.config.is_some()
    }

    /// Whether keys go to the config text buffer
    pub fn is_editing_config(&self) -> bool {
        self.config.as_ref().is_some_and(|c| c.editor.is_editing())
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcon_client::ApiError;
    use simcon_core::RunStatus;

    fn snapshot(status: RunStatus) -> Snapshot {
        Snapshot {
            status: SimulatorStatus {
                status,
                ..Default::default()
            },
            metrics: Metrics::default(),
        }
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(ViewKind::Dashboard.next(), ViewKind::Activity);
        assert_eq!(ViewKind::Config.next(), ViewKind::Dashboard);
        assert_eq!(ViewKind::Dashboard.previous(), ViewKind::Config);
    }

    #[test]
    fn test_view_ids_are_unique() {
        let mut state = AppState::new(Settings::default(), "http://localhost:8080");
        let a = state.next_view_id();
        let b = state.next_view_id();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_dropping_poller_handle_signals_shutdown() {
        let (handle, rx) = PollerHandle::channel();
        assert!(!*rx.borrow());
        drop(handle);
        assert!(*rx.borrow());
    }

    #[test]
    fn test_dashboard_failure_keeps_last_snapshot() {
        let mut view = DashboardView::new(ViewId(1));
        view.apply_snapshot(Ok(snapshot(RunStatus::Running)));
        assert!(view.is_running());

        view.apply_snapshot(Err(ApiError::transport("Unable to reach the control API")));
        view.apply_snapshot(Err(ApiError::transport("Unable to reach the control API")));
        assert!(view.is_running());
        assert_eq!(view.consecutive_failures, 2);
        assert!(!view.is_degraded(3));

        view.apply_snapshot(Err(ApiError::transport("Unable to reach the control API")));
        assert!(view.is_degraded(3));

        view.apply_snapshot(Ok(snapshot(RunStatus::Stopped)));
        assert_eq!(view.consecutive_failures, 0);
        assert!(view.error.is_none());
        assert!(!view.is_degraded(3));
    }

    #[test]
    fn test_start_stop_availability() {
        let mut view = DashboardView::new(ViewId(1));
        assert!(view.can_start());
        assert!(!view.can_stop());

        view.apply_snapshot(Ok(snapshot(RunStatus::Running)));
        assert!(!view.can_start());
        assert!(view.can_stop());
    }

    #[test]
    fn test_notice_expiry() {
        let info = Notice::info("saved");
        let error = Notice::error("db locked");
        let later = info.created + NOTICE_TTL;
        assert!(info.is_expired(later));
        assert!(!error.is_expired(later + NOTICE_TTL));
    }
}
