//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames are rendered into ratatui's `TestBackend` and
//! asserted on as plain text.

use chrono::{TimeZone, Utc};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};
use serde_json::json;
use simcon_app::config::Settings;
use simcon_app::state::{AppState, DashboardView, Snapshot};
use simcon_core::{ActivityEvent, EventType, Metrics, RunStatus, SimulatorStatus};

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Compact terminal for responsive layouts
pub const COMPACT_WIDTH: u16 = 40;
pub const COMPACT_HEIGHT: u16 = 12;

/// Wrapper around a `TestBackend` terminal
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// All content as a string (for debugging failed assertions)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, y)].symbol());
        }
        result.push('\n');
    }
    result
}

/// App state with default settings and no mounted view
pub fn test_app_state() -> AppState {
    AppState::new(Settings::default(), "http://localhost:8080")
}

/// App state with a mounted dashboard that received one snapshot
pub fn dashboard_state(status: RunStatus) -> AppState {
    let mut state = test_app_state();
    let mut view = DashboardView::new(state.next_view_id());
    view.apply_snapshot(Ok(Snapshot {
        status: SimulatorStatus {
            status,
            last_run: None,
            points_generated_total: Some(1200),
            error_message: None,
        },
        metrics: Metrics {
            total_points_generated: 1200,
            total_entities: 42,
            generation_rate_per_min: None,
            last_interval_duration_ms: Some(250.0),
            error_count_24h: 0,
            uptime_seconds: 3725.0,
        },
    }));
    state.dashboard = Some(view);
    state
}

/// `n` generation events, newest first, ids `n..=1`
pub fn sample_events(n: usize) -> Vec<ActivityEvent> {
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    (0..n)
        .map(|i| ActivityEvent {
            id: (n - i) as i64,
            timestamp: base - chrono::Duration::minutes(i as i64),
            event_type: EventType::Generation,
            message: format!("Generated batch {}", n - i),
            details: Some(json!({"points": i})),
        })
        .collect()
}
