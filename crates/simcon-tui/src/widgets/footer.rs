//! Key hint footer and notice line
//!
//! Hints for bindings the update function would currently reject are
//! rendered dimmed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use simcon_app::config_editor::EditorMode;
use simcon_app::state::{AppState, Notice, NoticeLevel, ViewKind};

use crate::theme::styles;

/// `[k] Label` with the key dimmed when unavailable
pub fn hint(key: &'static str, label: &'static str, enabled: bool) -> Vec<Span<'static>> {
    let (key_style, label_style) = if enabled {
        (styles::keybinding(), styles::text_muted())
    } else {
        (styles::keybinding_disabled(), styles::keybinding_disabled())
    };
    vec![
        Span::styled("[", label_style),
        Span::styled(key, key_style),
        Span::styled(format!("] {}  ", label), label_style),
    ]
}

/// Bottom row of key hints for the active view and mode
pub struct KeyHints<'a> {
    state: &'a AppState,
}

impl<'a> KeyHints<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> Vec<Span<'static>> {
        let state = self.state;
        let idle = !state.lock.is_held();
        let mut spans = vec![Span::raw(" ")];

        if state.dialog.is_some() {
            spans.extend(hint("←→", "Choose", true));
            spans.extend(hint("Enter", "Confirm", true));
            spans.extend(hint("Esc", "Cancel", true));
            return spans;
        }

        match state.active {
            ViewKind::Dashboard => {
                let (can_start, can_stop) = state
                    .dashboard
                    .as_ref()
                    .map(|v| (v.can_start(), v.can_stop()))
                    .unwrap_or((false, false));
                spans.extend(hint("s", "Start", idle && can_start));
                spans.extend(hint("x", "Stop", idle && can_stop));
                spans.extend(hint("R", "Reset", idle));
                spans.extend(hint("D", "Reset+clear", idle));
                spans.extend(hint("r", "Refresh", true));
            }
            ViewKind::Activity => {
                let has_more = state
                    .activity
                    .as_ref()
                    .is_some_and(|v| v.window.has_more && !v.window.is_loading());
                spans.extend(hint("f", "Filter", true));
                spans.extend(hint("F", "All", true));
                spans.extend(hint("m", "More", has_more));
                spans.extend(hint("r", "Refresh", true));
                spans.extend(hint("↑↓", "Select", true));
            }
            ViewKind::Config => {
                let mode = state.config.as_ref().map(|v| v.editor.mode());
                match mode {
                    Some(EditorMode::Editing) => {
                        spans.extend(hint("^S", "Save", idle));
                        spans.extend(hint("^R", "Revert", true));
                        spans.extend(hint("Esc", "Cancel", true));
                        return spans;
                    }
                    Some(EditorMode::Saving) => {
                        spans.extend(hint("^S", "Save", false));
                        return spans;
                    }
                    _ => {
                        let loaded = state
                            .config
                            .as_ref()
                            .is_some_and(|v| v.editor.saved().is_some());
                        spans.extend(hint("e", "Edit", loaded));
                        spans.extend(hint("r", "Reload", true));
                    }
                }
            }
        }

        spans.extend(hint("Tab", "View", true));
        spans.extend(hint("q", "Quit", true));
        spans
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(self.hints())).render(area, buf);
    }
}

/// One-line transient notice
pub struct NoticeLine<'a> {
    notice: Option<&'a Notice>,
}

impl<'a> NoticeLine<'a> {
    pub fn new(notice: Option<&'a Notice>) -> Self {
        Self { notice }
    }
}

impl Widget for NoticeLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(notice) = self.notice else {
            return;
        };
        let line = match notice.level {
            NoticeLevel::Info => Line::from(vec![
                Span::styled(" ✓ ", styles::accent_bold()),
                Span::styled(notice.text.clone(), styles::text_primary()),
            ]),
            NoticeLevel::Error => Line::from(vec![
                Span::styled(" ✗ ", styles::error_text()),
                Span::styled(notice.text.clone(), styles::error_text()),
                Span::styled("  (Esc to dismiss)", styles::text_muted()),
            ]),
        };
        Paragraph::new(line).render(area, buf);
    }
}
