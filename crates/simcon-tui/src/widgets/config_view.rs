//! Config view: read-only JSON, or the editor buffer with a cursor

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use simcon_app::config_editor::{pretty, EditorMode};
use simcon_app::state::ConfigView;

use crate::theme::styles;

pub struct ConfigPanel<'a> {
    view: &'a ConfigView,
}

impl<'a> ConfigPanel<'a> {
    pub fn new(view: &'a ConfigView) -> Self {
        Self { view }
    }

    fn mode_label(&self) -> Span<'static> {
        match self.view.editor.mode() {
            EditorMode::Viewing => Span::styled(" viewing ", styles::text_muted()),
            EditorMode::Editing => Span::styled(" editing ", styles::warning_text()),
            EditorMode::Saving => Span::styled(" saving... ", styles::accent_bold()),
        }
    }

    fn viewing_lines(&self) -> Vec<Line<'static>> {
        let editor = &self.view.editor;
        match editor.saved() {
            Some(saved) => pretty(saved)
                .lines()
                .map(|l| Line::styled(l.to_string(), styles::text_primary()))
                .collect(),
            None if editor.loading => vec![Line::styled("Loading...", styles::text_secondary())],
            None => vec![Line::styled("No configuration loaded", styles::text_muted())],
        }
    }

    /// Buffer lines, scrolled so the cursor row is visible
    fn editor_lines(&self, height: usize) -> Vec<Line<'static>> {
        let buffer = self.view.editor.buffer();
        let (cursor_row, cursor_col) = buffer.cursor();
        let show_cursor = self.view.editor.mode() == EditorMode::Editing;
        let start = if height == 0 || cursor_row < height {
            0
        } else {
            cursor_row + 1 - height
        };

        buffer
            .lines()
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .map(|(row, text)| {
                if !show_cursor || row != cursor_row {
                    return Line::styled(text.clone(), styles::text_primary());
                }
                let chars: Vec<char> = text.chars().collect();
                let before: String = chars[..cursor_col.min(chars.len())].iter().collect();
                let at = chars.get(cursor_col).copied().unwrap_or(' ');
                let after: String = chars.iter().skip(cursor_col + 1).collect();
                Line::from(vec![
                    Span::styled(before, styles::text_primary()),
                    Span::styled(
                        at.to_string(),
                        styles::text_primary().add_modifier(Modifier::REVERSED),
                    ),
                    Span::styled(after, styles::text_primary()),
                ])
            })
            .collect()
    }
}

impl Widget for ConfigPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let editor = &self.view.editor;
        let error_height = if editor.error.is_some() { 3 } else { 0 };
        let chunks =
            Layout::vertical([Constraint::Min(3), Constraint::Length(error_height)]).split(area);

        let title = Line::from(vec![
            Span::styled(" Configuration ", styles::accent_bold()),
            self.mode_label(),
        ]);
        let block = styles::glass_block(editor.mode() != EditorMode::Viewing).title(title);
        let inner = block.inner(chunks[0]);
        block.render(chunks[0], buf);

        let lines = match editor.mode() {
            EditorMode::Viewing => self.viewing_lines(),
            EditorMode::Editing | EditorMode::Saving => self.editor_lines(inner.height as usize),
        };
        Paragraph::new(lines).render(inner, buf);

        if let Some(error) = &editor.error {
            Paragraph::new(Line::styled(error.clone(), styles::error_text()))
                .block(styles::modal_block(true).title(" Error "))
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        }
    }
}
