//! Activity view: filtered event list with a details pane

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use simcon_app::state::ActivityView;
use simcon_core::ActivityEvent;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::format;
use crate::layout;
use crate::theme::styles;

/// Width reserved for the event type badge
const BADGE_WIDTH: usize = 14;

pub struct ActivityPanel<'a> {
    view: &'a ActivityView,
    utc: bool,
}

impl<'a> ActivityPanel<'a> {
    pub fn new(view: &'a ActivityView, utc: bool) -> Self {
        Self { view, utc }
    }

    fn title(&self) -> Line<'static> {
        let window = &self.view.window;
        let count = window.events.len();
        let mut spans = vec![Span::styled(" Recent Activity ", styles::accent_bold())];
        if let Some(filter) = &window.filter {
            spans.push(Span::styled(
                format!("({}) ", filter.label()),
                styles::text_secondary(),
            ));
        }
        spans.push(Span::styled(
            format!("· {} event{} shown ", count, if count == 1 { "" } else { "s" }),
            styles::text_muted(),
        ));
        Line::from(spans)
    }

    fn event_line(&self, event: &ActivityEvent, width: usize, selected: bool) -> Line<'static> {
        let badge = format!("{:<width$}", event.event_type.label(), width = BADGE_WIDTH);
        let time = format::event_time(&event.timestamp, self.utc);
        let used = BADGE_WIDTH + time.width() + 2;
        let message = truncate(&event.message, width.saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(badge, styles::event_type_style(&event.event_type)),
            Span::styled(time, styles::text_muted()),
            Span::raw("  "),
            Span::styled(message, styles::text_primary()),
        ]);
        if selected {
            line.style(styles::selected_row())
        } else {
            line
        }
    }

    /// Trailing status row under the list
    fn status_line(&self) -> Option<Line<'static>> {
        let window = &self.view.window;
        if let Some(error) = &window.error {
            Some(Line::styled(error.clone(), styles::error_text()))
        } else if window.is_loading() && !window.is_reloading() {
            Some(Line::styled("Loading more...", styles::text_secondary()))
        } else if window.has_more {
            Some(Line::styled("Press m to load more", styles::text_muted()))
        } else {
            None
        }
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(self.title());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let window = &self.view.window;
        if window.events.is_empty() {
            let text = if window.is_reloading() {
                "Loading activity log..."
            } else if window.error.is_some() {
                ""
            } else {
                "No events found"
            };
            let mut lines = vec![Line::styled(text, styles::text_muted())];
            lines.extend(self.status_line());
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let status = self.status_line();
        let rows = inner.height as usize - usize::from(status.is_some() && inner.height > 1);
        let selected = self.view.selected;
        let start = if selected < rows { 0 } else { selected + 1 - rows };

        let width = inner.width as usize;
        let mut lines: Vec<Line> = window
            .events
            .iter()
            .enumerate()
            .skip(start)
            .take(rows)
            .map(|(i, event)| self.event_line(event, width, i == selected))
            .collect();
        if rows < inner.height as usize {
            lines.extend(status);
        }
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Details ");
        let lines = match self.view.selected_event() {
            None => vec![Line::styled("No event selected", styles::text_muted())],
            Some(event) => {
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled(
                            event.event_type.label(),
                            styles::event_type_style(&event.event_type),
                        ),
                        Span::styled(format!("  #{}", event.id), styles::text_muted()),
                    ]),
                    Line::styled(
                        format::date_time(Some(&event.timestamp), self.utc),
                        styles::text_secondary(),
                    ),
                    Line::styled(event.message.clone(), styles::text_primary()),
                    Line::from(""),
                ];
                if event.has_details() {
                    let details = event
                        .details
                        .as_ref()
                        .map(format::details)
                        .unwrap_or_default();
                    lines.extend(
                        details
                            .lines()
                            .map(|l| Line::styled(l.to_string(), styles::text_secondary())),
                    );
                } else {
                    lines.push(Line::styled("No details", styles::text_muted()));
                }
                lines
            }
        };
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

impl Widget for ActivityPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (list, details) = layout::activity_panes(area);
        self.render_list(list, buf);
        self.render_details(details, buf);
    }
}

/// Truncate to `max` display columns, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_events, test_app_state, TestTerminal};
    use simcon_app::paginator::ActivityWindow;
    use simcon_core::{ActivityPage, EventType};

    fn loaded_view(n: usize, filter: Option<EventType>) -> ActivityView {
        let mut view = ActivityView::new(test_app_state().next_view_id(), 50);
        let request = view.window.set_filter(filter);
        view.window.apply_page(
            request.request_id,
            Ok(ActivityPage {
                events: sample_events(n),
                limit: 50,
                offset: 0,
                count: n as u32,
            }),
        );
        view
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_empty_window_message() {
        let view = loaded_view(0, None);
        let mut term = TestTerminal::with_size(120, 20);
        term.render_widget(ActivityPanel::new(&view, true), term.area());
        assert!(term.buffer_contains("No events found"));
        assert!(term.buffer_contains("0 events shown"));
    }

    #[test]
    fn test_filter_label_and_count() {
        let view = loaded_view(3, Some(EventType::GapFill));
        let mut term = TestTerminal::with_size(120, 20);
        term.render_widget(ActivityPanel::new(&view, true), term.area());
        assert!(term.buffer_contains("(gap fill)"));
        assert!(term.buffer_contains("3 events shown"));
    }

    #[test]
    fn test_details_pane_shows_selected_event() {
        let mut view = loaded_view(3, None);
        view.select_next();
        let mut term = TestTerminal::with_size(120, 20);
        term.render_widget(ActivityPanel::new(&view, true), term.area());
        assert!(term.buffer_contains("#2"));
        assert!(term.buffer_contains("\"points\": 1"));
    }

    #[test]
    fn test_full_page_offers_more() {
        let view = loaded_view(50, None);
        let mut term = TestTerminal::with_size(120, 30);
        term.render_widget(ActivityPanel::new(&view, true), term.area());
        assert!(term.buffer_contains("Press m to load more"));
    }

    #[test]
    fn test_reloading_placeholder() {
        let mut window = ActivityWindow::new(50);
        window.set_filter(None);
        let mut view = loaded_view(0, None);
        view.window = window;
        let mut term = TestTerminal::with_size(120, 20);
        term.render_widget(ActivityPanel::new(&view, true), term.area());
        assert!(term.buffer_contains("Loading activity log..."));
    }
}
