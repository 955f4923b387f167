//! Dashboard view: status cards, control panel and generation metrics

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use simcon_app::state::{AppState, DashboardView};

use super::footer::hint;
use crate::format;
use crate::theme::styles;

pub struct DashboardPanel<'a> {
    state: &'a AppState,
}

impl<'a> DashboardPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn render_card(title: &str, value: Line<'_>, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(Span::styled(
            format!(" {} ", title),
            styles::text_secondary(),
        ));
        Paragraph::new(value).block(block).render(area, buf);
    }

    fn render_cards(&self, view: &DashboardView, area: Rect, buf: &mut Buffer) {
        let utc = self.state.settings.ui.show_timestamps_utc;
        let cards = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

        let (icon, label, style) =
            styles::run_status_indicator(view.status.as_ref().map(|s| s.status));
        Self::render_card(
            "Status",
            Line::from(vec![
                Span::styled(icon, style),
                Span::raw(" "),
                Span::styled(label, style),
            ]),
            cards[0],
            buf,
        );

        let last_run = format::date_time(
            view.status.as_ref().and_then(|s| s.last_run.as_ref()),
            utc,
        );
        Self::render_card(
            "Last Run",
            Line::styled(last_run, styles::value_bold()),
            cards[1],
            buf,
        );

        let points = format::optional_number(
            view.status
                .as_ref()
                .and_then(|s| s.points_generated_total),
        );
        Self::render_card(
            "Points Generated",
            Line::styled(points, styles::value_bold()),
            cards[2],
            buf,
        );

        let uptime = view
            .metrics
            .as_ref()
            .map(|m| format::optional_uptime(m.uptime_seconds))
            .unwrap_or_else(|| format::NOT_AVAILABLE.to_string());
        Self::render_card(
            "Uptime",
            Line::styled(uptime, styles::value_bold()),
            cards[3],
            buf,
        );
    }

    fn render_controls(&self, view: &DashboardView, area: Rect, buf: &mut Buffer) {
        let idle = !self.state.lock.is_held();

        let mut row = Vec::new();
        row.extend(hint("s", "Start", idle && view.can_start()));
        row.extend(hint("x", "Stop", idle && view.can_stop()));
        let mut reset_row = Vec::new();
        reset_row.extend(hint("R", "Reset state", idle));
        reset_row.extend(hint("D", "Reset + clear data", idle));

        let mut lines = vec![Line::from(row), Line::from(reset_row), Line::from("")];

        if let Some(kind) = self.state.lock.held_kind() {
            lines.push(Line::from(vec![
                Span::styled("⟳ ", styles::warning_text()),
                Span::styled(format!("{}…", kind.label()), styles::warning_text()),
            ]));
        }

        let block = styles::glass_block(idle).title(" Control Panel ");
        Paragraph::new(lines).block(block).render(area, buf);
    }

    fn render_metrics(&self, view: &DashboardView, area: Rect, buf: &mut Buffer) {
        let row = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<18}", label), styles::text_muted()),
                Span::styled(value, styles::text_primary()),
            ])
        };

        let lines = match &view.metrics {
            Some(m) => vec![
                row("Total Entities:", format::number(m.total_entities)),
                row("Total Points:", format::number(m.total_points_generated)),
                row("Generation Rate:", format::rate_per_min(m.generation_rate_per_min)),
                row("Last Interval:", format::duration_ms(m.last_interval_duration_ms)),
                row("Errors (24h):", format::number(m.error_count_24h)),
            ],
            None => vec![Line::styled(format::NOT_AVAILABLE, styles::text_muted())],
        };

        let block = styles::glass_block(false).title(" Generation Metrics ");
        Paragraph::new(lines).block(block).render(area, buf);
    }

    /// Simulator-reported error and/or refresh failure
    fn problem_lines(&self, view: &DashboardView) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if let Some(message) = view
            .status
            .as_ref()
            .and_then(|s| s.error_message.as_deref())
            .filter(|m| !m.trim().is_empty())
        {
            lines.push(Line::styled("Simulator error", styles::error_text()));
            for text in message.lines() {
                lines.push(Line::styled(text.to_string(), styles::text_primary()));
            }
        }

        if let Some(error) = &view.error {
            let threshold = self.state.settings.polling.degraded_after_failures;
            let heading = if view.is_degraded(threshold) {
                format!(
                    "Connection degraded ({} failed refreshes)",
                    view.consecutive_failures
                )
            } else {
                "Refresh failed".to_string()
            };
            lines.push(Line::styled(heading, styles::warning_text()));
            lines.push(Line::styled(error.clone(), styles::error_text()));
            if let Some(at) = view.last_updated {
                lines.push(Line::styled(
                    format!(
                        "Showing data from {}",
                        format::date_time(Some(&at), self.state.settings.ui.show_timestamps_utc)
                    ),
                    styles::text_muted(),
                ));
            }
        }

        lines
    }
}

impl Widget for DashboardPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(view) = self.state.dashboard.as_ref() else {
            return;
        };

        if view.loading && view.status.is_none() {
            Paragraph::new("Loading...")
                .alignment(Alignment::Center)
                .style(styles::text_secondary())
                .render(area, buf);
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(area);

        self.render_cards(view, chunks[0], buf);

        let middle =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);
        self.render_controls(view, middle[0], buf);
        self.render_metrics(view, middle[1], buf);

        let problems = self.problem_lines(view);
        if !problems.is_empty() && chunks[2].height > 2 {
            let block = styles::modal_block(true).title(" Problems ");
            Paragraph::new(problems)
                .block(block)
                .wrap(Wrap { trim: false })
                .render(chunks[2], buf);
        }
    }
}
