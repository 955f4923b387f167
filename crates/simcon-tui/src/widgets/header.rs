//! Header bar: title, view tabs and connection status

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use simcon_app::state::{AppState, ViewKind};

use crate::theme::{palette, styles};

/// Main header showing the app title, the view tabs and the target API
pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn tabs(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, kind) in ViewKind::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", styles::text_muted()));
            }
            let label = format!("{} {}", kind.index() + 1, kind.title());
            let style = if *kind == self.state.active {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(format!(" {} ", label), style));
        }
        spans
    }

    /// Dot colored by the last known run status, plus the base URL
    fn connection(&self) -> Line<'static> {
        let (icon, style) = match &self.state.dashboard {
            Some(view) if view.error.is_some() => ("●", Style::default().fg(palette::STATUS_RED)),
            Some(view) => {
                let (icon, _, style) =
                    styles::run_status_indicator(view.status.as_ref().map(|s| s.status));
                (icon, style)
            }
            None => ("○", styles::text_muted()),
        };
        Line::from(vec![
            Span::styled(icon, style),
            Span::raw(" "),
            Span::styled(self.state.base_url.clone(), styles::text_secondary()),
            Span::raw(" "),
        ])
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut left = vec![
            Span::raw(" "),
            Span::styled("Simulator Console", styles::accent_bold()),
            Span::raw("  "),
        ];
        left.extend(self.tabs());
        let left_line = Line::from(left);
        let left_width = left_line.width() as u16;
        buf.set_line(inner.x, inner.y, &left_line, inner.width);

        // Right-aligned connection info, only when it does not collide
        let right_line = self.connection();
        let right_width = right_line.width() as u16;
        if left_width + right_width + 2 <= inner.width {
            let x = inner.x + inner.width - right_width;
            buf.set_line(x, inner.y, &right_line, right_width);
        }
    }
}
