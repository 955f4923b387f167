//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use simcon_app::state::{AppState, ViewKind};

use crate::layout;
use crate::theme::palette;
use crate::widgets;

/// Render the complete UI
///
/// Pure with respect to `state`: everything scroll-related is derived from
/// the view state at draw time.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);

    frame.render_widget(widgets::MainHeader::new(state), areas.header);

    match state.active {
        ViewKind::Dashboard => {
            frame.render_widget(widgets::DashboardPanel::new(state), areas.body);
        }
        ViewKind::Activity => {
            if let Some(view) = &state.activity {
                frame.render_widget(
                    widgets::ActivityPanel::new(view, state.settings.ui.show_timestamps_utc),
                    areas.body,
                );
            }
        }
        ViewKind::Config => {
            if let Some(view) = &state.config {
                frame.render_widget(widgets::ConfigPanel::new(view), areas.body);
            }
        }
    }

    frame.render_widget(widgets::NoticeLine::new(state.notice.as_ref()), areas.notice);
    frame.render_widget(widgets::KeyHints::new(state), areas.footer);

    if let Some(dialog) = &state.dialog {
        frame.render_widget(widgets::ConfirmDialog::new(dialog), area);
    }
}
