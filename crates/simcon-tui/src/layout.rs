//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Header height: top border + title/tabs row + bottom border
const HEADER_HEIGHT: u16 = 3;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, view tabs and connection status
    pub header: Rect,

    /// Active view
    pub body: Rect,

    /// Notice line
    pub notice: Rect,

    /// Key hints
    pub footer: Rect,
}

/// Split the terminal into header, body, notice and footer
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        notice: chunks[2],
        footer: chunks[3],
    }
}

/// Split the activity body into list and details pane.
///
/// Narrow terminals stack the details below the list.
pub fn activity_panes(area: Rect) -> (Rect, Rect) {
    let chunks = if area.width >= 100 {
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).split(area)
    } else {
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).split(area)
    };
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_areas_contiguous() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area);

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.body.y, 3);
        assert_eq!(layout.body.height, 19);
        assert_eq!(layout.notice.y, 22);
        assert_eq!(layout.footer.y, 23);
        assert_eq!(
            layout.header.height + layout.body.height + layout.notice.height + layout.footer.height,
            area.height
        );
    }

    #[test]
    fn test_activity_panes_side_by_side_when_wide() {
        let (list, details) = activity_panes(Rect::new(0, 0, 120, 20));
        assert_eq!(list.y, details.y);
        assert!(details.x > list.x);
    }

    #[test]
    fn test_activity_panes_stacked_when_narrow() {
        let (list, details) = activity_panes(Rect::new(0, 0, 80, 20));
        assert_eq!(list.x, details.x);
        assert!(details.y > list.y);
    }
}
