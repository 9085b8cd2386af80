//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub tabs: Rect,
    pub rows: Rect,
    pub see_all: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Tabs on top, the active tab's rows, its "see all" link, then the
/// optional status line and the help bar.
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (status, help) = if has_status {
        (Some(chunks[3]), chunks[4])
    } else {
        (None, chunks[3])
    };

    MainLayout {
        tabs: chunks[0],
        rows: chunks[1],
        see_all: chunks[2],
        status,
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_is_optional() {
        let area = Rect::new(0, 0, 80, 24);

        let without = calculate_main_layout(area, false);
        assert!(without.status.is_none());
        assert_eq!(without.help.height, 3);
        assert_eq!(without.rows.height, 24 - 3 - 1 - 3);

        let with = calculate_main_layout(area, true);
        assert_eq!(with.status.map(|s| s.height), Some(1));
        assert_eq!(with.rows.height, 24 - 3 - 1 - 1 - 3);
    }

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let popup = centered_popup(Rect::new(0, 0, 30, 10), 40, 7);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 7);
        assert_eq!(popup.x, 0);
        assert_eq!(popup.y, 1);
    }
}
