//! Layout helpers shared by every page.

use ratatui::prelude::*;

/// The four regions of a page.
pub struct PageLayout {
    /// Title header.
    pub header: Rect,
    /// Area handed to the page.
    pub body: Rect,
    /// Key hints.
    pub help_bar: Rect,
    /// Status line.
    pub status_bar: Rect,
}

/// Split the frame into header, body, help and status rows.
pub fn create_page_layout(area: Rect) -> PageLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(1),    // body
            Constraint::Length(3), // help
            Constraint::Length(3), // status
        ])
        .split(area);

    PageLayout {
        header: chunks[0],
        body: chunks[1],
        help_bar: chunks[2],
        status_bar: chunks[3],
    }
}

/// Centered rectangle of `width_percent` and a fixed `height`.
pub fn centered_popup(area: Rect, width_percent: u16, height: u16) -> Rect {
    // Carve out the middle row first.
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    // Then center horizontally inside that row.
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(popup_layout[1])[1]
}
