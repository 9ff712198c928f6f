use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{timestamp, Book};

/// Build the textual payload for one book card: title on top, the descriptive
/// fields underneath, and the read badge on its own line so the color block
/// stays easy to scan in a long list.
pub(crate) fn book_card_lines(book: &Book, selected: bool) -> Vec<Line<'static>> {
    let title_style = if selected {
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    vec![
        Line::from(Span::styled(book.title.clone(), title_style)),
        Line::from(format!(
            "  by {} ({}) - {}",
            book.author, book.publication_year, book.genre
        )),
        Line::from(format!(
            "  added {}",
            book.date_added.format(timestamp::FORMAT)
        )),
        Line::from(vec![Span::raw("  "), read_badge(book)]),
    ]
}

/// Colored Read/Unread badge used on cards in both the library and search
/// views.
pub(crate) fn read_badge(book: &Book) -> Span<'static> {
    let color = if book.read_status {
        Color::Green
    } else {
        Color::Red
    };
    Span::styled(
        format!("[{}]", book.status_label()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
