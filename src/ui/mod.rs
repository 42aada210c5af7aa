mod cards;
mod controls;
mod help;
mod pages;

use crate::app::{Action, App, CardViewport};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Horizontal space between two buttons.
const BUTTON_GAP: u16 = 1;

/// Screen areas of the root view.
pub struct Regions {
    pub header: Rect,
    pub controls: Rect,
    pub pages: Rect,
    pub cards: Rect,
    pub status: Rect,
}

/// Split the screen. Shared by rendering and mouse hit-testing so both
/// always agree on where a button is.
pub fn regions(app: &App, area: Rect) -> Regions {
    let control_rows = controls::rows_needed(app, area.width);
    let page_rows = pages::rows_needed(app, area.width);

    // Layout: header(3) + controls(n + border) + pages(n) + cards(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(control_rows.saturating_add(2)),
            Constraint::Length(page_rows),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    Regions {
        header: chunks[0],
        controls: chunks[1],
        pages: chunks[2],
        cards: chunks[3],
        status: chunks[4],
    }
}

/// Top-level render: heading, then the directory.
pub fn render(app: &App, frame: &mut Frame) {
    let regions = regions(app, frame.area());

    // ── Header ──
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            " Country Directory",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" Country List", Style::default().fg(Color::White)),
            Span::styled(
                format!("   [{} of {} countries]", app.visible_items.len(), app.all_items.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ])
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, regions.header);

    controls::render(app, frame, regions.controls);
    pages::render(app, frame, regions.pages);
    cards::render(app, frame, regions.cards);
    render_status(app, frame, regions.status);

    if app.show_help {
        help::render(frame);
    }
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" ←→", key),
        Span::raw(" Page  "),
        Span::styled("↑↓", key),
        Span::raw(" Scroll  "),
        Span::styled("?", key),
        Span::raw(" Help  "),
        Span::styled("q", key),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

/// Which control, if any, sits under a mouse click.
pub fn hit_test(app: &App, area: Rect, column: u16, row: u16) -> Option<Action> {
    if app.show_help {
        return None;
    }
    let regions = regions(app, area);
    let position = Position::new(column, row);

    controls::layout(app, regions.controls)
        .into_iter()
        .map(|(action, _, rect)| (action, rect))
        .chain(
            pages::layout(app, regions.pages)
                .into_iter()
                .map(|(button, rect)| (button.action(), rect)),
        )
        .find(|(_, rect)| rect.contains(position))
        .map(|(action, _)| action)
}

/// Card grid geometry for a terminal of the given size.
pub fn card_viewport(app: &App, area: Rect) -> CardViewport {
    cards::viewport(regions(app, area).cards)
}

/// Display width of a button label, including padding.
fn label_width(label: &str) -> u16 {
    u16::try_from(label.width()).unwrap_or(u16::MAX)
}

/// Column and row offsets of each button when laid out left to right in
/// `width` columns, wrapping onto the next row when one would overflow.
fn flow_offsets(widths: &[u16], width: u16) -> Vec<(u16, u16, u16)> {
    let mut offsets = Vec::with_capacity(widths.len());
    let (mut x, mut y) = (0u16, 0u16);
    for &w in widths {
        let w = w.min(width);
        if x > 0 && x.saturating_add(w) > width {
            x = 0;
            y = y.saturating_add(1);
        }
        offsets.push((x, y, w));
        x = x.saturating_add(w).saturating_add(BUTTON_GAP);
    }
    offsets
}

/// Place buttons inside `area`. Buttons below the area are dropped.
fn flow(widths: &[u16], area: Rect) -> Vec<Rect> {
    flow_offsets(widths, area.width)
        .into_iter()
        .take_while(|&(_, y, _)| y < area.height)
        .map(|(x, y, w)| Rect::new(area.x + x, area.y + y, w, 1))
        .collect()
}

/// Rows [`flow`] needs to fit every button in `width` columns.
fn flow_rows(widths: &[u16], width: u16) -> u16 {
    flow_offsets(widths, width)
        .last()
        .map_or(0, |&(_, y, _)| y.saturating_add(1))
}
