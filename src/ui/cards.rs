use crate::app::{App, CardViewport};
use crate::country::Country;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const CARD_WIDTH: u16 = 36;
/// Three lines plus the border.
pub const CARD_HEIGHT: u16 = 5;

/// Footer such as " 57-112 of 120 ", or " 0-0 of N " for an empty page.
fn page_info(app: &App) -> String {
    let window = app.page_window();
    let total = app.visible_items.len();
    if window.is_empty() {
        return format!(" 0-0 of {total} ");
    }
    let start = app.current_page.saturating_sub(1).saturating_mul(app.items_per_page);
    format!(" {}-{} of {} ", start + 1, start + window.len(), total)
}

fn block(app: &App) -> Block<'static> {
    let page_info = page_info(app);

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Countries, page {} ", app.current_page))
        .title_bottom(Line::from(page_info).alignment(Alignment::Right))
}

/// How many cards fit in the grid area.
pub fn viewport(area: Rect) -> CardViewport {
    viewport_of_inner(Block::default().borders(Borders::ALL).inner(area))
}

/// Cards drawn for the current scroll position, with their grid cells.
fn placed<'a>(app: &'a App, inner: Rect) -> Vec<(&'a Country, Rect)> {
    let CardViewport { columns, rows } = viewport_of_inner(inner);
    let card_width = inner.width / u16::try_from(columns).unwrap_or(1).max(1);
    let skip = app.card_scroll.saturating_mul(columns);

    app.page_window()
        .iter()
        .skip(skip)
        .take(columns * rows)
        .enumerate()
        .map(|(i, country)| {
            let col = u16::try_from(i % columns).unwrap_or(0);
            let row = u16::try_from(i / columns).unwrap_or(0);
            let rect = Rect::new(
                inner.x + col * card_width,
                inner.y + row * CARD_HEIGHT,
                card_width,
                CARD_HEIGHT,
            );
            (country, rect)
        })
        .collect()
}

fn viewport_of_inner(inner: Rect) -> CardViewport {
    CardViewport {
        columns: usize::from((inner.width / CARD_WIDTH).max(1)),
        rows: usize::from(inner.height / CARD_HEIGHT),
    }
}

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = block(app);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.loading {
        let loading = Paragraph::new(" Loading countries...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, inner);
        return;
    }

    for (country, rect) in placed(app, inner) {
        render_card(country, frame, rect);
    }
}

fn render_card(country: &Country, frame: &mut Frame, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let value_width = |prefix: &str| (area.width as usize).saturating_sub(prefix.width() + 2);

    let lines = vec![
        Line::from(vec![
            Span::styled("Country Name: ", label),
            Span::styled(
                truncate_str(&country.name, value_width("Country Name: ")),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Region: ", label),
            Span::styled(
                truncate_str(&country.region, value_width("Region: ")),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Area Size: ", label),
            Span::styled(
                truncate_str(&country.area_label(), value_width("Area Size: ")),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(card, area);
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}
