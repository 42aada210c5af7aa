use crate::app::{Action, App};
use crate::country::CountryFilter;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

/// The sort toggle followed by one button per filter, with their keys.
fn buttons(app: &App) -> Vec<(Action, String)> {
    let mut buttons = vec![(Action::Sort, format!(" {} (s) ", app.sort_order.label()))];
    for filter in CountryFilter::ALL {
        buttons.push((Action::Filter(filter), format!(" {} ({}) ", filter.label(), filter.key())));
    }
    buttons
}

fn block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Controls ")
}

fn widths(buttons: &[(Action, String)]) -> Vec<u16> {
    buttons.iter().map(|(_, label)| super::label_width(label)).collect()
}

/// Button rows needed inside the border at this terminal width.
pub fn rows_needed(app: &App, width: u16) -> u16 {
    // Two border columns plus the one-column inset
    super::flow_rows(&widths(&buttons(app)), width.saturating_sub(3)).max(1)
}

/// Buttons with their labels and on-screen positions.
pub fn layout(app: &App, area: Rect) -> Vec<(Action, String, Rect)> {
    let inner = block().inner(area);
    let inner = Rect::new(
        inner.x.saturating_add(1),
        inner.y,
        inner.width.saturating_sub(1),
        inner.height,
    );
    let buttons = buttons(app);
    let widths = widths(&buttons);

    buttons
        .into_iter()
        .zip(super::flow(&widths, inner))
        .map(|((action, label), rect)| (action, label, rect))
        .collect()
}

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    frame.render_widget(block(), area);

    for (action, label, rect) in layout(app, area) {
        let style = match action {
            Action::Sort => Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().bg(Color::DarkGray).fg(Color::White),
        };
        frame.render_widget(Paragraph::new(label).style(style), rect);
    }
}
