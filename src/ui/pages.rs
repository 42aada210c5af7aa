use crate::app::App;
use crate::pagination::PageButton;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};

/// Page buttons start one column in, aligned with the controls.
fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y,
        area.width.saturating_sub(1),
        area.height,
    )
}

fn widths(buttons: &[PageButton]) -> Vec<u16> {
    buttons.iter().map(|b| super::label_width(&b.label())).collect()
}

/// Rows the selector occupies at this width. Always at least one so the
/// layout does not jump when the list empties.
pub fn rows_needed(app: &App, width: u16) -> u16 {
    let buttons = app.page_selector().buttons();
    super::flow_rows(&widths(&buttons), width.saturating_sub(1)).max(1)
}

/// Page buttons and their on-screen positions.
pub fn layout(app: &App, area: Rect) -> Vec<(PageButton, Rect)> {
    let buttons = app.page_selector().buttons();
    let rects = super::flow(&widths(&buttons), inset(area));
    buttons.into_iter().zip(rects).collect()
}

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    for (button, rect) in layout(app, area) {
        let style = if button.active {
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        frame.render_widget(Paragraph::new(button.label()).style(style), rect);
    }
}
