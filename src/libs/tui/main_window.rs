use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

pub fn draw_main_window(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(Color::Black).fg(Color::White))
        .padding(Padding::uniform(1));
    f.render_widget(block, area);
}

pub fn draw_too_small(f: &mut Frame, area: Rect, min_height: u16) {
    let msg = format!(
        "Terminal too small to render UI.\nNeed at least {min_height} rows, have {}.",
        area.height
    );
    let p = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(p, centered_rect(80, 50, area));
}

/// Rect of `percent_x` x `percent_y` centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(mid);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let c = centered_rect(50, 50, outer);
        assert_eq!(c.width, 50);
        assert_eq!(c.height, 20);
        assert_eq!(c.x, 25);
        assert_eq!(c.y, 10);
    }
}
