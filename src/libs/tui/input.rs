use crate::libs::tui::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub fn draw_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let theme = Theme::coin_dark();
    let body = if value.is_empty() && !focused {
        Span::styled(placeholder, Style::default().fg(theme.accent_soft))
    } else {
        Span::styled(value, Style::default().fg(theme.fg))
    };
    let line = Line::from(vec![body, Span::raw(if focused { "_" } else { "" })]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {label} "))
        .border_style(Style::default().fg(if focused {
            theme.accent
        } else {
            Color::Gray
        }));
    f.render_widget(Paragraph::new(line).block(block), area);
}
