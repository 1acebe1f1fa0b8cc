use crate::libs::tui::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn draw_button(f: &mut Frame, area: Rect, label: &str, focused: bool, busy: bool) {
    let theme = Theme::coin_dark();
    let style = match (focused, busy) {
        (_, true) => Style::default().fg(theme.accent_soft),
        (true, false) => Style::default()
            .fg(theme.bg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
        (false, false) => Style::default().fg(theme.fg),
    };
    f.render_widget(Clear, area);
    let p = Paragraph::new(Line::from(Span::styled(format!(" {label} "), style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(
            Style::default().fg(if focused { theme.accent } else { Color::Gray }),
        ));
    f.render_widget(p, area);
}
