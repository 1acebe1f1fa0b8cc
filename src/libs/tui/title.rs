use crate::libs::tui::theme::Theme;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// One-row bar: app badge, what we are connected to, key help.
pub fn draw_title_bar(f: &mut Frame, area: Rect, app_name: &str, mid: &str, right_help: &str) {
    let theme = Theme::coin_dark();

    let left = Span::styled(
        format!(" {} ", app_name),
        Style::default()
            .fg(theme.bg)
            .bg(theme.coin)
            .add_modifier(Modifier::BOLD),
    );
    let center = Span::styled(format!("  {}  ", mid), Style::default().fg(Color::Gray));
    let right = Span::styled(
        right_help,
        Style::default()
            .fg(theme.accent_soft)
            .add_modifier(Modifier::ITALIC),
    );

    let line = Line::from(vec![left, Span::raw("  "), center, Span::raw("  "), right]);
    let p = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::new().style(Style::default().bg(theme.bg)));
    f.render_widget(p, area);
}
