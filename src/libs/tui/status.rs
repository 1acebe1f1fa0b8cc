use crate::app::state::{Status, StatusKind};
use crate::libs::tui::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_status(f: &mut Frame, area: Rect, status: &Status) {
    let theme = Theme::coin_dark();
    let color = match status.kind {
        StatusKind::Idle => theme.fg,
        StatusKind::Pending => theme.pending,
        StatusKind::Success => theme.good,
        StatusKind::Error => theme.bad,
    };
    let p = Paragraph::new(Span::styled(status.message.as_str(), Style::default().fg(color)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent_soft))
                .title(" Status "),
        );
    f.render_widget(p, area);
}
