use ratatui::{
    layout::Margin,
    prelude::*,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

#[derive(Clone)]
pub struct BoxProps {
    pub border_color: Color,
    pub title: String,
}

impl Default for BoxProps {
    fn default() -> Self {
        Self {
            border_color: Color::LightBlue,
            title: "Box".into(),
        }
    }
}

/// Rounded, titled box filling `area`; lines past its height are cut.
pub fn draw_box(f: &mut Frame, area: Rect, lines: Vec<Line<'_>>, props: &BoxProps) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(props.border_color))
        .title(Span::styled(
            format!(" {} ", props.title),
            Style::default()
                .fg(props.border_color)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(block, area);

    let inner = area.inner(Margin::new(1, 1));
    f.render_widget(Paragraph::new(lines), inner);
}
