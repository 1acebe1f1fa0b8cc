use ratatui::prelude::*;

#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub accent_soft: Color,
    pub good: Color,
    pub bad: Color,
    pub pending: Color,
    pub coin: Color,
}

impl Theme {
    pub fn coin_dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::LightCyan,
            accent_soft: Color::DarkGray,
            good: Color::Green,
            bad: Color::Red,
            pending: Color::Yellow,
            coin: Color::LightYellow,
        }
    }
}
