pub mod r#box;
pub mod button;
pub mod input;
pub mod main_window;
pub mod status;
pub mod theme;
pub mod title;

pub use button::draw_button;
pub use input::draw_input;
pub use main_window::{centered_rect, draw_main_window, draw_too_small};
pub use r#box::{draw_box, BoxProps};
pub use status::draw_status;
pub use theme::Theme;
pub use title::draw_title_bar;
