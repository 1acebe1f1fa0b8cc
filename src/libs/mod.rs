pub mod chain;
pub mod config;
pub mod lookup;
pub mod tui;
pub mod writing;
