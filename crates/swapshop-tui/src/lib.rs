// Terminal UI implementation using ratatui
// Market, item detail, interested and my-items screens

pub mod app;
pub mod runner;
pub mod ui;

pub use app::{App, InputMode, Screen, TagColumn};
pub use runner::run_tui;
