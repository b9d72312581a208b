// TUI widget modules.

pub mod standings;
pub mod status_bar;
