//! Terminal front end: command parsing and console rendering.

pub mod input;
pub mod render;

pub use input::{parse_command, Command, InputError};
pub use render::{help_text, render_event, status_report, turn_prompt, ConsoleObserver};
