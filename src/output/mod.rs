//! Terminal output for the line-based commands.
//!
//! - [`messages`] - Error, warning and info lines
//! - [`header`] - Title banner and section rules
//! - [`readings`] - Wisdom, dream, star map and chat output
//! - [`rituals`] - Daily ritual checklist and progress bar

pub mod header;
pub mod messages;
pub mod readings;
pub mod rituals;

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

pub use header::{print_header, print_section};
pub use messages::{print_error, print_info, print_interrupted, print_success, print_warning};
pub use readings::{
    print_chat_message, print_dream_interpretation, print_star_map_reading, print_wisdom,
};
pub use rituals::{make_progress_bar, print_rituals};
