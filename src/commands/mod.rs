//! CLI command handlers.
//!
//! Each subcommand has its own module with a handler function.
//!
//! # Commands
//!
//! - [`tui`] - Full-screen app (default)
//! - [`wisdom`] - Print today's message
//! - [`dream`] - Interpret a dream
//! - [`starmap`] - Star map reading for a birth date and time
//! - [`oracle`] - Line-based chat with Órion
//! - [`breathe`] - Guided breathing session
//! - [`rituals`] - Show and update today's rituals
//! - [`config`] - Show, set and reset configuration

mod breathe;
mod config;
mod dream;
mod oracle;
mod rituals;
mod starmap;
mod tui;
mod wisdom;

pub use breathe::breathe_command;
pub use config::{config_display_command, config_reset_command, config_set_command};
pub use dream::dream_command;
pub use oracle::oracle_command;
pub use rituals::{rituals_command, rituals_gratitude_command, rituals_toggle_command};
pub use starmap::starmap_command;
pub use tui::tui_command;
pub use wisdom::wisdom_command;

use crate::error::{CosmosError, Result};
use crate::gateway::Gateway;

/// Fail early with the configuration hint when the gateway has no key.
pub(crate) fn require_gateway(gateway: &Gateway) -> Result<()> {
    if gateway.is_available() {
        Ok(())
    } else {
        Err(CosmosError::Unconfigured)
    }
}
