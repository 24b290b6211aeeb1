//! Default command: the full-screen app.

use crate::error::Result;
use crate::gateway::Gateway;
use crate::storage::RitualJournal;

pub fn tui_command(gateway: Gateway, journal: RitualJournal) -> Result<()> {
    crate::tui::run_tui(gateway, journal)
}
