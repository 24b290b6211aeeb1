//! Rituals command handlers.

use crate::error::Result;
use crate::output::{print_rituals, print_section};
use crate::rituals::RitualTask;
use crate::storage::{locale_date_string, RitualJournal};
use chrono::Local;
use tracing::info;

fn show(journal: &RitualJournal) {
    let date = locale_date_string(Local::now().date_naive());
    print_section("Rituais Diários");
    print_rituals(&date, &journal.load_today());
}

/// Show today's rituals and progress.
pub fn rituals_command(journal: &RitualJournal) -> Result<()> {
    show(journal);
    Ok(())
}

/// Mark or unmark a task by id (`hydration`, `silence`, `nature`, `kindness`).
pub fn rituals_toggle_command(journal: &RitualJournal, task_id: &str) -> Result<()> {
    let task: RitualTask = task_id.parse()?;
    let mut state = journal.load_today();
    state.toggle_task(task);
    journal.save_today(&state)?;
    info!(task = %task, done = state.is_completed(task), "ritual toggled");
    show(journal);
    Ok(())
}

/// Write gratitude entry `slot` (1-based).
pub fn rituals_gratitude_command(
    journal: &RitualJournal,
    slot: usize,
    words: &[String],
) -> Result<()> {
    let mut state = journal.load_today();
    state.set_gratitude(slot.wrapping_sub(1), words.join(" "))?;
    journal.save_today(&state)?;
    show(journal);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CosmosError;
    use crate::storage::LocalStore;
    use tempfile::TempDir;

    fn journal(dir: &TempDir) -> RitualJournal {
        RitualJournal::new(LocalStore::in_dir(dir.path()))
    }

    #[test]
    fn test_toggle_persists() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);
        rituals_toggle_command(&journal, "nature").unwrap();
        assert!(journal.load_today().is_completed(RitualTask::Nature));
        rituals_toggle_command(&journal, "nature").unwrap();
        assert!(!journal.load_today().is_completed(RitualTask::Nature));
    }

    #[test]
    fn test_toggle_unknown_task() {
        let dir = TempDir::new().unwrap();
        let err = rituals_toggle_command(&journal(&dir), "yoga").unwrap_err();
        assert!(matches!(err, CosmosError::InvalidTask(_)));
    }

    #[test]
    fn test_gratitude_slots_are_one_based() {
        let dir = TempDir::new().unwrap();
        let journal = journal(&dir);
        let words = vec!["minha".to_string(), "família".to_string()];
        rituals_gratitude_command(&journal, 3, &words).unwrap();
        assert_eq!(journal.load_today().gratitude_list[2], "minha família");

        assert!(rituals_gratitude_command(&journal, 0, &words).is_err());
        assert!(rituals_gratitude_command(&journal, 4, &words).is_err());
    }
}
