//! Daily ritual checklist output.

use crate::rituals::{RitualState, RitualTask};

use super::colors::*;

const BAR_WIDTH: usize = 20;

/// Make a progress bar string for a percentage (0-100).
pub fn make_progress_bar(percent: u8, width: usize) -> String {
    let percent = usize::from(percent.min(100));
    let filled = percent * width / 100;
    let empty = width - filled;
    format!(
        "{GREEN}{}{RESET}{GRAY}{}{RESET}",
        "█".repeat(filled),
        "░".repeat(empty)
    )
}

/// Print today's rituals: progress, gratitude entries and the task checklist.
pub fn print_rituals(date: &str, state: &RitualState) {
    let progress = state.progress();
    println!("{BLUE}Data:{RESET} {}", date);
    println!(
        "{BLUE}Sincronização:{RESET} [{}] {}%",
        make_progress_bar(progress, BAR_WIDTH),
        progress
    );
    if state.is_complete() {
        println!("{GREEN}{BOLD}✨ Alinhamento Completo{RESET}");
    }

    println!();
    println!("{BOLD}Gratidão{RESET}");
    for (i, entry) in state.gratitude_list.iter().enumerate() {
        if entry.trim().is_empty() {
            println!("  {GRAY}{}. ...{RESET}", i + 1);
        } else {
            println!("  {}. {}", i + 1, entry);
        }
    }

    println!();
    println!("{BOLD}Rituais{RESET}");
    for task in RitualTask::all() {
        let (mark, color) = if state.is_completed(*task) {
            ("✓", GREEN)
        } else {
            (" ", GRAY)
        };
        println!(
            "  {color}[{mark}]{RESET} {} {GRAY}({}){RESET}",
            task.label(),
            task.id()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(bar: &str) -> String {
        bar.replace(GREEN, "").replace(GRAY, "").replace(RESET, "")
    }

    #[test]
    fn test_progress_bar_empty_and_full() {
        assert_eq!(strip(&make_progress_bar(0, 10)), "░".repeat(10));
        assert_eq!(strip(&make_progress_bar(100, 10)), "█".repeat(10));
    }

    #[test]
    fn test_progress_bar_partial() {
        let bar = strip(&make_progress_bar(43, 10));
        assert_eq!(bar, format!("{}{}", "█".repeat(4), "░".repeat(6)));
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert_eq!(strip(&make_progress_bar(250, 4)).chars().count(), 4);
    }
}
