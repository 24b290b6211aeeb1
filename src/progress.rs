//! Terminal progress indicators for the line-based commands.

use crate::timer::BreathingTimer;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_CHARS: &str = "✦✧★☆★✧ ";
const BREATH_BAR_WIDTH: usize = 30;

/// Spinner shown while waiting on Órion.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars(SPINNER_CHARS)
                .template("{spinner:.magenta} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    /// Clear the spinner line so the result prints on a clean line.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

/// A bar that fills over a breathing session, one step per second.
pub fn breathing_bar(timer: &BreathingTimer) -> ProgressBar {
    let bar = ProgressBar::new(u64::from(timer.duration()));
    let template = format!(
        "{{bar:{}.magenta/blue}} {{msg}}",
        BREATH_BAR_WIDTH
    );
    bar.set_style(
        ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    update_breathing_bar(&bar, timer);
    bar
}

pub fn update_breathing_bar(bar: &ProgressBar, timer: &BreathingTimer) {
    bar.set_position(u64::from(timer.elapsed()));
    bar.set_message(breath_message(timer));
}

/// `M:SS  instruction` line under the bar.
pub fn breath_message(timer: &BreathingTimer) -> String {
    format!("{}  {}", timer.clock(), timer.instruction())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::SessionLength;

    #[test]
    fn test_breath_message_idle() {
        let timer = BreathingTimer::new(SessionLength::Three);
        assert_eq!(breath_message(&timer), "3:00  Prepare-se para relaxar");
    }

    #[test]
    fn test_breath_message_running_phases() {
        let mut timer = BreathingTimer::new(SessionLength::Three);
        timer.start();
        assert_eq!(breath_message(&timer), "3:00  Inspire profundamente...");
        for _ in 0..5 {
            timer.tick();
        }
        assert_eq!(breath_message(&timer), "2:55  Segure o ar...");
    }

    #[test]
    fn test_breathing_bar_tracks_elapsed() {
        let mut timer = BreathingTimer::new(SessionLength::Five);
        timer.start();
        let bar = breathing_bar(&timer);
        assert_eq!(bar.length(), Some(300));
        timer.tick();
        timer.tick();
        update_breathing_bar(&bar, &timer);
        assert_eq!(bar.position(), 2);
    }
}
