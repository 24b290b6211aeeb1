//! Breathe command handler: a guided session with a progress bar.

use crate::error::{CosmosError, Result};
use crate::output::{print_interrupted, print_section, print_success};
use crate::progress::{breathing_bar, update_breathing_bar};
use crate::signal::SignalHandler;
use crate::timer::{BreathingTimer, SessionLength};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const TICK: Duration = Duration::from_secs(1);
const POLL: Duration = Duration::from_millis(100);

pub fn breathe_command(minutes: u32) -> Result<()> {
    let length = SessionLength::from_minutes(minutes).ok_or_else(|| {
        CosmosError::InvalidInput(format!(
            "duração inválida: {} min (use 3, 5 ou 10)",
            minutes
        ))
    })?;
    let signal = SignalHandler::new()?;

    let mut timer = BreathingTimer::new(length);
    timer.start();
    info!(minutes, "breathing session started");

    print_section("Respiração Cósmica");
    let bar = breathing_bar(&timer);
    let mut next_tick = Instant::now() + TICK;

    while timer.is_running() {
        if signal.is_interrupted() {
            bar.abandon();
            info!(elapsed = timer.elapsed(), "breathing session interrupted");
            print_interrupted();
            return Ok(());
        }
        thread::sleep(POLL);
        while timer.is_running() && Instant::now() >= next_tick {
            timer.tick();
            next_tick += TICK;
        }
        update_breathing_bar(&bar, &timer);
    }

    bar.finish_and_clear();
    info!("breathing session finished");
    print_success(&format!(
        "{} minutos de presença. O universo respira com você. ✨",
        length.minutes()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unsupported_length() {
        assert!(matches!(
            breathe_command(7),
            Err(CosmosError::InvalidInput(_))
        ));
    }
}
