//! Breathing timer state machine.
//!
//! A countdown over a fixed session length with a repeating
//! 4s inhale / 4s hold / 4s exhale cycle. The phase is never stored: it is
//! always derived from the elapsed time, so resets and duration changes can't
//! leave it out of sync.

use std::fmt;

/// Length of one full breathing cycle in seconds.
pub const CYCLE_SECS: u32 = 12;

/// Seconds spent in each phase of the cycle.
const PHASE_SECS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// Phase for a number of elapsed seconds.
    pub fn at(elapsed: u32) -> Phase {
        let pos = elapsed % CYCLE_SECS;
        if pos < PHASE_SECS {
            Phase::Inhale
        } else if pos < PHASE_SECS * 2 {
            Phase::Hold
        } else {
            Phase::Exhale
        }
    }

    /// Guidance shown while a session is running.
    pub fn instruction(&self) -> &'static str {
        match self {
            Phase::Inhale => "Inspire profundamente...",
            Phase::Hold => "Segure o ar...",
            Phase::Exhale => "Expire lentamente...",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Inhale => "inspirar",
            Phase::Hold => "segurar",
            Phase::Exhale => "expirar",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Finished,
}

/// Selectable session lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionLength {
    Three,
    #[default]
    Five,
    Ten,
}

impl SessionLength {
    pub fn all() -> &'static [SessionLength] {
        &[SessionLength::Three, SessionLength::Five, SessionLength::Ten]
    }

    pub fn minutes(&self) -> u32 {
        match self {
            SessionLength::Three => 3,
            SessionLength::Five => 5,
            SessionLength::Ten => 10,
        }
    }

    pub fn seconds(&self) -> u32 {
        self.minutes() * 60
    }

    pub fn from_minutes(minutes: u32) -> Option<SessionLength> {
        Self::all().iter().copied().find(|l| l.minutes() == minutes)
    }

    /// Next length in the selector, wrapping around.
    pub fn next(&self) -> SessionLength {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Previous length in the selector, wrapping around.
    pub fn prev(&self) -> SessionLength {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

#[derive(Debug, Clone)]
pub struct BreathingTimer {
    length: SessionLength,
    remaining: u32,
    state: TimerState,
}

impl Default for BreathingTimer {
    fn default() -> Self {
        Self::new(SessionLength::default())
    }
}

impl BreathingTimer {
    pub fn new(length: SessionLength) -> Self {
        Self {
            length,
            remaining: length.seconds(),
            state: TimerState::Idle,
        }
    }

    pub fn length(&self) -> SessionLength {
        self.length
    }

    pub fn duration(&self) -> u32 {
        self.length.seconds()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn elapsed(&self) -> u32 {
        self.duration() - self.remaining
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn phase(&self) -> Phase {
        Phase::at(self.elapsed())
    }

    /// Start or resume the countdown. Returns false when there is no time left.
    pub fn start(&mut self) -> bool {
        if self.state == TimerState::Running {
            return true;
        }
        if self.remaining == 0 {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// Pause a running countdown, keeping the remaining time.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Idle;
        }
    }

    /// Play/pause control.
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advance one second. Ignored unless running.
    pub fn tick(&mut self) {
        if self.state != TimerState::Running {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Finished;
        }
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = self.duration();
    }

    /// Change the session length. Always stops the countdown.
    pub fn set_length(&mut self, length: SessionLength) {
        self.length = length;
        self.remaining = length.seconds();
        self.state = TimerState::Idle;
    }

    /// Text shown under the clock.
    pub fn instruction(&self) -> &'static str {
        if self.is_running() {
            self.phase().instruction()
        } else {
            "Prepare-se para relaxar"
        }
    }

    pub fn clock(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Format seconds as `M:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
