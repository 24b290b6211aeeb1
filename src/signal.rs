//! Ctrl+C handling for the line-based commands.
//!
//! The TUI reads Ctrl+C as a key event in raw mode; this handler is for the
//! `breathe` session, which keeps the terminal in cooked mode.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{CosmosError, Result};

/// Sets a shared flag when SIGINT arrives.
///
/// Clones share the flag. Polling with [`SignalHandler::is_interrupted`]
/// never blocks.
#[derive(Clone)]
pub struct SignalHandler {
    interrupted: Arc<AtomicBool>,
}

impl SignalHandler {
    /// Register the process-wide SIGINT handler.
    ///
    /// # Errors
    ///
    /// Fails if a handler is already registered in this process.
    pub fn new() -> Result<Self> {
        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);

        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .map_err(|e| CosmosError::SignalHandler(e.to_string()))?;

        Ok(Self { interrupted })
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    fn detached() -> Self {
        Self {
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    #[cfg(test)]
    fn trigger(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_interrupted_initially() {
        assert!(!SignalHandler::detached().is_interrupted());
    }

    #[test]
    fn test_clones_share_flag() {
        let handler = SignalHandler::detached();
        let clone = handler.clone();
        handler.trigger();
        assert!(clone.is_interrupted());
    }

    #[test]
    fn test_flag_visible_across_threads() {
        let handler = SignalHandler::detached();
        let clone = handler.clone();
        std::thread::spawn(move || clone.trigger()).join().unwrap();
        assert!(handler.is_interrupted());
    }
}
