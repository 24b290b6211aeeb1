pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod output;
pub mod progress;
pub mod rituals;
pub mod signal;
pub mod storage;
pub mod timer;
pub mod tui;

pub use config::Config;
pub use error::{CosmosError, Result};
pub use gateway::{Gateway, GatewayConfig};
pub use rituals::{RitualState, RitualTask};
pub use storage::{LocalStore, RitualJournal};
pub use timer::{BreathingTimer, SessionLength};
