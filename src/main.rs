//! cosmos CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command handler.
//! With no subcommand the full-screen app starts.

use cosmos::commands::{
    breathe_command, config_display_command, config_reset_command, config_set_command,
    dream_command, oracle_command, rituals_command, rituals_gratitude_command,
    rituals_toggle_command, starmap_command, tui_command, wisdom_command,
};
use cosmos::config::{config_dir, get_effective_config, log_path};
use cosmos::logging::init_logging;
use cosmos::output::{print_error, print_header, print_warning};
use cosmos::{Gateway, LocalStore, Result, RitualJournal};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cosmos")]
#[command(
    version,
    about = "Tô no Cosmos: sabedoria diária, sonhos, mapa astral, respiração e rituais",
    after_help = "EXAMPLES:
    # Open the full-screen app
    cosmos

    # One-off readings
    cosmos wisdom
    cosmos dream voava sobre um mar de estrelas
    cosmos starmap --date 15/03/1990 --time 14:30

    # Daily practice
    cosmos breathe --minutes 3
    cosmos rituals toggle hydration
    cosmos rituals gratitude 1 o sol da manhã

    # Store the Gemini API key
    cosmos config set api_key AIza..."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print today's message from the cosmos
    Wisdom,

    /// Interpret a dream
    Dream {
        /// The dream, in your own words
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Star map reading for a birth date and time
    Starmap {
        /// Birth date, DD/MM/AAAA (digits only also work)
        #[arg(long)]
        date: String,

        /// Birth time, HH:MM (digits only also work)
        #[arg(long)]
        time: String,
    },

    /// Chat with Órion, line by line
    Oracle,

    /// Guided breathing session
    Breathe {
        /// Session length in minutes (3, 5 or 10)
        #[arg(short, long, default_value_t = 5)]
        minutes: u32,
    },

    /// Show or update today's rituals
    Rituals {
        #[command(subcommand)]
        action: Option<RitualsAction>,
    },

    /// Show or change configuration (~/.config/cosmos/config.toml)
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Subcommand)]
enum RitualsAction {
    /// Mark or unmark a task (hydration, silence, nature, kindness)
    Toggle {
        task: String,
    },

    /// Write one of the three gratitude entries
    Gratitude {
        /// Entry number, 1 to 3
        slot: usize,

        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Set a configuration value (api_key, model, api_base, log_level)
    Set { key: String, value: String },

    /// Restore the default configuration
    Reset,
}

fn main() {
    let cli = Cli::parse();

    // Config commands work even when the file is invalid
    let result = match &cli.command {
        Some(Commands::Config { subcommand }) => match subcommand {
            None => config_display_command(),
            Some(ConfigSubcommand::Set { key, value }) => config_set_command(key, value),
            Some(ConfigSubcommand::Reset) => config_reset_command(),
        },
        Some(command) => run(command),
        None => run_app(),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Load config, start logging and build the shared services.
fn setup() -> Result<(Gateway, RitualJournal)> {
    let config = get_effective_config()?;

    match log_path() {
        Ok(path) => {
            if let Err(e) = init_logging(&path, &config.log_level) {
                print_warning(&format!("Logging disabled: {}", e));
            }
        }
        Err(e) => print_warning(&format!("Logging disabled: {}", e)),
    }
    info!(version = env!("CARGO_PKG_VERSION"), "cosmos starting");

    let gateway = Gateway::new(&config.gateway_config())?;
    if !gateway.is_available() {
        warn!("no api key configured, running in degraded mode");
    }
    let journal = RitualJournal::new(LocalStore::in_dir(&config_dir()?));
    Ok((gateway, journal))
}

fn run_app() -> Result<()> {
    let (gateway, journal) = setup()?;
    tui_command(gateway, journal)
}

fn run(command: &Commands) -> Result<()> {
    let (gateway, journal) = setup()?;

    match command {
        Commands::Wisdom => {
            print_header();
            wisdom_command(&gateway)
        }
        Commands::Dream { text } => dream_command(&gateway, text),
        Commands::Starmap { date, time } => starmap_command(&gateway, date, time),
        Commands::Oracle => {
            print_header();
            oracle_command(&gateway)
        }
        Commands::Breathe { minutes } => breathe_command(*minutes),
        Commands::Rituals { action } => match action {
            None => rituals_command(&journal),
            Some(RitualsAction::Toggle { task }) => rituals_toggle_command(&journal, task),
            Some(RitualsAction::Gratitude { slot, text }) => {
                rituals_gratitude_command(&journal, *slot, text)
            }
        },
        // Handled in main before setup
        Commands::Config { .. } => Ok(()),
    }
}
