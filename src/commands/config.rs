//! Config command handlers.

use crate::config::{
    config_path, load_config, mask_api_key, save_config, set_config_value, Config,
};
use crate::error::Result;
use crate::output::{print_success, BOLD, CYAN, GRAY, RESET, YELLOW};
use tracing::info;

/// Where the effective API key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySource {
    File,
    Environment,
    Missing,
}

fn key_source(file: &Config, effective: &Config) -> KeySource {
    if file.has_api_key() {
        KeySource::File
    } else if effective.has_api_key() {
        KeySource::Environment
    } else {
        KeySource::Missing
    }
}

/// Show the config file with the key masked.
pub fn config_display_command() -> Result<()> {
    let path = config_path()?;
    let file = load_config()?;
    let effective = file.clone().with_env_overrides();

    println!("{BOLD}# Configuração{RESET}");
    println!("{GRAY}# {}{RESET}", path.display());
    println!();
    for line in config_lines(&effective, key_source(&file, &effective)) {
        println!("{line}");
    }
    if !effective.has_api_key() {
        println!();
        println!("{YELLOW}# Sem chave: o Oráculo, sonhos e mapa astral ficam indisponíveis.{RESET}");
    }
    Ok(())
}

fn config_lines(config: &Config, source: KeySource) -> Vec<String> {
    let key = match (&config.api_key, source) {
        (Some(key), KeySource::File) => format!("\"{}\"", mask_api_key(key)),
        (Some(key), KeySource::Environment) => {
            format!("\"{}\" {GRAY}(ambiente){RESET}", mask_api_key(key))
        }
        _ => format!("{GRAY}(não definida){RESET}"),
    };
    vec![
        format!("{CYAN}api_key{RESET} = {key}"),
        format!("{CYAN}model{RESET} = \"{}\"", config.model),
        format!("{CYAN}api_base{RESET} = \"{}\"", config.api_base),
        format!("{CYAN}log_level{RESET} = \"{}\"", config.log_level),
    ]
}

/// Set one key in the config file.
pub fn config_set_command(key: &str, value: &str) -> Result<()> {
    let mut config = load_config()?;
    set_config_value(&mut config, key, value)?;
    save_config(&config)?;
    info!(key, "config updated");

    let shown = if key == "api_key" {
        mask_api_key(value.trim())
    } else {
        value.trim().to_string()
    };
    print_success(&format!("{} = {}", key, shown));
    Ok(())
}

/// Overwrite the config file with defaults.
pub fn config_reset_command() -> Result<()> {
    save_config(&Config::default())?;
    info!("config reset to defaults");
    print_success(&format!(
        "Configuração restaurada em {}",
        config_path()?.display()
    ));
    Ok(())
}
