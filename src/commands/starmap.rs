//! Star map command handler.

use super::require_gateway;
use crate::error::{CosmosError, Result};
use crate::gateway::Gateway;
use crate::output::{print_section, print_star_map_reading};
use crate::progress::Spinner;
use crate::tui::input::{
    format_birth_date_input, format_birth_time_input, DATE_INPUT_LEN, TIME_INPUT_LEN,
};

/// Normalise birth data through the same masks the TUI applies and check it
/// is complete.
fn birth_data(date: &str, time: &str) -> Result<(String, String)> {
    let date = format_birth_date_input(date);
    let time = format_birth_time_input(time);
    if date.len() < DATE_INPUT_LEN || time.len() < TIME_INPUT_LEN {
        return Err(CosmosError::InvalidInput(
            "Por favor, preencha a data (DD/MM/AAAA) e hora (HH:MM) completas.".to_string(),
        ));
    }
    Ok((date, time))
}

pub fn starmap_command(gateway: &Gateway, date: &str, time: &str) -> Result<()> {
    let (date, time) = birth_data(date, time)?;
    require_gateway(gateway)?;

    let spinner = Spinner::start("Consultando os astros...");
    let result = gateway.star_map_reading(&date, &time);
    spinner.finish();

    let reading = result?;
    print_section("Mapa de Hoje");
    print_star_map_reading(&reading);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_data_accepts_masked_and_raw() {
        assert_eq!(
            birth_data("12/03/1990", "08:30").unwrap(),
            ("12/03/1990".to_string(), "08:30".to_string())
        );
        assert_eq!(
            birth_data("12031990", "0830").unwrap(),
            ("12/03/1990".to_string(), "08:30".to_string())
        );
    }

    #[test]
    fn test_birth_data_rejects_incomplete() {
        assert!(matches!(
            birth_data("12/03/90", "08:30"),
            Err(CosmosError::InvalidInput(_))
        ));
        assert!(matches!(
            birth_data("12/03/1990", "8:30"),
            Err(CosmosError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_incomplete_input_checked_before_gateway() {
        let err = starmap_command(&Gateway::unconfigured(), "1", "2").unwrap_err();
        assert!(matches!(err, CosmosError::InvalidInput(_)));
    }
}
