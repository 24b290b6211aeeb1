//! Dream command handler.

use super::require_gateway;
use crate::error::{CosmosError, Result};
use crate::gateway::Gateway;
use crate::output::{print_dream_interpretation, print_section};
use crate::progress::Spinner;

/// Interpret a dream described by the words on the command line.
pub fn dream_command(gateway: &Gateway, words: &[String]) -> Result<()> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        return Err(CosmosError::EmptyDream);
    }
    require_gateway(gateway)?;

    let spinner = Spinner::start("Órion está interpretando seu sonho...");
    let result = gateway.interpret_dream(&text);
    spinner.finish();

    let reading = result?;
    print_section("Interpretação");
    print_dream_interpretation(&reading);
    Ok(())
}
