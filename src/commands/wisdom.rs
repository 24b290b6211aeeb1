//! Wisdom command handler.

use crate::error::Result;
use crate::gateway::Gateway;
use crate::output::{print_section, print_warning, print_wisdom};
use crate::progress::Spinner;

/// Print today's message. Never fails: without a key, or when the service
/// is down, a fixed message is printed instead.
pub fn wisdom_command(gateway: &Gateway) -> Result<()> {
    if !gateway.is_available() {
        print_warning("Sem API Key configurada. Rode 'cosmos config set api_key <KEY>'.");
    }

    let spinner = Spinner::start("Lendo as estrelas...");
    let wisdom = gateway.daily_wisdom();
    spinner.finish();

    print_section("Mensagem do Dia");
    print_wisdom(&wisdom);
    Ok(())
}
