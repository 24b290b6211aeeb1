//! Printers for gateway results.

use crate::gateway::{ChatMessage, DailyWisdom, DreamInterpretation, Role, StarMapReading};

use super::colors::*;

/// Print the daily wisdom card.
pub fn print_wisdom(wisdom: &DailyWisdom) {
    println!();
    println!("{MAGENTA}{ITALIC}\u{201c}{}\u{201d}{RESET}", wisdom.quote);
    println!("{GRAY}  — {}{RESET}", wisdom.author);
    println!();
    println!("{CYAN}{}{RESET}", wisdom.insight);
    println!();
}

pub fn print_dream_interpretation(reading: &DreamInterpretation) {
    println!();
    println!("{BOLD}Resumo{RESET}");
    println!("{}", reading.summary);

    if !reading.symbols.is_empty() {
        println!();
        println!("{BOLD}Símbolos{RESET}");
        for symbol in &reading.symbols {
            println!("  {YELLOW}✦ {}{RESET}: {}", symbol.name, symbol.meaning);
        }
    }

    println!();
    println!("{BOLD}Conselho de Órion{RESET}");
    println!("{CYAN}{}{RESET}", reading.guidance);
    println!();
}

pub fn print_star_map_reading(reading: &StarMapReading) {
    println!();
    println!("{BLUE}Signo Solar:{RESET} {BOLD}{}{RESET}", reading.sun_sign);
    println!("{BLUE}Ascendente:{RESET}  {BOLD}{}{RESET}", reading.rising_sign);
    println!();
    println!("{MAGENTA}{}{RESET}", reading.daily_prediction);
    println!();
    println!("{BLUE}Cor de poder:{RESET}     {}", reading.power_color);
    println!("{BLUE}Número da sorte:{RESET}  {}", reading.lucky_number);
    println!();
}

/// Print one transcript line, prefixed by the speaker.
pub fn print_chat_message(message: &ChatMessage) {
    let time = message.timestamp.format("%H:%M");
    match message.role {
        Role::User => println!("{GRAY}{}{RESET} {BOLD}Você:{RESET} {}", time, message.text),
        Role::Model => println!(
            "{GRAY}{}{RESET} {MAGENTA}{BOLD}Órion:{RESET} {}",
            time, message.text
        ),
    }
}
