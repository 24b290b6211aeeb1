//! Title banner and section rules.

use super::colors::*;

const RULE_WIDTH: usize = 57;

/// Print the app banner.
pub fn print_header() {
    println!("{MAGENTA}{BOLD}");
    println!("  ✦  Tô no Cosmos  ✦");
    println!("{RESET}{GRAY}  v{}{RESET}", env!("CARGO_PKG_VERSION"));
    println!();
}

/// Print a section title between rules, e.g. `━━━ Oráculo ━━━`.
pub fn print_section(title: &str) {
    println!("{CYAN}{BOLD}{}{RESET}", section_rule(title, RULE_WIDTH));
}

fn section_rule(title: &str, width: usize) -> String {
    let label = format!(" {} ", title);
    let remaining = width.saturating_sub(label.chars().count());
    let left = remaining / 2;
    format!("{}{}{}", "━".repeat(left), label, "━".repeat(remaining - left))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_rule_width() {
        let rule = section_rule("Sonhos", 20);
        assert_eq!(rule.chars().count(), 20);
        assert!(rule.contains(" Sonhos "));
    }

    #[test]
    fn test_section_rule_long_title() {
        let rule = section_rule("um título muito comprido", 10);
        assert_eq!(rule, " um título muito comprido ");
    }
}
