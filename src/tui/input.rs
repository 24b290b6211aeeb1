//! Single-line text fields and the birth data input masks.

pub const DATE_INPUT_LEN: usize = 10;
pub const TIME_INPUT_LEN: usize = 5;

/// An append-only line editor: characters go on the end, Backspace removes
/// the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Return the content and leave the field empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Mask typed input as `DD/MM/AAAA`: non-digits dropped, `/` after the 2nd
/// and 4th digit, capped at 10 characters.
pub fn format_birth_date_input(raw: &str) -> String {
    let mut v = digits(raw);
    if v.len() > 2 {
        v.insert(2, '/');
    }
    if v.len() > 5 {
        v.insert(5, '/');
    }
    v.truncate(DATE_INPUT_LEN);
    v
}

/// Mask typed input as `HH:MM`: non-digits dropped, `:` after the 2nd digit,
/// capped at 5 characters.
pub fn format_birth_time_input(raw: &str) -> String {
    let mut v = digits(raw);
    if v.len() > 2 {
        v.insert(2, ':');
    }
    v.truncate(TIME_INPUT_LEN);
    v
}

/// Drop the last digit of a masked value and re-mask.
pub fn backspace_masked(value: &str, mask: fn(&str) -> String) -> String {
    let mut d = digits(value);
    d.pop();
    mask(&d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_edit() {
        let mut input = TextInput::new();
        assert!(input.is_blank());
        for c in "olá".chars() {
            input.push(c);
        }
        assert_eq!(input.value(), "olá");
        input.backspace();
        assert_eq!(input.value(), "ol");
        assert_eq!(input.take(), "ol");
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_text_input_whitespace_is_blank() {
        let mut input = TextInput::new();
        for _ in 0..3 {
            input.push(' ');
        }
        assert!(input.is_blank());
    }

    #[test]
    fn test_date_mask_progressive() {
        assert_eq!(format_birth_date_input("1"), "1");
        assert_eq!(format_birth_date_input("12"), "12");
        assert_eq!(format_birth_date_input("123"), "12/3");
        assert_eq!(format_birth_date_input("1234"), "12/34");
        assert_eq!(format_birth_date_input("12345"), "12/34/5");
        assert_eq!(format_birth_date_input("12031990"), "12/03/1990");
    }

    #[test]
    fn test_date_mask_strips_and_caps() {
        assert_eq!(format_birth_date_input("12/03/1990"), "12/03/1990");
        assert_eq!(format_birth_date_input("1203199045"), "12/03/1990");
        assert_eq!(format_birth_date_input("ab12c"), "12");
    }

    #[test]
    fn test_time_mask() {
        assert_eq!(format_birth_time_input("0"), "0");
        assert_eq!(format_birth_time_input("083"), "08:3");
        assert_eq!(format_birth_time_input("0830"), "08:30");
        assert_eq!(format_birth_time_input("083059"), "08:30");
        assert_eq!(format_birth_time_input("h8"), "8");
    }

    #[test]
    fn test_backspace_masked_removes_separator_with_digit() {
        assert_eq!(
            backspace_masked("12/3", format_birth_date_input),
            "12"
        );
        assert_eq!(backspace_masked("08:30", format_birth_time_input), "08:3");
        assert_eq!(backspace_masked("", format_birth_time_input), "");
    }
}
