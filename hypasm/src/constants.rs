use once_cell::sync::OnceCell;
use regex::Regex;

use libhyp::op::{ConditionCode, Opcode, Register};

pub const LITERAL_MARKER: char = '=';

pub static TOKEN_REGEX: OnceCell<Regex> = OnceCell::new();
pub static SYMBOL_REGEX: OnceCell<Regex> = OnceCell::new();
pub static EXPR_REGEX: OnceCell<Regex> = OnceCell::new();
static TOKEN_REGEX_PATTERN: &str = r#"[\s,]+"#;
static SYMBOL_REGEX_PATTERN: &str = r#"^[A-Za-z_][A-Za-z0-9_]*$"#;
static EXPR_REGEX_PATTERN: &str =
    r#"^(?P<symbol>[A-Za-z_][A-Za-z0-9_]*)(?:(?P<sign>[+-])(?P<offset>[0-9]+))?$"#;

pub fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| Regex::new(TOKEN_REGEX_PATTERN).expect("Invalid token regex"))
}

pub fn expr_regex() -> &'static Regex {
    EXPR_REGEX.get_or_init(|| Regex::new(EXPR_REGEX_PATTERN).expect("Invalid expression regex"))
}

pub fn is_symbol_name(name: &str) -> bool {
    SYMBOL_REGEX
        .get_or_init(|| Regex::new(SYMBOL_REGEX_PATTERN).expect("Invalid symbol regex"))
        .is_match(name)
}

pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Value of the register slot of an imperative statement.
///
/// Accepts named registers (`AREG`), branch conditions for `BC` (`LT`),
/// a bare digit, or a single letter counted from `A` = 1.
pub fn register(opcode: Opcode, operand: &str) -> Option<u8> {
    if opcode == Opcode::BC {
        if let Ok(condition) = operand.parse::<ConditionCode>() {
            return Some(condition as u8);
        }
    }

    if let Ok(register) = operand.parse::<Register>() {
        return Some(register as u8);
    }

    match operand.as_bytes() {
        [digit] if digit.is_ascii_digit() => Some(digit - b'0'),
        [letter] if letter.is_ascii_alphabetic() => {
            let ordinal = letter.to_ascii_uppercase() - b'A' + 1;
            (ordinal <= 9).then_some(ordinal)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_forms() {
        assert_eq!(register(Opcode::MOVER, "AREG"), Some(1));
        assert_eq!(register(Opcode::MOVER, "dreg"), Some(4));
        assert_eq!(register(Opcode::MOVER, "B"), Some(2));
        assert_eq!(register(Opcode::MOVER, "c"), Some(3));
        assert_eq!(register(Opcode::MOVER, "7"), Some(7));
        assert_eq!(register(Opcode::MOVER, "J"), None);
        assert_eq!(register(Opcode::MOVER, "12"), None);
        assert_eq!(register(Opcode::MOVER, "LT"), None);
        assert_eq!(register(Opcode::BC, "LT"), Some(1));
        assert_eq!(register(Opcode::BC, "any"), Some(6));
    }

    #[test]
    fn names() {
        assert!(is_symbol_name("LOOP"));
        assert!(is_symbol_name("x_1"));
        assert!(!is_symbol_name("1X"));
        assert!(!is_symbol_name("='5'"));
        assert!(is_number("042"));
        assert!(!is_number("-4"));
        assert!(!is_number(""));
    }
}
