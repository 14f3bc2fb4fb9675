use std::fmt::Display;

use libhyp::op::Opcode;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    START,
    END,
    ORIGIN,
    EQU,
    LTORG,
}

impl Directive {
    pub fn code(self) -> u8 {
        match self {
            Directive::START => 1,
            Directive::END => 2,
            Directive::ORIGIN => 3,
            Directive::EQU => 4,
            Directive::LTORG => 5,
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declarative {
    DC,
    DS,
}

impl Declarative {
    pub fn code(self) -> u8 {
        match self {
            Declarative::DC => 1,
            Declarative::DS => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Directive(Directive),
    Declarative(Declarative),
    Imperative(Opcode),
}

impl Mnemonic {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "START" => Some(Self::Directive(Directive::START)),
            "END" => Some(Self::Directive(Directive::END)),
            "ORIGIN" => Some(Self::Directive(Directive::ORIGIN)),
            "EQU" => Some(Self::Directive(Directive::EQU)),
            "LTORG" => Some(Self::Directive(Directive::LTORG)),

            "DC" => Some(Self::Declarative(Declarative::DC)),
            "DS" => Some(Self::Declarative(Declarative::DS)),

            other => Opcode::from_mnemonic(other).map(Self::Imperative),
        }
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Display for Declarative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mnemonic::Directive(d) => Display::fmt(d, f),
            Mnemonic::Declarative(d) => Display::fmt(d, f),
            Mnemonic::Imperative(op) => Display::fmt(op, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mnemonics() {
        assert_eq!(
            Mnemonic::parse("ltorg"),
            Some(Mnemonic::Directive(Directive::LTORG))
        );
        assert_eq!(
            Mnemonic::parse("DS"),
            Some(Mnemonic::Declarative(Declarative::DS))
        );
        assert_eq!(
            Mnemonic::parse("Mover"),
            Some(Mnemonic::Imperative(Opcode::MOVER))
        );
        assert_eq!(Mnemonic::parse("LOOP"), None);
    }
}
