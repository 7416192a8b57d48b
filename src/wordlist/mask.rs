//! Per-position format masks (`L`, `U`, `D`, `S`)

use std::fmt;
use std::str::FromStr;

use crate::error::{WordForgeError, Result};

/// Character class directive applied to one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Lowercase,
    Uppercase,
    /// Renders the character unchanged. Non-digit characters are not
    /// rejected or converted.
    Digit,
    Symbol,
}

impl Directive {
    /// Parse a single mask code, case-insensitive
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'L' => Some(Self::Lowercase),
            'U' => Some(Self::Uppercase),
            'D' => Some(Self::Digit),
            'S' => Some(Self::Symbol),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Self::Lowercase => 'L',
            Self::Uppercase => 'U',
            Self::Digit => 'D',
            Self::Symbol => 'S',
        }
    }

    /// Render one character. ASCII-only folding, locale independent.
    #[inline]
    pub fn render(&self, c: char) -> char {
        match self {
            Self::Lowercase => c.to_ascii_lowercase(),
            Self::Uppercase => c.to_ascii_uppercase(),
            Self::Digit | Self::Symbol => c,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Ordered directives, one per word position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatMask {
    directives: Vec<Directive>,
}

impl FormatMask {
    pub fn new(directives: Vec<Directive>) -> Self {
        Self { directives }
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn get(&self, position: usize) -> Option<Directive> {
        self.directives.get(position).copied()
    }
}

impl FromStr for FormatMask {
    type Err = WordForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(WordForgeError::config("format mask cannot be empty"));
        }

        let directives = s
            .chars()
            .enumerate()
            .map(|(position, code)| {
                Directive::from_code(code).ok_or_else(|| {
                    crate::config_error!(
                        "unrecognized mask directive '{}' at position {} (expected L, U, D or S)",
                        code,
                        position + 1
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { directives })
    }
}

impl fmt::Display for FormatMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for directive in &self.directives {
            write!(f, "{}", directive)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        let mask: FormatMask = "lUdS".parse().unwrap();
        assert_eq!(
            mask.directives(),
            &[
                Directive::Lowercase,
                Directive::Uppercase,
                Directive::Digit,
                Directive::Symbol
            ]
        );
        assert_eq!(mask.to_string(), "LUDS");
    }

    #[test]
    fn test_parse_rejects_unknown_code() {
        let err = "LUX".parse::<FormatMask>().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("'X' at position 3"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!("".parse::<FormatMask>().is_err());
        assert!("   ".parse::<FormatMask>().is_err());
    }

    #[test]
    fn test_render() {
        assert_eq!(Directive::Lowercase.render('Q'), 'q');
        assert_eq!(Directive::Uppercase.render('q'), 'Q');
        assert_eq!(Directive::Uppercase.render('7'), '7');
        assert_eq!(Directive::Symbol.render('!'), '!');
    }

    #[test]
    fn test_digit_directive_is_passthrough() {
        assert_eq!(Directive::Digit.render('1'), '1');
        assert_eq!(Directive::Digit.render('a'), 'a');
        assert_eq!(Directive::Digit.render('#'), '#');
    }
}
