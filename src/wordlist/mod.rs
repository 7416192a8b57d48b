//! Wordlist generation - alphabet assembly, format masks and the
//! combinatorial word generator
//!
//! The generator is index-addressable, so a run can be split into disjoint
//! slices (see [`shard`]) or started at an arbitrary position.

mod generator;
mod mask;
pub mod shard;
pub mod writer;

pub use generator::{generate, WordGenerator};
pub use mask::{Directive, FormatMask};
pub use shard::write_sharded;
pub use writer::{write_to_path, write_words, WriteStats};

use serde::{Deserialize, Serialize};

/// Lowercase baseline, always present
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// ASCII punctuation in code point order
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Character categories enabled for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetOptions {
    /// Accepted for symmetry; the lowercase baseline is always included
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub digits: bool,
    #[serde(default)]
    pub uppercase: bool,
    #[serde(default)]
    pub symbols: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AlphabetOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            digits: false,
            uppercase: false,
            symbols: false,
        }
    }
}

impl AlphabetOptions {
    pub fn build(&self) -> Alphabet {
        Alphabet::build(self.lowercase, self.digits, self.uppercase, self.symbols)
    }
}

/// Ordered set of characters available at every position.
///
/// Order defines enumeration order. Duplicates are kept as-is and simply
/// produce duplicate combinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Assemble the alphabet from category toggles.
    ///
    /// Lowercase letters are always the base set. Digits, uppercase letters
    /// and symbols are appended in that order when enabled.
    pub fn build(
        _include_lowercase: bool,
        include_digits: bool,
        include_uppercase: bool,
        include_symbols: bool,
    ) -> Self {
        let mut chars: Vec<char> = LOWERCASE.chars().collect();

        if include_digits {
            chars.extend(DIGITS.chars());
        }
        if include_uppercase {
            chars.extend(UPPERCASE.chars());
        }
        if include_symbols {
            chars.extend(SYMBOLS.chars());
        }

        Self { chars }
    }

    /// Use an arbitrary character sequence as the alphabet
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of words of the given length, or `None` if it overflows `u128`
    pub fn total_combinations(&self, length: usize) -> Option<u128> {
        let exp = u32::try_from(length).ok()?;
        (self.chars.len() as u128).checked_pow(exp)
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl From<&str> for Alphabet {
    fn from(s: &str) -> Self {
        Self::from_chars(s.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_only() {
        let alphabet = Alphabet::build(false, false, false, false);
        assert_eq!(alphabet.to_string(), LOWERCASE);
        assert_eq!(alphabet.len(), 26);
    }

    #[test]
    fn test_category_order() {
        let alphabet = Alphabet::build(true, true, true, true);
        assert_eq!(alphabet.len(), 26 + 10 + 26 + 32);
        let expected = format!("{}{}{}{}", LOWERCASE, DIGITS, UPPERCASE, SYMBOLS);
        assert_eq!(alphabet.to_string(), expected);
    }

    #[test]
    fn test_uppercase_without_digits() {
        let alphabet = Alphabet::build(true, false, true, false);
        assert_eq!(alphabet.chars()[26], 'A');
        assert_eq!(alphabet.len(), 52);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = Alphabet::build(true, true, false, true);
        let b = Alphabet::build(true, true, false, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_symbols_are_ascii_punctuation() {
        assert_eq!(SYMBOLS.len(), 32);
        assert!(SYMBOLS.chars().all(|c| c.is_ascii_punctuation()));
    }

    #[test]
    fn test_total_combinations() {
        let alphabet = Alphabet::build(true, false, false, false);
        assert_eq!(alphabet.total_combinations(4), Some(456_976));
        let wide = Alphabet::build(true, true, true, true);
        assert_eq!(wide.total_combinations(40), None);
    }

    #[test]
    fn test_options_build() {
        let options = AlphabetOptions {
            digits: true,
            ..Default::default()
        };
        assert_eq!(options.build().len(), 36);
    }
}
