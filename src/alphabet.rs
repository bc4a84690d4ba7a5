//! Ordered digit tables for position keys.
//!
//! An [`Alphabet`] is the digit set of a base-N numbering system. A digit's
//! value is its index in the alphabet, never its code point, so a custom
//! alphabet like `"zyx"` orders `z < y < x`.
//!
//! Keys are compared digit by digit; a proper prefix sorts before any of its
//! extensions (`"1" < "15"`). For the built-in presets the symbols are listed
//! in ASCII order, which means plain `str` comparison (and therefore a
//! database `ORDER BY position`) agrees with alphabet order:
//!
//! | Preset | Symbols | Base |
//! |--------|---------|------|
//! | `decimal` | `0-9` | 10 |
//! | `base36` | `0-9a-z` | 36 (default) |
//! | `base62` | `0-9A-Za-z` | 62 |

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub const DECIMAL: &str = "0123456789";
pub const BASE36: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
pub const BASE62: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("Alphabet needs at least 2 symbols, got {0}")]
    TooShort(usize),
    #[error("Duplicate symbol {0:?} in alphabet")]
    DuplicateSymbol(char),
    #[error("Alphabet symbol {0:?} is whitespace or a control character")]
    InvalidSymbolChar(char),
    #[error("Symbol {symbol:?} at offset {offset} of key {key:?} is not in the alphabet")]
    UnknownSymbol {
        key: String,
        symbol: char,
        offset: usize,
    },
}

/// Built-in alphabets, selectable from config and the CLI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Decimal,
    #[default]
    Base36,
    Base62,
}

impl Preset {
    pub fn symbols(self) -> &'static str {
        match self {
            Preset::Decimal => DECIMAL,
            Preset::Base36 => BASE36,
            Preset::Base62 => BASE62,
        }
    }
}

/// A fixed, ordered set of digit symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from its symbols, lowest digit first.
    ///
    /// Rejects alphabets with fewer than two symbols, repeated symbols, or
    /// whitespace/control characters (which would not survive a round trip
    /// through config files and shell arguments).
    pub fn new(symbols: &str) -> Result<Self, AlphabetError> {
        let chars: Vec<char> = symbols.chars().collect();
        if chars.len() < 2 {
            return Err(AlphabetError::TooShort(chars.len()));
        }
        let mut index = HashMap::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if c.is_whitespace() || c.is_control() {
                return Err(AlphabetError::InvalidSymbolChar(c));
            }
            if index.insert(c, i).is_some() {
                return Err(AlphabetError::DuplicateSymbol(c));
            }
        }
        Ok(Self {
            symbols: chars,
            index,
        })
    }

    pub fn from_preset(preset: Preset) -> Self {
        let symbols: Vec<char> = preset.symbols().chars().collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }

    pub fn decimal() -> Self {
        Self::from_preset(Preset::Decimal)
    }

    pub fn base36() -> Self {
        Self::from_preset(Preset::Base36)
    }

    pub fn base62() -> Self {
        Self::from_preset(Preset::Base62)
    }

    /// Number of symbols, i.e. the base.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: an alphabet has at least two symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn min_symbol(&self) -> char {
        self.symbols[0]
    }

    pub fn max_symbol(&self) -> char {
        self.symbols[self.symbols.len() - 1]
    }

    /// Digit value of the highest symbol (`len() - 1`).
    pub fn max_digit(&self) -> usize {
        self.symbols.len() - 1
    }

    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    pub fn symbol(&self, digit: usize) -> Option<char> {
        self.symbols.get(digit).copied()
    }

    /// Parse a key into its digit values.
    ///
    /// Fails on the first symbol outside the alphabet; nothing is stripped
    /// or substituted.
    pub fn digits(&self, key: &str) -> Result<Vec<usize>, AlphabetError> {
        key.chars()
            .enumerate()
            .map(|(offset, symbol)| {
                self.index_of(symbol)
                    .ok_or_else(|| AlphabetError::UnknownSymbol {
                        key: key.to_string(),
                        symbol,
                        offset,
                    })
            })
            .collect()
    }

    /// Render digit values back into a key.
    ///
    /// # Panics
    ///
    /// Panics if a digit is not below [`len`](Self::len).
    pub fn render(&self, digits: &[usize]) -> String {
        digits.iter().map(|&d| self.symbols[d]).collect()
    }

    /// Compare two keys in alphabet order.
    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering, AlphabetError> {
        Ok(self.digits(a)?.cmp(&self.digits(b)?))
    }

    /// Whether native string ordering agrees with alphabet order.
    ///
    /// When it does, callers can sort keys with plain `str` comparison.
    pub fn is_byte_ordered(&self) -> bool {
        self.symbols.windows(2).all(|w| w[0] < w[1])
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::base36()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Serialize for Alphabet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Alphabet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbols = String::deserialize(deserializer)?;
        Alphabet::new(&symbols).map_err(serde::de::Error::custom)
    }
}
