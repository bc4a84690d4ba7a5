//! Fractional position generator.
//!
//! A position key is read as a base-N fraction `0.d₁d₂d₃…` where each digit is
//! a symbol's index in the [`Alphabet`]. Because keys can always grow another
//! digit, there is room between any two distinct keys and before or after any
//! key; no sibling ever needs renumbering.
//!
//! ## Well-formed keys
//!
//! A key is accepted only if it is non-empty, every symbol is in the alphabet,
//! and it does **not** end with the minimum symbol. Under lexicographic order
//! nothing sorts strictly between `"1"` and `"10"`, so allowing a trailing
//! minimum would break density. Every key this module returns is well-formed.
//!
//! ## Boundary rules
//!
//! Examples use the decimal alphabet.
//!
//! | Call | First digit | Result |
//! |------|-------------|--------|
//! | `position_before("57")` | above `1` | `"4"` |
//! | `position_before("1")` | `1` | `"09"` (minimum, then maximum) |
//! | `position_before("05")` | minimum | `"0"` + `position_before("5")` = `"04"` |
//! | `position_after("57")` | below maximum | `"6"` |
//! | `position_after("9")` | maximum, nothing after | `"91"` |
//! | `position_after("95")` | maximum | `"9"` + `position_after("5")` = `"96"` |
//!
//! `position_between` strips the shared prefix, then takes the mean digit at
//! the first difference. When those digits are adjacent it either stops at the
//! high key's first digit (if the high key continues) or keeps the low digit
//! and descends one more digit toward the open upper bound:
//! `position_between("1", "2")` is `"15"`, `position_between("49", "5")` is
//! `"495"`.

use crate::alphabet::{Alphabet, AlphabetError};
use log::{debug, trace};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
    #[error("Position key must not be empty")]
    EmptyKey,
    #[error("Position key {key:?} ends with the minimum symbol {min:?}")]
    TrailingMinimum { key: String, min: char },
    #[error("Low key {low:?} must sort strictly before high key {high:?}")]
    NotAscending { low: String, high: String },
}

/// Generates position keys over a fixed alphabet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Positioner {
    alphabet: Alphabet,
}

impl Positioner {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Check that `key` is a well-formed position key.
    pub fn validate(&self, key: &str) -> Result<(), PositionError> {
        self.parse(key).map(|_| ())
    }

    /// Key for the only member of an empty list: the middle symbol.
    pub fn first_position(&self) -> String {
        let key = self.alphabet.render(&midpoint(&[], None, self.alphabet.len()));
        debug!("first position -> {key:?}");
        key
    }

    /// A key that sorts strictly before `key`.
    pub fn position_before(&self, key: &str) -> Result<String, PositionError> {
        let digits = self.parse(key)?;
        let out = self
            .alphabet
            .render(&before_digits(&digits, self.alphabet.max_digit()));
        debug!("before {key:?} -> {out:?}");
        Ok(out)
    }

    /// A key that sorts strictly after `key`.
    pub fn position_after(&self, key: &str) -> Result<String, PositionError> {
        let digits = self.parse(key)?;
        let out = self
            .alphabet
            .render(&after_digits(&digits, self.alphabet.max_digit()));
        debug!("after {key:?} -> {out:?}");
        Ok(out)
    }

    /// A key strictly between `low` and `high`.
    ///
    /// `low` must sort strictly before `high`; otherwise this returns
    /// [`PositionError::NotAscending`] rather than guessing an order.
    pub fn position_between(&self, low: &str, high: &str) -> Result<String, PositionError> {
        let lo = self.parse(low)?;
        let hi = self.parse(high)?;
        if lo >= hi {
            return Err(PositionError::NotAscending {
                low: low.to_string(),
                high: high.to_string(),
            });
        }
        let out = self
            .alphabet
            .render(&midpoint(&lo, Some(hi.as_slice()), self.alphabet.len()));
        debug!("between {low:?} and {high:?} -> {out:?}");
        Ok(out)
    }

    /// Key for a slot with optional neighbours.
    ///
    /// No neighbours gives [`first_position`](Self::first_position); a single
    /// neighbour maps to [`position_before`](Self::position_before) or
    /// [`position_after`](Self::position_after).
    pub fn position_in(
        &self,
        low: Option<&str>,
        high: Option<&str>,
    ) -> Result<String, PositionError> {
        match (low, high) {
            (None, None) => Ok(self.first_position()),
            (None, Some(high)) => self.position_before(high),
            (Some(low), None) => self.position_after(low),
            (Some(low), Some(high)) => self.position_between(low, high),
        }
    }

    /// `n` ascending keys strictly inside the interval `(low, high)`.
    ///
    /// Missing bounds are open. Keys are placed by recursive bisection, so
    /// their length grows with `log n` rather than `n`.
    pub fn positions_between(
        &self,
        low: Option<&str>,
        high: Option<&str>,
        n: usize,
    ) -> Result<Vec<String>, PositionError> {
        let lo = low.map(|k| self.parse(k)).transpose()?;
        let hi = high.map(|k| self.parse(k)).transpose()?;
        if let (Some(l), Some(h)) = (&lo, &hi) {
            if l >= h {
                return Err(PositionError::NotAscending {
                    low: low.unwrap_or_default().to_string(),
                    high: high.unwrap_or_default().to_string(),
                });
            }
        }
        let mut digits = Vec::with_capacity(n);
        bisect(
            lo.as_deref(),
            hi.as_deref(),
            n,
            self.alphabet.len(),
            &mut digits,
        );
        debug!("spread {n} keys between {low:?} and {high:?}");
        Ok(digits.iter().map(|d| self.alphabet.render(d)).collect())
    }

    /// Validate `key` and return its digit values.
    pub fn parse(&self, key: &str) -> Result<Vec<usize>, PositionError> {
        if key.is_empty() {
            return Err(PositionError::EmptyKey);
        }
        let digits = self.alphabet.digits(key)?;
        if digits.last() == Some(&0) {
            return Err(PositionError::TrailingMinimum {
                key: key.to_string(),
                min: self.alphabet.min_symbol(),
            });
        }
        Ok(digits)
    }
}

static DEFAULT: LazyLock<Positioner> = LazyLock::new(Positioner::default);

/// [`Positioner::position_before`] over the default base36 alphabet.
pub fn position_before(key: &str) -> Result<String, PositionError> {
    DEFAULT.position_before(key)
}

/// [`Positioner::position_after`] over the default base36 alphabet.
pub fn position_after(key: &str) -> Result<String, PositionError> {
    DEFAULT.position_after(key)
}

/// [`Positioner::position_between`] over the default base36 alphabet.
pub fn position_between(low: &str, high: &str) -> Result<String, PositionError> {
    DEFAULT.position_between(low, high)
}

// Digit-level arithmetic. Inputs are well-formed (non-empty, no trailing 0).

fn before_digits(key: &[usize], max: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(key.len() + 1);
    for &d in key {
        match d {
            0 => out.push(0),
            1 => {
                out.push(0);
                out.push(max);
                return out;
            }
            _ => {
                out.push(d - 1);
                return out;
            }
        }
    }
    out
}

fn after_digits(key: &[usize], max: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(key.len() + 1);
    for &d in key {
        if d < max {
            out.push(d + 1);
            return out;
        }
        out.push(max);
    }
    out.push(1);
    out
}

/// Digits strictly between `low` and `high`, where `None` is the open upper
/// bound and an empty `low` is the open lower bound.
fn midpoint(mut low: &[usize], mut high: Option<&[usize]>, base: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(low.len() + 1);
    loop {
        if let Some(h) = high {
            // Missing low digits read as the minimum.
            let shared = h
                .iter()
                .enumerate()
                .take_while(|&(i, &d)| low.get(i).copied().unwrap_or(0) == d)
                .count();
            out.extend_from_slice(&h[..shared]);
            low = low.get(shared..).unwrap_or(&[]);
            high = Some(&h[shared..]);
        }
        let lo = low.first().copied().unwrap_or(0);
        let hi = match high {
            Some(h) => {
                debug_assert!(!h.is_empty(), "low must sort before high");
                h.first().copied().unwrap_or(base)
            }
            None => base,
        };
        if hi - lo > 1 {
            out.push((lo + hi + 1) / 2);
            return out;
        }
        match high {
            Some(h) if h.len() > 1 => {
                out.push(h[0]);
                return out;
            }
            _ => {
                trace!("adjacent digits {lo} and {hi}, descending");
                out.push(lo);
                low = low.get(1..).unwrap_or(&[]);
                high = None;
            }
        }
    }
}

fn bisect(
    low: Option<&[usize]>,
    high: Option<&[usize]>,
    n: usize,
    base: usize,
    out: &mut Vec<Vec<usize>>,
) {
    if n == 0 {
        return;
    }
    let mid = midpoint(low.unwrap_or(&[]), high, base);
    let left = (n - 1) / 2;
    bisect(low, Some(mid.as_slice()), left, base, out);
    out.push(mid.clone());
    bisect(Some(mid.as_slice()), high, n - 1 - left, base, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn decimal() -> Positioner {
        Positioner::new(Alphabet::decimal())
    }

    // =========================================================================
    // position_before
    // =========================================================================

    #[test]
    fn before_decrements_first_digit() {
        let p = decimal();
        assert_eq!(p.position_before("5").unwrap(), "4");
        assert_eq!(p.position_before("2").unwrap(), "1");
        assert_eq!(p.position_before("57").unwrap(), "4");
    }

    #[test]
    fn before_lowest_nonzero_digit_extends() {
        let p = decimal();
        assert_eq!(p.position_before("1").unwrap(), "09");
        assert_eq!(p.position_before("15").unwrap(), "09");
    }

    #[test]
    fn before_leading_minimum_prepends() {
        let p = decimal();
        assert_eq!(p.position_before("05").unwrap(), "04");
        assert_eq!(p.position_before("01").unwrap(), "009");
        assert_eq!(p.position_before("0001").unwrap(), "00009");
    }

    #[test]
    fn before_chain_stays_ordered() {
        let p = decimal();
        let mut key = "5".to_string();
        let mut keys = vec![key.clone()];
        for _ in 0..100 {
            key = p.position_before(&key).unwrap();
            keys.push(key.clone());
        }
        keys.reverse();
        assert_strictly_ascending(p.alphabet(), &keys);
        assert_all_well_formed(&p, &keys);
    }

    // =========================================================================
    // position_after
    // =========================================================================

    #[test]
    fn after_increments_first_digit() {
        let p = decimal();
        assert_eq!(p.position_after("5").unwrap(), "6");
        assert_eq!(p.position_after("57").unwrap(), "6");
        assert_eq!(p.position_after("19").unwrap(), "2");
    }

    #[test]
    fn after_maximum_extends() {
        let p = decimal();
        assert_eq!(p.position_after("9").unwrap(), "91");
        assert_eq!(p.position_after("999").unwrap(), "9991");
        assert_eq!(p.position_after("95").unwrap(), "96");
    }

    #[test]
    fn after_chain_stays_ordered() {
        let p = decimal();
        let mut key = "5".to_string();
        let mut keys = vec![key.clone()];
        for _ in 0..100 {
            key = p.position_after(&key).unwrap();
            keys.push(key.clone());
        }
        assert_strictly_ascending(p.alphabet(), &keys);
        assert_all_well_formed(&p, &keys);
    }

    // =========================================================================
    // position_between
    // =========================================================================

    #[test]
    fn between_wide_gap_takes_mean_digit() {
        let p = decimal();
        assert_eq!(p.position_between("1", "9").unwrap(), "5");
        assert_eq!(p.position_between("1", "3").unwrap(), "2");
    }

    #[test]
    fn between_adjacent_digits_descends() {
        let p = decimal();
        assert_eq!(p.position_between("1", "2").unwrap(), "15");
        assert_eq!(p.position_between("12", "13").unwrap(), "125");
        assert_eq!(p.position_between("49", "5").unwrap(), "495");
        assert_eq!(p.position_between("09", "1").unwrap(), "095");
    }

    #[test]
    fn between_adjacent_with_longer_high_uses_high_digit() {
        let p = decimal();
        assert_eq!(p.position_between("1", "25").unwrap(), "2");
    }

    #[test]
    fn between_prefix_and_extension() {
        let p = decimal();
        assert_eq!(p.position_between("1", "15").unwrap(), "13");
        assert_eq!(p.position_between("1", "11").unwrap(), "105");
    }

    #[test]
    fn between_rejects_equal_keys() {
        let err = decimal().position_between("5", "5").unwrap_err();
        assert!(matches!(err, PositionError::NotAscending { .. }));
    }

    #[test]
    fn between_rejects_reversed_keys() {
        let err = decimal().position_between("6", "5").unwrap_err();
        assert_eq!(
            err,
            PositionError::NotAscending {
                low: "6".into(),
                high: "5".into(),
            }
        );
    }

    #[test]
    fn between_shrinking_interval_never_exhausts() {
        let p = decimal();
        let low = "1".to_string();
        let mut high = "2".to_string();
        for _ in 0..500 {
            let mid = p.position_between(&low, &high).unwrap();
            assert_between(p.alphabet(), &low, &mid, &high);
            p.validate(&mid).unwrap();
            high = mid;
        }
    }

    #[test]
    fn between_shrinking_from_below_never_exhausts() {
        let p = decimal();
        let mut low = "1".to_string();
        let high = "2".to_string();
        for _ in 0..500 {
            let mid = p.position_between(&low, &high).unwrap();
            assert_between(p.alphabet(), &low, &mid, &high);
            low = mid;
        }
    }

    #[test]
    fn between_is_deterministic() {
        let p = Positioner::default();
        let a = p.position_between("a1", "a2").unwrap();
        let b = p.position_between("a1", "a2").unwrap();
        assert_eq!(a, b);
    }

    // =========================================================================
    // Input validation
    // =========================================================================

    #[test]
    fn empty_key_rejected() {
        assert_eq!(decimal().position_before(""), Err(PositionError::EmptyKey));
    }

    #[test]
    fn trailing_minimum_rejected() {
        let err = decimal().position_after("10").unwrap_err();
        assert_eq!(
            err,
            PositionError::TrailingMinimum {
                key: "10".into(),
                min: '0',
            }
        );
        assert!(decimal().validate("0").is_err());
    }

    #[test]
    fn foreign_symbol_rejected() {
        let err = decimal().position_between("1", "5x").unwrap_err();
        assert!(matches!(
            err,
            PositionError::Alphabet(AlphabetError::UnknownSymbol { symbol: 'x', .. })
        ));
    }

    // =========================================================================
    // Other alphabets
    // =========================================================================

    #[test]
    fn first_position_is_middle_symbol() {
        assert_eq!(decimal().first_position(), "5");
        assert_eq!(Positioner::default().first_position(), "i");
        assert_eq!(Positioner::new(Alphabet::base62()).first_position(), "V");
    }

    #[test]
    fn binary_alphabet_still_dense() {
        let p = Positioner::new(Alphabet::new("01").unwrap());
        assert_eq!(p.first_position(), "1");
        assert_eq!(p.position_before("1").unwrap(), "01");
        assert_eq!(p.position_after("1").unwrap(), "11");
        assert_eq!(p.position_between("01", "1").unwrap(), "011");

        let mut low = "01".to_string();
        for _ in 0..50 {
            let mid = p.position_between(&low, "1").unwrap();
            assert_between(p.alphabet(), &low, &mid, "1");
            low = mid;
        }
    }

    #[test]
    fn custom_order_alphabet() {
        // Descending code points: 'c' is the lowest digit.
        let p = Positioner::new(Alphabet::new("cba").unwrap());
        let before = p.position_before("b").unwrap();
        let after = p.position_after("b").unwrap();
        assert_strictly_ascending(p.alphabet(), &[before, "b".into(), after]);
        assert!(p.validate("bc").is_err());
    }

    #[test]
    fn free_functions_use_base36() {
        assert_eq!(position_before("m").unwrap(), "l");
        assert_eq!(position_after("m").unwrap(), "n");
        assert_eq!(position_after("z").unwrap(), "z1");
        assert_eq!(position_between("a", "b").unwrap(), "ai");
    }

    // =========================================================================
    // position_in / positions_between
    // =========================================================================

    #[test]
    fn position_in_dispatches_on_neighbours() {
        let p = decimal();
        assert_eq!(p.position_in(None, None).unwrap(), "5");
        assert_eq!(p.position_in(None, Some("5")).unwrap(), "4");
        assert_eq!(p.position_in(Some("5"), None).unwrap(), "6");
        assert_eq!(p.position_in(Some("1"), Some("2")).unwrap(), "15");
    }

    #[test]
    fn spread_open_interval() {
        let keys = decimal().positions_between(None, None, 3).unwrap();
        assert_eq!(keys, vec!["3", "5", "8"]);
    }

    #[test]
    fn spread_zero_is_empty() {
        assert!(decimal().positions_between(None, None, 0).unwrap().is_empty());
    }

    #[test]
    fn spread_stays_inside_bounds() {
        let p = decimal();
        let keys = p.positions_between(Some("1"), Some("2"), 40).unwrap();
        assert_eq!(keys.len(), 40);
        let mut all = vec!["1".to_string()];
        all.extend(keys.iter().cloned());
        all.push("2".to_string());
        assert_strictly_ascending(p.alphabet(), &all);
        assert_all_well_formed(&p, &keys);
    }

    #[test]
    fn spread_keys_grow_logarithmically() {
        let p = Positioner::default();
        let keys = p.positions_between(None, None, 1000).unwrap();
        let longest = keys.iter().map(|k| k.len()).max().unwrap();
        assert!(longest <= 6, "longest key was {longest}");
    }

    #[test]
    fn spread_rejects_inverted_bounds() {
        let err = decimal()
            .positions_between(Some("5"), Some("3"), 2)
            .unwrap_err();
        assert!(matches!(err, PositionError::NotAscending { .. }));
    }
}
