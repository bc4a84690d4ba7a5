//! Shared test utilities for the fracpos test suite.
//!
//! Assertions panic with the offending keys spelled out, so a failing order
//! property shows exactly which neighbours broke.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let p = Positioner::new(Alphabet::decimal());
//! let mid = p.position_between("1", "2").unwrap();
//! assert_between(p.alphabet(), "1", &mid, "2");
//! ```

use std::cmp::Ordering;

use crate::alphabet::Alphabet;
use crate::position::Positioner;

/// Assert `keys` are strictly ascending in alphabet order.
pub fn assert_strictly_ascending(alphabet: &Alphabet, keys: &[String]) {
    for pair in keys.windows(2) {
        let ord = alphabet.compare(&pair[0], &pair[1]).unwrap();
        assert_eq!(
            ord,
            Ordering::Less,
            "expected {:?} < {:?} in {keys:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Assert `low < mid < high` in alphabet order.
pub fn assert_between(alphabet: &Alphabet, low: &str, mid: &str, high: &str) {
    assert_eq!(
        alphabet.compare(low, mid).unwrap(),
        Ordering::Less,
        "expected {low:?} < {mid:?}"
    );
    assert_eq!(
        alphabet.compare(mid, high).unwrap(),
        Ordering::Less,
        "expected {mid:?} < {high:?}"
    );
}

/// Assert every key is well-formed under `positioner`'s alphabet.
pub fn assert_all_well_formed(positioner: &Positioner, keys: &[String]) {
    for key in keys {
        if let Err(e) = positioner.validate(key) {
            panic!("generated malformed key {key:?}: {e}");
        }
    }
}
