//! # fracpos
//!
//! Fractional position keys for ordered lists: ingredients, steps, sections,
//! calendar slots. Each member stores one opaque string; the list's order is
//! the ascending sort of those strings. Inserting or moving a member writes a
//! new key for that member only; siblings are never renumbered.
//!
//! ```
//! use fracpos::{position_after, position_before, position_between};
//!
//! let first = "i";
//! let last = position_after(first).unwrap();          // "j"
//! let middle = position_between(first, &last).unwrap(); // "ii"
//! let start = position_before(first).unwrap();        // "h"
//!
//! let mut keys = vec![&last, &middle, &start];
//! keys.sort();
//! assert_eq!(keys, vec![&start, &middle, &last]);
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`alphabet`] | Ordered digit tables, key parsing, alphabet-order comparison |
//! | [`position`] | The generator: before, after, between, first key, batch spread |
//! | [`ordering`] | List operations (insert at index, move, sort, verify) built on the generator |
//! | [`config`] | `fracpos.toml` loading, merging, and validation |
//! | [`types`] | Serializable records (`Placement`, `Generated`) and the `Positioned` trait |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Keys Are Base-N Fractions
//!
//! A key `d₁d₂…dₖ` is read as `0.d₁d₂…dₖ` in base N, where N is the alphabet
//! size. Lexicographic order of digit sequences is numeric order of those
//! fractions, with one exception: trailing minimum digits. `"1"` and `"10"` are
//! the same fraction but different strings, and nothing sorts between them.
//! Keys ending in the minimum symbol are therefore rejected as input and never
//! produced, which keeps the keyspace dense: any two distinct keys have room
//! between them, found by adding digits rather than by failing.
//!
//! ## Strings, Not Integers
//!
//! Fixed-width sequence numbers run out of room after enough inserts into the
//! same gap and then need a renumbering pass. Keys here have no length limit,
//! so arithmetic is done on digit vectors that grow by a digit whenever two
//! neighbours leave no symbol between them.
//!
//! ## ASCII-Ordered Presets
//!
//! The built-in alphabets list their symbols in ASCII order, so a database
//! `ORDER BY position` or a plain `str` sort agrees with alphabet order. Custom
//! alphabets are supported but lose that property unless they are also
//! ASCII-ordered ([`Alphabet::is_byte_ordered`]).
//!
//! ## Contract Violations Are Errors
//!
//! `position_between(low, high)` with `low >= high` returns
//! [`PositionError::NotAscending`]. Malformed keys return an error naming the
//! key and the offending symbol. Nothing is coerced, and no operation returns
//! a key that breaks the requested order.
//!
//! ## Concurrency Lives Outside
//!
//! Every operation is pure. Two clients that insert into the same slot from
//! the same stale neighbours compute the same key; detecting that is the job
//! of the store, and [`ordering::verify_order`] is the check it can run.

pub mod alphabet;
pub mod config;
pub mod ordering;
pub mod output;
pub mod position;
pub mod types;

pub use alphabet::{Alphabet, AlphabetError, Preset};
pub use ordering::{Moved, OrderingError};
pub use position::{PositionError, Positioner, position_after, position_before, position_between};
pub use types::{Placement, Positioned};

#[cfg(test)]
pub(crate) mod test_helpers;
