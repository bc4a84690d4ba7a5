//! List operations expressed through the three position primitives.
//!
//! Siblings are passed as a slice already sorted by position. Every list
//! change maps onto one generated key:
//!
//! | Change | Key |
//! |--------|-----|
//! | insert into empty list | [`Positioner::first_position`] |
//! | insert at the start | `position_before(first)` |
//! | insert at the end | `position_after(last)` |
//! | insert between two members | `position_between(prev, next)` |
//! | move | delete at the old slot, then insert at the new slot |
//!
//! Only the moved or inserted member gets a new key. Nothing is renumbered.
//!
//! Two clients inserting into the same slot from stale data can produce the
//! same key. [`verify_order`] detects that after the fact; resolving it is
//! up to whoever owns the stored list.

use crate::alphabet::{Alphabet, AlphabetError};
use crate::position::{PositionError, Positioner};
use crate::types::Positioned;
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderingError {
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
    #[error("Index {index} is out of range for a list of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Duplicate position {key:?} at index {index}")]
    Duplicate { key: String, index: usize },
    #[error("Position {key:?} at index {index} sorts before its predecessor {previous:?}")]
    OutOfOrder {
        key: String,
        previous: String,
        index: usize,
    },
}

/// Result of [`key_for_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "key", rename_all = "lowercase")]
pub enum Moved {
    /// The member already sits in the requested slot; nothing to write.
    Unchanged,
    /// The member's new position key.
    #[serde(rename = "moved")]
    To(String),
}

/// Key for a new member inserted at `index` (`0..=len`).
pub fn key_for_insert<P: Positioned>(
    positioner: &Positioner,
    siblings: &[P],
    index: usize,
) -> Result<String, OrderingError> {
    if index > siblings.len() {
        return Err(OrderingError::IndexOutOfRange {
            index,
            len: siblings.len(),
        });
    }
    let low = index.checked_sub(1).map(|i| siblings[i].position());
    let high = siblings.get(index).map(Positioned::position);
    debug!("insert at {index} of {}", siblings.len());
    Ok(positioner.position_in(low, high)?)
}

/// Key for moving the member at `from` so it ends up at index `to`.
///
/// `to` indexes the list after the move, so both indices are in `0..len`.
pub fn key_for_move<P: Positioned>(
    positioner: &Positioner,
    siblings: &[P],
    from: usize,
    to: usize,
) -> Result<Moved, OrderingError> {
    let len = siblings.len();
    for index in [from, to] {
        if index >= len {
            return Err(OrderingError::IndexOutOfRange { index, len });
        }
    }
    if from == to {
        return Ok(Moved::Unchanged);
    }
    // Index into the list with the moved member taken out.
    let rest = |i: usize| if i < from { i } else { i + 1 };
    let low = to.checked_sub(1).map(|i| siblings[rest(i)].position());
    let high = (to < len - 1).then(|| siblings[rest(to)].position());
    debug!("move {from} -> {to} of {len}");
    Ok(Moved::To(positioner.position_in(low, high)?))
}

/// Sort members by position in alphabet order.
///
/// The sort is stable, so members that share a key keep their input order.
pub fn sort_by_position<P: Positioned>(
    alphabet: &Alphabet,
    items: Vec<P>,
) -> Result<Vec<P>, OrderingError> {
    let mut keyed = items
        .into_iter()
        .map(|item| Ok((alphabet.digits(item.position())?, item)))
        .collect::<Result<Vec<_>, AlphabetError>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

/// Check that every key is well-formed and the list is strictly ascending.
///
/// Reports the first duplicate or inversion found.
pub fn verify_order<P: Positioned>(
    positioner: &Positioner,
    items: &[P],
) -> Result<(), OrderingError> {
    let mut previous: Option<(Vec<usize>, &str)> = None;
    for (index, item) in items.iter().enumerate() {
        let key = item.position();
        let digits = positioner.parse(key)?;
        if let Some((prev_digits, prev_key)) = &previous {
            match prev_digits.cmp(&digits) {
                Ordering::Less => {}
                Ordering::Equal => {
                    return Err(OrderingError::Duplicate {
                        key: key.to_string(),
                        index,
                    });
                }
                Ordering::Greater => {
                    return Err(OrderingError::OutOfOrder {
                        key: key.to_string(),
                        previous: prev_key.to_string(),
                        index,
                    });
                }
            }
        }
        previous = Some((digits, key));
    }
    Ok(())
}
