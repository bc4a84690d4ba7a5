//! CLI output formatting.
//!
//! Generated keys are printed bare, one per line, so the CLI composes with
//! shell pipelines. Lists are shown as a positional index plus key, with the
//! record id or a marker as trailing context:
//!
//! ```text
//! 001 3
//! 002 35 (new)
//! 003 4
//! ```
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! do no I/O.

use crate::ordering::Moved;
use crate::types::{Placement, Positioned};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// One list line: index, key padded to `width`, optional trailing note.
fn list_line(index: usize, key: &str, width: usize, note: Option<&str>) -> String {
    match note {
        Some(n) => format!("{} {:<width$} {}", format_index(index), key, n),
        None => format!("{} {}", format_index(index), key),
    }
}

fn key_width<P: Positioned>(items: &[P]) -> usize {
    items.iter().map(|p| p.position().chars().count()).max().unwrap_or(0)
}

/// Keys, one per line.
pub fn format_keys(keys: &[String]) -> Vec<String> {
    keys.to_vec()
}

/// Sorted placements: index, position, id.
pub fn format_placements(items: &[Placement]) -> Vec<String> {
    let width = key_width(items);
    items
        .iter()
        .enumerate()
        .map(|(i, p)| list_line(i + 1, &p.position, width, Some(&p.id)))
        .collect()
}

/// The list after inserting `key` at `index`, with the new member marked.
pub fn format_insert(siblings: &[String], index: usize, key: &str) -> Vec<String> {
    let mut list: Vec<(&str, Option<&str>)> = siblings.iter().map(|k| (k.as_str(), None)).collect();
    list.insert(index.min(list.len()), (key, Some("(new)")));
    format_marked(&list)
}

/// The list after moving the member at `from` to `to`.
pub fn format_move(siblings: &[String], from: usize, to: usize, moved: &Moved) -> Vec<String> {
    match moved {
        Moved::Unchanged => {
            let key = siblings.get(from).map(String::as_str).unwrap_or_default();
            vec![format!("Position unchanged: {key}")]
        }
        Moved::To(key) => {
            let mut list: Vec<(&str, Option<&str>)> = siblings
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != from)
                .map(|(_, k)| (k.as_str(), None))
                .collect();
            list.insert(to.min(list.len()), (key.as_str(), Some("(moved)")));
            format_marked(&list)
        }
    }
}

fn format_marked(list: &[(&str, Option<&str>)]) -> Vec<String> {
    let width = list
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);
    list.iter()
        .enumerate()
        .map(|(i, (key, note))| list_line(i + 1, key, width, *note))
        .collect()
}

/// Summary line for a successful `check`.
pub fn format_check(count: usize) -> String {
    match count {
        1 => "1 key in order".to_string(),
        n => format!("{n} keys in order"),
    }
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
