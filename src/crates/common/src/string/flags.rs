//! Bitmask to label rendering

use std::ops::{BitAnd, BitAndAssign, Not};

use super::join;
use crate::config::{FormatConfig, DEFAULT_DELIMITER, DEFAULT_UNREPRESENTED_MARKER};

/// Render the labels of every definition present in `flags`
///
/// Definitions are visited in order. A definition matches when it shares a
/// bit with the flags that are still unclaimed; its bits are then removed, so
/// overlapping masks only match once. Bits that no definition claims show up
/// as a trailing `[...]`.
///
/// # Example
///
/// ```rust
/// use common::string::format_flags;
///
/// let definitions = [(0x1u32, "READ"), (0x2, "WRITE"), (0x4, "EXECUTE")];
///
/// assert_eq!(format_flags(&definitions, 0x3), "READ, WRITE");
/// assert_eq!(format_flags(&definitions, 0x11), "READ, [...]");
/// assert_eq!(format_flags(&definitions, 0), "");
/// ```
pub fn format_flags<T, S>(definitions: &[(T, S)], flags: T) -> String
where
    T: Copy + Default + PartialEq + BitAnd<Output = T> + BitAndAssign + Not<Output = T>,
    S: AsRef<str>,
{
    render_flags(definitions, flags, DEFAULT_DELIMITER, DEFAULT_UNREPRESENTED_MARKER)
}

/// [`format_flags`] using the delimiter and marker from `config`
pub fn format_flags_with<T, S>(config: &FormatConfig, definitions: &[(T, S)], flags: T) -> String
where
    T: Copy + Default + PartialEq + BitAnd<Output = T> + BitAndAssign + Not<Output = T>,
    S: AsRef<str>,
{
    render_flags(definitions, flags, &config.delimiter, &config.unrepresented_marker)
}

fn render_flags<T, S>(definitions: &[(T, S)], flags: T, delimiter: &str, marker: &str) -> String
where
    T: Copy + Default + PartialEq + BitAnd<Output = T> + BitAndAssign + Not<Output = T>,
    S: AsRef<str>,
{
    let none = T::default();
    let mut remaining = flags;
    let mut present = Vec::new();

    for (mask, label) in definitions {
        if remaining & *mask != none {
            present.push(label.as_ref());
            remaining &= !*mask;
        }
    }

    if remaining != none {
        present.push(marker);
    }

    join(&present, delimiter)
}
