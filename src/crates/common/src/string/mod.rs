//! String formatting utilities
//!
//! Renders structured values as text and offers the small string helpers that
//! diagnostics code keeps reaching for.
//!
//! # Features
//!
//! - GUID and SID formatting (`format_guid`, `format_sid`)
//! - IPv4/IPv6 address formatting with optional routing prefix
//! - FILETIME formatting in local or pre-converted time
//! - Bitmask to label rendering (`format_flags`)
//! - Join, tokenize, lower, trim, summary, key/value splitting, lexical cast
//!
//! # Example
//!
//! ```rust
//! use common::string::{format_ipv4_prefix, join, summary, tokenize};
//!
//! let parts = tokenize("alpha;beta;;gamma", ";");
//! assert_eq!(join(&parts, "/"), "alpha/beta/gamma");
//! assert_eq!(format_ipv4_prefix(0x0A00_0001, 8), "10.0.0.1/8");
//! assert_eq!(summary("a rather long message", 10).unwrap(), "a rathe...");
//! ```

mod flags;
mod ident;
mod lexical;
mod net;
mod time;
mod trim;

use std::collections::HashMap;

use crate::{CommonError, Result};

pub use crate::config::DEFAULT_DELIMITER;
pub use flags::{format_flags, format_flags_with};
pub use ident::{
    format_guid, format_guid_bytes, format_sid, Guid, Sid, SID_MAX_SUB_AUTHORITIES, SID_REVISION,
};
pub use lexical::lexical_cast;
pub use net::{format_ipv4, format_ipv4_prefix, format_ipv6, format_ipv6_prefix};
pub use time::{
    filetime_from_datetime, filetime_to_utc, format_local_time, format_time, format_time_with,
    FILETIME_TICKS_PER_SEC, FILETIME_UNIX_EPOCH_SECS,
};
pub use trim::{trim_right, TrimRight, TRIM_CHARS, WIDE_TRIM_CHARS};

/// Appended by [`summary`] to truncated text
pub const SUMMARY_PADDING: &str = "...";

/// Mapping produced by [`split_key_value_pairs`]
pub type KeyValuePairs = HashMap<String, String>;

/// Join `parts` with `delimiter` between each element
///
/// ```rust
/// use common::string::{join, DEFAULT_DELIMITER};
///
/// assert_eq!(join(&["a", "b", "c"], "-"), "a-b-c");
/// assert_eq!(join(&["only"], DEFAULT_DELIMITER), "only");
/// assert_eq!(join::<&str>(&[], DEFAULT_DELIMITER), "");
/// ```
pub fn join<S: AsRef<str>>(parts: &[S], delimiter: &str) -> String {
    match parts {
        [] => String::new(),
        [single] => single.as_ref().to_string(),
        _ => {
            let size = parts
                .iter()
                .map(|part| part.as_ref().len() + delimiter.len())
                .sum();
            let mut joined = String::with_capacity(size);

            for (index, part) in parts.iter().enumerate() {
                if index > 0 {
                    joined.push_str(delimiter);
                }
                joined.push_str(part.as_ref());
            }

            joined
        }
    }
}

/// Lower-case copy of `text`
pub fn lower(text: &str) -> String {
    text.to_lowercase()
}

/// Split on any of the `delimiters` characters, dropping empty tokens
///
/// ```rust
/// use common::string::tokenize;
///
/// assert_eq!(tokenize("a,,b, c", ","), vec!["a", "b", " c"]);
/// assert!(tokenize("", ",").is_empty());
/// ```
pub fn tokenize(text: &str, delimiters: &str) -> Vec<String> {
    text.split(|c: char| delimiters.contains(c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Narrow `text` to single bytes, replacing anything above U+00FF with `?`
pub fn to_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Widen single bytes to the characters with the same value
pub fn to_wide(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Shorten `text` to at most `max` characters
///
/// Text that already fits is returned unchanged; longer text keeps its first
/// `max - 3` characters followed by `...`. A budget below the padding length
/// is rejected with [`CommonError::Argument`] regardless of the input.
pub fn summary(text: &str, max: usize) -> Result<String> {
    let padding_len = SUMMARY_PADDING.chars().count();
    if max < padding_len {
        return Err(CommonError::Argument(format!(
            "Requested summary is too short: {} < {}",
            max, padding_len
        )));
    }

    match text.char_indices().nth(max) {
        None => Ok(text.to_string()),
        Some(_) => {
            let mut summarized: String = text.chars().take(max - padding_len).collect();
            summarized.push_str(SUMMARY_PADDING);
            Ok(summarized)
        }
    }
}

/// Split `key=value` strings on the first `=`
///
/// A string without `=` becomes a key with an empty value. When a key
/// repeats, the first value is kept.
///
/// ```rust
/// use common::string::split_key_value_pairs;
///
/// let pairs = split_key_value_pairs(&["a=1", "b", "c=x=y"]);
/// assert_eq!(pairs["a"], "1");
/// assert_eq!(pairs["b"], "");
/// assert_eq!(pairs["c"], "x=y");
/// ```
pub fn split_key_value_pairs<S: AsRef<str>>(pairs: &[S]) -> KeyValuePairs {
    let mut result = KeyValuePairs::with_capacity(pairs.len());

    for pair in pairs {
        let (key, value) = pair.as_ref().split_once('=').unwrap_or((pair.as_ref(), ""));
        result
            .entry(key.to_string())
            .or_insert_with(|| value.to_string());
    }

    result
}

/// Whether `hay` starts with `needle`
pub fn begins_with<T: PartialEq>(hay: &[T], needle: &[T]) -> bool {
    hay.starts_with(needle)
}
