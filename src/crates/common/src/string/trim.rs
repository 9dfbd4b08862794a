//! Right trimming for narrow and wide strings

/// Characters stripped by [`trim_right`] from narrow strings
pub const TRIM_CHARS: &[char] = &['\r', '\n', '\t', ' '];

/// Characters stripped by [`trim_right`] from UTF-16 strings
pub const WIDE_TRIM_CHARS: &[u16] = &[0x0D, 0x0A, 0x09, 0x20];

/// Text types that know their own trim set
pub trait TrimRight {
    /// Owned form returned by trimming
    type Owned;

    /// Copy of `self` without trailing trim characters
    fn trim_right_owned(&self) -> Self::Owned;
}

impl TrimRight for str {
    type Owned = String;

    fn trim_right_owned(&self) -> String {
        self.trim_end_matches(TRIM_CHARS).to_string()
    }
}

impl TrimRight for [u16] {
    type Owned = Vec<u16>;

    fn trim_right_owned(&self) -> Vec<u16> {
        let end = self
            .iter()
            .rposition(|c| !WIDE_TRIM_CHARS.contains(c))
            .map_or(0, |index| index + 1);
        self[..end].to_vec()
    }
}

/// Strip trailing `\r`, `\n`, `\t` and spaces
///
/// Leading and interior whitespace is kept.
///
/// # Example
///
/// ```rust
/// use common::string::trim_right;
///
/// assert_eq!(trim_right(" abc \t\r\n"), " abc");
/// ```
pub fn trim_right<T: TrimRight + ?Sized>(text: &T) -> T::Owned {
    text.trim_right_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_trim_right_narrow() {
        assert_eq!(trim_right("abc \t\r\n"), "abc");
        assert_eq!(trim_right(""), "");
        assert_eq!(trim_right("   "), "");
        assert_eq!(trim_right("  a b  "), "  a b");
    }

    #[test]
    fn test_trim_right_only_trim_set() {
        // vertical tab and form feed are not in the set
        assert_eq!(trim_right("abc\u{0B}"), "abc\u{0B}");
        assert_eq!(trim_right("abc\u{0C} "), "abc\u{0C}");
    }

    #[test]
    fn test_trim_right_wide() {
        assert_eq!(trim_right(wide("abc \t\r\n").as_slice()), wide("abc"));
        assert_eq!(trim_right(wide("").as_slice()), wide(""));
        assert_eq!(trim_right(wide(" \r\n").as_slice()), wide(""));
        assert_eq!(trim_right(wide(" x y ").as_slice()), wide(" x y"));
    }
}
