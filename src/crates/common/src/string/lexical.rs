//! Stream-style parsing of primitives from text

use std::str::FromStr;

/// Parse the leading value of `text` as `T`, the way a text stream would
///
/// Leading whitespace is skipped and only the first whitespace-delimited
/// token is considered. The longest prefix of that token that parses as `T`
/// wins, so `"42abc"` yields `42`. A prefix that stops inside a run of
/// digits means the whole number does not fit `T`, which gives `T::default()`
/// like any other unparseable input; failure is never reported.
///
/// # Example
///
/// ```rust
/// use common::string::lexical_cast;
///
/// assert_eq!(lexical_cast::<u32>("  42 apples"), 42);
/// assert_eq!(lexical_cast::<i64>("-7px"), -7);
/// assert_eq!(lexical_cast::<u8>("none"), 0);
/// assert_eq!(lexical_cast::<u8>("300"), 0);
/// assert_eq!(lexical_cast::<String>("first second"), "first");
/// ```
pub fn lexical_cast<T>(text: &str) -> T
where
    T: FromStr + Default,
{
    let token = match text.split_whitespace().next() {
        Some(token) => token,
        None => return T::default(),
    };

    if let Ok(value) = token.parse::<T>() {
        return value;
    }

    token
        .char_indices()
        .rev()
        .find_map(|(index, next)| {
            token[..index]
                .parse::<T>()
                .ok()
                .map(|value| (value, next.is_ascii_digit()))
        })
        .and_then(|(value, cut_digits)| (!cut_digits).then_some(value))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_cast_integers() {
        assert_eq!(lexical_cast::<i32>("123"), 123);
        assert_eq!(lexical_cast::<i32>("  -15\n"), -15);
        assert_eq!(lexical_cast::<u16>("80 443"), 80);
    }

    #[test]
    fn test_lexical_cast_partial() {
        assert_eq!(lexical_cast::<u32>("12ab"), 12);
        assert_eq!(lexical_cast::<f64>("2.5kg"), 2.5);
    }

    #[test]
    fn test_lexical_cast_unparseable_is_default() {
        assert_eq!(lexical_cast::<u32>("abc"), 0);
        assert_eq!(lexical_cast::<u32>(""), 0);
        assert_eq!(lexical_cast::<u32>("   "), 0);
        assert!(!lexical_cast::<bool>("yes"));
    }

    #[test]
    fn test_lexical_cast_overflow_is_default() {
        assert_eq!(lexical_cast::<u8>("300"), 0);
        assert_eq!(lexical_cast::<i32>("99999999999"), 0);
        assert_eq!(lexical_cast::<u8>("300px"), 0);
        assert_eq!(lexical_cast::<u8>("255px"), 255);
    }

    #[test]
    fn test_lexical_cast_strings_and_bools() {
        assert_eq!(lexical_cast::<String>("  hello world"), "hello");
        assert!(lexical_cast::<bool>("true"));
    }
}
