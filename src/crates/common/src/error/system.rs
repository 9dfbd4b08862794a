//! System error code to message translation

use std::io;

use tracing::debug;

use crate::string::{trim_right, TrimRight};

/// Produces the OS description of an error code
pub trait MessageSource {
    /// Message for `code`, or `None` when the OS has no text for it
    fn message(&self, code: u32) -> Option<String>;
}

/// [`MessageSource`] backed by the platform error string service
#[derive(Debug, Clone, Copy, Default)]
pub struct OsMessageSource;

impl MessageSource for OsMessageSource {
    fn message(&self, code: u32) -> Option<String> {
        // codes such as HRESULTs are unsigned, the OS takes the same bits as i32
        let raw = i32::from_ne_bytes(code.to_ne_bytes());
        let rendered = io::Error::from_raw_os_error(raw).to_string();
        let suffix = format!(" (os error {})", raw);
        let message = rendered.strip_suffix(suffix.as_str()).unwrap_or(&rendered);

        if message.is_empty()
            || message.starts_with("Unknown error")
            || message.starts_with("OS Error")
        {
            return None;
        }

        Some(message.to_string())
    }
}

/// Output encoding for system error text
pub trait TextEncoding {
    /// Encoded text type
    type Text;

    /// Encode UTF-8 text
    fn encode(text: &str) -> Self::Text;

    /// Strip trailing whitespace in this encoding
    fn trim(text: &Self::Text) -> Self::Text;
}

/// UTF-8 `String` output
#[derive(Debug, Clone, Copy)]
pub struct Narrow;

/// UTF-16 `Vec<u16>` output
#[derive(Debug, Clone, Copy)]
pub struct Wide;

impl TextEncoding for Narrow {
    type Text = String;

    fn encode(text: &str) -> String {
        text.to_string()
    }

    fn trim(text: &String) -> String {
        trim_right(text.as_str())
    }
}

impl TextEncoding for Wide {
    type Text = Vec<u16>;

    fn encode(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    fn trim(text: &Vec<u16>) -> Vec<u16> {
        text.as_slice().trim_right_owned()
    }
}

/// Message used when the OS has no text for `code`
pub fn fallback_message(code: u32) -> String {
    format!("System error 0x{:08x}", code)
}

/// Describe an OS error code
///
/// Falls back to `System error 0x%08x` when the OS has no message.
///
/// ```rust
/// use common::error::format_system_error;
///
/// let message = format_system_error(0xDEAD_BEEF);
/// assert!(!message.ends_with('\n'));
/// ```
pub fn format_system_error(code: u32) -> String {
    format_system_error_as::<Narrow>(code)
}

/// [`format_system_error`] as UTF-16
pub fn format_system_error_wide(code: u32) -> Vec<u16> {
    format_system_error_as::<Wide>(code)
}

/// Describe an OS error code in the encoding `E`
pub fn format_system_error_as<E: TextEncoding>(code: u32) -> E::Text {
    format_system_error_from::<E, _>(&OsMessageSource, code)
}

/// Describe `code` using a custom message source
pub fn format_system_error_from<E, M>(source: &M, code: u32) -> E::Text
where
    E: TextEncoding,
    M: MessageSource + ?Sized,
{
    match source.message(code) {
        Some(message) => E::trim(&E::encode(&message)),
        None => {
            debug!("No system message for code {:#x}, using fallback", code);
            E::encode(&fallback_message(code))
        }
    }
}
