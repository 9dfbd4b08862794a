//! IPv4 and IPv6 address rendering for diagnostics

use std::fmt::Write;
use std::net::Ipv4Addr;

/// Format an IPv4 address held in a `u32`
///
/// The most significant byte is the first octet.
///
/// ```rust
/// use common::string::format_ipv4;
///
/// assert_eq!(format_ipv4(0x0102_0304), "1.2.3.4");
/// ```
pub fn format_ipv4(ip: u32) -> String {
    Ipv4Addr::from(ip).to_string()
}

/// Format an IPv4 address followed by `/prefix`
///
/// Always prints all four octets. Good enough for logs, not a canonical
/// CIDR rendering.
pub fn format_ipv4_prefix(ip: u32, prefix: u8) -> String {
    format!("{}/{}", format_ipv4(ip), prefix)
}

/// Format 16 address bytes as eight colon separated hex groups
///
/// Groups are read big-endian and printed without leading zeros. Runs of
/// zero groups are NOT compressed to `::`.
///
/// ```rust
/// use common::string::format_ipv6;
///
/// let mut ip = [0u8; 16];
/// ip[1] = 1;
/// ip[15] = 0xff;
/// assert_eq!(format_ipv6(&ip), "1:0:0:0:0:0:0:ff");
/// ```
pub fn format_ipv6(ip: &[u8; 16]) -> String {
    let mut formatted = String::with_capacity(39);

    for (index, word) in ip.chunks_exact(2).enumerate() {
        if index > 0 {
            formatted.push(':');
        }
        let _ = write!(formatted, "{:x}", u16::from_be_bytes([word[0], word[1]]));
    }

    formatted
}

/// Format an IPv6 address followed by `/prefix`
///
/// Always prints all eight groups.
pub fn format_ipv6_prefix(ip: &[u8; 16], prefix: u8) -> String {
    format!("{}/{}", format_ipv6(ip), prefix)
}
