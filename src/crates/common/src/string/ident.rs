//! GUID and SID rendering

use uuid::Uuid;

use crate::{CommonError, Result};

/// Only SID revision in use
pub const SID_REVISION: u8 = 1;

/// Upper bound on sub-authorities in a SID
pub const SID_MAX_SUB_AUTHORITIES: usize = 15;

const SID_HEADER_LEN: usize = 8;

/// A GUID in its in-memory layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    /// Build a GUID from its four fields
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    /// Decode the 16-byte in-memory layout (first three fields little-endian)
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 16] = bytes.try_into().map_err(|_| {
            CommonError::Format(format!(
                "Failed to format GUID: expected 16 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Uuid::from_bytes_le(bytes).into())
    }

    /// View as a [`Uuid`]
    pub fn to_uuid(&self) -> Uuid {
        Uuid::from_fields(self.data1, self.data2, self.data3, &self.data4)
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        let (data1, data2, data3, data4) = uuid.as_fields();
        Self::new(data1, data2, data3, *data4)
    }
}

/// Format a GUID as `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`
///
/// ```rust
/// use common::string::{format_guid, Guid};
///
/// let guid = Guid::new(0x6B29FC40, 0xCA47, 0x1067, [0xB3, 0x1D, 0x00, 0xDD, 0x01, 0x06, 0x62, 0xDA]);
/// assert_eq!(format_guid(&guid), "{6B29FC40-CA47-1067-B31D-00DD010662DA}");
/// ```
pub fn format_guid(guid: &Guid) -> String {
    let mut buffer = Uuid::encode_buffer();
    guid.to_uuid().braced().encode_upper(&mut buffer).to_string()
}

/// Decode and format a GUID from its 16-byte in-memory layout
///
/// Fails with [`CommonError::Format`] when `bytes` is not exactly 16 bytes.
pub fn format_guid_bytes(bytes: &[u8]) -> Result<String> {
    Ok(format_guid(&Guid::from_bytes_le(bytes)?))
}

/// A security identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sid {
    pub revision: u8,
    /// 48-bit authority, big-endian
    pub identifier_authority: [u8; 6],
    pub sub_authorities: Vec<u32>,
}

impl Sid {
    /// Build a revision 1 SID from a numeric authority
    ///
    /// Only the low 48 bits of `authority` are kept.
    pub fn new(authority: u64, sub_authorities: Vec<u32>) -> Self {
        let mut identifier_authority = [0u8; 6];
        identifier_authority.copy_from_slice(&authority.to_be_bytes()[2..]);

        Self {
            revision: SID_REVISION,
            identifier_authority,
            sub_authorities,
        }
    }

    /// Decode the binary SID layout
    ///
    /// `revision, count, authority[6], sub_authority[count]` with
    /// sub-authorities little-endian. Trailing bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SID_HEADER_LEN {
            return Err(CommonError::Format(format!(
                "Failed to format SID: {} bytes is shorter than the header",
                bytes.len()
            )));
        }

        let count = bytes[1] as usize;
        let needed = SID_HEADER_LEN + count * 4;
        if bytes.len() < needed {
            return Err(CommonError::Format(format!(
                "Failed to format SID: {} sub-authorities need {} bytes, got {}",
                count,
                needed,
                bytes.len()
            )));
        }

        let mut identifier_authority = [0u8; 6];
        identifier_authority.copy_from_slice(&bytes[2..SID_HEADER_LEN]);

        let sub_authorities = bytes[SID_HEADER_LEN..needed]
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Self {
            revision: bytes[0],
            identifier_authority,
            sub_authorities,
        })
    }

    /// The identifier authority as a number
    pub fn authority(&self) -> u64 {
        self.identifier_authority
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
    }
}

/// Format a SID as `S-1-<authority>-<sub>-...`
///
/// Authorities that fit in 32 bits print in decimal, larger ones as
/// `0x` followed by twelve hex digits. Fails with [`CommonError::Format`]
/// for an unknown revision or too many sub-authorities.
///
/// ```rust
/// use common::string::{format_sid, Sid};
///
/// let admins = Sid::new(5, vec![32, 544]);
/// assert_eq!(format_sid(&admins).unwrap(), "S-1-5-32-544");
/// ```
pub fn format_sid(sid: &Sid) -> Result<String> {
    if sid.revision != SID_REVISION {
        return Err(CommonError::Format(format!(
            "Failed to format SID: unsupported revision {}",
            sid.revision
        )));
    }
    if sid.sub_authorities.len() > SID_MAX_SUB_AUTHORITIES {
        return Err(CommonError::Format(format!(
            "Failed to format SID: {} sub-authorities exceeds {}",
            sid.sub_authorities.len(),
            SID_MAX_SUB_AUTHORITIES
        )));
    }

    let authority = sid.authority();
    let mut formatted = if authority <= u64::from(u32::MAX) {
        format!("S-{}-{}", sid.revision, authority)
    } else {
        format!("S-{}-0x{:012X}", sid.revision, authority)
    };

    for sub_authority in &sid.sub_authorities {
        formatted.push('-');
        formatted.push_str(&sub_authority.to_string());
    }

    Ok(formatted)
}
