//! FWBT wire constants and header read/write helpers.
//!
//! The header is always the **first 17 bytes** of a table:
//!
//! ```text
//! [signature: "FWBT"][version: u8][key_width: u32 BE][value_width: u32 BE][entry_count: u32 BE]
//! ```

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Result as IoResult, Write};

use crate::error::{Error, Result};

/// Signature bytes opening every table (ASCII "FWBT").
pub const SIGNATURE: [u8; 4] = *b"FWBT";

/// The only format version this crate reads and writes.
pub const VERSION: u8 = 1;

/// Version of the programmatic surface, independent of the wire version.
pub const API_VERSION: &str = "1.0";

/// Size of the header in bytes: 4 + 1 + 4 + 4 + 4.
pub const HEADER_SIZE: usize = 17;

pub const VERSION_OFFSET: usize = 4;
pub const KEY_WIDTH_OFFSET: usize = VERSION_OFFSET + 1;
pub const VALUE_WIDTH_OFFSET: usize = KEY_WIDTH_OFFSET + 4;
pub const ENTRY_COUNT_OFFSET: usize = VALUE_WIDTH_OFFSET + 4;
pub const BODY_OFFSET: usize = ENTRY_COUNT_OFFSET + 4;

/// Entry count reserved to mean "full". Never a legal count on the wire.
pub const ENTRY_COUNT_SENTINEL: u32 = u32::MAX;

/// Decoded table header. Integer fields are held in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub signature: [u8; 4],
    pub version: u8,
    pub key_width: u32,
    pub value_width: u32,
    pub entry_count: u32,
}

impl Header {
    pub fn new(key_width: u32, value_width: u32, entry_count: u32) -> Self {
        Self {
            signature: SIGNATURE,
            version: VERSION,
            key_width,
            value_width,
            entry_count,
        }
    }

    /// Decodes and validates the header at the start of `data`.
    ///
    /// Checks run in a fixed order: length, version, signature, then key
    /// width, value width and entry count. Bytes past the header are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::TooShort`], [`Error::UnsupportedVersion`],
    /// [`Error::NoSignature`], [`Error::InvalidKeyWidth`],
    /// [`Error::InvalidValueWidth`] or [`Error::InvalidEntryCount`].
    pub fn read(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::TooShort(data.len()));
        }

        let version = data[VERSION_OFFSET];
        if version != VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        if data[..VERSION_OFFSET] != SIGNATURE {
            return Err(Error::NoSignature);
        }

        let mut rdr = &data[KEY_WIDTH_OFFSET..BODY_OFFSET];
        let key_width = rdr.read_u32::<BigEndian>()?;
        let value_width = rdr.read_u32::<BigEndian>()?;
        let entry_count = rdr.read_u32::<BigEndian>()?;

        if key_width == 0 {
            return Err(Error::InvalidKeyWidth);
        }
        if value_width == 0 {
            return Err(Error::InvalidValueWidth);
        }
        if entry_count == ENTRY_COUNT_SENTINEL {
            return Err(Error::InvalidEntryCount);
        }

        Ok(Self::new(key_width, value_width, entry_count))
    }

    /// Writes the header to `w` with big-endian integers.
    pub fn write<W: Write>(&self, w: &mut W) -> IoResult<()> {
        w.write_all(&self.signature)?;
        w.write_u8(self.version)?;
        w.write_u32::<BigEndian>(self.key_width)?;
        w.write_u32::<BigEndian>(self.value_width)?;
        w.write_u32::<BigEndian>(self.entry_count)?;
        Ok(())
    }

    /// Bytes taken by one key/value pair.
    pub fn stride(&self) -> u64 {
        u64::from(self.key_width) + u64::from(self.value_width)
    }

    /// Expected body length: `entry_count * (key_width + value_width)`.
    ///
    /// Returns `None` on overflow.
    pub fn body_len(&self) -> Option<u64> {
        u64::from(self.entry_count).checked_mul(self.stride())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signature: {} ; Version: {}\nKey Width: {} ; Value Width: {} ; Entry Count: {}",
            String::from_utf8_lossy(&self.signature),
            self.version,
            self.key_width,
            self.value_width,
            self.entry_count
        )
    }
}
