use std::io::{Result as IoResult, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::format::HEADER_SIZE;
use crate::table::Table;

impl Table {
    /// Exact number of bytes [`serialize`] produces for this table.
    ///
    /// Returns `None` if the size does not fit in `usize`.
    pub fn serialized_len(&self) -> Option<usize> {
        let body = self.header().body_len()?;
        usize::try_from(body).ok()?.checked_add(HEADER_SIZE)
    }

    /// Writes the header followed by every pair in index order.
    ///
    /// Integers are always big-endian; the table itself is not touched.
    pub fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        self.header().write(w)?;
        for entry in self {
            w.write_all(&entry.key)?;
            w.write_all(&entry.value)?;
        }
        Ok(())
    }
}

/// Serializes `table` into one contiguous buffer in wire layout.
///
/// # Errors
///
/// [`Error::AllocationFailure`] if the output buffer cannot be allocated.
pub fn serialize(table: &Table) -> Result<Vec<u8>> {
    let len = table.serialized_len().ok_or(Error::AllocationFailure)?;

    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailure)?;
    table.write_to(&mut out)?;

    debug_assert_eq!(out.len(), len);
    debug!(bytes = len, entry_count = table.len(), "serialized table");
    Ok(out)
}
