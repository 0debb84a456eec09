//! In-memory table and its mutation operations.

use std::mem;

use tracing::trace;

use crate::error::{Error, Rejected, Result};
use crate::format::{Header, ENTRY_COUNT_SENTINEL};

/// One key/value pair. Both buffers are owned by the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Entry {
    pub fn new(key: Vec<u8>, value: Vec<u8>) -> Self {
        Self { key, value }
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.key, self.value)
    }
}

/// A decoded fixed-width binary table.
///
/// Every key is exactly `key_width` bytes and every value exactly
/// `value_width` bytes. Entries keep wire order; an index is an ordinal
/// position and shifts when an earlier entry is removed.
///
/// The entry count is `entries.len()`, so the header returned by
/// [`header`](Table::header) can never disagree with the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    key_width: u32,
    value_width: u32,
    entries: Vec<Entry>,
}

impl Table {
    /// Creates an empty table for incremental building.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyWidth`] or [`Error::InvalidValueWidth`] if either
    /// width is zero.
    pub fn new(key_width: u32, value_width: u32) -> Result<Self> {
        if key_width == 0 {
            return Err(Error::InvalidKeyWidth);
        }
        if value_width == 0 {
            return Err(Error::InvalidValueWidth);
        }
        Ok(Self {
            key_width,
            value_width,
            entries: Vec::new(),
        })
    }

    /// Builds a table from a validated header and entries read off the wire.
    pub(crate) fn from_parts(header: &Header, entries: Vec<Entry>) -> Self {
        debug_assert_eq!(entries.len(), header.entry_count as usize);
        Self {
            key_width: header.key_width,
            value_width: header.value_width,
            entries,
        }
    }

    /// Returns the header describing this table in its current state.
    pub fn header(&self) -> Header {
        // set() refuses to grow past the sentinel, so the count fits in u32.
        let entry_count = u32::try_from(self.entries.len()).unwrap_or(ENTRY_COUNT_SENTINEL);
        Header::new(self.key_width, self.value_width, entry_count)
    }

    pub fn key_width(&self) -> u32 {
        self.key_width
    }

    pub fn value_width(&self) -> u32 {
        self.value_width
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`, if any.
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Iterates over entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|e| e.key.as_slice())
    }

    pub fn values(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|e| e.value.as_slice())
    }

    /// Returns the lowest index whose key equals `key`.
    ///
    /// A key of the wrong width, including an empty one, is never found.
    pub fn find(&self, key: &[u8]) -> Option<usize> {
        if key.len() != self.key_width as usize {
            return None;
        }
        self.entries.iter().position(|e| e.key == key)
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.find(key).map(|i| self.entries[i].value.as_slice())
    }

    /// Inserts or replaces the value for `key`, taking ownership of both buffers.
    ///
    /// An existing key is overwritten in place when `replace_existing` is set
    /// and the displaced entry is returned. A new key is appended at the end.
    ///
    /// # Errors
    ///
    /// On any error the table is unchanged and the key and value come back
    /// inside [`Rejected`]:
    ///
    /// - [`Error::NullInput`] if either buffer is empty.
    /// - [`Error::InvalidKeyWidth`] / [`Error::InvalidValueWidth`] if a buffer
    ///   does not match the table's widths.
    /// - [`Error::DuplicateKey`] if the key exists and `replace_existing` is false.
    /// - [`Error::TableFull`] if appending would reach the sentinel count.
    /// - [`Error::AllocationFailure`] if the entry list cannot grow.
    pub fn set(
        &mut self,
        key: Vec<u8>,
        value: Vec<u8>,
        replace_existing: bool,
    ) -> std::result::Result<Option<Entry>, Rejected> {
        if let Err(e) = self.check_widths(&key, &value) {
            return Err(Rejected::new(e, key, value));
        }

        match self.find(&key) {
            Some(_) if !replace_existing => Err(Rejected::new(Error::DuplicateKey, key, value)),
            Some(index) => {
                trace!(index, "replacing entry");
                let old = mem::replace(&mut self.entries[index], Entry::new(key, value));
                Ok(Some(old))
            }
            None => {
                self.append(self.entries.len(), key, value)?;
                Ok(None)
            }
        }
    }

    /// Appends a new entry to a table currently holding `len` entries.
    fn append(
        &mut self,
        len: usize,
        key: Vec<u8>,
        value: Vec<u8>,
    ) -> std::result::Result<(), Rejected> {
        if let Err(e) = check_capacity(len) {
            return Err(Rejected::new(e, key, value));
        }
        if self.entries.try_reserve(1).is_err() {
            return Err(Rejected::new(Error::AllocationFailure, key, value));
        }
        trace!(index = len, "appending entry");
        self.entries.push(Entry::new(key, value));
        Ok(())
    }

    /// Removes the entry stored under `key` and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no entry has this key.
    pub fn remove_by_key(&mut self, key: &[u8]) -> Result<Entry> {
        let index = self.find(key).ok_or(Error::KeyNotFound)?;
        self.remove_by_index(index)
    }

    /// Removes the entry at `index` and returns it.
    ///
    /// Every later entry moves down one position.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `index < len()`.
    pub fn remove_by_index(&mut self, index: usize) -> Result<Entry> {
        let len = self.entries.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }
        trace!(index, "removing entry");
        Ok(self.entries.remove(index))
    }

    fn check_widths(&self, key: &[u8], value: &[u8]) -> Result<()> {
        if key.is_empty() || value.is_empty() {
            return Err(Error::NullInput);
        }
        if key.len() != self.key_width as usize {
            return Err(Error::InvalidKeyWidth);
        }
        if value.len() != self.value_width as usize {
            return Err(Error::InvalidValueWidth);
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Refuses to grow a table of `len` entries once `len + 1` would hit the sentinel.
fn check_capacity(len: usize) -> Result<()> {
    if (len as u64).saturating_add(1) >= u64::from(ENTRY_COUNT_SENTINEL) {
        return Err(Error::TableFull);
    }
    Ok(())
}
