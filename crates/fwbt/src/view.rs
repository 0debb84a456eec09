//! Borrowed, zero-copy access to a serialized table.
//!
//! [`TableView`] skips the exact body-size check and never copies: every key
//! and value is a slice of the input buffer and lives only as long as it.
//! Entries are not independently owned, so nothing here can be mutated. Call
//! [`TableView::to_table`] for an owned, mutable [`Table`].

use crate::error::{Error, Result};
use crate::format::{Header, HEADER_SIZE};
use crate::table::{Entry, Table};

/// A read-only table whose entries alias the buffer it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    header: Header,
    body: &'a [u8],
}

impl<'a> TableView<'a> {
    /// Validates the header and borrows the body of `data`.
    ///
    /// Bytes past the last declared entry are ignored.
    ///
    /// # Errors
    ///
    /// Any header error, or [`Error::InvalidBodySize`] if the body holds
    /// fewer than `entry_count` pairs.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = Header::read(data)?;
        let body = &data[HEADER_SIZE..];

        let actual = body.len() as u64;
        let expected = header.body_len().unwrap_or(u64::MAX);
        if actual < expected {
            return Err(Error::InvalidBodySize { expected, actual });
        }

        Ok(Self {
            header,
            body: &body[..expected as usize],
        })
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn len(&self) -> usize {
        self.header.entry_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `(key, value)` slices at `index`.
    pub fn entry(&self, index: usize) -> Option<(&'a [u8], &'a [u8])> {
        if index >= self.len() {
            return None;
        }
        let stride = self.header.stride() as usize;
        let pair = &self.body[index * stride..(index + 1) * stride];
        Some(pair.split_at(self.header.key_width as usize))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a [u8], &'a [u8])> + 'a {
        let key_width = self.header.key_width as usize;
        let stride = self.header.stride() as usize;
        let body = self.body;
        (0..self.len()).map(move |i| body[i * stride..(i + 1) * stride].split_at(key_width))
    }

    /// Lowest index whose key equals `key`.
    pub fn find(&self, key: &[u8]) -> Option<usize> {
        if key.len() != self.header.key_width as usize {
            return None;
        }
        self.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &[u8]) -> Option<&'a [u8]> {
        let index = self.find(key)?;
        self.entry(index).map(|(_, v)| v)
    }

    /// Copies every entry into an owned [`Table`].
    pub fn to_table(&self) -> Table {
        let entries = self
            .iter()
            .map(|(k, v)| Entry::new(k.to_vec(), v.to_vec()))
            .collect();
        Table::from_parts(&self.header, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::serialize;

    fn sample_bytes() -> Vec<u8> {
        let mut t = Table::new(4, 8).unwrap();
        t.set(b"test".to_vec(), b"abcdefgh".to_vec(), false).unwrap();
        t.set(b"tes2".to_vec(), b"ijklmnop".to_vec(), false).unwrap();
        serialize(&t).unwrap()
    }

    #[test]
    fn view_borrows_entries() {
        let data = sample_bytes();
        let v = TableView::parse(&data).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.entry(1), Some((b"tes2".as_slice(), b"ijklmnop".as_slice())));
        assert_eq!(v.get(b"test"), Some(b"abcdefgh".as_slice()));
        assert_eq!(v.find(b"nope"), None);
        assert!(v.entry(2).is_none());
    }

    #[test]
    fn view_ignores_trailing_bytes() {
        let mut data = sample_bytes();
        data.extend_from_slice(b"garbage");
        let v = TableView::parse(&data).unwrap();
        assert_eq!(v.iter().count(), 2);
        assert_eq!(v.to_table(), crate::parse(&sample_bytes()).unwrap());
    }

    #[test]
    fn view_rejects_short_body() {
        let data = sample_bytes();
        let result = TableView::parse(&data[..data.len() - 1]);
        assert!(matches!(result, Err(Error::InvalidBodySize { .. })));
    }
}
