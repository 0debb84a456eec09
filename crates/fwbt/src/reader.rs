use tracing::debug;

use crate::error::{Error, Result};
use crate::format::{Header, HEADER_SIZE};
use crate::table::{Entry, Table};

/// Parses a complete table (header + body) from `data`.
///
/// Keys and values are copied into buffers owned by the returned table, so
/// `data` can be dropped afterwards.
///
/// # Errors
///
/// Any header error from [`Header::read`], [`Error::InvalidBodySize`] when
/// the bytes after the header are not exactly `entry_count` key/value pairs,
/// or [`Error::AllocationFailure`].
pub fn parse(data: &[u8]) -> Result<Table> {
    let header = Header::read(data)?;
    let entries = read_body(&data[HEADER_SIZE..], &header)?;
    debug!(
        key_width = header.key_width,
        value_width = header.value_width,
        entry_count = header.entry_count,
        "parsed table"
    );
    Ok(Table::from_parts(&header, entries))
}

/// Splits `body` into `header.entry_count` owned key/value pairs.
///
/// On error everything allocated so far is dropped before returning.
pub(crate) fn read_body(body: &[u8], header: &Header) -> Result<Vec<Entry>> {
    let actual = body.len() as u64;
    let expected = header.body_len().unwrap_or(u64::MAX);
    if actual != expected {
        return Err(Error::InvalidBodySize { expected, actual });
    }

    let key_width = header.key_width as usize;
    let count = header.entry_count as usize;

    let mut entries = Vec::new();
    entries
        .try_reserve_exact(count)
        .map_err(|_| Error::AllocationFailure)?;

    // With a non-zero count the size check above bounds the stride by body.len().
    if count > 0 {
        for pair in body.chunks_exact(header.stride() as usize) {
            let (key, value) = pair.split_at(key_width);
            entries.push(Entry::new(owned(key)?, owned(value)?));
        }
    }

    debug_assert_eq!(entries.len(), count);
    Ok(entries)
}

fn owned(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())
        .map_err(|_| Error::AllocationFailure)?;
    buf.extend_from_slice(bytes);
    Ok(buf)
}

impl TryFrom<&[u8]> for Table {
    type Error = Error;

    fn try_from(data: &[u8]) -> Result<Self> {
        parse(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ENTRY_COUNT_SENTINEL;

    fn table_bytes(key_width: u32, value_width: u32, entry_count: u32, body: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        Header::new(key_width, value_width, entry_count)
            .write(&mut buf)
            .unwrap();
        buf.extend_from_slice(body);
        buf
    }

    // -------------------- Happy path --------------------

    #[test]
    fn parse_two_entries_in_wire_order() {
        let data = table_bytes(4, 8, 2, b"testabcdefghtes2ijklmnop");
        let t = parse(&data).unwrap();

        assert_eq!(t.header(), Header::new(4, 8, 2));
        assert_eq!(t.entry(0).unwrap().key, b"test");
        assert_eq!(t.entry(0).unwrap().value, b"abcdefgh");
        assert_eq!(t.entry(1).unwrap().key, b"tes2");
        assert_eq!(t.entry(1).unwrap().value, b"ijklmnop");
    }

    #[test]
    fn parse_empty_body() {
        let t = parse(&table_bytes(4, 8, 0, &[])).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.key_width(), 4);
        assert_eq!(t.value_width(), 8);
    }

    #[test]
    fn parse_keeps_duplicate_keys_from_wire() {
        let t = parse(&table_bytes(1, 1, 2, b"a1a2")).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.find(b"a"), Some(0));
    }

    #[test]
    fn parse_copies_out_of_input() {
        let mut data = table_bytes(1, 1, 1, b"kv");
        let t = parse(&data).unwrap();
        data.fill(0);
        assert_eq!(t.get(b"k"), Some(b"v".as_slice()));
    }

    #[test]
    fn try_from_slice() {
        let data = table_bytes(2, 2, 1, b"abcd");
        let t = Table::try_from(data.as_slice()).unwrap();
        assert_eq!(t.get(b"ab"), Some(b"cd".as_slice()));
    }

    // -------------------- Body size --------------------

    #[test]
    fn body_too_short() {
        let data = table_bytes(4, 8, 2, b"testabcdefgh");
        assert!(matches!(
            parse(&data),
            Err(Error::InvalidBodySize {
                expected: 24,
                actual: 12
            })
        ));
    }

    #[test]
    fn body_with_trailing_bytes() {
        let data = table_bytes(1, 1, 1, b"kvX");
        assert!(matches!(parse(&data), Err(Error::InvalidBodySize { .. })));
    }

    #[test]
    fn body_present_with_zero_count() {
        let data = table_bytes(1, 1, 0, b"kv");
        assert!(matches!(
            parse(&data),
            Err(Error::InvalidBodySize {
                expected: 0,
                actual: 2
            })
        ));
    }

    #[test]
    fn huge_declared_count_fails_on_size_not_allocation() {
        let data = table_bytes(u32::MAX, u32::MAX, ENTRY_COUNT_SENTINEL - 1, b"");
        assert!(matches!(parse(&data), Err(Error::InvalidBodySize { .. })));
    }

    // -------------------- Header errors propagate --------------------

    #[test]
    fn header_errors_propagate() {
        assert!(matches!(parse(b"FWBT"), Err(Error::TooShort(4))));
        let data = table_bytes(4, 8, ENTRY_COUNT_SENTINEL, &[]);
        assert!(matches!(parse(&data), Err(Error::InvalidEntryCount)));
    }
}
