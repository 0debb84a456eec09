//! # FWBT — Fixed Width Binary Table
//!
//! A minimal appendable key-value table in a flat binary file, for places
//! where a database would be too much.
//!
//! ## File layout (v1)
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ HEADER (17 bytes)                             │
//! │                                               │
//! │ "FWBT" | version (u8 = 1)                     │
//! │ key_width (u32) | value_width (u32)           │
//! │ entry_count (u32)                             │
//! ├───────────────────────────────────────────────┤
//! │ BODY (entry_count * (key_width + value_width))│
//! │                                               │
//! │ key (key_width bytes) | value (value_width)   │
//! │                                               │
//! │ ... repeated for each entry ...               │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! All integers are big-endian. `entry_count == u32::MAX` is reserved and
//! never valid.
//!
//! ## Example
//! ```rust
//! let mut table = fwbt::Table::new(4, 8).unwrap();
//! table.set(b"test".to_vec(), b"abcdefgh".to_vec(), false).unwrap();
//!
//! let bytes = fwbt::serialize(&table).unwrap();
//! let mut parsed = fwbt::parse(&bytes).unwrap();
//! assert_eq!(parsed.find(b"test"), Some(0));
//!
//! parsed.remove_by_key(b"test").unwrap();
//! assert!(parsed.is_empty());
//! ```

mod error;
mod file;
mod format;
mod reader;
mod table;
#[cfg(feature = "zero-copy")]
mod view;
mod writer;

pub use error::{Error, Rejected, Result};
pub use file::{load, save};
pub use format::{
    Header, API_VERSION, BODY_OFFSET, ENTRY_COUNT_OFFSET, ENTRY_COUNT_SENTINEL, HEADER_SIZE,
    KEY_WIDTH_OFFSET, SIGNATURE, VALUE_WIDTH_OFFSET, VERSION, VERSION_OFFSET,
};
pub use reader::parse;
pub use table::{Entry, Table};
#[cfg(feature = "zero-copy")]
pub use view::TableView;
pub use writer::serialize;
