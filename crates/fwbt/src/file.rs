//! Loading and saving tables on disk.

use std::fs::{self, rename, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::reader::parse;
use crate::table::Table;

/// Reads and parses the table stored at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Table> {
    let data = fs::read(path.as_ref())?;
    debug!(path = %path.as_ref().display(), bytes = data.len(), "loading table");
    parse(&data)
}

/// Writes `table` to `path`, replacing any existing file.
///
/// # Crash Safety
///
/// Writes to `<path>.tmp`, calls `sync_all()`, then atomically renames over
/// `path`. A crash mid-write leaves the previous file intact.
pub fn save<P: AsRef<Path>>(path: P, table: &Table) -> Result<()> {
    let path = path.as_ref();
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp_path)?;

    let mut w = BufWriter::new(file);
    table.write_to(&mut w)?;
    w.flush()?;
    w.get_ref().sync_all()?;
    drop(w);

    rename(tmp_path, path)?;
    debug!(path = %path.display(), entry_count = table.len(), "saved table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::writer::serialize;
    use anyhow::Result;
    use tempfile::tempdir;

    fn sample_table() -> Table {
        let mut t = Table::new(4, 8).unwrap();
        t.set(b"test".to_vec(), b"abcdefgh".to_vec(), false).unwrap();
        t.set(b"tes2".to_vec(), b"ijklmnop".to_vec(), false).unwrap();
        t
    }

    #[test]
    fn save_then_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sample.fwbt");

        let t = sample_table();
        save(&path, &t)?;
        assert_eq!(fs::read(&path)?, serialize(&t)?);
        assert_eq!(load(&path)?, t);
        Ok(())
    }

    #[test]
    fn save_leaves_no_temp_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("t.fwbt");
        save(&path, &sample_table())?;
        assert!(!dir.path().join("t.fwbt.tmp").exists());
        Ok(())
    }

    #[test]
    fn save_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("t.fwbt");
        save(&path, &sample_table())?;

        let mut t = load(&path)?;
        t.remove_by_index(0)?;
        save(&path, &t)?;

        let reloaded = load(&path)?;
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entry(0).unwrap().key, b"tes2");
        Ok(())
    }

    #[test]
    fn load_nonexistent_file() {
        let dir = tempdir().unwrap();
        let result = load(dir.path().join("missing.fwbt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn load_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.fwbt");
        fs::write(&path, b"FWBT\x01").unwrap();
        assert!(matches!(load(&path), Err(Error::TooShort(5))));
    }
}
