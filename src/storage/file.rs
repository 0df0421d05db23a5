//! Data file handle
//!
//! Thin wrapper over `File` that only exposes absolute-position I/O.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::BufMut;

use crate::error::{Result, SlotDbError};

use super::{Offset, EMPTY_LIST, HEADER_SIZE};

/// The open data file
///
/// Every method takes an explicit position; nothing relies on where a
/// previous call left the cursor.
#[derive(Debug)]
pub struct DataFile {
    file: File,
    path: PathBuf,
}

impl DataFile {
    /// Open an existing data file for reading and writing
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let data = Self {
            file,
            path: path.to_path_buf(),
        };

        if data.len()? < HEADER_SIZE {
            return Err(SlotDbError::invalid_offset(
                Offset::new(0),
                "file is shorter than the free list header",
            ));
        }
        Ok(data)
    }

    /// Create (or truncate) a data file holding only an empty-list header
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut data = Self {
            file,
            path: path.to_path_buf(),
        };

        let mut header = Vec::with_capacity(HEADER_SIZE as usize);
        header.put_i32(EMPTY_LIST);
        data.write_all_at(0, &header)?;
        data.sync()?;

        Ok(data)
    }

    /// Read exactly `buf.len()` bytes at `pos`
    pub fn read_exact_at(&mut self, pos: u64, buf: &mut [u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(pos))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    /// Read up to `buf.len()` bytes at `pos`, stopping early only at EOF
    pub fn read_at(&mut self, pos: u64, buf: &mut [u8]) -> Result<usize> {
        self.file.seek(SeekFrom::Start(pos))?;

        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    /// Write all of `buf` at `pos`
    pub fn write_all_at(&mut self, pos: u64, buf: &[u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(pos))?;
        self.file.write_all(buf)?;
        Ok(())
    }

    /// Current file length in bytes
    pub fn len(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// True when the file holds nothing beyond the header
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? <= HEADER_SIZE)
    }

    /// Offset one past the last byte, where appended slots go
    pub fn end(&self) -> Result<Offset> {
        Ok(Offset::new(self.len()?))
    }

    /// Truncate or extend the file
    pub fn set_len(&mut self, len: u64) -> Result<()> {
        self.file.set_len(len)?;
        Ok(())
    }

    /// Flush data and metadata to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.flush()?;
        self.file.sync_all()?;
        Ok(())
    }

    /// Path the file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}
