//! Engine Module
//!
//! The record store that ties the storage layer and the index together.
//!
//! ## Responsibilities
//! - Open or create the data file
//! - Reject duplicate keys before allocating
//! - Route inserts through the best-fit allocator
//! - Drop the index after every mutation and rebuild it on the next lookup

use std::marker::PhantomData;
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, SlotDbError};
use crate::index::{self, Index, Located};
use crate::ops::{Command, Outcome};
use crate::record::{self, Decoded, Key, Movie, Record};
use crate::storage::{
    self, CompactionStats, DataFile, FreeNode, Offset, Placement, Scanner, FIRST_SLOT,
};

/// Result of a successful insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
    pub key: Key,
    pub offset: Offset,
    /// Encoded payload length
    pub len: u16,
    /// Capacity of the slot that now holds the record
    pub capacity: u16,
    pub placement: Placement,
}

/// Result of a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deleted {
    pub key: Key,
    pub offset: Offset,
    pub capacity: u16,
}

/// A single-file record store
///
/// ## Concurrency Model
///
/// One owner, blocking I/O, no locking. All methods take `&mut self`, so
/// the borrow checker enforces the single-writer assumption within a
/// process; nothing guards against a second process.
pub struct Store<R: Record = Movie> {
    /// Store configuration
    config: Config,

    /// The data file
    file: DataFile,

    /// Index from the last full scan; `None` once a write made it stale
    index: Option<Index>,

    _record: PhantomData<R>,
}

impl<R: Record> Store<R> {
    /// Open the store described by `config`
    ///
    /// A missing data file is an error unless `create_if_missing` is set.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let file = if !config.data_path.exists() && config.create_if_missing {
            tracing::info!(path = %config.data_path.display(), "creating data file");
            DataFile::create(&config.data_path)?
        } else {
            DataFile::open(&config.data_path)?
        };

        tracing::info!(
            path = %config.data_path.display(),
            bytes = file.len()?,
            "opened data file"
        );

        Ok(Self {
            config,
            file,
            index: None,
            _record: PhantomData,
        })
    }

    /// Open an existing data file with default settings
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_path(path).build())
    }

    /// Create (or truncate) a data file and open it
    pub fn create(path: &Path) -> Result<Self> {
        DataFile::create(path)?;
        Self::open_path(path)
    }

    /// Execute a driver command
    ///
    /// Missing keys and duplicate inserts become outcomes, not errors.
    pub fn execute(&mut self, command: &Command<R>) -> Result<Outcome<R>> {
        match *command {
            Command::Lookup { key } => Ok(match self.lookup(key)? {
                Some(found) => Outcome::Found(found),
                None => Outcome::NotFound(key),
            }),
            Command::Delete { key } => Ok(match self.delete(key)? {
                Some(deleted) => Outcome::Deleted(deleted),
                None => Outcome::NotFound(key),
            }),
            Command::Insert { ref record } => match self.insert(record) {
                Ok(inserted) => Ok(Outcome::Inserted(inserted)),
                Err(SlotDbError::DuplicateKey(key)) => Ok(Outcome::DuplicateKey(key)),
                Err(e) => Err(e),
            },
        }
    }

    /// Look up a live record by key
    pub fn lookup(&mut self, key: Key) -> Result<Option<Located<R>>> {
        let index = current_index::<R>(&mut self.file, &mut self.index)?;
        index::lookup(&mut self.file, index, key)
    }

    /// Insert a record, reusing the best-fitting free slot if any
    ///
    /// Fails with `DuplicateKey` before touching the file when the key is
    /// already live.
    pub fn insert(&mut self, record: &R) -> Result<Inserted> {
        let payload = record::encode(record)?;
        let key = record.key();

        let index = current_index::<R>(&mut self.file, &mut self.index)?;
        if index.contains(key) {
            return Err(SlotDbError::DuplicateKey(key));
        }

        let allocation = storage::store(&mut self.file, &payload)?;
        self.after_write()?;

        Ok(Inserted {
            key,
            offset: allocation.offset,
            // encode() caps payloads at u16::MAX
            len: payload.len() as u16,
            capacity: allocation.capacity,
            placement: allocation.placement,
        })
    }

    /// Delete the live record with `key`, returning `None` if absent
    pub fn delete(&mut self, key: Key) -> Result<Option<Deleted>> {
        let Some(found) = self.lookup(key)? else {
            return Ok(None);
        };

        let capacity = storage::delete(&mut self.file, found.offset)?;
        self.after_write()?;

        Ok(Some(Deleted {
            key,
            offset: found.offset,
            capacity,
        }))
    }

    /// Rewrite the file keeping only live records
    pub fn compact(&mut self) -> Result<CompactionStats> {
        self.index = None;
        storage::compact::<R>(&mut self.file)
    }

    /// Free slots in list order, head first
    pub fn free_list(&mut self) -> Result<Vec<FreeNode>> {
        storage::walk(&mut self.file)?
            .map(|entry| entry.map(|(_, node)| node))
            .collect()
    }

    /// Every live record, sorted by key
    pub fn records(&mut self) -> Result<Vec<Located<R>>> {
        let mut records = Vec::new();
        for view in Scanner::<R>::new(&mut self.file, FIRST_SLOT) {
            let view = view?;
            if let Decoded::Live(record) = view.content {
                records.push(Located {
                    record,
                    offset: view.offset,
                    capacity: view.capacity,
                });
            }
        }
        records.sort_by_key(|located| located.record.key());
        Ok(records)
    }

    /// Flush the data file to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync()
    }

    /// Close the store, syncing first
    pub fn close(mut self) -> Result<()> {
        self.sync()
    }

    fn after_write(&mut self) -> Result<()> {
        self.index = None;
        if self.config.sync_writes {
            self.file.sync()?;
        }
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the data file path
    pub fn data_path(&self) -> &Path {
        self.file.path()
    }

    /// Current data file size in bytes
    pub fn file_len(&self) -> Result<u64> {
        self.file.len()
    }

    /// Whether an index from a previous scan is still held
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Return the cached index, rebuilding it by full scan if it was dropped
fn current_index<'a, R: Record>(
    file: &mut DataFile,
    cached: &'a mut Option<Index>,
) -> Result<&'a Index> {
    if cached.is_none() {
        *cached = Some(Index::build::<R>(file)?);
    }
    Ok(cached.get_or_insert_with(Index::default))
}
