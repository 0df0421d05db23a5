//! # SlotDB
//!
//! A single-file record store with:
//! - Fixed-schema records appended to one flat binary file
//! - Logical deletion that turns slots into free-list nodes
//! - Best-fit reuse of reclaimed slots
//! - Binary-search lookup over an index rebuilt by full scan
//! - Whole-file compaction
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Operations Script Driver                   │
//! │               (lookup / delete / insert + log)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                          Store                              │
//! │             (duplicate check, index invalidation)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Index    │          │  Allocator  │
//!   │ (full scan) │          │ (best fit)  │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Scanner   │          │  Free List  │
//!   │  + Codec    │          │ (in slots)  │
//!   └──────┬──────┘          └──────┬──────┘
//!          └───────────┬────────────┘
//!                      ▼
//!              ┌───────────────┐
//!              │   Data File   │
//!              └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod index;
pub mod ops;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SlotDbError, Result};
pub use config::Config;
pub use engine::Store;
pub use record::{Key, Movie, Record};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SlotDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
