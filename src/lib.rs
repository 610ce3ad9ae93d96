//! # zonescan
//!
//! Zone-map pruned range scans over sorted, block-framed column files:
//! - Fixed-size block I/O over headerless files of fixed-width records
//! - Offline zone-map construction (per-block min/max from sort order)
//! - Two-phase scan: prune blocks by zone, re-check surviving records
//!
//! ## Architecture Overview
//!
//! ```text
//!   column file ──► ZoneMapBuilder ──► zone-map file        (offline)
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ZonemapScan                            │
//! │   zone-map file + predicate ranges                           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Phase 1: candidate block indices
//!                       ▼
//!               ┌───────────────┐        ┌──────────────────┐
//!               │  column file  │───────►│ Phase 2: re-check│
//!               │ (block reads) │        │  every record    │
//!               └───────────────┘        └────────┬─────────┘
//!                                                 ▼
//!                                         position file
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod block;
pub mod predicate;
pub mod zonemap;
pub mod scan;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use block::{BlockBuffer, Position, Record};
pub use config::{Config, OverrunPolicy};
pub use error::{Result, ZoneScanError};
pub use predicate::{AtomicPredicate, CompareOp, Predicate, PredicateRange};
pub use scan::{full_scan, ScanPaths, ScanStats, ZonemapScan};
pub use zonemap::{Zone, ZoneMap, ZoneMapBuilder};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of zonescan
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
