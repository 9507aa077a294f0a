//! hashdict: a fixed-bucket, chained hash dictionary from string keys to
//! string values.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: fast average-case lookup for an embedding caller, with every
//!   failure reported as a `Result` and no way to observe a half-built
//!   entry.
//! - Layers:
//!   - `hasher`: djb2 over raw key bytes, reduced modulo `BUCKET_COUNT`.
//!     Any `BuildHasher` can be plugged in; only `write` is called.
//!   - `Dictionary<S>`: `BUCKET_COUNT` chain heads over a `SlotMap` of
//!     entries. Each entry owns copies of its key and value and links to
//!     its successor by arena key.
//!   - `stats`: optional counters attached at construction.
//!   - `report`: read-only tabular rendering of a dictionary.
//!
//! Constraints
//! - Fixed bucket count; no resizing, so chains grow with load.
//! - Unique keys: duplicate inserts fail with `DictError::DuplicateKey`.
//! - Chain order is insertion order (new entries go to the tail).
//! - Keys are immutable post-insert; `update` replaces the value only.
//! - No `unsafe`: arena keys are generational, so a stale link can never
//!   resolve to a different entry.
//!
//! Failure semantics
//! - Invalid-argument: duplicate key on insert, missing key on
//!   remove/update, remove on an empty dictionary.
//! - Out-of-memory: key/value copies are reserved with `try_reserve_exact`,
//!   and a configured `memory_limit` is checked before any copy. Insert
//!   builds the entry completely before linking it; update copies the new
//!   value before releasing the old one.
//!
//! Concurrency
//! - Mutation takes `&mut self`; lookups take `&self`. No internal
//!   locking. Callers sharing a dictionary across threads bring their own
//!   lock.
//!
//! Teardown
//! - `clear` walks each bucket iteratively, detaching each link before
//!   releasing the node. Stack use does not depend on chain length.

pub mod config;
pub mod dict;
#[cfg(test)]
mod dict_proptest;
pub mod error;
pub mod hasher;
pub mod report;
pub mod stats;

// Public surface
pub use config::DictConfig;
pub use dict::Dictionary;
pub use error::{DictError, DictResult, ErrorKind};
pub use hasher::{djb2_bucket, Djb2Hasher, Djb2State, BUCKET_COUNT};
pub use stats::Stats;
