//! Domain model for process records.
//!
//! # Responsibility
//! - Define the typed row produced by the record store.
//! - Own the static marker style table used by card rendering.
//!
//! # Invariants
//! - Every record is identified by a non-blank process number.
//! - Missing columns are `None`, never an error.

pub mod marker;
pub mod record;
