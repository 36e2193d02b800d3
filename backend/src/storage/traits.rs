//! # Storage Traits
//!
//! This module defines the storage abstraction trait that allows different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use shared::Birthday;
use std::collections::HashMap;
use std::sync::Arc;

/// The full, immutable id -> birthday mapping at a point in time.
///
/// Snapshots are shared by reference; two snapshots taken with no mutation in
/// between compare pointer-equal via `Arc::ptr_eq`, and any mutation installs
/// a fresh map, so reactive consumers can use identity to detect change.
pub type BirthdaySnapshot = Arc<HashMap<String, Birthday>>;

/// Trait defining the interface for birthday storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// without modification. Mutators addressed by id report whether a record
/// with that id existed: `Ok(false)` means the store was left unchanged.
pub trait BirthdayStorage: Send + Sync {
    /// Store a new birthday record
    fn insert_birthday(&self, birthday: &Birthday) -> Result<()>;

    /// Retrieve a specific birthday by ID
    fn get_birthday(&self, id: &str) -> Result<Option<Birthday>>;

    /// Get the current immutable snapshot of all records
    fn snapshot(&self) -> Result<BirthdaySnapshot>;

    /// List all birthdays ordered by person name
    fn list_birthdays(&self) -> Result<Vec<Birthday>>;

    /// Replace the record matching `birthday.id` wholesale, inserting it when
    /// absent (explicit upsert)
    /// Returns true if an existing record was replaced, false if inserted
    fn upsert_birthday(&self, birthday: &Birthday) -> Result<bool>;

    /// Delete a birthday by ID
    /// Returns true if the record was found and removed, false otherwise
    fn remove_birthday(&self, id: &str) -> Result<bool>;

    /// Set the greeting message on the record with that id
    fn update_message(&self, id: &str, message: &str) -> Result<bool>;

    /// Flip the scheduled flag on the record with that id
    fn toggle_scheduled(&self, id: &str) -> Result<bool>;

    /// Set the scheduled date on the record with that id
    fn update_scheduled_date(&self, id: &str, date: &str) -> Result<bool>;

    /// Set scheduled = true, the message, and the scheduled date in a single
    /// combined update (the composer flow)
    fn schedule_message(&self, id: &str, scheduled_date: &str, message: &str) -> Result<bool>;
}
