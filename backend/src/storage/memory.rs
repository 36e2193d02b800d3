//! In-memory birthday repository.
//!
//! Session-lifetime storage: records live for as long as the process and are
//! lost on shutdown. State is a copy-on-write map behind a mutex; every
//! mutation clones the current map, applies the change, and installs the
//! result as a fresh `Arc`, so previously taken snapshots stay untouched.

use anyhow::Result;
use log::debug;
use shared::Birthday;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::storage::traits::{BirthdaySnapshot, BirthdayStorage};

/// In-memory implementation of `BirthdayStorage`
pub struct MemoryBirthdayRepository {
    state: Mutex<BirthdaySnapshot>,
}

impl MemoryBirthdayRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Arc::new(HashMap::new())),
        }
    }

    /// Number of records currently stored
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().len()
    }

    /// Whether the repository holds no records
    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().is_empty()
    }

    /// Apply a closure to the record with `id`, installing a new snapshot.
    /// Returns false without touching state when the id is absent.
    fn mutate_record<F>(&self, id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Birthday),
    {
        let mut state = self.state.lock().unwrap();
        if !state.contains_key(id) {
            return false;
        }

        let mut next: HashMap<String, Birthday> = (**state).clone();
        if let Some(record) = next.get_mut(id) {
            apply(record);
        }
        *state = Arc::new(next);
        true
    }
}

impl Default for MemoryBirthdayRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl BirthdayStorage for MemoryBirthdayRepository {
    fn insert_birthday(&self, birthday: &Birthday) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.contains_key(&birthday.id) {
            anyhow::bail!("Duplicate birthday ID: {}", birthday.id);
        }

        let mut next: HashMap<String, Birthday> = (**state).clone();
        next.insert(birthday.id.clone(), birthday.clone());
        *state = Arc::new(next);

        debug!("Stored birthday {} ({})", birthday.id, birthday.person);
        Ok(())
    }

    fn get_birthday(&self, id: &str) -> Result<Option<Birthday>> {
        let state = self.state.lock().unwrap();
        Ok(state.get(id).cloned())
    }

    fn snapshot(&self) -> Result<BirthdaySnapshot> {
        let state = self.state.lock().unwrap();
        Ok(Arc::clone(&state))
    }

    fn list_birthdays(&self) -> Result<Vec<Birthday>> {
        let state = self.state.lock().unwrap();
        let mut birthdays: Vec<Birthday> = state.values().cloned().collect();
        birthdays.sort_by_key(|b| b.person.to_lowercase());
        Ok(birthdays)
    }

    fn upsert_birthday(&self, birthday: &Birthday) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let mut next: HashMap<String, Birthday> = (**state).clone();
        let replaced = next
            .insert(birthday.id.clone(), birthday.clone())
            .is_some();
        *state = Arc::new(next);

        debug!(
            "Upserted birthday {} (replaced existing: {})",
            birthday.id, replaced
        );
        Ok(replaced)
    }

    fn remove_birthday(&self, id: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        if !state.contains_key(id) {
            return Ok(false);
        }

        let mut next: HashMap<String, Birthday> = (**state).clone();
        next.remove(id);
        *state = Arc::new(next);

        debug!("Removed birthday {}", id);
        Ok(true)
    }

    fn update_message(&self, id: &str, message: &str) -> Result<bool> {
        Ok(self.mutate_record(id, |record| {
            record.message = message.to_string();
        }))
    }

    fn toggle_scheduled(&self, id: &str) -> Result<bool> {
        Ok(self.mutate_record(id, |record| {
            record.scheduled = !record.scheduled;
        }))
    }

    fn update_scheduled_date(&self, id: &str, date: &str) -> Result<bool> {
        Ok(self.mutate_record(id, |record| {
            record.scheduled_date = Some(date.to_string());
        }))
    }

    fn schedule_message(&self, id: &str, scheduled_date: &str, message: &str) -> Result<bool> {
        Ok(self.mutate_record(id, |record| {
            record.scheduled = true;
            record.message = message.to_string();
            record.scheduled_date = Some(scheduled_date.to_string());
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_birthday(person: &str, date: &str) -> Birthday {
        Birthday {
            id: Birthday::generate_id(),
            person: person.to_string(),
            date: date.to_string(),
            message: String::new(),
            scheduled: false,
            scheduled_date: None,
        }
    }

    #[test]
    fn test_insert_grows_store_by_one() {
        let repo = MemoryBirthdayRepository::new();
        assert!(repo.is_empty());

        let birthday = create_test_birthday("Jane Smith", "1985-07-22");
        repo.insert_birthday(&birthday).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(
            repo.get_birthday(&birthday.id).unwrap().unwrap().person,
            "Jane Smith"
        );
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let repo = MemoryBirthdayRepository::new();
        let birthday = create_test_birthday("Jane Smith", "1985-07-22");

        repo.insert_birthday(&birthday).unwrap();
        assert!(repo.insert_birthday(&birthday).is_err());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_remove_existing_and_absent() {
        let repo = MemoryBirthdayRepository::new();
        let birthday = create_test_birthday("Jane Smith", "1985-07-22");
        repo.insert_birthday(&birthday).unwrap();

        // Removing an existing id shrinks the store by exactly one
        assert!(repo.remove_birthday(&birthday.id).unwrap());
        assert_eq!(repo.len(), 0);
        assert!(repo.get_birthday(&birthday.id).unwrap().is_none());

        // Removing an absent id reports false and leaves the store unchanged
        let before = repo.snapshot().unwrap();
        assert!(!repo.remove_birthday(&birthday.id).unwrap());
        let after = repo.snapshot().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_snapshot_identity_changes_only_on_mutation() {
        let repo = MemoryBirthdayRepository::new();
        let birthday = create_test_birthday("Jane Smith", "1985-07-22");
        repo.insert_birthday(&birthday).unwrap();

        // Reads keep pointer identity
        let first = repo.snapshot().unwrap();
        let second = repo.snapshot().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // Any mutation installs a new snapshot
        repo.update_message(&birthday.id, "Hi!").unwrap();
        let third = repo.snapshot().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));

        // The old snapshot still holds the old value
        assert_eq!(first.get(&birthday.id).unwrap().message, "");
        assert_eq!(third.get(&birthday.id).unwrap().message, "Hi!");
    }

    #[test]
    fn test_toggle_scheduled_is_involutive() {
        let repo = MemoryBirthdayRepository::new();
        let birthday = create_test_birthday("Jane Smith", "1985-07-22");
        repo.insert_birthday(&birthday).unwrap();

        repo.toggle_scheduled(&birthday.id).unwrap();
        assert!(repo.get_birthday(&birthday.id).unwrap().unwrap().scheduled);

        repo.toggle_scheduled(&birthday.id).unwrap();
        assert!(!repo.get_birthday(&birthday.id).unwrap().unwrap().scheduled);
    }

    #[test]
    fn test_schedule_message_sets_exactly_the_schedule_fields() {
        let repo = MemoryBirthdayRepository::new();
        let birthday = create_test_birthday("Jane Smith", "1985-07-22");
        repo.insert_birthday(&birthday).unwrap();

        assert!(repo
            .schedule_message(&birthday.id, "2026-07-21", "See you soon!")
            .unwrap());

        let updated = repo.get_birthday(&birthday.id).unwrap().unwrap();
        assert!(updated.scheduled);
        assert_eq!(updated.message, "See you soon!");
        assert_eq!(updated.scheduled_date.as_deref(), Some("2026-07-21"));

        // All other fields unchanged
        assert_eq!(updated.id, birthday.id);
        assert_eq!(updated.person, birthday.person);
        assert_eq!(updated.date, birthday.date);
    }

    #[test]
    fn test_upsert_reports_replace_vs_insert() {
        let repo = MemoryBirthdayRepository::new();
        let mut birthday = create_test_birthday("Jane Smith", "1985-07-22");

        // Absent id inserts
        assert!(!repo.upsert_birthday(&birthday).unwrap());
        assert_eq!(repo.len(), 1);

        // Present id replaces wholesale
        birthday.person = "Jane Smith-Jones".to_string();
        assert!(repo.upsert_birthday(&birthday).unwrap());
        assert_eq!(repo.len(), 1);
        assert_eq!(
            repo.get_birthday(&birthday.id).unwrap().unwrap().person,
            "Jane Smith-Jones"
        );
    }

    #[test]
    fn test_mutators_on_absent_id_leave_store_unchanged() {
        let repo = MemoryBirthdayRepository::new();
        let birthday = create_test_birthday("Jane Smith", "1985-07-22");
        repo.insert_birthday(&birthday).unwrap();
        let before = repo.snapshot().unwrap();

        assert!(!repo.update_message("birthday::missing", "Hi!").unwrap());
        assert!(!repo.toggle_scheduled("birthday::missing").unwrap());
        assert!(!repo
            .update_scheduled_date("birthday::missing", "2026-01-01")
            .unwrap());
        assert!(!repo
            .schedule_message("birthday::missing", "2026-01-01", "Hi!")
            .unwrap());

        let after = repo.snapshot().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_list_birthdays_ordered_by_person() {
        let repo = MemoryBirthdayRepository::new();
        repo.insert_birthday(&create_test_birthday("zoe", "1992-01-02"))
            .unwrap();
        repo.insert_birthday(&create_test_birthday("Adam", "1991-03-04"))
            .unwrap();
        repo.insert_birthday(&create_test_birthday("Mara", "1993-05-06"))
            .unwrap();

        let names: Vec<String> = repo
            .list_birthdays()
            .unwrap()
            .into_iter()
            .map(|b| b.person)
            .collect();
        assert_eq!(names, vec!["Adam", "Mara", "zoe"]);
    }

    #[test]
    fn test_store_scenario_add_update_toggle() {
        // Store starts with Jane, then a new record is added and composed
        let repo = MemoryBirthdayRepository::new();
        repo.insert_birthday(&create_test_birthday("Jane Smith", "1985-07-22"))
            .unwrap();
        let count_before = repo.len();

        let added = create_test_birthday("Jane", "1985-07-22");
        repo.insert_birthday(&added).unwrap();
        assert_eq!(repo.len(), count_before + 1);

        repo.update_message(&added.id, "Hi!").unwrap();
        repo.toggle_scheduled(&added.id).unwrap();

        let record = repo.get_birthday(&added.id).unwrap().unwrap();
        assert_eq!(record.message, "Hi!");
        assert!(record.scheduled);
    }
}
