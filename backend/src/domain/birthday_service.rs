use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::date_utils;
use crate::storage::traits::{BirthdaySnapshot, BirthdayStorage};
use shared::{AddBirthdayRequest, Birthday, BirthdayListResponse, BirthdayResponse};

/// Name given to records added without one
const PLACEHOLDER_PERSON: &str = "Unknown";

/// Service for managing birthday records
#[derive(Clone)]
pub struct BirthdayService {
    store: Arc<dyn BirthdayStorage>,
}

impl BirthdayService {
    /// Create a new BirthdayService on top of an injected store
    pub fn new(store: Arc<dyn BirthdayStorage>) -> Self {
        Self { store }
    }

    /// Create a new birthday record with a freshly assigned unique ID
    pub fn add_birthday(&self, request: AddBirthdayRequest) -> Result<BirthdayResponse> {
        info!(
            "Adding birthday: person={}, date={}",
            request.person, request.date
        );

        // The date must parse; the person may be blank and falls back to a
        // placeholder instead of failing
        date_utils::parse_date(&request.date)?;
        if let Some(ref scheduled_date) = request.scheduled_date {
            date_utils::parse_date(scheduled_date)?;
        }

        let person = request.person.trim();
        let person = if person.is_empty() {
            warn!("Blank person name, falling back to \"{}\"", PLACEHOLDER_PERSON);
            PLACEHOLDER_PERSON.to_string()
        } else {
            person.to_string()
        };

        let birthday = Birthday {
            id: Birthday::generate_id(),
            person,
            date: request.date.trim().to_string(),
            message: request.message.unwrap_or_default(),
            scheduled: request.scheduled.unwrap_or(false),
            scheduled_date: request.scheduled_date,
        };

        self.store.insert_birthday(&birthday)?;

        info!("Added birthday {} for {}", birthday.id, birthday.person);

        Ok(BirthdayResponse {
            birthday,
            success_message: "Birthday added successfully".to_string(),
        })
    }

    /// Get a birthday by ID
    pub fn get_birthday(&self, id: &str) -> Result<Option<Birthday>> {
        let birthday = self.store.get_birthday(id)?;

        if birthday.is_none() {
            warn!("Birthday not found: {}", id);
        }

        Ok(birthday)
    }

    /// Get the current immutable snapshot of all records
    pub fn snapshot(&self) -> Result<BirthdaySnapshot> {
        self.store.snapshot()
    }

    /// List all birthdays ordered by person name
    pub fn list_birthdays(&self) -> Result<BirthdayListResponse> {
        let birthdays = self.store.list_birthdays()?;

        info!("Found {} birthdays", birthdays.len());

        Ok(BirthdayListResponse { birthdays })
    }

    /// List birthdays whose person name contains `query`, case-insensitively,
    /// ordered by person name
    pub fn search_contacts(&self, query: &str) -> Result<BirthdayListResponse> {
        let needle = query.trim().to_lowercase();
        let birthdays = self
            .store
            .list_birthdays()?
            .into_iter()
            .filter(|b| b.person.to_lowercase().contains(&needle))
            .collect();

        Ok(BirthdayListResponse { birthdays })
    }

    /// List birthdays that have a send date set (the composer's scheduled view)
    pub fn list_scheduled(&self) -> Result<BirthdayListResponse> {
        let birthdays = self
            .store
            .list_birthdays()?
            .into_iter()
            .filter(|b| b.scheduled_date.is_some())
            .collect();

        Ok(BirthdayListResponse { birthdays })
    }

    /// Replace the record matching `birthday.id` wholesale
    ///
    /// This is an explicit upsert: an unknown ID inserts the record instead of
    /// failing, and the response message says which of the two happened.
    pub fn update_birthday(&self, birthday: Birthday) -> Result<BirthdayResponse> {
        info!("Updating birthday: {}", birthday.id);

        date_utils::parse_date(&birthday.date)?;
        if let Some(ref scheduled_date) = birthday.scheduled_date {
            date_utils::parse_date(scheduled_date)?;
        }

        let replaced = self.store.upsert_birthday(&birthday)?;

        let success_message = if replaced {
            "Birthday updated successfully".to_string()
        } else {
            warn!("Birthday {} was absent, inserted instead", birthday.id);
            "Birthday inserted".to_string()
        };

        Ok(BirthdayResponse {
            birthday,
            success_message,
        })
    }

    /// Delete a birthday by ID
    pub fn remove_birthday(&self, id: &str) -> Result<()> {
        info!("Removing birthday: {}", id);

        if !self.store.remove_birthday(id)? {
            anyhow::bail!("Birthday not found: {}", id);
        }

        Ok(())
    }

    /// Set the greeting message on the record with that ID
    pub fn update_message(&self, id: &str, message: &str) -> Result<BirthdayResponse> {
        if !self.store.update_message(id, message)? {
            anyhow::bail!("Birthday not found: {}", id);
        }

        self.mutated_response(id, "Message updated successfully")
    }

    /// Flip the scheduled flag on the record with that ID
    pub fn toggle_scheduled(&self, id: &str) -> Result<BirthdayResponse> {
        if !self.store.toggle_scheduled(id)? {
            anyhow::bail!("Birthday not found: {}", id);
        }

        self.mutated_response(id, "Scheduled flag toggled")
    }

    /// Set the send date on the record with that ID
    pub fn update_scheduled_date(&self, id: &str, date: &str) -> Result<BirthdayResponse> {
        date_utils::parse_date(date)?;

        if !self.store.update_scheduled_date(id, date)? {
            anyhow::bail!("Birthday not found: {}", id);
        }

        self.mutated_response(id, "Scheduled date updated successfully")
    }

    /// Mark the record scheduled with its message and send date in a single
    /// combined update
    pub fn schedule_message(
        &self,
        id: &str,
        scheduled_date: &str,
        message: &str,
    ) -> Result<BirthdayResponse> {
        info!("Scheduling message for {}: send on {}", id, scheduled_date);

        date_utils::parse_date(scheduled_date)?;

        if !self.store.schedule_message(id, scheduled_date, message)? {
            anyhow::bail!("Birthday not found: {}", id);
        }

        self.mutated_response(id, "Message scheduled successfully")
    }

    /// Read back a record that was just mutated
    fn mutated_response(&self, id: &str, success_message: &str) -> Result<BirthdayResponse> {
        let birthday = self
            .store
            .get_birthday(id)?
            .ok_or_else(|| anyhow::anyhow!("Birthday disappeared after update: {}", id))?;

        Ok(BirthdayResponse {
            birthday,
            success_message: success_message.to_string(),
        })
    }
}
