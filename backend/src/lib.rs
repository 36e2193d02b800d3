//! # Birthday Tracker Backend
//!
//! Contains all non-UI logic for the birthday tracker application.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Business logic for birthday records, scheduling, calendars
//! - **Storage**: The in-memory session store holding the records
//!
//! The backend is designed to be UI-agnostic, meaning it could support
//! different frontend frameworks or even CLI interfaces without modification.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (views: tracker, composer, contacts)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (In-memory snapshot store)
//! ```
//!
//! All state is session-lifetime only: nothing is persisted, and the store
//! starts from the same seed records on every launch.

pub mod storage;
pub mod domain;

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::domain::{BirthdayService, CalendarService, MessageComposerService};
use crate::storage::MemoryBirthdayRepository;
use shared::AddBirthdayRequest;

pub use domain::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub birthday_service: BirthdayService,
    pub calendar_service: CalendarService,
    pub composer_service: MessageComposerService,
}

/// Initialize the backend with all required services
pub fn initialize_backend() -> Result<AppState> {
    info!("Setting up in-memory birthday store");
    let repository = Arc::new(MemoryBirthdayRepository::new());

    info!("Setting up domain model");
    let birthday_service = BirthdayService::new(repository);
    let calendar_service = CalendarService::new();
    let composer_service = MessageComposerService::new(birthday_service.clone());

    seed_demo_birthdays(&birthday_service)?;

    info!("Setting up application state");
    Ok(AppState {
        birthday_service,
        calendar_service,
        composer_service,
    })
}

/// Seed the records the application starts with
fn seed_demo_birthdays(service: &BirthdayService) -> Result<()> {
    info!("Seeding demo birthdays");

    service.add_birthday(AddBirthdayRequest {
        person: "John Doe".to_string(),
        date: "1990-05-15".to_string(),
        message: Some("Happy birthday!".to_string()),
        scheduled: Some(true),
        scheduled_date: Some("1990-05-14".to_string()),
    })?;

    service.add_birthday(AddBirthdayRequest {
        person: "Jane Smith".to_string(),
        date: "1985-07-22".to_string(),
        message: Some("Many happy returns!".to_string()),
        scheduled: Some(false),
        scheduled_date: None,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_backend_seeds_demo_birthdays() {
        let state = initialize_backend().expect("Failed to initialize backend");

        let birthdays = state
            .birthday_service
            .list_birthdays()
            .unwrap()
            .birthdays;
        assert_eq!(birthdays.len(), 2);
        assert_eq!(birthdays[0].person, "Jane Smith");
        assert_eq!(birthdays[1].person, "John Doe");
        assert!(birthdays[1].scheduled);
        assert_eq!(birthdays[1].message, "Happy birthday!");
    }

    #[test]
    fn test_services_share_one_store() {
        let state = initialize_backend().unwrap();

        let jane_id = state
            .birthday_service
            .search_contacts("Jane")
            .unwrap()
            .birthdays[0]
            .id
            .clone();

        state
            .composer_service
            .schedule_message(shared::ScheduleMessageRequest {
                birthday_id: jane_id.clone(),
                scheduled_date: "2026-07-21".to_string(),
                message: "See you at the party!".to_string(),
            })
            .unwrap();

        // The composer's update is visible through the birthday service
        let jane = state
            .birthday_service
            .get_birthday(&jane_id)
            .unwrap()
            .unwrap();
        assert!(jane.scheduled);
        assert_eq!(jane.message, "See you at the party!");
    }
}
