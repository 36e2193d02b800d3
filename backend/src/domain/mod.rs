//! # Domain Module
//!
//! Contains all business logic for the birthday tracker application.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how birthdays are modeled, queried, and scheduled. It operates
//! independently of any specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **birthday_service**: Core birthday CRUD operations and business logic
//! - **composer**: Compose-and-schedule form handling and validation
//! - **calendar**: Calendar grid generation and the upcoming-birthdays window
//! - **date_utils**: Date parsing, display formatting, and next-occurrence math
//!
//! ## Business Rules
//!
//! - Records are addressed by unique IDs assigned at creation time
//! - A blank person name falls back to a placeholder instead of failing
//! - Targeted mutations require the record to exist; wholesale update is an
//!   explicit upsert
//! - Scheduling a message requires a selected friend, a non-empty message,
//!   and a valid send date, applied as one combined update
//!
//! ## Design Principles
//!
//! - **Single Responsibility**: each service has a focused purpose
//! - **Storage Agnostic**: works with any `BirthdayStorage` implementation
//! - **UI Agnostic**: business logic separate from presentation concerns
//! - **Testability**: date computations take an explicit "today" where tests
//!   need determinism

pub mod birthday_service;
pub mod composer;
pub mod calendar;
pub mod date_utils;

pub use birthday_service::*;
pub use composer::*;
pub use calendar::*;
pub use date_utils::*;
