//! Message composer domain logic for the birthday tracker.
//!
//! This module contains the business rules for composing a birthday message
//! and scheduling its send: form validation, error message wording, and the
//! atomic apply step. The UI should only handle presentation concerns.

use anyhow::Result;
use log::{info, warn};
use shared::{
    ComposerConfig, ComposerFormState, ComposerValidation, ComposerValidationError,
    ScheduleMessageRequest, ScheduleMessageResponse,
};

use crate::domain::birthday_service::BirthdayService;
use crate::domain::date_utils;

/// Composer service that handles the compose-and-schedule flow
#[derive(Clone)]
pub struct MessageComposerService {
    birthday_service: BirthdayService,
    config: ComposerConfig,
}

impl MessageComposerService {
    pub fn new(birthday_service: BirthdayService) -> Self {
        Self {
            birthday_service,
            config: ComposerConfig::default(),
        }
    }

    pub fn with_config(birthday_service: BirthdayService, config: ComposerConfig) -> Self {
        Self {
            birthday_service,
            config,
        }
    }

    /// Create a fresh form state for the composer
    pub fn create_form_state() -> ComposerFormState {
        ComposerFormState {
            selected_id: String::new(),
            message: String::new(),
            schedule_date: String::new(),
            error_message: None,
            success_message: None,
        }
    }

    /// Validate the compose-and-schedule form input
    ///
    /// Scheduling requires a selected friend, a non-empty message within the
    /// length limit, and a schedule date that parses.
    pub fn validate_schedule_form(&self, request: &ScheduleMessageRequest) -> ComposerValidation {
        let mut errors = Vec::new();

        if request.birthday_id.trim().is_empty() {
            errors.push(ComposerValidationError::NoBirthdaySelected);
        }

        let message = request.message.trim();
        if message.is_empty() {
            errors.push(ComposerValidationError::EmptyMessage);
        } else if message.len() > self.config.max_message_length {
            errors.push(ComposerValidationError::MessageTooLong(message.len()));
        }

        if request.scheduled_date.trim().is_empty() {
            errors.push(ComposerValidationError::MissingScheduleDate);
        } else if let Err(err) = date_utils::parse_date(&request.scheduled_date) {
            errors.push(ComposerValidationError::InvalidScheduleDate(err.to_string()));
        }

        ComposerValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Validate, then schedule the message in a single combined update
    ///
    /// A failing validation aborts before any store mutation, so there is
    /// never a partial update.
    pub fn schedule_message(
        &self,
        request: ScheduleMessageRequest,
    ) -> Result<ScheduleMessageResponse> {
        let validation = self.validate_schedule_form(&request);
        if !validation.is_valid {
            warn!("Rejecting schedule request: {:?}", validation.errors);
            let reason = self
                .get_first_error_message(&validation.errors)
                .unwrap_or_else(|| "Please fill in all fields".to_string());
            anyhow::bail!(reason);
        }

        let response = self.birthday_service.schedule_message(
            &request.birthday_id,
            request.scheduled_date.trim(),
            request.message.trim(),
        )?;

        let send_date = date_utils::format_date(&request.scheduled_date)
            .unwrap_or_else(|_| request.scheduled_date.clone());

        info!(
            "Scheduled message for {} on {}",
            response.birthday.person, send_date
        );

        Ok(ScheduleMessageResponse {
            success_message: format!(
                "Message for {} scheduled for {}",
                response.birthday.person, send_date
            ),
            birthday: response.birthday,
        })
    }

    /// Get a user-friendly error message for a validation error
    pub fn get_error_message(&self, error: &ComposerValidationError) -> String {
        match error {
            ComposerValidationError::NoBirthdaySelected => {
                "Please select a friend".to_string()
            }
            ComposerValidationError::EmptyMessage => {
                "Please type a birthday message".to_string()
            }
            ComposerValidationError::MessageTooLong(len) => format!(
                "Message is too long ({} characters). Maximum is {}.",
                len, self.config.max_message_length
            ),
            ComposerValidationError::MissingScheduleDate => {
                "Please pick a schedule date".to_string()
            }
            ComposerValidationError::InvalidScheduleDate(msg) => {
                format!("Please pick a valid schedule date: {}", msg)
            }
        }
    }

    /// Get the first error message (for displaying a single error)
    pub fn get_first_error_message(&self, errors: &[ComposerValidationError]) -> Option<String> {
        errors.first().map(|e| self.get_error_message(e))
    }

    /// Clear form state after successful submission
    pub fn clear_form_after_success(
        &self,
        mut state: ComposerFormState,
        success_message: String,
    ) -> ComposerFormState {
        state.selected_id = String::new();
        state.message = String::new();
        state.schedule_date = String::new();
        state.error_message = None;
        state.success_message = Some(success_message);
        state
    }

    /// Set form state with an error
    pub fn set_form_error(
        &self,
        mut state: ComposerFormState,
        error_message: String,
    ) -> ComposerFormState {
        state.error_message = Some(error_message);
        state.success_message = None;
        state
    }
}
