use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Birthday ID in format: "birthday::<uuid-v4>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Birthday {
    pub id: String,
    /// Display name of the tracked person
    pub person: String,
    /// Birth date (ISO 8601, YYYY-MM-DD); only month and day drive recurrence
    pub date: String,
    /// Greeting message to send on the birthday
    pub message: String,
    /// Whether a send is planned for this record
    pub scheduled: bool,
    /// Date the message should go out (ISO 8601, YYYY-MM-DD)
    pub scheduled_date: Option<String>,
}

/// Request for adding a new birthday record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddBirthdayRequest {
    pub person: String,
    /// Birth date (ISO 8601, YYYY-MM-DD)
    pub date: String,
    /// Initial greeting message; empty if not provided
    pub message: Option<String>,
    /// Whether a send is already planned; false if not provided
    pub scheduled: Option<bool>,
    /// Optional send date (ISO 8601, YYYY-MM-DD)
    pub scheduled_date: Option<String>,
}

/// Response after creating or mutating a birthday record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BirthdayResponse {
    pub birthday: Birthday,
    pub success_message: String,
}

/// Response containing a list of birthday records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BirthdayListResponse {
    pub birthdays: Vec<Birthday>,
}

/// Request for scheduling a birthday message from the composer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleMessageRequest {
    pub birthday_id: String,
    /// Date the message should go out (ISO 8601, YYYY-MM-DD)
    pub scheduled_date: String,
    pub message: String,
}

/// Response after scheduling a birthday message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleMessageResponse {
    pub birthday: Birthday,
    pub success_message: String,
}

/// A birthday whose next occurrence falls inside the upcoming window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingBirthday {
    pub birthday: Birthday,
    /// Next occurrence of the birthday (ISO 8601, YYYY-MM-DD)
    pub occurs_on: String,
    /// Age shown next to the entry: (occurrence year - birth year) + 1
    pub age: u32,
    /// Days between today and the occurrence (0 = today)
    pub days_away: u32,
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CalendarDayType {
    /// Empty padding day before the start of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Empty padding day after the end of the month (if needed for grid alignment)
    PaddingAfter,
}

/// Represents a single day in the calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    pub day: u32,
    /// Birthdays recurring on this day (birth year ignored)
    pub birthdays: Vec<Birthday>,
    pub day_type: CalendarDayType,
}

/// Represents a calendar month with the birthdays that recur in it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: u32,
    pub days: Vec<CalendarDay>,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
}

/// Current date information from the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: u32,
    pub day: u32,
    pub formatted_date: String, // e.g., "June 19, 2025"
    pub iso_date: String,       // e.g., "2025-06-19"
}

/// Form validation result for the message composer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComposerValidation {
    pub is_valid: bool,
    pub errors: Vec<ComposerValidationError>,
}

/// Specific validation errors for the compose-and-schedule form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ComposerValidationError {
    NoBirthdaySelected,
    EmptyMessage,
    MessageTooLong(usize),
    MissingScheduleDate,
    InvalidScheduleDate(String),
}

/// State for the message composer form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComposerFormState {
    /// Id of the selected friend; empty when nothing is selected
    pub selected_id: String,
    pub message: String,
    /// Schedule date input (ISO 8601, YYYY-MM-DD); empty when not chosen
    pub schedule_date: String,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

/// Configuration for the message composer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComposerConfig {
    pub max_message_length: usize,
    /// Message prefilled when adding a contact
    pub default_message: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_message_length: 500,
            default_message: "Happy birthday!".to_string(),
        }
    }
}

impl Birthday {
    /// Generate a fresh unique birthday ID
    pub fn generate_id() -> String {
        format!("birthday::{}", Uuid::new_v4())
    }

    /// Parse a birthday ID to extract the unique component
    pub fn parse_id(id: &str) -> Result<Uuid, BirthdayIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "birthday" {
            return Err(BirthdayIdError::InvalidFormat);
        }

        Uuid::parse_str(parts[1]).map_err(|_| BirthdayIdError::InvalidUuid)
    }

    /// Initials shown in the contact card avatar, e.g. "Jane Smith" -> "JS"
    pub fn initials(&self) -> String {
        self.person
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BirthdayIdError {
    InvalidFormat,
    InvalidUuid,
}

impl fmt::Display for BirthdayIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirthdayIdError::InvalidFormat => write!(f, "Invalid birthday ID format"),
            BirthdayIdError::InvalidUuid => write!(f, "Invalid unique component in birthday ID"),
        }
    }
}

impl std::error::Error for BirthdayIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_birthday() -> Birthday {
        Birthday {
            id: Birthday::generate_id(),
            person: "Jane Smith".to_string(),
            date: "1985-07-22".to_string(),
            message: "Many happy returns!".to_string(),
            scheduled: false,
            scheduled_date: None,
        }
    }

    #[test]
    fn test_generate_birthday_id() {
        let id = Birthday::generate_id();
        assert!(id.starts_with("birthday::"));

        // Two generated IDs must never collide
        assert_ne!(Birthday::generate_id(), Birthday::generate_id());
    }

    #[test]
    fn test_parse_birthday_id() {
        // Test valid ID round trip
        let id = Birthday::generate_id();
        assert!(Birthday::parse_id(&id).is_ok());

        // Test invalid format
        assert!(Birthday::parse_id("invalid").is_err());
        assert!(Birthday::parse_id("birthday").is_err());
        assert!(Birthday::parse_id("child::1702516122000").is_err());

        // Test invalid unique component
        assert_eq!(
            Birthday::parse_id("birthday::not-a-uuid"),
            Err(BirthdayIdError::InvalidUuid)
        );
    }

    #[test]
    fn test_initials() {
        let mut birthday = create_test_birthday();
        assert_eq!(birthday.initials(), "JS");

        birthday.person = "Cher".to_string();
        assert_eq!(birthday.initials(), "C");

        birthday.person = "  ".to_string();
        assert_eq!(birthday.initials(), "");
    }

    #[test]
    fn test_birthday_serde_round_trip() {
        let birthday = create_test_birthday();

        let json = serde_json::to_string(&birthday).expect("Failed to serialize birthday");
        let parsed: Birthday = serde_json::from_str(&json).expect("Failed to deserialize birthday");

        assert_eq!(parsed, birthday);
    }

    #[test]
    fn test_composer_config_default() {
        let config = ComposerConfig::default();
        assert_eq!(config.max_message_length, 500);
        assert_eq!(config.default_message, "Happy birthday!");
    }
}
