//! Calendar domain logic for the birthday tracker.
//!
//! This module contains all business logic related to calendar operations,
//! date calculations, and organizing birthdays by day. The UI should only
//! handle presentation concerns, while all calendar computations and
//! business rules are handled here.

use chrono::{Datelike, NaiveDate, Utc};
use log::warn;
use shared::{
    Birthday, CalendarDay, CalendarDayType, CalendarMonth, CurrentDateResponse, UpcomingBirthday,
};
use std::collections::HashMap;

use crate::domain::date_utils;

/// How far ahead the upcoming-birthdays view looks, in days
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 30;

/// Calendar service that handles all calendar-related business logic
#[derive(Clone)]
pub struct CalendarService;

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new() -> Self {
        Self
    }

    /// Generate a calendar month grid with the birthdays recurring in it
    ///
    /// Birthdays land on the day cell matching their birth month and day; the
    /// birth year is ignored. The grid is padded to full weeks on both sides.
    pub fn generate_calendar_month(
        &self,
        month: u32,
        year: u32,
        birthdays: &[Birthday],
    ) -> CalendarMonth {
        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);
        let birthdays_by_day = self.group_birthdays_by_day(month, birthdays);

        let mut calendar_days = Vec::new();

        // Empty cells before the first day of the month
        for _ in 0..first_day {
            calendar_days.push(CalendarDay {
                day: 0,
                birthdays: Vec::new(),
                day_type: CalendarDayType::PaddingBefore,
            });
        }

        // The days of the month
        for day in 1..=days_in_month {
            calendar_days.push(CalendarDay {
                day,
                birthdays: birthdays_by_day.get(&day).cloned().unwrap_or_default(),
                day_type: CalendarDayType::MonthDay,
            });
        }

        // Pad the final week so the grid is a whole number of weeks
        while calendar_days.len() % 7 != 0 {
            calendar_days.push(CalendarDay {
                day: 0,
                birthdays: Vec::new(),
                day_type: CalendarDayType::PaddingAfter,
            });
        }

        CalendarMonth {
            month,
            year,
            days: calendar_days,
            first_day_of_week: first_day,
        }
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: u32) -> u32 {
        match month {
            2 => if self.is_leap_year(year) { 29 } else { 28 },
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: u32) -> u32 {
        if let Some(date) = NaiveDate::from_ymd_opt(year as i32, month, 1) {
            // chrono's weekday(): Monday = 1, ..., Sunday = 7
            // Our format: Sunday = 0, Monday = 1, ..., Saturday = 6
            date.weekday().num_days_from_sunday()
        } else {
            // Invalid date, fallback to 0 (Sunday)
            0
        }
    }

    /// Get current date information (UTC)
    pub fn get_current_date(&self) -> CurrentDateResponse {
        let now = Utc::now().date_naive();
        let month = now.month();
        let year = now.year() as u32;
        let day = now.day();

        CurrentDateResponse {
            month,
            year,
            day,
            formatted_date: format!("{} {}, {}", date_utils::month_name(month), day, year),
            iso_date: format!("{:04}-{:02}-{:02}", year, month, day),
        }
    }

    /// Birthdays whose next occurrence falls within `window_days` of today
    pub fn upcoming_birthdays(
        &self,
        birthdays: &[Birthday],
        window_days: u32,
    ) -> Vec<UpcomingBirthday> {
        self.upcoming_birthdays_from(birthdays, Utc::now().date_naive(), window_days)
    }

    /// Upcoming-birthday computation against a fixed `today`
    ///
    /// The window spans month and year boundaries: a birthday on the 2nd of
    /// next month is upcoming on the 28th of this one. Entries are sorted
    /// soonest first, then by person name.
    pub fn upcoming_birthdays_from(
        &self,
        birthdays: &[Birthday],
        today: NaiveDate,
        window_days: u32,
    ) -> Vec<UpcomingBirthday> {
        let mut upcoming = Vec::new();

        for birthday in birthdays {
            let birth = match date_utils::parse_date(&birthday.date) {
                Ok(date) => date,
                Err(err) => {
                    warn!("Skipping birthday {} with bad date: {}", birthday.id, err);
                    continue;
                }
            };

            let occurrence = date_utils::next_occurrence(birth, today);
            let days_away = (occurrence - today).num_days();
            if days_away > window_days as i64 {
                continue;
            }

            let age = (occurrence.year() - birth.year() + 1).max(0) as u32;

            upcoming.push(UpcomingBirthday {
                birthday: birthday.clone(),
                occurs_on: occurrence.format("%Y-%m-%d").to_string(),
                age,
                days_away: days_away as u32,
            });
        }

        upcoming.sort_by(|a, b| {
            a.days_away
                .cmp(&b.days_away)
                .then_with(|| a.birthday.person.cmp(&b.birthday.person))
        });
        upcoming
    }

    /// Group birthdays by their day-of-month within `month` (birth year ignored)
    fn group_birthdays_by_day(
        &self,
        month: u32,
        birthdays: &[Birthday],
    ) -> HashMap<u32, Vec<Birthday>> {
        let mut by_day: HashMap<u32, Vec<Birthday>> = HashMap::new();

        for birthday in birthdays {
            match date_utils::parse_date(&birthday.date) {
                Ok(date) if date.month() == month => {
                    by_day.entry(date.day()).or_default().push(birthday.clone());
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("Skipping birthday {} with bad date: {}", birthday.id, err);
                }
            }
        }

        by_day
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
