use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::models::activity::{
    ActivityChanges, ActivityDraft, Category, CreateActivityRequest, UpdateActivityRequest,
};

pub const MAX_NAME_CHARS: usize = 100;
pub const MIN_MINUTES: i32 = 1;
pub const MAX_MINUTES: i32 = 1440;

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// One violated field with a human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Strict `YYYY-MM-DD` parse. The 4-2-2 digit pattern is enforced first
/// so leniently written dates like `2024-3-1` never reach the store;
/// the calendar parse then rejects out-of-range values like `2024-13-40`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    if !DATE_RE.is_match(raw) {
        return Err("Invalid date format. Use YYYY-MM-DD".to_string());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| "Invalid date format. Use YYYY-MM-DD".to_string())
}

fn check_name(name: &str) -> Result<(), FieldError> {
    if name.is_empty() {
        return Err(FieldError::new("name", "Activity name is required"));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(FieldError::new(
            "name",
            format!("Activity name cannot exceed {} characters", MAX_NAME_CHARS),
        ));
    }
    Ok(())
}

fn check_category(raw: &str) -> Result<Category, FieldError> {
    raw.parse::<Category>().map_err(|_| {
        let allowed = Category::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        FieldError::new("category", format!("Category must be one of: {}", allowed))
    })
}

fn check_minutes(minutes: i32) -> Result<(), FieldError> {
    if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
        return Err(FieldError::new(
            "minutes",
            format!(
                "Duration must be between {} and {} minutes",
                MIN_MINUTES, MAX_MINUTES
            ),
        ));
    }
    Ok(())
}

/// Validates a create payload, collecting every violated field.
pub fn validate_create(request: &CreateActivityRequest) -> Result<ActivityDraft, Vec<FieldError>> {
    let mut errors = Vec::new();

    let date = match request.date.as_deref() {
        Some(raw) => match parse_date(raw) {
            Ok(date) => Some(date),
            Err(message) => {
                errors.push(FieldError::new("date", message));
                None
            }
        },
        None => {
            errors.push(FieldError::new("date", "Date is required"));
            None
        }
    };

    let name = match request.name.as_deref() {
        Some(raw) => match check_name(raw) {
            Ok(()) => Some(raw.to_string()),
            Err(error) => {
                errors.push(error);
                None
            }
        },
        None => {
            errors.push(FieldError::new("name", "Activity name is required"));
            None
        }
    };

    let category = match request.category.as_deref() {
        Some(raw) => match check_category(raw) {
            Ok(category) => Some(category),
            Err(error) => {
                errors.push(error);
                None
            }
        },
        None => {
            errors.push(FieldError::new("category", "Category is required"));
            None
        }
    };

    let minutes = match request.minutes {
        Some(minutes) => match check_minutes(minutes) {
            Ok(()) => Some(minutes),
            Err(error) => {
                errors.push(error);
                None
            }
        },
        None => {
            errors.push(FieldError::new("minutes", "Duration is required"));
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }
    // All four are present when no error was recorded.
    Ok(ActivityDraft {
        date: date.unwrap(),
        name: name.unwrap(),
        category: category.unwrap(),
        minutes: minutes.unwrap(),
    })
}

/// Validates the fields present in a partial update; absent fields
/// stay untouched.
pub fn validate_update(
    request: &UpdateActivityRequest,
) -> Result<ActivityChanges, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut changes = ActivityChanges::default();

    if let Some(raw) = request.name.as_deref() {
        match check_name(raw) {
            Ok(()) => changes.name = Some(raw.to_string()),
            Err(error) => errors.push(error),
        }
    }

    if let Some(raw) = request.category.as_deref() {
        match check_category(raw) {
            Ok(category) => changes.category = Some(category),
            Err(error) => errors.push(error),
        }
    }

    if let Some(minutes) = request.minutes {
        match check_minutes(minutes) {
            Ok(()) => changes.minutes = Some(minutes),
            Err(error) => errors.push(error),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(changes)
}
