use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use std::fmt;

use crate::budget::DAILY_BUDGET_MINUTES;
use crate::ledger::LedgerError;
use crate::utils::validation::FieldError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Validation(Vec<FieldError>),
    BudgetExceeded { current_total: i64, excess: i64 },
    NotFound(String),
    Unauthorized(String),
    InternalServerError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Validation(fields) => write!(f, "Validation failed ({} fields)", fields.len()),
            AppError::BudgetExceeded {
                current_total,
                excess,
            } => write!(
                f,
                "Budget exceeded by {} minutes (current total: {})",
                excess, current_total
            ),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::InvalidInput(message) => AppError::BadRequest(message),
            LedgerError::Validation(fields) => AppError::Validation(fields),
            LedgerError::BudgetExceeded {
                current_total,
                excess,
            } => AppError::BudgetExceeded {
                current_total,
                excess,
            },
            LedgerError::NotFound => AppError::NotFound("Activity not found".to_string()),
            LedgerError::Store(message) => {
                // Cause stays server-side; the client gets a generic failure.
                log::error!("store failure: {}", message);
                AppError::InternalServerError("Database error".to_string())
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => {
                HttpResponse::BadRequest().json(ErrorResponse { error: msg.clone() })
            }
            AppError::Validation(fields) => HttpResponse::BadRequest().json(json!({
                "error": "Validation failed",
                "fields": fields,
            })),
            AppError::BudgetExceeded {
                current_total,
                excess,
            } => HttpResponse::BadRequest().json(json!({
                "error": format!(
                    "This would exceed 24 hours ({} minutes) for this day. Current total: {} minutes.",
                    DAILY_BUDGET_MINUTES, current_total
                ),
                "current_total": current_total,
                "excess": excess,
            })),
            AppError::NotFound(msg) => {
                HttpResponse::NotFound().json(ErrorResponse { error: msg.clone() })
            }
            AppError::Unauthorized(msg) => {
                HttpResponse::Unauthorized().json(ErrorResponse { error: msg.clone() })
            }
            AppError::InternalServerError(msg) => {
                HttpResponse::InternalServerError().json(ErrorResponse { error: msg.clone() })
            }
        }
    }
}
