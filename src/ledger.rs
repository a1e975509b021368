//! The activity ledger: owner-scoped CRUD over activities under the
//! daily minute budget.

use std::sync::Arc;
use uuid::Uuid;

use crate::analytics::{self, DaySummary};
use crate::models::activity::{Activity, CreateActivityRequest, UpdateActivityRequest};
use crate::store::{ActivityStore, BudgetedWrite, StoreError, UpdateOutcome};
use crate::utils::validation::{self, FieldError};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("daily budget exceeded by {excess} minutes (current total: {current_total})")]
    BudgetExceeded { current_total: i64, excess: i64 },

    #[error("activity not found")]
    NotFound,

    #[error("store unavailable: {0}")]
    Store(String),
}

impl From<StoreError> for LedgerError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(message) => LedgerError::Store(message),
        }
    }
}

/// Sole writer of the activity store on behalf of the application.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn ActivityStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    /// Activities for one (owner, date), creation time ascending.
    pub async fn list(&self, owner: Uuid, date: &str) -> Result<Vec<Activity>, LedgerError> {
        let date = validation::parse_date(date).map_err(LedgerError::InvalidInput)?;
        Ok(self.store.list(owner, date).await?)
    }

    /// Validates and inserts a new activity, enforcing the daily budget.
    pub async fn create(
        &self,
        owner: Uuid,
        request: CreateActivityRequest,
    ) -> Result<Activity, LedgerError> {
        let draft = validation::validate_create(&request).map_err(LedgerError::Validation)?;

        match self.store.create(owner, draft).await? {
            BudgetedWrite::Committed(activity) => Ok(activity),
            BudgetedWrite::OverBudget {
                current_total,
                excess,
            } => {
                log::debug!(
                    "create rejected for owner {}: total {} would exceed budget by {}",
                    owner,
                    current_total,
                    excess
                );
                Err(LedgerError::BudgetExceeded {
                    current_total,
                    excess,
                })
            }
        }
    }

    /// Applies a partial update to an owned activity. A minutes change
    /// is re-checked against the date's total excluding the activity's
    /// own prior contribution.
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        request: UpdateActivityRequest,
    ) -> Result<Activity, LedgerError> {
        let changes = validation::validate_update(&request).map_err(LedgerError::Validation)?;

        match self.store.update(owner, id, changes).await? {
            UpdateOutcome::Updated(activity) => Ok(activity),
            UpdateOutcome::Missing => Err(LedgerError::NotFound),
            UpdateOutcome::OverBudget {
                current_total,
                excess,
            } => Err(LedgerError::BudgetExceeded {
                current_total,
                excess,
            }),
        }
    }

    /// Deletes an owned activity, immediately freeing its budget.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), LedgerError> {
        if self.store.delete(owner, id).await? {
            Ok(())
        } else {
            Err(LedgerError::NotFound)
        }
    }

    /// Aggregated view of one (owner, date).
    pub async fn day_summary(&self, owner: Uuid, date: &str) -> Result<DaySummary, LedgerError> {
        let parsed = validation::parse_date(date).map_err(LedgerError::InvalidInput)?;
        let activities = self.store.list(owner, parsed).await?;
        Ok(analytics::summarize(parsed, &activities))
    }
}
