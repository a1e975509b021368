use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::activity::{Activity, ActivityChanges, ActivityDraft};

pub mod postgres;

pub use postgres::PostgresActivityStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        StoreError::Unavailable(error.to_string())
    }
}

/// Outcome of a budget-guarded insert.
#[derive(Debug)]
pub enum BudgetedWrite {
    Committed(Activity),
    OverBudget { current_total: i64, excess: i64 },
}

/// Outcome of a budget-guarded, owner-scoped update.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Activity),
    Missing,
    OverBudget { current_total: i64, excess: i64 },
}

/// Contract of the activity record store.
///
/// The budget-guarded writes run their read-aggregate-then-write
/// sequence as one atomic unit per (owner, date), so two concurrent
/// inserts can never both pass the check and jointly exceed the day.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Activities for one (owner, date), creation time ascending.
    async fn list(&self, owner: Uuid, date: NaiveDate) -> Result<Vec<Activity>, StoreError>;

    /// Inserts `draft` if the date's committed total leaves room for it.
    async fn create(&self, owner: Uuid, draft: ActivityDraft) -> Result<BudgetedWrite, StoreError>;

    /// Applies `changes` to the activity scoped to (id, owner). When
    /// minutes change, the budget is re-checked against the date's
    /// total excluding the activity's own prior contribution.
    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: ActivityChanges,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Deletes the activity scoped to (id, owner); returns whether a
    /// row was removed.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError>;
}
