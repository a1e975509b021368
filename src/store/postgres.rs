use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::budget::{self, BudgetCheck};
use crate::models::activity::{Activity, ActivityChanges, ActivityDraft};
use crate::store::{ActivityStore, BudgetedWrite, StoreError, UpdateOutcome};

/// Postgres-backed activity store. Budget-guarded writes run inside
/// serializable transactions so the aggregate each write checks against
/// cannot be invalidated by a concurrent writer on the same (owner, date).
pub struct PostgresActivityStore {
    pool: PgPool,
}

impl PostgresActivityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PostgresActivityStore {
    async fn list(&self, owner: Uuid, date: NaiveDate) -> Result<Vec<Activity>, StoreError> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT id, owner_id, date, name, category, minutes, created_at, updated_at \
             FROM activities WHERE owner_id = $1 AND date = $2 ORDER BY created_at ASC",
        )
        .bind(owner)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }

    async fn create(&self, owner: Uuid, draft: ActivityDraft) -> Result<BudgetedWrite, StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let current_total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(minutes), 0) FROM activities WHERE owner_id = $1 AND date = $2",
        )
        .bind(owner)
        .bind(draft.date)
        .fetch_one(&mut *tx)
        .await?;

        if let BudgetCheck::Rejected { excess } = budget::check(current_total, draft.minutes as i64)
        {
            // Nothing written; dropping the transaction rolls it back.
            return Ok(BudgetedWrite::OverBudget {
                current_total,
                excess,
            });
        }

        let now = Utc::now();
        let activity = sqlx::query_as::<_, Activity>(
            "INSERT INTO activities (id, owner_id, date, name, category, minutes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, owner_id, date, name, category, minutes, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(draft.date)
        .bind(&draft.name)
        .bind(draft.category)
        .bind(draft.minutes)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(BudgetedWrite::Committed(activity))
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: ActivityChanges,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query_as::<_, Activity>(
            "SELECT id, owner_id, date, name, category, minutes, created_at, updated_at \
             FROM activities WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await?;

        let existing = match existing {
            Some(activity) => activity,
            None => return Ok(UpdateOutcome::Missing),
        };

        if let Some(minutes) = changes.minutes {
            let current_total: i64 = sqlx::query_scalar(
                "SELECT COALESCE(SUM(minutes), 0) FROM activities \
                 WHERE owner_id = $1 AND date = $2 AND id != $3",
            )
            .bind(owner)
            .bind(existing.date)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            if let BudgetCheck::Rejected { excess } = budget::check(current_total, minutes as i64) {
                return Ok(UpdateOutcome::OverBudget {
                    current_total,
                    excess,
                });
            }
        }

        let name = changes.name.unwrap_or(existing.name);
        let category = changes.category.unwrap_or(existing.category);
        let minutes = changes.minutes.unwrap_or(existing.minutes);

        let updated = sqlx::query_as::<_, Activity>(
            "UPDATE activities SET name = $1, category = $2, minutes = $3, updated_at = $4 \
             WHERE id = $5 AND owner_id = $6 \
             RETURNING id, owner_id, date, name, category, minutes, created_at, updated_at",
        )
        .bind(&name)
        .bind(category)
        .bind(minutes)
        .bind(Utc::now())
        .bind(id)
        .bind(owner)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(UpdateOutcome::Updated(updated))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
