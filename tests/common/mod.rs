use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Mutex;
use uuid::Uuid;

use dayledger::budget::{self, BudgetCheck};
use dayledger::models::activity::{Activity, ActivityChanges, ActivityDraft};
use dayledger::store::{ActivityStore, BudgetedWrite, StoreError, UpdateOutcome};

/// In-memory activity store. The mutex serializes each
/// read-aggregate-then-write sequence, standing in for the serializable
/// transactions of the Postgres store. Records keep insertion order,
/// which is creation order.
#[derive(Default)]
pub struct MemoryActivityStore {
    records: Mutex<Vec<Activity>>,
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn list(&self, owner: Uuid, date: NaiveDate) -> Result<Vec<Activity>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|a| a.owner_id == owner && a.date == date)
            .cloned()
            .collect())
    }

    async fn create(&self, owner: Uuid, draft: ActivityDraft) -> Result<BudgetedWrite, StoreError> {
        let mut records = self.records.lock().unwrap();

        let current_total: i64 = records
            .iter()
            .filter(|a| a.owner_id == owner && a.date == draft.date)
            .map(|a| a.minutes as i64)
            .sum();

        if let BudgetCheck::Rejected { excess } = budget::check(current_total, draft.minutes as i64)
        {
            return Ok(BudgetedWrite::OverBudget {
                current_total,
                excess,
            });
        }

        let now = Utc::now();
        let activity = Activity {
            id: Uuid::new_v4(),
            owner_id: owner,
            date: draft.date,
            name: draft.name,
            category: draft.category,
            minutes: draft.minutes,
            created_at: now,
            updated_at: now,
        };
        records.push(activity.clone());
        Ok(BudgetedWrite::Committed(activity))
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: ActivityChanges,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut records = self.records.lock().unwrap();

        let position = match records
            .iter()
            .position(|a| a.id == id && a.owner_id == owner)
        {
            Some(position) => position,
            None => return Ok(UpdateOutcome::Missing),
        };

        if let Some(minutes) = changes.minutes {
            let date = records[position].date;
            let current_total: i64 = records
                .iter()
                .filter(|a| a.owner_id == owner && a.date == date && a.id != id)
                .map(|a| a.minutes as i64)
                .sum();

            if let BudgetCheck::Rejected { excess } = budget::check(current_total, minutes as i64) {
                return Ok(UpdateOutcome::OverBudget {
                    current_total,
                    excess,
                });
            }
        }

        let record = &mut records[position];
        if let Some(name) = changes.name {
            record.name = name;
        }
        if let Some(category) = changes.category {
            record.category = category;
        }
        if let Some(minutes) = changes.minutes {
            record.minutes = minutes;
        }
        record.updated_at = Utc::now();
        Ok(UpdateOutcome::Updated(record.clone()))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|a| !(a.id == id && a.owner_id == owner));
        Ok(records.len() < before)
    }
}
