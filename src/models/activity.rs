use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Fixed set of activity categories. Declaration order is the
/// tie-breaking order for analytics breakdowns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "activity_category")]
pub enum Category {
    Work,
    Study,
    Sleep,
    Entertainment,
    Exercise,
    #[serde(rename = "Personal Care")]
    #[sqlx(rename = "Personal Care")]
    PersonalCare,
    Social,
    Travel,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Work,
        Category::Study,
        Category::Sleep,
        Category::Entertainment,
        Category::Exercise,
        Category::PersonalCare,
        Category::Social,
        Category::Travel,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Study => "Study",
            Category::Sleep => "Sleep",
            Category::Entertainment => "Entertainment",
            Category::Exercise => "Exercise",
            Category::PersonalCare => "Personal Care",
            Category::Social => "Social",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    pub category: Category,
    pub minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw create payload; every field is checked explicitly before it
/// becomes an [`ActivityDraft`].
#[derive(Debug, Default, Deserialize)]
pub struct CreateActivityRequest {
    pub date: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub minutes: Option<i32>,
}

/// Raw partial update payload. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub minutes: Option<i32>,
}

/// Validated input for a new activity.
#[derive(Debug, Clone)]
pub struct ActivityDraft {
    pub date: NaiveDate,
    pub name: String,
    pub category: Category,
    pub minutes: i32,
}

/// Validated partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ActivityChanges {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub minutes: Option<i32>,
}
