//! Daily minute budget: a calendar day holds at most 1440 minutes of
//! logged activity per owner.

pub const DAILY_BUDGET_MINUTES: i64 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetCheck {
    Admissible,
    Rejected { excess: i64 },
}

/// Decides whether `proposed_minutes` fits the day's remaining budget.
///
/// `current_total_excluding_self` is the committed total for the
/// (owner, date) pair, minus the contribution of the activity being
/// modified when this is an update.
pub fn check(current_total_excluding_self: i64, proposed_minutes: i64) -> BudgetCheck {
    let new_total = current_total_excluding_self + proposed_minutes;
    if new_total <= DAILY_BUDGET_MINUTES {
        BudgetCheck::Admissible
    } else {
        BudgetCheck::Rejected {
            excess: new_total - DAILY_BUDGET_MINUTES,
        }
    }
}
