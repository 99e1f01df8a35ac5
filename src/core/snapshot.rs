//! Snapshot loading - Reads a consistent view of the trip from the database.
//!
//! Members, both kinds of expenses and the participant links are read inside one
//! transaction, so the balance calculator never sees a half-applied mutation.

use crate::{
    core::{added_expense, budgeted_expense, member, model},
    entities::{AddedExpenseModel, BudgetedExpenseModel, ExpenseParticipantModel, MemberModel},
    errors::Result,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::HashMap;

/// Loads every member and expense as of a single point in time.
pub async fn load_snapshot(db: &DatabaseConnection) -> Result<model::Snapshot> {
    let txn = db.begin().await?;

    let members = member::get_all_members(&txn).await?;
    let budgeted = budgeted_expense::get_all_budgeted_expenses(&txn).await?;
    let added = added_expense::get_all_added_expense_rows(&txn).await?;
    let links = added_expense::get_all_participant_links(&txn).await?;

    txn.commit().await?;

    tracing::debug!(
        members = members.len(),
        budgeted = budgeted.len(),
        added = added.len(),
        "Loaded trip snapshot"
    );

    Ok(build_snapshot(&members, &budgeted, &added, &links))
}

/// Assembles a snapshot from raw rows.
///
/// Participant ids are ordered by member id. Links to members that no longer exist are
/// kept, so the calculator can report them instead of silently shrinking the split.
#[must_use]
pub fn build_snapshot(
    members: &[MemberModel],
    budgeted: &[BudgetedExpenseModel],
    added: &[AddedExpenseModel],
    links: &[ExpenseParticipantModel],
) -> model::Snapshot {
    let mut participants: HashMap<i64, Vec<model::MemberId>> = HashMap::new();
    for link in links {
        participants
            .entry(link.added_expense_id)
            .or_default()
            .push(model::MemberId(link.member_id));
    }

    model::Snapshot {
        members: members
            .iter()
            .map(|m| model::Member::new(m.id, m.name.clone()))
            .collect(),
        budgeted: budgeted.iter().map(budgeted_expense::to_domain).collect(),
        added: added
            .iter()
            .map(|row| {
                let mut ids = participants.remove(&row.id).unwrap_or_default();
                ids.sort();
                added_expense::to_domain(row, ids)
            })
            .collect(),
    }
}
