//! Added expense business logic - Costs incurred during the trip.
//!
//! An added expense is split among an explicit participant list that is fixed when the
//! expense is recorded. When no list is given, every current member participates.

use crate::{
    core::{
        budgeted_expense::{validate_amount, validate_category},
        member, model,
        money::Money,
    },
    entities::{
        AddedExpense, ExpenseParticipant, Member, MemberColumn, MemberModel, added_expense,
        expense_participant,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::{BTreeSet, HashMap};

/// An added expense together with the members sharing it.
#[derive(Debug, Clone)]
pub struct AddedExpenseDetails {
    /// The stored expense
    pub expense: added_expense::Model,
    /// Participants, sorted by name
    pub participants: Vec<MemberModel>,
}

/// Records an added expense and its participant list in one transaction.
///
/// # Arguments
/// * `participants` - Member ids to split among; `None` means every current member.
pub async fn create_added_expense(
    db: &DatabaseConnection,
    category: String,
    amount: Money,
    payer_id: i64,
    participants: Option<Vec<i64>>,
) -> Result<AddedExpenseDetails> {
    let category = validate_category(&category)?;
    validate_amount(amount)?;

    let txn = db.begin().await?;

    let payer = member::require_member_by_id(&txn, payer_id).await?;

    let participant_ids: BTreeSet<i64> = match participants {
        Some(ids) => ids.into_iter().collect(),
        None => member::get_all_members(&txn)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect(),
    };
    if participant_ids.is_empty() {
        return Err(Error::NoParticipants);
    }

    let mut participant_models = Member::find()
        .filter(MemberColumn::Id.is_in(participant_ids.iter().copied()))
        .all(&txn)
        .await?;
    if let Some(missing) = participant_ids
        .iter()
        .find(|id| !participant_models.iter().any(|m| m.id == **id))
    {
        return Err(Error::MemberNotFound {
            name: format!("#{missing}"),
        });
    }

    let expense = added_expense::ActiveModel {
        category: Set(category),
        amount_cents: Set(amount.cents()),
        payer_id: Set(payer.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let links = participant_ids
        .iter()
        .map(|member_id| expense_participant::ActiveModel {
            added_expense_id: Set(expense.id),
            member_id: Set(*member_id),
        });
    ExpenseParticipant::insert_many(links)
        .exec_without_returning(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        expense_id = expense.id,
        participants = participant_ids.len(),
        "Recorded added expense '{}' of {} paid by '{}'",
        expense.category,
        amount,
        payer.name
    );

    participant_models.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(AddedExpenseDetails {
        expense,
        participants: participant_models,
    })
}

/// Retrieves every participant link.
pub async fn get_all_participant_links<C>(db: &C) -> Result<Vec<expense_participant::Model>>
where
    C: ConnectionTrait,
{
    ExpenseParticipant::find()
        .order_by_asc(expense_participant::Column::AddedExpenseId)
        .order_by_asc(expense_participant::Column::MemberId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the added expense rows alone, oldest first.
pub async fn get_all_added_expense_rows<C>(db: &C) -> Result<Vec<added_expense::Model>>
where
    C: ConnectionTrait,
{
    AddedExpense::find()
        .order_by_asc(added_expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all added expenses with their participants, oldest first.
pub async fn get_all_added_expenses<C>(db: &C) -> Result<Vec<AddedExpenseDetails>>
where
    C: ConnectionTrait,
{
    let expenses = get_all_added_expense_rows(db).await?;
    let members: HashMap<i64, MemberModel> = member::get_all_members(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    let mut by_expense: HashMap<i64, Vec<MemberModel>> = HashMap::new();
    for link in get_all_participant_links(db).await? {
        if let Some(m) = members.get(&link.member_id) {
            by_expense
                .entry(link.added_expense_id)
                .or_default()
                .push(m.clone());
        }
    }

    Ok(expenses
        .into_iter()
        .map(|expense| {
            let mut participants = by_expense.remove(&expense.id).unwrap_or_default();
            participants.sort_by(|a, b| a.name.cmp(&b.name));
            AddedExpenseDetails {
                expense,
                participants,
            }
        })
        .collect())
}

/// Deletes an added expense and its participant links.
pub async fn delete_added_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    ExpenseParticipant::delete_many()
        .filter(expense_participant::Column::AddedExpenseId.eq(expense_id))
        .exec(&txn)
        .await?;
    let result = AddedExpense::delete_by_id(expense_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(Error::ExpenseNotFound { id: expense_id });
    }

    txn.commit().await?;
    tracing::info!(expense_id, "Deleted added expense");
    Ok(())
}

/// Picks every member except the named ones as participants.
///
/// Names are matched exactly after trimming; an unknown name is an error so a typo never
/// silently charges someone who meant to opt out.
pub fn participants_excluding(
    members: &[MemberModel],
    excluded: &[&str],
) -> Result<Vec<i64>> {
    for name in excluded {
        let name = name.trim();
        if !members.iter().any(|m| m.name == name) {
            return Err(Error::MemberNotFound {
                name: name.to_string(),
            });
        }
    }

    let participants: Vec<i64> = members
        .iter()
        .filter(|m| !excluded.iter().any(|name| name.trim() == m.name))
        .map(|m| m.id)
        .collect();

    if participants.is_empty() {
        return Err(Error::NoParticipants);
    }
    Ok(participants)
}

/// Converts a stored row and its participant ids into the engine's representation.
#[must_use]
pub fn to_domain(
    row: &added_expense::Model,
    participants: Vec<model::MemberId>,
) -> model::AddedExpense {
    model::AddedExpense {
        id: row.id,
        category: row.category.clone(),
        amount: Money::from_cents(row.amount_cents),
        payer: model::MemberId(row.payer_id),
        participants,
    }
}
