//! Member business logic - Handles creating, listing and removing trip members.
//!
//! Member names are unique display labels; everything else in the system refers to members
//! by id. Removing a member never leaves an expense without a payer: members who paid for
//! something must first have those expenses reassigned with [`reassign_payer`].

use crate::{
    entities::{
        AddedExpense, BudgetedExpense, ExpenseParticipant, Member, added_expense,
        budgeted_expense, expense_participant, member,
    },
    errors::{Error, Result},
};
use sea_orm::{
    PaginatorTrait, QueryOrder, Set, SqlErr, TransactionTrait, prelude::*, sea_query::Expr,
};
use std::collections::BTreeSet;

/// What happened when a member was removed.
#[derive(Debug, Clone)]
pub struct MemberRemoval {
    /// The member that was removed
    pub member: member::Model,
    /// Added expenses this member was the last participant of
    pub orphaned_expense_ids: Vec<i64>,
}

/// Retrieves all members, in the order they were added.
pub async fn get_all_members<C>(db: &C) -> Result<Vec<member::Model>>
where
    C: ConnectionTrait,
{
    Member::find()
        .order_by_asc(member::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a member by exact name, returning None if there is no such member.
pub async fn get_member_by_name<C>(db: &C, name: &str) -> Result<Option<member::Model>>
where
    C: ConnectionTrait,
{
    Member::find()
        .filter(member::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a member by name, failing with [`Error::MemberNotFound`] if absent.
pub async fn require_member_by_name<C>(db: &C, name: &str) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    get_member_by_name(db, name)
        .await?
        .ok_or_else(|| Error::MemberNotFound {
            name: name.trim().to_string(),
        })
}

/// Finds a member by id, failing with [`Error::MemberNotFound`] if absent.
pub async fn require_member_by_id<C>(db: &C, member_id: i64) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    Member::find_by_id(member_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::MemberNotFound {
            name: format!("#{member_id}"),
        })
}

/// Creates a new member after trimming the name and checking it is unique.
pub async fn create_member<C>(db: &C, name: String) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Member name cannot be empty".to_string(),
        });
    }

    if get_member_by_name(db, &name).await?.is_some() {
        return Err(Error::DuplicateMember { name });
    }

    let member = member::ActiveModel {
        name: Set(name.clone()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = member
        .insert(db)
        .await
        .map_err(|e| insert_error(e, name))?;
    tracing::info!(member_id = result.id, "Added member '{}'", result.name);
    Ok(result)
}

/// A unique-name violation means another insert won the race past the duplicate check.
fn insert_error(err: DbErr, name: String) -> Error {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        Error::DuplicateMember { name }
    } else {
        err.into()
    }
}

/// Counts the budgeted and added expenses a member paid for.
pub async fn count_paid_expenses<C>(db: &C, member_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let budgeted = BudgetedExpense::find()
        .filter(budgeted_expense::Column::PayerId.eq(member_id))
        .count(db)
        .await?;
    let added = AddedExpense::find()
        .filter(added_expense::Column::PayerId.eq(member_id))
        .count(db)
        .await?;
    Ok(budgeted + added)
}

/// Removes a member and takes them out of every added expense they participate in.
///
/// Fails with [`Error::MemberIsPayer`] if the member paid for any expense. Added expenses
/// left with no participants are reported back so the caller can warn about them.
pub async fn delete_member(db: &DatabaseConnection, member_id: i64) -> Result<MemberRemoval> {
    let txn = db.begin().await?;

    let member = require_member_by_id(&txn, member_id).await?;

    let paid = count_paid_expenses(&txn, member_id).await?;
    if paid > 0 {
        return Err(Error::MemberIsPayer {
            name: member.name,
            expenses: paid,
        });
    }

    let affected: BTreeSet<i64> = ExpenseParticipant::find()
        .filter(expense_participant::Column::MemberId.eq(member_id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|link| link.added_expense_id)
        .collect();

    ExpenseParticipant::delete_many()
        .filter(expense_participant::Column::MemberId.eq(member_id))
        .exec(&txn)
        .await?;
    Member::delete_by_id(member_id).exec(&txn).await?;

    let mut orphaned_expense_ids = Vec::new();
    for expense_id in affected {
        let remaining = ExpenseParticipant::find()
            .filter(expense_participant::Column::AddedExpenseId.eq(expense_id))
            .count(&txn)
            .await?;
        if remaining == 0 {
            orphaned_expense_ids.push(expense_id);
        }
    }

    txn.commit().await?;

    if orphaned_expense_ids.is_empty() {
        tracing::info!(member_id, "Removed member '{}'", member.name);
    } else {
        tracing::warn!(
            member_id,
            ?orphaned_expense_ids,
            "Removed member '{}', leaving added expenses without participants",
            member.name
        );
    }

    Ok(MemberRemoval {
        member,
        orphaned_expense_ids,
    })
}

/// Moves every expense paid by one member onto another, returning how many moved.
pub async fn reassign_payer(db: &DatabaseConnection, from_id: i64, to_id: i64) -> Result<u64> {
    if from_id == to_id {
        return Err(Error::Validation {
            message: "Cannot reassign expenses to the same member".to_string(),
        });
    }

    let txn = db.begin().await?;

    let from = require_member_by_id(&txn, from_id).await?;
    let to = require_member_by_id(&txn, to_id).await?;

    let budgeted = BudgetedExpense::update_many()
        .col_expr(budgeted_expense::Column::PayerId, Expr::value(to_id))
        .filter(budgeted_expense::Column::PayerId.eq(from_id))
        .exec(&txn)
        .await?
        .rows_affected;
    let added = AddedExpense::update_many()
        .col_expr(added_expense::Column::PayerId, Expr::value(to_id))
        .filter(added_expense::Column::PayerId.eq(from_id))
        .exec(&txn)
        .await?
        .rows_affected;

    txn.commit().await?;

    tracing::info!(
        "Reassigned {} expense(s) from '{}' to '{}'",
        budgeted + added,
        from.name,
        to.name
    );
    Ok(budgeted + added)
}
