//! Budgeted expense business logic - Planned costs shared by every member.
//!
//! A budgeted expense only records who paid and how much. The split is never stored:
//! it is recomputed against whoever the members are when balances are asked for.

use crate::{
    core::{member, model, money::Money},
    entities::{BudgetedExpense, budgeted_expense},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a budgeted expense after validating the category, amount and payer.
pub async fn create_budgeted_expense<C>(
    db: &C,
    category: String,
    amount: Money,
    payer_id: i64,
) -> Result<budgeted_expense::Model>
where
    C: ConnectionTrait,
{
    let category = validate_category(&category)?;
    validate_amount(amount)?;

    let payer = member::require_member_by_id(db, payer_id).await?;

    let expense = budgeted_expense::ActiveModel {
        category: Set(category),
        amount_cents: Set(amount.cents()),
        payer_id: Set(payer.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = expense.insert(db).await?;
    tracing::info!(
        expense_id = result.id,
        "Recorded budgeted expense '{}' of {} paid by '{}'",
        result.category,
        amount,
        payer.name
    );
    Ok(result)
}

/// Retrieves all budgeted expenses, oldest first.
pub async fn get_all_budgeted_expenses<C>(db: &C) -> Result<Vec<budgeted_expense::Model>>
where
    C: ConnectionTrait,
{
    BudgetedExpense::find()
        .order_by_asc(budgeted_expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a budgeted expense by id.
pub async fn delete_budgeted_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let result = BudgetedExpense::delete_by_id(expense_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ExpenseNotFound { id: expense_id });
    }
    tracing::info!(expense_id, "Deleted budgeted expense");
    Ok(())
}

/// Converts a stored row into the engine's representation.
#[must_use]
pub fn to_domain(row: &budgeted_expense::Model) -> model::BudgetedExpense {
    model::BudgetedExpense {
        id: row.id,
        category: row.category.clone(),
        amount: Money::from_cents(row.amount_cents),
        payer: model::MemberId(row.payer_id),
    }
}

/// Trims a category and rejects empty ones.
pub(crate) fn validate_category(category: &str) -> Result<String> {
    let category = category.trim();
    if category.is_empty() {
        return Err(Error::Validation {
            message: "Category cannot be empty".to_string(),
        });
    }
    Ok(category.to_string())
}

/// Expenses may be free but never negative.
pub(crate) fn validate_amount(amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(Error::InvalidAmount {
            amount: amount.as_dollars(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_budgeted_expense_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_member(&db, "Alice").await?;

        let expense = create_budgeted_expense(
            &db,
            " Flights ".to_string(),
            Money::from_cents(42_000),
            alice.id,
        )
        .await?;

        assert_eq!(expense.category, "Flights");
        assert_eq!(expense.amount_cents, 42_000);
        assert_eq!(expense.payer_id, alice.id);
        assert_eq!(get_all_budgeted_expenses(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_budgeted_expense_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_member(&db, "Alice").await?;

        let result =
            create_budgeted_expense(&db, "  ".to_string(), Money::from_cents(100), alice.id).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result =
            create_budgeted_expense(&db, "Hotel".to_string(), Money::from_cents(-100), alice.id)
                .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount }) if amount == -1.0));

        let result =
            create_budgeted_expense(&db, "Hotel".to_string(), Money::from_cents(100), 999).await;
        assert!(matches!(result, Err(Error::MemberNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_amount_is_allowed() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_member(&db, "Alice").await?;

        let expense =
            create_budgeted_expense(&db, "Misc".to_string(), Money::ZERO, alice.id).await?;

        assert_eq!(expense.amount_cents, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_budgeted_expense() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_member(&db, "Alice").await?;
        let expense = create_test_budgeted_expense(&db, "Car", 80.0, alice.id).await?;

        delete_budgeted_expense(&db, expense.id).await?;
        assert!(get_all_budgeted_expenses(&db).await?.is_empty());

        let result = delete_budgeted_expense(&db, expense.id).await;
        assert!(matches!(result, Err(Error::ExpenseNotFound { id }) if id == expense.id));
        Ok(())
    }

    #[test]
    fn test_to_domain() {
        let row = budgeted_expense::Model {
            id: 3,
            category: "Gas".to_string(),
            amount_cents: 1999,
            payer_id: 2,
            created_at: chrono::Utc::now(),
        };

        let expense = to_domain(&row);

        assert_eq!(expense.id, 3);
        assert_eq!(expense.amount, Money::from_cents(1999));
        assert_eq!(expense.payer, model::MemberId(2));
    }
}
