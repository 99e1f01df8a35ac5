//! Trip-wide operations - seeding from configuration and resetting all data.

use crate::{
    config::AppConfig,
    core::{budgeted_expense, member, money::Money},
    entities::{AddedExpense, BudgetedExpense, ExpenseParticipant, Member},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, TransactionTrait, prelude::*};

/// Row counts removed by [`reset_trip`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetSummary {
    /// Members removed
    pub members: u64,
    /// Budgeted expenses removed
    pub budgeted_expenses: u64,
    /// Added expenses removed
    pub added_expenses: u64,
}

/// Deletes every member, expense and participant link in one transaction.
pub async fn reset_trip(db: &DatabaseConnection) -> Result<ResetSummary> {
    let txn = db.begin().await?;

    ExpenseParticipant::delete_many().exec(&txn).await?;
    let added_expenses = AddedExpense::delete_many().exec(&txn).await?.rows_affected;
    let budgeted_expenses = BudgetedExpense::delete_many().exec(&txn).await?.rows_affected;
    let members = Member::delete_many().exec(&txn).await?.rows_affected;

    txn.commit().await?;

    let summary = ResetSummary {
        members,
        budgeted_expenses,
        added_expenses,
    };
    tracing::warn!(?summary, "Trip data reset");
    Ok(summary)
}

/// Creates the configured members and budgeted expenses if the trip has no members yet.
///
/// Everything is written in one transaction, so a bad entry leaves the database empty and
/// the next start tries again. Returns `false` without touching anything when members
/// already exist.
pub async fn seed_from_config(db: &DatabaseConnection, config: &AppConfig) -> Result<bool> {
    if config.members.is_empty() {
        return Ok(false);
    }

    let txn = db.begin().await?;

    if Member::find().count(&txn).await? > 0 {
        tracing::debug!("Members already present, skipping seed");
        return Ok(false);
    }

    if let Err(e) = insert_seed_rows(&txn, config).await {
        txn.rollback().await?;
        return Err(e);
    }
    txn.commit().await?;

    tracing::info!(
        "Seeded {} member(s) and {} budgeted expense(s) from configuration",
        config.members.len(),
        config.budgeted_expenses.len()
    );
    Ok(true)
}

async fn insert_seed_rows<C>(db: &C, config: &AppConfig) -> Result<()>
where
    C: ConnectionTrait,
{
    for seed in &config.members {
        member::create_member(db, seed.name.clone()).await?;
    }

    for seed in &config.budgeted_expenses {
        let payer = member::get_member_by_name(db, &seed.payer)
            .await?
            .ok_or_else(|| Error::Config {
                message: format!(
                    "Budgeted expense '{}' names unknown payer '{}'",
                    seed.category, seed.payer
                ),
            })?;
        budgeted_expense::create_budgeted_expense(
            db,
            seed.category.clone(),
            Money::from_dollars(seed.amount)?,
            payer.id,
        )
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::trip::parse_config;
    use crate::core::{added_expense, budgeted_expense::get_all_budgeted_expenses};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_reset_trip_clears_everything() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_member(&db, "Alice").await?;
        create_test_member(&db, "Bob").await?;
        create_test_budgeted_expense(&db, "Hotel", 300.0, alice.id).await?;
        create_test_added_expense(&db, "Food", 20.0, alice.id, None).await?;

        let summary = reset_trip(&db).await?;

        assert_eq!(
            summary,
            ResetSummary {
                members: 2,
                budgeted_expenses: 1,
                added_expenses: 1,
            }
        );
        assert!(member::get_all_members(&db).await?.is_empty());
        assert!(added_expense::get_all_participant_links(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_from_config() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let config = parse_config(
            r#"
            [[members]]
            name = "Alice"
            [[members]]
            name = "Bob"
            [[budgeted_expenses]]
            category = "Flights"
            amount = 100.0
            payer = "Alice"
            "#,
        )?;

        assert!(seed_from_config(&db, &config).await?);
        assert_eq!(member::get_all_members(&db).await?.len(), 2);
        assert_eq!(get_all_budgeted_expenses(&db).await?[0].amount_cents, 10_000);

        // A second run leaves the data alone
        assert!(!seed_from_config(&db, &config).await?);
        assert_eq!(member::get_all_members(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_with_unknown_payer_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(
            r#"
            [[members]]
            name = "Alice"
            [[budgeted_expenses]]
            category = "Car"
            amount = 10.0
            payer = "Zed"
            "#,
        )?;

        let result = seed_from_config(&db, &config).await;

        assert!(matches!(result, Err(Error::Config { .. })));
        assert!(member::get_all_members(&db).await?.is_empty());
        assert!(get_all_budgeted_expenses(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_seed_is_retried_after_fixing_config() -> Result<()> {
        let db = setup_test_db().await?;
        let broken = parse_config(
            r#"
            [[members]]
            name = "Alice"
            [[members]]
            name = "Bob"
            [[budgeted_expenses]]
            category = "Hotel"
            amount = -5.0
            payer = "Bob"
            "#,
        )?;
        assert!(seed_from_config(&db, &broken).await.is_err());

        let fixed = parse_config(
            r#"
            [[members]]
            name = "Alice"
            [[members]]
            name = "Bob"
            [[budgeted_expenses]]
            category = "Hotel"
            amount = 5.0
            payer = "Bob"
            "#,
        )?;

        assert!(seed_from_config(&db, &fixed).await?);
        assert_eq!(member::get_all_members(&db).await?.len(), 2);
        assert_eq!(get_all_budgeted_expenses(&db).await?.len(), 1);
        Ok(())
    }
}
