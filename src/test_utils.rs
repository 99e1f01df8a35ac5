//! Shared test utilities for `SplitFare`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test members and expenses with dollar amounts.

use crate::{
    core::{
        added_expense::{self, AddedExpenseDetails},
        budgeted_expense, member,
        money::Money,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes `tracing` output through the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates a test member.
pub async fn create_test_member(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::MemberModel> {
    member::create_member(db, name.to_string()).await
}

/// Creates a test budgeted expense.
///
/// # Arguments
/// * `amount` - Amount in dollars
pub async fn create_test_budgeted_expense(
    db: &DatabaseConnection,
    category: &str,
    amount: f64,
    payer_id: i64,
) -> Result<entities::BudgetedExpenseModel> {
    budgeted_expense::create_budgeted_expense(
        db,
        category.to_string(),
        Money::from_dollars(amount)?,
        payer_id,
    )
    .await
}

/// Creates a test added expense.
///
/// # Arguments
/// * `amount` - Amount in dollars
/// * `participants` - Member ids, or `None` for every current member
pub async fn create_test_added_expense(
    db: &DatabaseConnection,
    category: &str,
    amount: f64,
    payer_id: i64,
    participants: Option<Vec<i64>>,
) -> Result<AddedExpenseDetails> {
    added_expense::create_added_expense(
        db,
        category.to_string(),
        Money::from_dollars(amount)?,
        payer_id,
        participants,
    )
    .await
}
