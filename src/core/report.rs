//! Report generation business logic.
//!
//! This module turns a snapshot into trip totals, balances and a settlement plan, and
//! renders those results as chat-ready text. The formatting helpers hold no business
//! logic; they only decide how already-computed numbers read.

use crate::{
    core::{
        balance::{self, BalanceSheet, MemberBalance, OrphanedExpense},
        model::Snapshot,
        money::Money,
        settlement::{self, Settlement, Transfer},
        snapshot,
    },
    entities::MemberModel,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::fmt;

/// Message shown when nobody owes anybody anything.
pub const FULLY_SETTLED_MESSAGE: &str = "Everyone is fully settled.";

/// Headline numbers for the whole trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripTotals {
    /// Sum of every budgeted expense
    pub total_budgeted: Money,
    /// Sum of every added expense, orphaned ones included
    pub total_added: Money,
    /// `total_budgeted + total_added`
    pub grand_total: Money,
    /// Largest single share of the budget, absent when there are no members
    pub per_person_estimate: Option<Money>,
    /// Number of members
    pub member_count: usize,
}

/// Computes trip totals from a snapshot.
#[must_use]
pub fn compute_totals(snapshot: &Snapshot) -> TripTotals {
    let total_budgeted: Money = snapshot.budgeted.iter().map(|e| e.amount).sum();
    let total_added: Money = snapshot.added.iter().map(|e| e.amount).sum();
    let member_count = snapshot.members.len();

    TripTotals {
        total_budgeted,
        total_added,
        grand_total: total_budgeted + total_added,
        per_person_estimate: total_budgeted.split(member_count).first().copied(),
        member_count,
    }
}

/// How a member stands, as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceLabel {
    /// The group owes this member the amount
    Owed(Money),
    /// This member owes the group the amount
    Owes(Money),
    /// Nothing owed either way
    Settled,
}

impl BalanceLabel {
    /// Labels a net balance. Amounts are carried as absolute values.
    #[must_use]
    pub const fn from_balance(balance: Money) -> Self {
        if balance.is_positive() {
            Self::Owed(balance)
        } else if balance.is_negative() {
            Self::Owes(balance.abs())
        } else {
            Self::Settled
        }
    }
}

impl fmt::Display for BalanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owed(amount) => write!(f, "Owed {amount}"),
            Self::Owes(amount) => write!(f, "Owes {amount}"),
            Self::Settled => f.write_str("Settled"),
        }
    }
}

/// Formats an amount as dollars with two fraction digits, e.g. `$12.50`.
#[must_use]
pub fn format_money(amount: Money) -> String {
    amount.to_string()
}

/// Formats a transfer as `"<debtor> pays <creditor> $X.YY"`.
#[must_use]
pub fn format_transfer(transfer: &Transfer) -> String {
    format!(
        "{} pays {} {}",
        transfer.from.name,
        transfer.to.name,
        format_money(transfer.amount)
    )
}

/// One line per transfer, or [`FULLY_SETTLED_MESSAGE`].
#[must_use]
pub fn format_settlement(settlement: &Settlement) -> String {
    match settlement {
        Settlement::Settled => FULLY_SETTLED_MESSAGE.to_string(),
        Settlement::Transfers(transfers) => transfers
            .iter()
            .map(format_transfer)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Summary line for one member, e.g. `Alice: Owed $50.00 (paid $100.00, share $50.00)`.
#[must_use]
pub fn format_balance_line(entry: &MemberBalance) -> String {
    format!(
        "{}: {} (paid {}, share {})",
        entry.member.name,
        BalanceLabel::from_balance(entry.balance),
        format_money(entry.paid),
        format_money(entry.owed_share)
    )
}

/// Warning for an added expense that nobody shares any more.
#[must_use]
pub fn format_orphan_warning(expense: &OrphanedExpense, payer_name: &str) -> String {
    format!(
        "⚠️ Added expense #{} ({}, {} paid by {}) has no participants and is left out of \
         the split. Remove it or record it again with participants.",
        expense.id,
        expense.category,
        format_money(expense.amount),
        payer_name
    )
}

/// Comma-separated participant names, in the order given.
#[must_use]
pub fn format_participants(participants: &[MemberModel]) -> String {
    if participants.is_empty() {
        return "nobody".to_string();
    }
    participants
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything `/split` shows, computed from one snapshot.
#[derive(Debug, Clone)]
pub struct TripReport {
    /// The snapshot the report was computed from
    pub snapshot: Snapshot,
    /// Headline totals
    pub totals: TripTotals,
    /// Per-member balances and orphaned expenses
    pub sheet: BalanceSheet,
    /// Who pays whom
    pub settlement: Settlement,
}

impl TripReport {
    /// Orphan warnings with payer names resolved.
    #[must_use]
    pub fn orphan_warnings(&self) -> Vec<String> {
        self.sheet
            .orphaned
            .iter()
            .map(|expense| format_orphan_warning(expense, &self.snapshot.member_name(expense.payer)))
            .collect()
    }
}

/// Computes totals, balances and the settlement plan for a snapshot.
pub fn build_trip_report(snapshot: Snapshot) -> Result<TripReport> {
    let totals = compute_totals(&snapshot);
    let sheet = balance::compute_balances(&snapshot)?;
    let settlement = settlement::plan_settlement(&sheet.balances)?;

    Ok(TripReport {
        snapshot,
        totals,
        sheet,
        settlement,
    })
}

/// Warnings for the given added expenses, read straight from the snapshot.
///
/// Does not run the balance calculation, so it still works when the trip as a whole
/// cannot be balanced.
pub async fn orphan_warnings_for(
    db: &DatabaseConnection,
    expense_ids: &[i64],
) -> Result<Vec<String>> {
    let snapshot = snapshot::load_snapshot(db).await?;
    Ok(snapshot
        .added
        .iter()
        .filter(|expense| expense_ids.contains(&expense.id))
        .map(|expense| {
            let orphan = OrphanedExpense {
                id: expense.id,
                category: expense.category.clone(),
                amount: expense.amount,
                payer: expense.payer,
            };
            format_orphan_warning(&orphan, &snapshot.member_name(expense.payer))
        })
        .collect())
}

/// Loads a fresh snapshot and builds the trip report from it.
pub async fn generate_trip_report(db: &DatabaseConnection) -> Result<TripReport> {
    let snapshot = snapshot::load_snapshot(db).await?;
    let report = build_trip_report(snapshot)?;
    tracing::debug!(
        transfers = report.settlement.transfers().len(),
        orphaned = report.sheet.orphaned.len(),
        "Generated trip report"
    );
    Ok(report)
}
