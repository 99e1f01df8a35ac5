//! Settlement planning.
//!
//! Turns per-member balances into a short list of "X pays Y" transfers using greedy
//! two-pointer matching: members are sorted from most indebted to most owed, and the
//! debtor at the front always pays the creditor at the back as much as either can absorb.
//! Every transfer zeroes at least one side, so at most `members - 1` transfers are made.

use crate::{
    core::{balance::MemberBalance, model::Member, money::Money},
    errors::{Error, Result},
};
use serde::Serialize;

/// One payment instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transfer {
    /// The debtor.
    pub from: Member,
    /// The creditor.
    pub to: Member,
    /// Always strictly positive.
    pub amount: Money,
}

/// Outcome of [`plan_settlement`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Settlement {
    /// Nobody owes anybody anything.
    Settled,
    /// Transfers to apply in order.
    Transfers(Vec<Transfer>),
}

impl Settlement {
    /// True when no transfer is needed.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }

    /// The transfers to make; empty when already settled.
    #[must_use]
    pub fn transfers(&self) -> &[Transfer] {
        match self {
            Self::Settled => &[],
            Self::Transfers(transfers) => transfers,
        }
    }

    /// Total money changing hands.
    #[must_use]
    pub fn total_transferred(&self) -> Money {
        self.transfers().iter().map(|transfer| transfer.amount).sum()
    }
}

/// Plans the transfers that bring every balance to zero.
///
/// Members with equal balances are ordered by id so the plan is reproducible.
///
/// # Errors
/// Returns [`Error::UnbalancedBalances`] if the balances do not sum to zero, since no set
/// of transfers could settle them.
pub fn plan_settlement(balances: &[MemberBalance]) -> Result<Settlement> {
    let residual: Money = balances.iter().map(|entry| entry.balance).sum();
    if !residual.is_zero() {
        return Err(Error::UnbalancedBalances { residual });
    }

    let mut working: Vec<(&Member, Money)> = balances
        .iter()
        .map(|entry| (&entry.member, entry.balance))
        .collect();
    working.sort_by(|(a, a_balance), (b, b_balance)| {
        a_balance.cmp(b_balance).then_with(|| a.id.cmp(&b.id))
    });

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, working.len().saturating_sub(1));

    while i < j {
        if !working[i].1.is_negative() {
            i += 1;
            continue;
        }
        if !working[j].1.is_positive() {
            j -= 1;
            continue;
        }

        let amount = (-working[i].1).min(working[j].1);
        working[i].1 += amount;
        working[j].1 -= amount;

        transfers.push(Transfer {
            from: working[i].0.clone(),
            to: working[j].0.clone(),
            amount,
        });

        if !working[i].1.is_negative() {
            i += 1;
        }
        if !working[j].1.is_positive() {
            j -= 1;
        }
    }

    debug_assert!(working.iter().all(|(_, balance)| balance.is_zero()));

    if transfers.is_empty() {
        Ok(Settlement::Settled)
    } else {
        Ok(Settlement::Transfers(transfers))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::model::MemberId;
    use std::collections::HashMap;

    fn entry(id: i64, name: &str, cents: i64) -> MemberBalance {
        MemberBalance {
            member: Member::new(id, name),
            paid: Money::ZERO,
            owed_share: Money::ZERO,
            balance: Money::from_cents(cents),
        }
    }

    fn apply(balances: &[MemberBalance], settlement: &Settlement) -> HashMap<MemberId, Money> {
        let mut result: HashMap<MemberId, Money> = balances
            .iter()
            .map(|entry| (entry.member.id, entry.balance))
            .collect();
        for transfer in settlement.transfers() {
            *result.get_mut(&transfer.from.id).unwrap() += transfer.amount;
            *result.get_mut(&transfer.to.id).unwrap() -= transfer.amount;
        }
        result
    }

    fn summary(settlement: &Settlement) -> Vec<(&str, &str, i64)> {
        settlement
            .transfers()
            .iter()
            .map(|t| (t.from.name.as_str(), t.to.name.as_str(), t.amount.cents()))
            .collect()
    }

    #[test]
    fn test_single_debtor_single_creditor() {
        let balances = vec![entry(1, "Alice", 5000), entry(2, "Bob", -5000)];

        let settlement = plan_settlement(&balances).unwrap();

        assert_eq!(summary(&settlement), vec![("Bob", "Alice", 5000)]);
    }

    #[test]
    fn test_two_debtors_pay_one_creditor() {
        let balances = vec![
            entry(1, "Alice", -1000),
            entry(2, "Bob", 2000),
            entry(3, "Carol", -1000),
        ];

        let settlement = plan_settlement(&balances).unwrap();

        assert_eq!(
            summary(&settlement),
            vec![("Alice", "Bob", 1000), ("Carol", "Bob", 1000)]
        );
    }

    #[test]
    fn test_all_zero_is_settled() {
        let balances = vec![entry(1, "A", 0), entry(2, "B", 0), entry(3, "C", 0)];

        let settlement = plan_settlement(&balances).unwrap();

        assert_eq!(settlement, Settlement::Settled);
        assert!(settlement.transfers().is_empty());
    }

    #[test]
    fn test_no_members_is_settled() {
        assert!(plan_settlement(&[]).unwrap().is_settled());
    }

    #[test]
    fn test_single_member_is_settled() {
        assert!(plan_settlement(&[entry(1, "Solo", 0)]).unwrap().is_settled());
    }

    #[test]
    fn test_unbalanced_input_is_rejected() {
        let balances = vec![entry(1, "A", 100), entry(2, "B", -99)];

        assert!(matches!(
            plan_settlement(&balances),
            Err(Error::UnbalancedBalances { residual }) if residual == Money::from_cents(1)
        ));
    }

    #[test]
    fn test_largest_debtor_pays_largest_creditor_first() {
        let balances = vec![
            entry(1, "ada", 11750),
            entry(2, "kolle", 1750),
            entry(3, "leila", -6250),
            entry(4, "billy", -7250),
        ];

        let settlement = plan_settlement(&balances).unwrap();

        assert_eq!(
            summary(&settlement),
            vec![
                ("billy", "ada", 7250),
                ("leila", "ada", 4500),
                ("leila", "kolle", 1750),
            ]
        );
    }

    #[test]
    fn test_applying_transfers_zeroes_every_balance() {
        let balances = vec![
            entry(1, "A", 4217),
            entry(2, "B", -1503),
            entry(3, "C", -2900),
            entry(4, "D", 1),
            entry(5, "E", 185),
        ];

        let settlement = plan_settlement(&balances).unwrap();
        let after = apply(&balances, &settlement);

        assert!(after.values().all(|balance| balance.is_zero()));
        assert!(settlement.transfers().len() < balances.len());
        assert!(settlement.transfers().iter().all(|t| t.amount.is_positive()));
    }

    #[test]
    fn test_ties_are_broken_by_member_id() {
        let forward = vec![
            entry(1, "A", -500),
            entry(2, "B", -500),
            entry(3, "C", 1000),
        ];
        let reversed: Vec<MemberBalance> = forward.iter().rev().cloned().collect();

        assert_eq!(
            plan_settlement(&forward).unwrap(),
            plan_settlement(&reversed).unwrap()
        );
        assert_eq!(
            summary(&plan_settlement(&forward).unwrap()),
            vec![("A", "C", 500), ("B", "C", 500)]
        );
    }

    #[test]
    fn test_total_transferred() {
        let balances = vec![entry(1, "A", 300), entry(2, "B", -100), entry(3, "C", -200)];

        let settlement = plan_settlement(&balances).unwrap();

        assert_eq!(settlement.total_transferred(), Money::from_cents(300));
    }
}
