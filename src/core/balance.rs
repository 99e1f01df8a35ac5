//! Balance calculation.
//!
//! Derives, for every member of a [`Snapshot`], how much they paid, how much of the trip
//! they owe, and the difference between the two. Budgeted expenses are shared by all
//! current members; added expenses are shared by their own participant list. The result
//! always sums to exactly zero because every share comes from [`Money::split`].

use crate::{
    core::{
        model::{Member, MemberId, Snapshot},
        money::Money,
    },
    errors::{Error, Result},
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One member's position in the trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberBalance {
    /// The member this entry describes.
    pub member: Member,
    /// Sum of all counted expenses this member paid for.
    pub paid: Money,
    /// This member's share of everything they take part in.
    pub owed_share: Money,
    /// `paid - owed_share`: positive means the group owes them money.
    pub balance: Money,
}

/// An added expense left out of the balances because nobody participates in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrphanedExpense {
    /// Added expense id
    pub id: i64,
    /// Its category
    pub category: String,
    /// Amount left out of the balances
    pub amount: Money,
    /// Who paid it
    pub payer: MemberId,
}

/// Output of [`compute_balances`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    /// One entry per member, in snapshot order.
    pub balances: Vec<MemberBalance>,
    /// Added expenses excluded from the math; the caller should ask for them to be fixed.
    pub orphaned: Vec<OrphanedExpense>,
}

impl BalanceSheet {
    /// The entry for one member, if they are in the sheet.
    #[must_use]
    pub fn get(&self, member: MemberId) -> Option<&MemberBalance> {
        self.balances.iter().find(|entry| entry.member.id == member)
    }

    /// Sum of every balance. Zero for any sheet produced by [`compute_balances`].
    #[must_use]
    pub fn net_total(&self) -> Money {
        self.balances.iter().map(|entry| entry.balance).sum()
    }

    /// True when at least one added expense was left out.
    #[must_use]
    pub fn has_orphans(&self) -> bool {
        !self.orphaned.is_empty()
    }
}

/// Computes every member's paid total, owed share and net balance.
///
/// # Errors
/// * [`Error::EmptyMembership`] when budgeted expenses exist but there are no members.
/// * [`Error::DuplicateMember`] when two members share an id or a name.
/// * [`Error::UnknownMember`] when an expense's payer or participant is not a member.
pub fn compute_balances(snapshot: &Snapshot) -> Result<BalanceSheet> {
    if snapshot.members.is_empty() && !snapshot.budgeted.is_empty() {
        return Err(Error::EmptyMembership);
    }

    let index = index_members(&snapshot.members)?;
    let mut paid = vec![Money::ZERO; snapshot.members.len()];
    let mut owed = vec![Money::ZERO; snapshot.members.len()];

    let resolve = |expense: &str, id: MemberId| -> Result<usize> {
        index.get(&id).copied().ok_or_else(|| Error::UnknownMember {
            expense: expense.to_string(),
            member_id: id.0,
        })
    };

    for expense in &snapshot.budgeted {
        let payer = resolve(&expense.category, expense.payer)?;
        paid[payer] += expense.amount;

        for (slot, share) in owed
            .iter_mut()
            .zip(expense.amount.split(snapshot.members.len()))
        {
            *slot += share;
        }
    }

    let mut orphaned = Vec::new();
    for expense in &snapshot.added {
        let payer = resolve(&expense.category, expense.payer)?;

        let mut seen = HashSet::new();
        let participants = expense
            .participants
            .iter()
            .filter(|id| seen.insert(**id))
            .map(|id| resolve(&expense.category, *id))
            .collect::<Result<Vec<usize>>>()?;

        if participants.is_empty() {
            tracing::warn!(
                expense_id = expense.id,
                category = %expense.category,
                "Added expense has no participants left; leaving it out of balances"
            );
            orphaned.push(OrphanedExpense {
                id: expense.id,
                category: expense.category.clone(),
                amount: expense.amount,
                payer: expense.payer,
            });
            continue;
        }

        paid[payer] += expense.amount;
        for (participant, share) in participants
            .iter()
            .zip(expense.amount.split(participants.len()))
        {
            owed[*participant] += share;
        }
    }

    let balances: Vec<MemberBalance> = snapshot
        .members
        .iter()
        .zip(paid.into_iter().zip(owed))
        .map(|(member, (paid, owed_share))| MemberBalance {
            member: member.clone(),
            paid,
            owed_share,
            balance: paid - owed_share,
        })
        .collect();

    let sheet = BalanceSheet { balances, orphaned };
    debug_assert!(sheet.net_total().is_zero());
    Ok(sheet)
}

/// Maps member ids to their position, rejecting duplicate ids and names.
fn index_members(members: &[Member]) -> Result<HashMap<MemberId, usize>> {
    let mut index = HashMap::with_capacity(members.len());
    let mut names = HashSet::with_capacity(members.len());

    for (position, member) in members.iter().enumerate() {
        if index.insert(member.id, position).is_some() || !names.insert(member.name.as_str()) {
            return Err(Error::DuplicateMember {
                name: member.name.clone(),
            });
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::model::{AddedExpense, BudgetedExpense};

    fn dollars(amount: i64) -> Money {
        Money::from_cents(amount * 100)
    }

    fn members(names: &[&str]) -> Vec<Member> {
        names
            .iter()
            .zip(1..)
            .map(|(name, id)| Member::new(id, *name))
            .collect()
    }

    fn budgeted(id: i64, category: &str, amount: i64, payer: i64) -> BudgetedExpense {
        BudgetedExpense {
            id,
            category: category.to_string(),
            amount: dollars(amount),
            payer: MemberId(payer),
        }
    }

    fn added(id: i64, category: &str, amount: i64, payer: i64, with: &[i64]) -> AddedExpense {
        AddedExpense {
            id,
            category: category.to_string(),
            amount: dollars(amount),
            payer: MemberId(payer),
            participants: with.iter().copied().map(MemberId).collect(),
        }
    }

    fn balance_of(sheet: &BalanceSheet, id: i64) -> Money {
        sheet.get(MemberId(id)).unwrap().balance
    }

    #[test]
    fn test_budgeted_expense_split_among_everyone() {
        let snapshot = Snapshot {
            members: members(&["Alice", "Bob"]),
            budgeted: vec![budgeted(1, "Flights", 100, 1)],
            added: vec![],
        };

        let sheet = compute_balances(&snapshot).unwrap();

        assert_eq!(balance_of(&sheet, 1), dollars(50));
        assert_eq!(balance_of(&sheet, 2), dollars(-50));
        assert_eq!(sheet.get(MemberId(1)).unwrap().paid, dollars(100));
        assert_eq!(sheet.get(MemberId(2)).unwrap().owed_share, dollars(50));
    }

    #[test]
    fn test_equal_split_of_hundred_among_four() {
        let snapshot = Snapshot {
            members: members(&["A", "B", "C", "D"]),
            budgeted: vec![budgeted(1, "Hotel", 100, 1)],
            added: vec![],
        };

        let sheet = compute_balances(&snapshot).unwrap();

        for entry in &sheet.balances {
            assert_eq!(entry.owed_share, dollars(25));
        }
    }

    #[test]
    fn test_added_expense_split_among_participants_only() {
        let snapshot = Snapshot {
            members: members(&["A", "B", "C", "D"]),
            budgeted: vec![],
            added: vec![added(1, "Food", 60, 1, &[1, 2, 3])],
        };

        let sheet = compute_balances(&snapshot).unwrap();

        assert_eq!(sheet.get(MemberId(1)).unwrap().owed_share, dollars(20));
        assert_eq!(sheet.get(MemberId(2)).unwrap().owed_share, dollars(20));
        assert_eq!(sheet.get(MemberId(3)).unwrap().owed_share, dollars(20));
        assert_eq!(sheet.get(MemberId(4)).unwrap().owed_share, Money::ZERO);
        assert_eq!(balance_of(&sheet, 1), dollars(40));
        assert_eq!(balance_of(&sheet, 4), Money::ZERO);
    }

    #[test]
    fn test_added_expense_shared_by_all_three() {
        let snapshot = Snapshot {
            members: members(&["Alice", "Bob", "Carol"]),
            budgeted: vec![],
            added: vec![added(1, "Food", 30, 2, &[1, 2, 3])],
        };

        let sheet = compute_balances(&snapshot).unwrap();

        assert_eq!(balance_of(&sheet, 1), dollars(-10));
        assert_eq!(balance_of(&sheet, 2), dollars(20));
        assert_eq!(balance_of(&sheet, 3), dollars(-10));
    }

    #[test]
    fn test_no_expenses_means_zero_balances() {
        let snapshot = Snapshot {
            members: members(&["A", "B", "C"]),
            ..Snapshot::default()
        };

        let sheet = compute_balances(&snapshot).unwrap();

        assert_eq!(sheet.balances.len(), 3);
        assert!(sheet.balances.iter().all(|entry| entry.balance.is_zero()));
    }

    #[test]
    fn test_single_member_pays_and_owes_everything() {
        let snapshot = Snapshot {
            members: members(&["Solo"]),
            budgeted: vec![budgeted(1, "Car", 250, 1)],
            added: vec![],
        };

        let sheet = compute_balances(&snapshot).unwrap();

        let entry = sheet.get(MemberId(1)).unwrap();
        assert_eq!(entry.paid, dollars(250));
        assert_eq!(entry.owed_share, dollars(250));
        assert!(entry.balance.is_zero());
    }

    #[test]
    fn test_empty_membership_with_budgeted_expense_is_an_error() {
        let snapshot = Snapshot {
            members: vec![],
            budgeted: vec![budgeted(1, "Flights", 100, 1)],
            added: vec![],
        };

        assert!(matches!(
            compute_balances(&snapshot),
            Err(Error::EmptyMembership)
        ));
    }

    #[test]
    fn test_empty_snapshot_is_an_empty_sheet() {
        let sheet = compute_balances(&Snapshot::default()).unwrap();
        assert!(sheet.balances.is_empty());
        assert!(!sheet.has_orphans());
    }

    #[test]
    fn test_orphaned_expense_is_flagged_and_excluded() {
        let snapshot = Snapshot {
            members: members(&["A", "B"]),
            budgeted: vec![],
            added: vec![added(7, "Tickets", 90, 1, &[])],
        };

        let sheet = compute_balances(&snapshot).unwrap();

        assert_eq!(sheet.orphaned.len(), 1);
        assert_eq!(sheet.orphaned[0].id, 7);
        assert_eq!(sheet.orphaned[0].amount, dollars(90));
        assert_eq!(sheet.get(MemberId(1)).unwrap().paid, Money::ZERO);
        assert!(sheet.balances.iter().all(|entry| entry.balance.is_zero()));
    }

    #[test]
    fn test_unknown_payer_is_rejected() {
        let snapshot = Snapshot {
            members: members(&["A"]),
            budgeted: vec![budgeted(1, "Gas", 40, 9)],
            added: vec![],
        };

        assert!(matches!(
            compute_balances(&snapshot),
            Err(Error::UnknownMember { member_id: 9, .. })
        ));
    }

    #[test]
    fn test_unknown_participant_is_rejected() {
        let snapshot = Snapshot {
            members: members(&["A", "B"]),
            budgeted: vec![],
            added: vec![added(1, "Food", 40, 1, &[1, 5])],
        };

        assert!(matches!(
            compute_balances(&snapshot),
            Err(Error::UnknownMember { member_id: 5, .. })
        ));
    }

    #[test]
    fn test_duplicate_member_names_are_rejected() {
        let snapshot = Snapshot {
            members: vec![Member::new(1, "Alice"), Member::new(2, "Alice")],
            ..Snapshot::default()
        };

        assert!(matches!(
            compute_balances(&snapshot),
            Err(Error::DuplicateMember { .. })
        ));
    }

    #[test]
    fn test_repeated_participant_counts_once() {
        let snapshot = Snapshot {
            members: members(&["A", "B"]),
            budgeted: vec![],
            added: vec![added(1, "Food", 20, 1, &[2, 2])],
        };

        let sheet = compute_balances(&snapshot).unwrap();

        assert_eq!(sheet.get(MemberId(2)).unwrap().owed_share, dollars(20));
    }

    #[test]
    fn test_uneven_split_still_sums_to_zero() {
        let snapshot = Snapshot {
            members: members(&["A", "B", "C"]),
            budgeted: vec![budgeted(1, "Hotel", 100, 1), budgeted(2, "Gas", 7, 2)],
            added: vec![
                added(1, "Food", 10, 3, &[1, 2, 3]),
                added(2, "Misc", 1, 2, &[1, 3]),
            ],
        };

        let sheet = compute_balances(&snapshot).unwrap();

        assert!(sheet.net_total().is_zero());
    }

    #[test]
    fn test_recomputing_is_idempotent() {
        let snapshot = Snapshot {
            members: members(&["A", "B", "C"]),
            budgeted: vec![budgeted(1, "Hotel", 301, 2)],
            added: vec![added(1, "Food", 55, 3, &[1, 3])],
        };

        assert_eq!(
            compute_balances(&snapshot).unwrap(),
            compute_balances(&snapshot).unwrap()
        );
    }
}
