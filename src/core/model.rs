//! Framework-agnostic trip snapshot types.
//!
//! A [`Snapshot`] is a consistent, immutable view of every member and expense at one point
//! in time. The balance calculator, settlement planner and summary formatter only ever see
//! these types, never database rows.

use crate::core::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable member identifier (the database primary key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub i64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A trip member. The name is a display attribute; identity is the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Stable identity
    pub id: MemberId,
    /// Display name, unique within the trip
    pub name: String,
}

impl Member {
    /// Builds a member from a raw id and a name.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: MemberId(id),
            name: name.into(),
        }
    }
}

/// A planned cost, split equally among all current members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetedExpense {
    /// Record id
    pub id: i64,
    /// Free-form label, e.g. "Flights"
    pub category: String,
    /// Total cost, never negative
    pub amount: Money,
    /// Who paid
    pub payer: MemberId,
}

/// An incurred cost, split equally among its recorded participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedExpense {
    /// Record id
    pub id: i64,
    /// Free-form label, e.g. "Food"
    pub category: String,
    /// Total cost, never negative
    pub amount: Money,
    /// Who paid
    pub payer: MemberId,
    /// Who shares the cost. Empty only after every participant was removed.
    pub participants: Vec<MemberId>,
}

impl AddedExpense {
    /// An added expense nobody participates in any more.
    #[must_use]
    pub fn is_orphaned(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Everything the engine needs, captured at a single point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Members in creation order
    pub members: Vec<Member>,
    /// Planned costs
    pub budgeted: Vec<BudgetedExpense>,
    /// Costs incurred on the trip
    pub added: Vec<AddedExpense>,
}

impl Snapshot {
    /// Looks up a member by id.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Display name for a member id, falling back to the id itself.
    #[must_use]
    pub fn member_name(&self, id: MemberId) -> String {
        self.member(id)
            .map_or_else(|| id.to_string(), |member| member.name.clone())
    }

    /// True when there are no members and no expenses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.budgeted.is_empty() && self.added.is_empty()
    }
}
