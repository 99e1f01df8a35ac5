//! Added expense entity - A cost incurred during the trip.
//!
//! Unlike budgeted expenses, an added expense is only shared by the members recorded in
//! `expense_participants` for it. That list is fixed when the expense is created.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Added expense database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "added_expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What the money was spent on (e.g., "Food", "Gas")
    pub category: String,
    /// Amount in cents, never negative
    pub amount_cents: i64,
    /// Member who paid
    pub payer_id: i64,
    /// When the expense was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `AddedExpense` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each added expense has exactly one payer
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::PayerId",
        to = "super::member::Column::Id"
    )]
    Payer,
    /// Who the expense is split among
    #[sea_orm(has_many = "super::expense_participant::Entity")]
    Participants,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payer.def()
    }
}

impl Related<super::expense_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
