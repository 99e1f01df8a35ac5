//! Budgeted expense entity - A planned cost shared by every member of the trip.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budgeted expense database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgeted_expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What the money is for (e.g., "Flights", "Hotel")
    pub category: String,
    /// Amount in cents, never negative
    pub amount_cents: i64,
    /// Member who paid
    pub payer_id: i64,
    /// When the expense was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `BudgetedExpense` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each budgeted expense has exactly one payer
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::PayerId",
        to = "super::member::Column::Id"
    )]
    Payer,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
