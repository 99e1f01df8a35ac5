//! Member entity - One person taking part in the trip.
//!
//! The `id` is the member's identity everywhere else in the system; `name` is a display
//! attribute that is kept unique by the record store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique within the trip
    #[sea_orm(unique)]
    pub name: String,
    /// When the member was added
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Member and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Budgeted expenses this member paid for
    #[sea_orm(has_many = "super::budgeted_expense::Entity")]
    BudgetedExpenses,
    /// Added expenses this member paid for
    #[sea_orm(has_many = "super::added_expense::Entity")]
    AddedExpenses,
    /// Added expenses this member takes part in
    #[sea_orm(has_many = "super::expense_participant::Entity")]
    Participations,
}

impl Related<super::budgeted_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetedExpenses.def()
    }
}

impl Related<super::expense_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
