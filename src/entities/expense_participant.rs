//! Expense participant entity - Links an added expense to a member who shares its cost.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Participant link database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_participants")]
pub struct Model {
    /// The added expense being shared
    #[sea_orm(primary_key, auto_increment = false)]
    pub added_expense_id: i64,
    /// The member sharing it
    #[sea_orm(primary_key, auto_increment = false)]
    pub member_id: i64,
}

/// Defines relationships between `ExpenseParticipant` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The expense side of the link
    #[sea_orm(
        belongs_to = "super::added_expense::Entity",
        from = "Column::AddedExpenseId",
        to = "super::added_expense::Column::Id"
    )]
    AddedExpense,
    /// The member side of the link
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
}

impl Related<super::added_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AddedExpense.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
