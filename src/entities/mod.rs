//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the trip's members, its two kinds of expenses, and the
//! link table recording who takes part in each added expense.

pub mod added_expense;
pub mod budgeted_expense;
pub mod expense_participant;
pub mod member;

// Re-export specific types to avoid conflicts
pub use added_expense::{
    Column as AddedExpenseColumn, Entity as AddedExpense, Model as AddedExpenseModel,
};
pub use budgeted_expense::{
    Column as BudgetedExpenseColumn, Entity as BudgetedExpense, Model as BudgetedExpenseModel,
};
pub use expense_participant::{
    Column as ExpenseParticipantColumn, Entity as ExpenseParticipant,
    Model as ExpenseParticipantModel,
};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
