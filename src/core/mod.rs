//! Core business logic - framework-agnostic trip accounting.
//!
//! The balance calculator, settlement planner and formatters are pure functions over a
//! [`model::Snapshot`]. The record store modules read and mutate the database and are the
//! only async code below the bot layer.

/// Added expenses and their participant lists
pub mod added_expense;
/// Balance calculation over a snapshot
pub mod balance;
/// Budgeted expenses split across every member
pub mod budgeted_expense;
/// Member creation, removal and payer reassignment
pub mod member;
/// Plain domain types the calculator works on
pub mod model;
/// Fixed-point currency amounts
pub mod money;
/// Trip totals and chat-ready formatting
pub mod report;
/// Greedy settlement planning
pub mod settlement;
/// Consistent snapshot loading
pub mod snapshot;
/// Seeding and resetting the whole trip
pub mod trip;
