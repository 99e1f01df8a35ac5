//! Unified error type for `SplitFare`.
//!
//! Domain errors use struct variants so callers can match on the offending values;
//! infrastructure errors convert in through `#[from]`.

use crate::core::money::Money;
use thiserror::Error;

/// Every error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file is unreadable or inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// User input failed a basic check
    #[error("Invalid input: {message}")]
    Validation {
        /// What was wrong with it
        message: String,
    },

    /// A negative, non-finite or out-of-range amount
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value in dollars
        amount: f64,
    },

    /// No member has this name (or `#id`)
    #[error("Member '{name}' not found")]
    MemberNotFound {
        /// The name or id looked up
        name: String,
    },

    /// Two members would share a name or id
    #[error("A member named '{name}' already exists")]
    DuplicateMember {
        /// The clashing name
        name: String,
    },

    /// Removing this member would leave expenses without a payer
    #[error("Member '{name}' paid for {expenses} expense(s); reassign them before removing")]
    MemberIsPayer {
        /// The member that was to be removed
        name: String,
        /// How many expenses they paid for
        expenses: u64,
    },

    /// No expense has this id
    #[error("Expense #{id} not found")]
    ExpenseNotFound {
        /// The id looked up
        id: i64,
    },

    /// An added expense was recorded with nobody sharing it
    #[error("An added expense needs at least one participant")]
    NoParticipants,

    /// Budgeted expenses exist but there are no members to split them over
    #[error("Cannot split budgeted expenses: the trip has no members")]
    EmptyMembership,

    /// An expense names a payer or participant missing from the snapshot
    #[error("Expense '{expense}' references unknown member #{member_id}")]
    UnknownMember {
        /// Category of the offending expense
        expense: String,
        /// The missing member id
        member_id: i64,
    },

    /// Settlement input that no set of transfers could settle
    #[error("Balances do not sum to zero (off by {residual})")]
    UnbalancedBalances {
        /// Sum of all balances
        residual: Money,
    },

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing or invalid
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing a reply into a string failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Discord client or framework failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Whether the error stems from user input and should be shown back to the user
    /// rather than treated as a failure of the bot itself.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidAmount { .. }
                | Self::MemberNotFound { .. }
                | Self::DuplicateMember { .. }
                | Self::MemberIsPayer { .. }
                | Self::ExpenseNotFound { .. }
                | Self::NoParticipants
                | Self::EmptyMembership
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
