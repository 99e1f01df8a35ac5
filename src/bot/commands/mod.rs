//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Budgeted expense commands
pub mod budget;

/// Added expense commands
pub mod expense;

/// General utility commands
pub mod general;

/// Member management commands
pub mod member;

/// Balance and settlement command
pub mod split;

// Export commands
pub use budget::*;
pub use expense::*;
pub use general::*;
pub use member::*;
pub use split::*;
