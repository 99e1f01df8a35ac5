//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions other than commands
//! themselves, such as autocomplete.

/// Autocomplete handlers for member names and expense categories
pub mod autocomplete;
