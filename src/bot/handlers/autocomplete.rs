//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests existing member names and the configured expense categories as the user
//! types.

use crate::{bot::BotData, core::member, errors::Error};

/// Discord rejects more than 25 choices.
const MAX_CHOICES: usize = 25;

/// Case-insensitive substring match, sorted and capped at the Discord limit.
fn matching(candidates: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matches: Vec<String> = candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&partial_lower))
        .collect();
    matches.sort();
    matches.truncate(MAX_CHOICES);
    matches
}

/// Provides autocomplete suggestions for member names.
pub async fn autocomplete_member_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(members) = member::get_all_members(&ctx.data().database).await else {
        return Vec::new();
    };
    matching(members.into_iter().map(|m| m.name), partial)
}

/// Provides autocomplete suggestions for budgeted expense categories.
pub async fn autocomplete_budgeted_category(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(ctx.data().config.categories.budgeted.iter().cloned(), partial)
}

/// Provides autocomplete suggestions for added expense categories.
pub async fn autocomplete_added_category(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(ctx.data().config.categories.added.iter().cloned(), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_matching_is_case_insensitive_and_sorted() {
        let result = matching(owned(&["Tickets", "Gas", "Food", "Flights"]), "f");

        assert_eq!(result, owned(&["Flights", "Food"]));
    }

    #[test]
    fn test_matching_empty_partial_returns_everything() {
        assert_eq!(matching(owned(&["b", "a"]), ""), owned(&["a", "b"]));
    }

    #[test]
    fn test_matching_caps_choices() {
        let many = (0..40).map(|i| format!("Member {i:02}"));

        assert_eq!(matching(many, "member").len(), MAX_CHOICES);
    }

    #[test]
    fn test_matching_keeps_alphabetically_first_choices() {
        let reversed = (0..30).rev().map(|i| format!("M{i:02}"));

        let result = matching(reversed, "m");

        assert_eq!(result.first().map(String::as_str), Some("M00"));
        assert_eq!(result.last().map(String::as_str), Some("M24"));
    }
}
