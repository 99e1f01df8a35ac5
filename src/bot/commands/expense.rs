//! Added expense Discord commands - record, remove and list costs incurred on the trip.
//!
//! The participant list is fixed when the expense is recorded: everyone who is a member
//! at that moment, minus anyone named in `exclude`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{added_expense, member, money::Money, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing added expenses.
    #[poise::command(
        slash_command,
        subcommands("expense_add", "expense_remove", "expense_list")
    )]
    pub async fn expense(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Added expense command. Available subcommands:\n\
            `/expense add` - Record a cost split among the members taking part\n\
            `/expense remove` - Delete an added expense by id\n\
            `/expense list` - List added expenses and who shares them";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Records an added expense split among every member except the excluded ones.
    #[poise::command(slash_command, rename = "add")]
    pub async fn expense_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member who paid"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        payer: String,
        #[description = "Category (e.g., Food, Gas)"]
        #[autocomplete = "autocomplete::autocomplete_added_category"]
        category: String,
        #[description = "Amount in dollars (e.g., 45.00)"] amount: f64,
        #[description = "Comma-separated names of members who did not take part"]
        exclude: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let payer = member::require_member_by_name(db, &payer).await?;
        let amount = Money::from_dollars(amount)?;

        let participants = match exclude.as_deref().map(str::trim) {
            Some(list) if !list.is_empty() => {
                let members = member::get_all_members(db).await?;
                let excluded: Vec<&str> = list
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect();
                Some(added_expense::participants_excluding(&members, &excluded)?)
            }
            _ => None,
        };

        let details =
            added_expense::create_added_expense(db, category, amount, payer.id, participants)
                .await?;

        ctx.say(format!(
            "✅ Added **{}** for {} paid by **{}** (id {}), split among {}.",
            details.expense.category,
            report::format_money(amount),
            payer.name,
            details.expense.id,
            report::format_participants(&details.participants)
        ))
        .await?;
        Ok(())
    }

    /// Deletes an added expense and its participant list.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn expense_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Id shown by /expense list"] id: i64,
    ) -> Result<()> {
        added_expense::delete_added_expense(&ctx.data().database, id).await?;
        ctx.say(format!("🗑️ Deleted added expense {id}.")).await?;
        Ok(())
    }

    /// Lists added expenses with their participants and the running total.
    #[poise::command(slash_command, rename = "list")]
    pub async fn expense_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let expenses = added_expense::get_all_added_expenses(db).await?;

        if expenses.is_empty() {
            ctx.say("No added expenses yet. Use `/expense add` to record one!")
                .await?;
            return Ok(());
        }

        let payers = member::get_all_members(db).await?;
        let total: Money = expenses
            .iter()
            .map(|details| Money::from_cents(details.expense.amount_cents))
            .sum();

        let embed_fields: Vec<(String, String, bool)> = expenses
            .iter()
            .map(|details| {
                let payer = payers
                    .iter()
                    .find(|m| m.id == details.expense.payer_id)
                    .map_or("unknown", |m| m.name.as_str());
                (
                    format!("#{} {}", details.expense.id, details.expense.category),
                    format!(
                        "{} paid by {}\nShared by: {}",
                        report::format_money(Money::from_cents(details.expense.amount_cents)),
                        payer,
                        report::format_participants(&details.participants)
                    ),
                    false,
                )
            })
            .collect();

        let list_embed = serenity::CreateEmbed::default()
            .title("🧾 Added Expenses")
            .description(format!("**Total:** {}", report::format_money(total)))
            .color(0x0034_98DB)
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
