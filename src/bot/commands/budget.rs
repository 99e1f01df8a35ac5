//! Budgeted expense Discord commands - record, remove and list planned costs.
//!
//! Budgeted expenses are split across whoever the members are when `/split` runs, so
//! adding a member later automatically gives them a share.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{budgeted_expense, member, money::Money, report, snapshot},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing budgeted expenses.
    #[poise::command(
        slash_command,
        subcommands("budget_add", "budget_remove", "budget_list")
    )]
    pub async fn budget(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Budgeted expense command. Available subcommands:\n\
            `/budget add` - Record a planned cost shared by everyone\n\
            `/budget remove` - Delete a budgeted expense by id\n\
            `/budget list` - List budgeted expenses with the budget summary";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Records a budgeted expense shared equally by every member.
    #[poise::command(slash_command, rename = "add")]
    pub async fn budget_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member who paid"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        payer: String,
        #[description = "Category (e.g., Flights, Hotel)"]
        #[autocomplete = "autocomplete::autocomplete_budgeted_category"]
        category: String,
        #[description = "Amount in dollars (e.g., 120.50)"] amount: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let payer = member::require_member_by_name(db, &payer).await?;
        let amount = Money::from_dollars(amount)?;

        let expense = budgeted_expense::create_budgeted_expense(db, category, amount, payer.id)
            .await?;

        ctx.say(format!(
            "✅ Budgeted **{}** for {} paid by **{}** (id {}).",
            expense.category,
            report::format_money(amount),
            payer.name,
            expense.id
        ))
        .await?;
        Ok(())
    }

    /// Deletes a budgeted expense.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn budget_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Id shown by /budget list"] id: i64,
    ) -> Result<()> {
        budgeted_expense::delete_budgeted_expense(&ctx.data().database, id).await?;
        ctx.say(format!("🗑️ Deleted budgeted expense {id}."))
            .await?;
        Ok(())
    }

    /// Lists budgeted expenses with the total and the per-person estimate.
    #[poise::command(slash_command, rename = "list")]
    pub async fn budget_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let trip = snapshot::load_snapshot(&ctx.data().database).await?;

        if trip.budgeted.is_empty() {
            ctx.say("No budgeted expenses yet. Use `/budget add` to record one!")
                .await?;
            return Ok(());
        }

        let totals = report::compute_totals(&trip);
        let embed_fields: Vec<(String, String, bool)> = trip
            .budgeted
            .iter()
            .map(|expense| {
                (
                    format!("#{} {}", expense.id, expense.category),
                    format!(
                        "{} paid by {}",
                        report::format_money(expense.amount),
                        trip.member_name(expense.payer)
                    ),
                    false,
                )
            })
            .collect();

        let estimate = totals.per_person_estimate.map_or_else(
            || "n/a (no members)".to_string(),
            report::format_money,
        );
        let list_embed = serenity::CreateEmbed::default()
            .title("🧾 Budgeted Expenses")
            .description(format!(
                "**Total:** {}\n**Per person:** {} across {} member{}",
                report::format_money(totals.total_budgeted),
                estimate,
                totals.member_count,
                if totals.member_count == 1 { "" } else { "s" }
            ))
            .color(0x0034_98DB)
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
