//! General Discord commands - ping, help and reset.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::trip,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**SplitFare Help**\n\
        Track who paid for what on a trip and work out who owes whom.\n\n\
        **Members**\n\
        • `/member add <name>` - Adds a member.\n\
        • `/member remove <name>` - Removes a member who has not paid for anything.\n\
        • `/member reassign <from> <to>` - Moves everything one member paid for to another.\n\
        • `/member list` - Lists members and where they stand.\n\n\
        **Expenses**\n\
        • `/budget add <payer> <category> <amount>` - Planned cost shared by everyone.\n\
        • `/expense add <payer> <category> <amount> [exclude]` - Cost shared by everyone \
        except the comma-separated names in `exclude`.\n\
        • `/budget list`, `/expense list` - Show recorded expenses.\n\
        • `/budget remove <id>`, `/expense remove <id>` - Delete an expense.\n\n\
        **Results**\n\
        • `/split` - Shows balances and who pays whom.\n\n\
        **Utility**\n\
        • `/reset confirm:true` - Deletes every member and expense.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Deletes every member and expense so a new trip can start.
    #[poise::command(slash_command)]
    pub async fn reset(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Must be true; this cannot be undone"] confirm: bool,
    ) -> Result<()> {
        if !confirm {
            ctx.say("Nothing was deleted. Run `/reset confirm:true` to wipe the trip.")
                .await?;
            return Ok(());
        }

        let summary = trip::reset_trip(&ctx.data().database).await?;
        ctx.say(format!(
            "🧹 Trip reset: removed {} member(s), {} budgeted and {} added expense(s).",
            summary.members, summary.budgeted_expenses, summary.added_expenses
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
