//! Member Discord commands - add, remove, reassign and list trip members.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{member, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Parent command for managing trip members.
    #[poise::command(
        slash_command,
        subcommands("member_add", "member_remove", "member_reassign", "member_list")
    )]
    pub async fn member(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Member management command. Available subcommands:\n\
            `/member add` - Add a member to the trip\n\
            `/member remove` - Remove a member\n\
            `/member reassign` - Move everything one member paid for to another\n\
            `/member list` - List all members";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new member to the trip.
    #[poise::command(slash_command, rename = "add")]
    pub async fn member_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Display name, unique within the trip"] name: String,
    ) -> Result<()> {
        let created = member::create_member(&ctx.data().database, name).await?;
        ctx.say(format!("✅ Added **{}** to the trip.", created.name))
            .await?;
        Ok(())
    }

    /// Removes a member and takes them out of every expense they share.
    ///
    /// Members who paid for something must have those expenses reassigned first.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn member_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to remove"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let target = member::require_member_by_name(db, &name).await?;

        let removal = member::delete_member(db, target.id).await?;

        let mut response = format!("🗑️ Removed **{}** from the trip.", removal.member.name);
        if !removal.orphaned_expense_ids.is_empty() {
            // The removal is committed; a failed lookup only loses the detailed warning
            match report::orphan_warnings_for(db, &removal.orphaned_expense_ids).await {
                Ok(warnings) => {
                    for warning in warnings {
                        write!(&mut response, "\n{warning}")?;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to describe orphaned expenses: {:?}", e);
                    write!(
                        &mut response,
                        "\n⚠️ {} added expense(s) now have no participants: {:?}",
                        removal.orphaned_expense_ids.len(),
                        removal.orphaned_expense_ids
                    )?;
                }
            }
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Moves every expense one member paid for onto another member.
    #[poise::command(slash_command, rename = "reassign")]
    pub async fn member_reassign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member whose payments should move"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        from: String,
        #[description = "Member who takes over as payer"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        to: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let from = member::require_member_by_name(db, &from).await?;
        let to = member::require_member_by_name(db, &to).await?;

        let moved = member::reassign_payer(db, from.id, to.id).await?;

        ctx.say(format!(
            "🔁 Moved {moved} expense{} from **{}** to **{}**.",
            if moved == 1 { "" } else { "s" },
            from.name,
            to.name
        ))
        .await?;
        Ok(())
    }

    /// Lists every trip member with their current balance.
    #[poise::command(slash_command, rename = "list")]
    pub async fn member_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let trip_report = report::generate_trip_report(db).await?;

        if trip_report.snapshot.members.is_empty() {
            ctx.say("No members yet. Use `/member add` to add some!")
                .await?;
            return Ok(());
        }

        let embed_fields: Vec<(String, String, bool)> = trip_report
            .sheet
            .balances
            .iter()
            .map(|entry| {
                (
                    entry.member.name.clone(),
                    report::BalanceLabel::from_balance(entry.balance).to_string(),
                    true,
                )
            })
            .collect();

        let list_embed = serenity::CreateEmbed::default()
            .title(format!("👥 {} Members", ctx.data().config.trip.name))
            .color(0x0058_65F2)
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
