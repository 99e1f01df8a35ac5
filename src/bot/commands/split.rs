//! Split Discord command - balances and the settlement plan for the whole trip.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::report,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Shows trip totals, every member's balance and who should pay whom.
    ///
    /// Everything is recomputed from the current members and expenses on each call.
    #[poise::command(slash_command, prefix_command)]
    pub async fn split(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let trip_report = report::generate_trip_report(&ctx.data().database).await?;

        if trip_report.snapshot.members.is_empty() {
            ctx.say("No members yet. Use `/member add` to get started!")
                .await?;
            return Ok(());
        }

        let totals = &trip_report.totals;
        let mut summary = String::new();
        writeln!(
            &mut summary,
            "**Budgeted:** {}",
            report::format_money(totals.total_budgeted)
        )?;
        writeln!(
            &mut summary,
            "**Added:** {}",
            report::format_money(totals.total_added)
        )?;
        write!(
            &mut summary,
            "**Grand total:** {}",
            report::format_money(totals.grand_total)
        )?;

        let balances = trip_report
            .sheet
            .balances
            .iter()
            .map(report::format_balance_line)
            .collect::<Vec<_>>()
            .join("\n");

        let mut embed_fields = vec![
            ("Balances".to_string(), balances, false),
            (
                "Settlement".to_string(),
                report::format_settlement(&trip_report.settlement),
                false,
            ),
        ];

        let warnings = trip_report.orphan_warnings();
        if !warnings.is_empty() {
            embed_fields.push(("Needs attention".to_string(), warnings.join("\n"), false));
        }

        let split_embed = serenity::CreateEmbed::default()
            .title(format!("💸 {} Split", ctx.data().config.trip.name))
            .description(summary)
            .color(0x002E_CC71)
            .fields(embed_fields)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} member{} | {} transfer{}",
                totals.member_count,
                if totals.member_count == 1 { "" } else { "s" },
                trip_report.settlement.transfers().len(),
                if trip_report.settlement.transfers().len() == 1 {
                    ""
                } else {
                    "s"
                }
            )));

        ctx.send(poise::CreateReply::default().embed(split_embed))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
