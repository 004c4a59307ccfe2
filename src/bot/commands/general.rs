//! General Discord commands - ping and help.
//! These commands don't touch the ledger and provide basic bot functionality.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        errors::Result,
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**Festival Ledger Help**\n\
        Every rupee collected and spent for the festival, in the open.\n\n\
        **Public Commands**\n\
        • `/summary` - Totals, remaining balance and fundraising progress.\n\
        • `/donations [all]` - Recent donations.\n\
        • `/expenses [all]` - Recent expenses.\n\
        • `/festival` - Festival dates, venue and description.\n\n\
        **Admin Commands**\n\
        • `/login <passphrase>` / `/logout` - Start or end an admin session.\n\
        • `/overview` - Latest records with their ids.\n\
        • `/donation <add|edit|delete>` - Manage donations.\n\
        • `/expense <add|edit|delete>` - Manage expenses.\n\
        • `/settings` - Update festival details and the fundraising goal.\n\
        • `/refresh` - Reload the ledger now.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
