use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::action::{ModerationAction, moderate};
use bourbon_core::{Context, Error};
use bourbon_utils::flags::BanFlags;

pub const META: CommandMeta = CommandMeta {
    name: "moderation ban",
    desc: "Ban a member from your server (slash command).",
    category: "moderation",
    usage: "/moderation ban <member> [reason] [delete_message_days]",
};

/// Moderation related commands.
#[poise::command(
    slash_command,
    category = "Moderation",
    guild_only,
    subcommands("ban_member")
)]
pub async fn moderation(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Ban a member from your server.
#[poise::command(
    slash_command,
    rename = "ban",
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn ban_member(
    ctx: Context<'_>,
    #[description = "The member to ban."] member: serenity::User,
    #[description = "The reason to ban this member"] reason: Option<String>,
    #[description = "The number of days to delete message from. Default to 3."]
    #[min = 0]
    #[max = 7]
    delete_message_days: Option<i64>,
) -> Result<(), Error> {
    let delete_message_days = delete_message_days
        .map(BanFlags::clamp_delete_message_days)
        .unwrap_or_else(BanFlags::default_delete_message_days);

    moderate(
        ctx,
        &member,
        ModerationAction::Ban {
            delete_message_days,
        },
        reason.as_deref(),
    )
    .await
}
