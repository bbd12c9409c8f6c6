use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::action::{ModerationAction, moderate};
use crate::moderation::messages::invalid_flags_message;
use bourbon_core::{Context, Error};
use bourbon_utils::flags::TimeoutFlags;

pub const META: CommandMeta = CommandMeta {
    name: "timeout",
    desc: "Time-out a member (default: 1h). Their highest role must not be higher than yours or the bot's.",
    category: "moderation",
    usage: "b!timeout <member> [until: <10m|2h|YYYY-MM-DD HH:MM (UTC)|RFC 3339 time>] [reason: <text>]",
};

#[poise::command(
    prefix_command,
    aliases("mute"),
    category = "Moderation",
    guild_only,
    required_permissions = "MODERATE_MEMBERS",
    required_bot_permissions = "MODERATE_MEMBERS"
)]
pub async fn timeout(
    ctx: Context<'_>,
    #[description = "The member to timeout"] member: serenity::Member,
    #[description = "Flags: until, reason"]
    #[rest]
    flags: Option<String>,
) -> Result<(), Error> {
    let flags = match TimeoutFlags::parse(flags.as_deref(), ctx.created_at()) {
        Ok(flags) => flags,
        Err(source) => {
            ctx.say(invalid_flags_message(&source, META.usage)).await?;
            return Ok(());
        }
    };

    moderate(
        ctx,
        &member.user,
        ModerationAction::Timeout { until: flags.until },
        flags.reason.as_deref(),
    )
    .await
}
