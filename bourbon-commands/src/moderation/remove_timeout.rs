use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::action::{ModerationAction, moderate};
use crate::moderation::messages::invalid_flags_message;
use bourbon_core::{Context, Error};
use bourbon_utils::flags::ModerationFlags;

pub const META: CommandMeta = CommandMeta {
    name: "remove_timeout",
    desc: "Remove the timeout from a member.",
    category: "moderation",
    usage: "b!remove_timeout <member> [reason: <text>]",
};

#[poise::command(
    prefix_command,
    aliases("unmute"),
    category = "Moderation",
    guild_only,
    required_permissions = "MODERATE_MEMBERS",
    required_bot_permissions = "MODERATE_MEMBERS"
)]
pub async fn remove_timeout(
    ctx: Context<'_>,
    #[description = "The member to remove the timeout from"] member: serenity::Member,
    #[description = "Flags: reason"]
    #[rest]
    flags: Option<String>,
) -> Result<(), Error> {
    let flags = match ModerationFlags::parse(flags.as_deref()) {
        Ok(flags) => flags,
        Err(source) => {
            ctx.say(invalid_flags_message(&source, META.usage)).await?;
            return Ok(());
        }
    };

    moderate(
        ctx,
        &member.user,
        ModerationAction::RemoveTimeout,
        flags.reason.as_deref(),
    )
    .await
}
