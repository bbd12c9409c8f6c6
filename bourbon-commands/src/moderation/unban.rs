use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::action::{ModerationAction, moderate};
use crate::moderation::messages::invalid_flags_message;
use bourbon_core::{Context, Error};
use bourbon_utils::flags::ModerationFlags;

pub const META: CommandMeta = CommandMeta {
    name: "unban",
    desc: "Unban a user from your server.",
    category: "moderation",
    usage: "b!unban <user> [reason: <text>]",
};

#[poise::command(
    prefix_command,
    category = "Moderation",
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "The user to unban"] user: serenity::User,
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

    moderate(ctx, &user, ModerationAction::Unban, flags.reason.as_deref()).await
}
