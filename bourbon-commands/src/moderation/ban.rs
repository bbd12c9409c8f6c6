use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::action::{ModerationAction, moderate};
use crate::moderation::messages::invalid_flags_message;
use bourbon_core::{Context, Error};
use bourbon_utils::flags::BanFlags;

pub const META: CommandMeta = CommandMeta {
    name: "ban",
    desc: "Ban a member from your server. Your name and ID will be shown up on the audit log.",
    category: "moderation",
    usage: "b!ban <user> [reason: <text>] [delete_message_days: <0-7>]",
};

#[poise::command(
    prefix_command,
    category = "Moderation",
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "The user to ban"] user: serenity::User,
    #[description = "Flags: reason, delete_message_days"]
    #[rest]
    flags: Option<String>,
) -> Result<(), Error> {
    let flags = match BanFlags::parse(flags.as_deref()) {
        Ok(flags) => flags,
        Err(source) => {
            ctx.say(invalid_flags_message(&source, META.usage)).await?;
            return Ok(());
        }
    };

    moderate(
        ctx,
        &user,
        ModerationAction::Ban {
            delete_message_days: flags.delete_message_days,
        },
        flags.reason.as_deref(),
    )
    .await
}
