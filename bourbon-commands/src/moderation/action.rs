use anyhow::Context as _;
use tracing::info;

use poise::serenity_prelude as serenity;

use crate::moderation::messages::{ACTION_SUCCEEDED, HIERARCHY_DENIED, PRIVATE_MESSAGES_DENIED};
use bourbon_core::{Context, Error};
use bourbon_utils::formatting::format_reason;
use bourbon_utils::hierarchy::{Actor, BotActor, Target, is_executable};
use bourbon_utils::permissions::{fetch_guild_hierarchy, fetch_member};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModerationAction {
    Ban { delete_message_days: u8 },
    Kick,
    Timeout { until: serenity::Timestamp },
    RemoveTimeout,
    Unban,
}

impl ModerationAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ban { .. } => "ban",
            Self::Kick => "kick",
            Self::Timeout { .. } => "timeout",
            Self::RemoveTimeout => "remove_timeout",
            Self::Unban => "unban",
        }
    }
}

/// A single outbound moderation call, ready to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModerationRequest {
    pub action: ModerationAction,
    pub target_id: serenity::UserId,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Denied,
    Execute(ModerationRequest),
}

/// Check the hierarchy and, if allowed, build the request to send.
pub fn decide(
    bot: &BotActor,
    user: &Actor,
    target: &Target,
    action: ModerationAction,
    reason: Option<&str>,
) -> Decision {
    if !is_executable(bot, user, target) {
        return Decision::Denied;
    }

    Decision::Execute(ModerationRequest {
        action,
        target_id: serenity::UserId::new(target.actor.id),
        reason: format_reason(user, reason),
    })
}

/// Issue exactly one REST call for `request`.
pub async fn execute(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    request: &ModerationRequest,
) -> Result<(), serenity::Error> {
    let target_id = request.target_id;
    let reason = request.reason.as_str();

    match request.action {
        ModerationAction::Ban {
            delete_message_days,
        } => {
            guild_id
                .ban_with_reason(http, target_id, delete_message_days, reason)
                .await
        }
        ModerationAction::Kick => guild_id.kick_with_reason(http, target_id, reason).await,
        ModerationAction::Timeout { until } => {
            let edit = serenity::EditMember::new()
                .disable_communication_until_datetime(until)
                .audit_log_reason(reason);
            guild_id.edit_member(http, target_id, edit).await.map(|_| ())
        }
        ModerationAction::RemoveTimeout => {
            let edit = serenity::EditMember::new()
                .enable_communication()
                .audit_log_reason(reason);
            guild_id.edit_member(http, target_id, edit).await.map(|_| ())
        }
        ModerationAction::Unban => http.remove_ban(guild_id, target_id, Some(reason)).await,
    }
}

/// Shared handler body: snapshot, validate, execute, confirm.
pub async fn moderate(
    ctx: Context<'_>,
    target_user: &serenity::User,
    action: ModerationAction,
    reason: Option<&str>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(PRIVATE_MESSAGES_DENIED).await?;
        return Ok(());
    };

    // Slash interactions must be acknowledged within three seconds.
    if let poise::Context::Application(_) = ctx {
        ctx.defer().await?;
    }

    let http = ctx.http();
    let hierarchy = fetch_guild_hierarchy(http, guild_id).await?;
    let bot_member = guild_id.member(http, ctx.framework().bot_id).await?;
    let author_member = guild_id.member(http, ctx.author().id).await?;
    let target_member = fetch_member(http, guild_id, target_user.id).await?;

    let bot = hierarchy.actor(&bot_member);
    let user = hierarchy.actor(&author_member);
    let target = hierarchy.target(target_user, target_member.as_ref());

    let request = match decide(&bot, &user, &target, action, reason) {
        Decision::Denied => {
            info!(
                action = action.name(),
                guild_id = guild_id.get(),
                target_id = target_user.id.get(),
                moderator_id = ctx.author().id.get(),
                "moderation action denied by role hierarchy"
            );
            ctx.say(HIERARCHY_DENIED).await?;
            return Ok(());
        }
        Decision::Execute(request) => request,
    };

    execute(http, guild_id, &request)
        .await
        .with_context(|| format!("{} request failed", action.name()))?;

    info!(
        action = action.name(),
        guild_id = guild_id.get(),
        target_id = request.target_id.get(),
        moderator_id = ctx.author().id.get(),
        "moderation action applied"
    );
    ctx.say(ACTION_SUCCEEDED).await?;

    Ok(())
}
