use poise::serenity_prelude as serenity;
use tracing::{debug, error, warn};

use bourbon_commands::moderation::PRIVATE_MESSAGES_DENIED;
use bourbon_core::{Data, Error};
use bourbon_utils::formatting::{permissions_codeblock, usage_message};
use bourbon_utils::permissions::permission_names;

pub const HTTP_FAILURE_MESSAGE: &str = "You messed up with the bot. An error was occured. Good job.";
pub const USER_MISSING_PERMISSIONS: &str = "You are missing some permissions!";
pub const BOT_MISSING_PERMISSIONS: &str = "I am missing some permissions!";

/// User-facing category of a failed command invocation.
///
/// Categories are mutually exclusive: each framework error maps to exactly one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandFailure {
    GuildOnly,
    Http,
    MissingUserPermissions(Vec<String>),
    MissingBotPermissions(Vec<String>),
    ArgumentParse {
        input: Option<String>,
        usage: Option<&'static str>,
    },
    Other,
}

impl CommandFailure {
    pub fn classify(error: &poise::FrameworkError<'_, Data, Error>) -> Self {
        match error {
            poise::FrameworkError::GuildOnly { .. } => Self::GuildOnly,
            poise::FrameworkError::Command { error, .. } => Self::from_command_error(error),
            poise::FrameworkError::MissingUserPermissions {
                missing_permissions,
                ..
            } => Self::MissingUserPermissions(
                (*missing_permissions)
                    .map(permission_names)
                    .unwrap_or_default(),
            ),
            poise::FrameworkError::MissingBotPermissions {
                missing_permissions,
                ..
            } => Self::MissingBotPermissions(permission_names(*missing_permissions)),
            poise::FrameworkError::ArgumentParse { input, ctx, .. } => Self::ArgumentParse {
                input: input.clone(),
                usage: bourbon_commands::usage_for(&ctx.command().qualified_name),
            },
            _ => Self::Other,
        }
    }

    /// Errors returned from a command body: failed API calls anywhere in the
    /// chain are `Http`, everything else is `Other`.
    ///
    /// serenity rejects some requests before sending them (reason too long,
    /// out-of-range values); those count as failed API calls too.
    pub fn from_command_error(error: &Error) -> Self {
        let is_http = error.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<serenity::Error>(),
                Some(
                    serenity::Error::Http(_)
                        | serenity::Error::ExceededLimit(..)
                        | serenity::Error::Model(_)
                        | serenity::Error::NotInRange(..)
                )
            )
        });

        if is_http { Self::Http } else { Self::Other }
    }

    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::GuildOnly => Some(PRIVATE_MESSAGES_DENIED.to_owned()),
            Self::Http => Some(HTTP_FAILURE_MESSAGE.to_owned()),
            Self::MissingUserPermissions(names) => Some(format!(
                "{}{}",
                USER_MISSING_PERMISSIONS,
                permissions_codeblock(names)
            )),
            Self::MissingBotPermissions(names) => Some(format!(
                "{}{}",
                BOT_MISSING_PERMISSIONS,
                permissions_codeblock(names)
            )),
            Self::ArgumentParse { input, usage } => {
                let usage = (*usage).map(usage_message);
                let description = match input {
                    Some(input) => format!("Invalid argument: `{}`", input),
                    None => "Missing required argument.".to_owned(),
                };
                Some(match usage {
                    Some(usage) => format!("{}\n{}", description, usage),
                    None => description,
                })
            }
            Self::Other => None,
        }
    }
}

pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    let failure = CommandFailure::classify(&error);

    match (&failure, &error) {
        (_, poise::FrameworkError::UnknownCommand { .. }) => {
            debug!("unknown command invocation");
        }
        (_, poise::FrameworkError::Command { error, ctx, .. }) => {
            error!(?error, command = %ctx.command().qualified_name, "command error");
        }
        (CommandFailure::Other, other) => {
            error!(?other, "framework error");
        }
        (failure, _) => {
            debug!(?failure, "command rejected");
        }
    }

    let Some(message) = failure.user_message() else {
        return;
    };
    let Some(ctx) = error.ctx() else {
        return;
    };

    if let Err(source) = ctx.say(message).await {
        warn!(?source, "failed to send command error reply");
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context as _;
    use poise::serenity_prelude as serenity;

    use super::CommandFailure;

    #[test]
    fn rest_failures_are_http() {
        let error = anyhow::Error::new(serenity::Error::Http(serenity::HttpError::InvalidWebhook));
        assert_eq!(CommandFailure::from_command_error(&error), CommandFailure::Http);
    }

    #[test]
    fn wrapped_rest_failures_are_http() {
        let result: Result<(), serenity::Error> =
            Err(serenity::Error::Http(serenity::HttpError::InvalidWebhook));
        let error = result.context("ban request failed").unwrap_err();
        assert_eq!(CommandFailure::from_command_error(&error), CommandFailure::Http);
    }

    #[tokio::test]
    async fn oversized_ban_reason_is_an_api_failure() {
        let http = serenity::Http::new("token");
        let reason = "x".repeat(530);
        let error = serenity::GuildId::new(1)
            .ban_with_reason(&http, serenity::UserId::new(2), 3, &reason)
            .await
            .context("ban request failed")
            .unwrap_err();

        let failure = CommandFailure::from_command_error(&error);
        assert_eq!(failure, CommandFailure::Http);
        assert_eq!(
            failure.user_message().as_deref(),
            Some("You messed up with the bot. An error was occured. Good job.")
        );
    }

    #[test]
    fn pre_send_rejections_are_api_failures() {
        let error = anyhow::Error::new(serenity::Error::ExceededLimit("reason".to_owned(), 512));
        assert_eq!(CommandFailure::from_command_error(&error), CommandFailure::Http);
    }

    #[test]
    fn other_failures_have_no_message() {
        let error = anyhow::anyhow!("something unrelated");
        let failure = CommandFailure::from_command_error(&error);
        assert_eq!(failure, CommandFailure::Other);
        assert_eq!(failure.user_message(), None);

        let error = anyhow::Error::new(serenity::Error::Other("not http"));
        assert_eq!(CommandFailure::from_command_error(&error), CommandFailure::Other);
    }

    #[test]
    fn guild_only_uses_private_message_text() {
        assert_eq!(
            CommandFailure::GuildOnly.user_message().as_deref(),
            Some("This can't be used in private messages.")
        );
    }

    #[test]
    fn http_failure_message() {
        assert_eq!(
            CommandFailure::Http.user_message().as_deref(),
            Some("You messed up with the bot. An error was occured. Good job.")
        );
    }

    #[test]
    fn missing_permissions_are_listed_in_a_codeblock() {
        let user = CommandFailure::MissingUserPermissions(vec!["BAN_MEMBERS".to_owned()]);
        assert_eq!(
            user.user_message().as_deref(),
            Some("You are missing some permissions!```BAN_MEMBERS```")
        );

        let unknown = CommandFailure::MissingUserPermissions(Vec::new());
        assert_eq!(
            unknown.user_message().as_deref(),
            Some("You are missing some permissions!")
        );

        let bot = CommandFailure::MissingBotPermissions(vec![
            "KICK_MEMBERS".to_owned(),
            "MODERATE_MEMBERS".to_owned(),
        ]);
        assert_eq!(
            bot.user_message().as_deref(),
            Some("I am missing some permissions!```KICK_MEMBERS\nMODERATE_MEMBERS```")
        );
    }

    #[test]
    fn argument_errors_point_at_usage() {
        let failure = CommandFailure::ArgumentParse {
            input: Some("@nobody".to_owned()),
            usage: Some("b!timeout <member>"),
        };
        assert_eq!(
            failure.user_message().as_deref(),
            Some("Invalid argument: `@nobody`\nUsage: `b!timeout <member>`")
        );

        let failure = CommandFailure::ArgumentParse {
            input: None,
            usage: None,
        };
        assert_eq!(
            failure.user_message().as_deref(),
            Some("Missing required argument.")
        );
    }
}
