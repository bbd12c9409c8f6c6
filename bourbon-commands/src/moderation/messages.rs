use bourbon_utils::flags::FlagError;
use bourbon_utils::formatting::usage_message;

pub const HIERARCHY_DENIED: &str =
    "You or the bot's permission are not high enough to target this member.";
pub const ACTION_SUCCEEDED: &str = "[OK] Action succeeded.";
pub const PRIVATE_MESSAGES_DENIED: &str = "This can't be used in private messages.";

pub fn invalid_flags_message(source: &FlagError, usage: &str) -> String {
    format!("Invalid flags: {}.\n{}", source, usage_message(usage))
}
