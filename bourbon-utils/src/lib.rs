/// Audit-log reason and reply formatting.
pub mod formatting;
/// `name: value` flag parsing for text commands.
pub mod flags;
/// Pure role-hierarchy checks for moderation actions.
pub mod hierarchy;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: &str = "b!";
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
