pub mod moderation;
pub mod utility;

use bourbon_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    moderation::ban::META,
    moderation::slash::META,
    moderation::kick::META,
    moderation::timeout::META,
    moderation::remove_timeout::META,
    moderation::unban::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::help::help(),
        moderation::ban::ban(),
        moderation::slash::moderation(),
        moderation::kick::kick(),
        moderation::timeout::timeout(),
        moderation::remove_timeout::remove_timeout(),
        moderation::unban::unban(),
    ]
}

/// Look up a command's usage line by its qualified name (e.g. `ban`, `moderation ban`).
pub fn usage_for(qualified_name: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|command| command.name == qualified_name)
        .map(|command| command.usage)
}

#[cfg(test)]
mod tests {
    use super::{COMMANDS, usage_for};

    #[test]
    fn usage_lookup_uses_qualified_names() {
        assert_eq!(
            usage_for("kick"),
            Some("b!kick <user> [reason: <text>]")
        );
        assert!(usage_for("moderation ban").is_some());
        assert_eq!(usage_for("mute"), None);
    }

    #[test]
    fn command_names_are_unique() {
        let mut names: Vec<&str> = COMMANDS.iter().map(|command| command.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COMMANDS.len());
    }
}
