/// Role-hierarchy snapshot of a guild member taken for a single command invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub display_name: String,
    pub id: u64,
    /// Position of the highest role held, `0` for members with only `@everyone`.
    pub top_role_position: u16,
    pub is_administrator: bool,
}

/// The bot's own member snapshot, used as the upper bound for the hierarchy check.
pub type BotActor = Actor;

/// The user being moderated. Users who are not (or no longer) in the guild
/// carry `is_member == false` and a zeroed role snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub actor: Actor,
    pub is_member: bool,
    pub is_owner: bool,
}

impl Target {
    pub fn member(actor: Actor, is_owner: bool) -> Self {
        Self {
            actor,
            is_member: true,
            is_owner,
        }
    }

    pub fn outsider(display_name: impl Into<String>, id: u64) -> Self {
        Self {
            actor: Actor {
                display_name: display_name.into(),
                id,
                top_role_position: 0,
                is_administrator: false,
            },
            is_member: false,
            is_owner: false,
        }
    }
}

/// Decide whether `user`, acting through `bot`, may run a moderation action on `target`.
///
/// Rules are evaluated in order and the first match decides:
/// 1. a target outside the guild is always fair game,
/// 2. administrators are protected,
/// 3. targets ranked above the bot are protected,
/// 4. targets ranked above the invoking user are protected,
/// 5. the guild owner is protected.
///
/// Anything else is allowed. Snapshots must be fresh for every invocation.
pub fn is_executable(bot: &BotActor, user: &Actor, target: &Target) -> bool {
    if !target.is_member {
        return true;
    }
    if target.actor.is_administrator {
        return false;
    }
    if target.actor.top_role_position > bot.top_role_position {
        return false;
    }
    if target.actor.top_role_position > user.top_role_position {
        return false;
    }
    if target.is_owner {
        return false;
    }
    true
}
