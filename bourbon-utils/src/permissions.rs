use std::collections::HashMap;

use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::hierarchy::{Actor, Target};

/// Convert a permission bitset into a sorted display list.
///
/// If `ADMINISTRATOR` is present, only `ADMINISTRATOR` is returned because
/// it implicitly grants all permissions.
pub fn permission_names(perms: serenity::Permissions) -> Vec<String> {
    if perms.contains(serenity::Permissions::ADMINISTRATOR) {
        return vec!["ADMINISTRATOR".to_owned()];
    }

    let mut names: Vec<String> = perms
        .iter_names()
        .map(|(name, _flag)| name.to_owned())
        .collect();
    names.sort_unstable();
    names
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RoleRank {
    position: u16,
    permissions: serenity::Permissions,
}

/// Role layout of a guild, fetched once per command invocation and used to
/// build hierarchy snapshots.
#[derive(Clone, Debug)]
pub struct GuildHierarchy {
    guild_id: serenity::GuildId,
    owner_id: serenity::UserId,
    roles: HashMap<serenity::RoleId, RoleRank>,
}

impl GuildHierarchy {
    pub fn from_parts(
        guild_id: serenity::GuildId,
        owner_id: serenity::UserId,
        roles: impl IntoIterator<Item = (serenity::RoleId, u16, serenity::Permissions)>,
    ) -> Self {
        let roles = roles
            .into_iter()
            .map(|(id, position, permissions)| {
                (
                    id,
                    RoleRank {
                        position,
                        permissions,
                    },
                )
            })
            .collect();

        Self {
            guild_id,
            owner_id,
            roles,
        }
    }

    fn everyone_role_id(&self) -> serenity::RoleId {
        serenity::RoleId::new(self.guild_id.get())
    }

    /// Highest position among `role_ids`, or `0` when the member only has `@everyone`.
    pub fn top_role_position(&self, role_ids: &[serenity::RoleId]) -> u16 {
        role_ids
            .iter()
            .filter_map(|id| self.roles.get(id))
            .map(|role| role.position)
            .max()
            .unwrap_or(0)
    }

    /// Effective guild-level permissions of a member holding `role_ids`.
    pub fn permissions(
        &self,
        user_id: serenity::UserId,
        role_ids: &[serenity::RoleId],
    ) -> serenity::Permissions {
        if user_id == self.owner_id {
            return serenity::Permissions::all();
        }

        let everyone_role_id = self.everyone_role_id();
        self.roles
            .iter()
            .filter(|(id, _)| **id == everyone_role_id || role_ids.contains(*id))
            .fold(serenity::Permissions::empty(), |acc, (_, role)| {
                acc | role.permissions
            })
    }

    pub fn is_owner(&self, user_id: serenity::UserId) -> bool {
        user_id == self.owner_id
    }

    pub fn snapshot(
        &self,
        display_name: impl Into<String>,
        user_id: serenity::UserId,
        role_ids: &[serenity::RoleId],
    ) -> Actor {
        Actor {
            display_name: display_name.into(),
            id: user_id.get(),
            top_role_position: self.top_role_position(role_ids),
            is_administrator: self
                .permissions(user_id, role_ids)
                .contains(serenity::Permissions::ADMINISTRATOR),
        }
    }

    pub fn actor(&self, member: &serenity::Member) -> Actor {
        self.snapshot(member.user.tag(), member.user.id, &member.roles)
    }

    /// Snapshot a moderation target. `member` is `None` when the user is not in the guild.
    pub fn target(&self, user: &serenity::User, member: Option<&serenity::Member>) -> Target {
        match member {
            Some(member) => Target::member(self.actor(member), self.is_owner(user.id)),
            None => Target::outsider(user.tag(), user.id.get()),
        }
    }
}

/// Fetch the guild's owner and role layout over REST.
pub async fn fetch_guild_hierarchy(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
) -> anyhow::Result<GuildHierarchy> {
    let guild = guild_id.to_partial_guild(http).await?;

    Ok(GuildHierarchy::from_parts(
        guild_id,
        guild.owner_id,
        guild
            .roles
            .values()
            .map(|role| (role.id, role.position, role.permissions)),
    ))
}

/// Fetch a guild member, returning `Ok(None)` when the user is not in the guild.
pub async fn fetch_member(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<Option<serenity::Member>> {
    match guild_id.member(http, user_id).await {
        Ok(member) => Ok(Some(member)),
        Err(source) if is_unknown_member_error(&source) => {
            debug!(guild_id = guild_id.get(), user_id = user_id.get(), "target is not a guild member");
            Ok(None)
        }
        Err(source) => Err(source.into()),
    }
}

pub fn is_unknown_member_error(source: &serenity::Error) -> bool {
    matches!(
        source,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404 || response.error.code == 10007
    )
}
