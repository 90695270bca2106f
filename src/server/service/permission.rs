//! Permission-tier resolution against live Discord data.
//!
//! The REST layer has no interaction payload to lean on, so member and role
//! data are fetched through the bot's HTTP client per request. Tiers:
//!
//! - **admin**: ADMINISTRATOR or MANAGE_GUILD permission
//! - **moderator**: admin, MANAGE_MESSAGES, or any staff-role capability
//! - **member**: guild membership

use sea_orm::DatabaseConnection;
use serenity::all::{GuildId, Member, Permissions, UserId};
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    data::staff_role::StaffRoleRepository,
    error::{auth::AuthError, AppError},
    model::permission::Capabilities,
};

pub struct PermissionService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
}

impl<'a> PermissionService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Fetches the guild member record for a user.
    ///
    /// A fetch failure is treated as non-membership: if Discord won't tell
    /// us the user is in the guild, they don't get in.
    ///
    /// # Returns
    /// - `Ok(Member)` - The user's member record
    /// - `Err(AuthError::NotGuildMember)` - Not a member or fetch failed
    pub async fn member(&self, guild_id: u64, user_id: u64) -> Result<Member, AppError> {
        match self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await
        {
            Ok(member) => Ok(member),
            Err(e) => {
                tracing::debug!("member fetch failed for {} in {}: {}", user_id, guild_id, e);
                Err(AuthError::NotGuildMember(user_id, guild_id).into())
            }
        }
    }

    /// Computes the member's effective guild-level permissions as the union
    /// of the @everyone role and every role they hold.
    ///
    /// Channel overwrites are deliberately ignored; tiers are guild-level.
    pub async fn member_permissions(
        &self,
        guild_id: u64,
        member: &Member,
    ) -> Result<Permissions, AppError> {
        let roles = self.http.get_guild_roles(GuildId::new(guild_id)).await?;

        let mut permissions = Permissions::empty();
        for role in roles {
            // The @everyone role shares its id with the guild.
            if role.id.get() == guild_id || member.roles.contains(&role.id) {
                permissions |= role.permissions;
            }
        }

        Ok(permissions)
    }

    /// Resolves the member's ticket capabilities from the staff-role table.
    pub async fn capabilities(
        &self,
        guild_id: u64,
        member: &Member,
    ) -> Result<Capabilities, AppError> {
        let member_roles: Vec<u64> = member.roles.iter().map(|id| id.get()).collect();

        let repo = StaffRoleRepository::new(self.db);
        Ok(repo.capabilities_for(guild_id, &member_roles).await?)
    }

    pub fn is_admin(permissions: Permissions) -> bool {
        permissions.administrator() || permissions.manage_guild()
    }

    pub fn is_moderator(permissions: Permissions, capabilities: Capabilities) -> bool {
        Self::is_admin(permissions)
            || permissions.manage_messages()
            || capabilities != Capabilities::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrator_bit_grants_admin_tier() {
        assert!(PermissionService::is_admin(Permissions::ADMINISTRATOR));
        assert!(PermissionService::is_admin(Permissions::MANAGE_GUILD));
        assert!(!PermissionService::is_admin(Permissions::MANAGE_MESSAGES));
    }

    #[test]
    fn moderator_tier_from_bits_or_capabilities() {
        let staff = Capabilities {
            view: true,
            ..Default::default()
        };

        assert!(PermissionService::is_moderator(
            Permissions::MANAGE_MESSAGES,
            Capabilities::default()
        ));
        assert!(PermissionService::is_moderator(Permissions::empty(), staff));
        assert!(!PermissionService::is_moderator(
            Permissions::SEND_MESSAGES,
            Capabilities::default()
        ));
    }
}
