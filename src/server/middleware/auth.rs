//! JWT bearer authentication and permission-tier guards for the REST API.
//!
//! Identity comes from the JWT alone (no session store); guild standing is
//! resolved per request from live Discord data, so revoking a role takes
//! effect immediately rather than at token expiry.

use axum::http::{header, HeaderMap};

use crate::server::{
    error::{auth::AuthError, AppError},
    service::{auth::verify_token, permission::PermissionService},
    state::AppState,
};

/// Permission tier required by a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// Any member of the guild.
    Member,
    /// Staff: admin bits, MANAGE_MESSAGES, or any staff-role capability.
    Moderator,
    /// ADMINISTRATOR or MANAGE_GUILD.
    Admin,
}

/// The authenticated dashboard user.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: u64,
    pub username: String,
}

pub struct AuthGuard<'a> {
    state: &'a AppState,
}

impl<'a> AuthGuard<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Verifies the bearer token and returns the identity it carries.
    ///
    /// # Returns
    /// - `Ok(AuthUser)` - Valid token
    /// - `Err(AuthError::MissingToken)` - No bearer header
    /// - `Err(AuthError::InvalidToken)` - Bad signature, expiry, or claims
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, AppError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        let claims = verify_token(&self.state.jwt_secret, token)?;

        let id = claims
            .sub
            .parse::<u64>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthUser {
            id,
            username: claims.name,
        })
    }

    /// Authenticates and checks the user's tier within a guild.
    ///
    /// # Returns
    /// - `Ok(AuthUser)` - Authenticated and at or above the required tier
    /// - `Err(AuthError::NotGuildMember)` - Not in the guild
    /// - `Err(AuthError::AccessDenied)` - In the guild but below the tier
    pub async fn require(
        &self,
        headers: &HeaderMap,
        guild_id: u64,
        tier: Tier,
    ) -> Result<AuthUser, AppError> {
        let user = self.authenticate(headers)?;

        let service = PermissionService::new(&self.state.db, self.state.discord_http.clone());
        let member = service.member(guild_id, user.id).await?;

        match tier {
            Tier::Member => {}
            Tier::Moderator => {
                let permissions = service.member_permissions(guild_id, &member).await?;
                let capabilities = service.capabilities(guild_id, &member).await?;

                if !PermissionService::is_moderator(permissions, capabilities) {
                    return Err(AuthError::AccessDenied(
                        user.id,
                        format!("moderator tier required in guild {}", guild_id),
                    )
                    .into());
                }
            }
            Tier::Admin => {
                let permissions = service.member_permissions(guild_id, &member).await?;

                if !PermissionService::is_admin(permissions) {
                    return Err(AuthError::AccessDenied(
                        user.id,
                        format!("admin tier required in guild {}", guild_id),
                    )
                    .into());
                }
            }
        }

        Ok(user)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_non_bearer_schemes_and_absence() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
