//! Dashboard authentication: Discord access-token validation and JWTs.
//!
//! The dashboard performs the OAuth2 dance itself and hands us the resulting
//! access token; we validate it by asking Discord who it belongs to, then
//! mint a stateless HS256 JWT so subsequent requests skip Discord entirely.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::server::error::{auth::AuthError, internal::InternalError, AppError};

const DISCORD_ME_URL: &str = "https://discord.com/api/v10/users/@me";

/// Token lifetime. Dashboard sessions are re-validated against Discord at
/// most this often.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// The identity Discord reports for an access token.
#[derive(Clone, Debug, Deserialize)]
pub struct DiscordIdentity {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
}

/// JWT claims carried by dashboard tokens.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Discord user id.
    pub sub: String,
    /// Discord username at login time.
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct DiscordAuthService {
    http_client: reqwest::Client,
}

impl DiscordAuthService {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Validates a Discord OAuth2 access token by fetching the identity it
    /// belongs to.
    ///
    /// # Returns
    /// - `Ok(DiscordIdentity)` - The token is live; this is its owner
    /// - `Err(AuthError::DiscordTokenRejected)` - Discord returned an error
    ///   status for the token
    pub async fn fetch_identity(&self, access_token: &str) -> Result<DiscordIdentity, AppError> {
        let response = self
            .http_client
            .get(DISCORD_ME_URL)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::DiscordTokenRejected.into());
        }

        Ok(response.json::<DiscordIdentity>().await?)
    }
}

/// Mints a dashboard JWT for a validated identity.
///
/// # Arguments
/// - `secret` - HS256 signing secret
/// - `identity` - Identity confirmed by Discord
/// - `now` - Issue time (explicit for testability)
///
/// # Returns
/// - `Ok((token, expires_at))` - Signed token and its unix expiry
/// - `Err(AppError)` - Encoding failure
pub fn mint_token(
    secret: &str,
    identity: &DiscordIdentity,
    now: DateTime<Utc>,
) -> Result<(String, i64), AppError> {
    let expires_at = (now + Duration::days(TOKEN_TTL_DAYS)).timestamp();
    let claims = Claims {
        sub: identity.id.clone(),
        name: identity.username.clone(),
        iat: now.timestamp(),
        exp: expires_at,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(InternalError::Jwt)?;

    Ok((token, expires_at))
}

/// Verifies a dashboard JWT and returns its claims.
///
/// # Returns
/// - `Ok(Claims)` - Valid signature and unexpired
/// - `Err(AuthError::InvalidToken)` - Anything else
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> DiscordIdentity {
        DiscordIdentity {
            id: "123456789".to_string(),
            username: "somebody".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn minted_token_verifies_and_round_trips_claims() {
        let now = Utc::now();
        let (token, expires_at) = mint_token("secret", &identity(), now).unwrap();

        let claims = verify_token("secret", &token).unwrap();
        assert_eq!(claims.sub, "123456789");
        assert_eq!(claims.name, "somebody");
        assert_eq!(claims.exp, expires_at);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let (token, _) = mint_token("secret", &identity(), Utc::now()).unwrap();

        assert!(verify_token("other-secret", &token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let issued = Utc::now() - Duration::days(TOKEN_TTL_DAYS + 1);
        let (token, _) = mint_token("secret", &identity(), issued).unwrap();

        assert!(verify_token("secret", &token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify_token("secret", "not-a-jwt").is_err());
    }
}
