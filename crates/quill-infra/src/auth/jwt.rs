//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::ports::{AuthError, TokenClaims, TokenService};

/// JWT token service configuration. Built once at startup and never
/// mutated afterwards; there is no secret rotation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub lifetime: TimeDelta,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            lifetime: TimeDelta::days(7),
        }
    }
}

impl JwtConfig {
    /// Parse a `"7d"` / `"12h"` / `"30m"` / `"45s"` style lifetime.
    /// A bare number is taken as seconds.
    pub fn parse_lifetime(value: &str) -> Option<TimeDelta> {
        let value = value.trim();
        let (digits, unit) = match value.find(|c: char| !c.is_ascii_digit()) {
            Some(split) => value.split_at(split),
            None => (value, "s"),
        };
        let amount: i64 = digits.parse().ok()?;
        match unit {
            "d" => Some(TimeDelta::days(amount)),
            "h" => Some(TimeDelta::hours(amount)),
            "m" => Some(TimeDelta::minutes(amount)),
            "s" => Some(TimeDelta::seconds(amount)),
            _ => None,
        }
    }
}

/// Claims carried by issued tokens. The subject id and the expiry are
/// the contract; role and profile data stay out of the token so that
/// authorization always reads the live user record.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// JWT-based token service (HS256, shared process-wide secret).
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: TimeDelta,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            lifetime: config.lifetime,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        // Malformed, forged and expired tokens all land in the same
        // opaque error; callers must not learn which check failed.
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AuthError::InvalidToken)?;

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)?;

        Ok(TokenClaims {
            user_id,
            expires_at: data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            lifetime: TimeDelta::hours(1),
        })
    }

    #[test]
    fn issue_then_verify_round_trips_the_subject() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert!(claims.expires_at > Utc::now().timestamp());
    }

    #[test]
    fn garbage_is_rejected() {
        let service = test_service();
        assert!(matches!(
            service.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = test_service();
        let verifier = JwtTokenService::new(JwtConfig {
            secret: "a-different-secret".to_string(),
            lifetime: TimeDelta::hours(1),
        });

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected_like_any_other_invalid_token() {
        let service = test_service();

        // Hand-roll a token whose exp is comfortably past the default
        // validation leeway.
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - TimeDelta::hours(2)).timestamp(),
            exp: (now - TimeDelta::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key"),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn lifetime_strings_parse() {
        assert_eq!(
            JwtConfig::parse_lifetime("7d"),
            Some(TimeDelta::days(7))
        );
        assert_eq!(
            JwtConfig::parse_lifetime("12h"),
            Some(TimeDelta::hours(12))
        );
        assert_eq!(
            JwtConfig::parse_lifetime("30m"),
            Some(TimeDelta::minutes(30))
        );
        assert_eq!(
            JwtConfig::parse_lifetime("3600"),
            Some(TimeDelta::seconds(3600))
        );
        assert_eq!(JwtConfig::parse_lifetime("7w"), None);
        assert_eq!(JwtConfig::parse_lifetime(""), None);
    }
}
