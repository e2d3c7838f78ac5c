//! JWT token generation and validation for the session cookie.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use espeat_core::Role;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Account role, so gated pages don't re-read it
    pub role: Role,
    /// Expiration timestamp
    pub exp: u64,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub role: Role,
}

/// Generate a session token for a user.
pub fn generate_token(
    user_id: String,
    role: Role,
    secret: &str,
    lifetime_seconds: u64,
) -> anyhow::Result<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| anyhow::anyhow!("horloge système antérieure à l'époque Unix"))?
        .as_secs();

    let claims = Claims {
        sub: user_id,
        role,
        exp: now + lifetime_seconds,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Validate and decode a session token.
pub fn validate_token(token: &str, secret: &str) -> anyhow::Result<AuthUser> {
    let validation = Validation::default();

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(AuthUser {
        user_id: token_data.claims.sub,
        role: token_data.claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_minimum_32_characters_long";

    #[test]
    fn token_round_trips_user_and_role() {
        let token = generate_token("etudiant1".to_string(), Role::Etudiant, SECRET, 3600).unwrap();
        let auth = validate_token(&token, SECRET).unwrap();
        assert_eq!(auth.user_id, "etudiant1");
        assert_eq!(auth.role, Role::Etudiant);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = generate_token("etudiant1".to_string(), Role::Etudiant, SECRET, 3600).unwrap();
        assert!(validate_token(&token, "un_autre_secret_de_32_caracteres_x").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // expired well past the default validation leeway
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: "etudiant1".to_string(),
            role: Role::Etudiant,
            exp: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(validate_token(&token, SECRET).is_err());
    }
}
