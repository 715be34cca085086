//! Cookie-based sessions
//!
//! The session is a signed JWT carried in an HttpOnly cookie. Claims hold
//! the account id and the staff flag; every request re-loads the account
//! row, so a deleted account's token stops working immediately.

use http::HeaderMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "sh_session";

const SESSION_EXPIRY_HOURS: i64 = 24;

/// JWT claims for a logged-in account
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id
    pub sub: i64,
    /// Staff (admin) flag at login time
    pub staff: bool,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Create a session token for an account
pub fn create_token(
    account_id: i64,
    staff: bool,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: account_id,
        staff,
        exp: (now + chrono::Duration::hours(SESSION_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a session token; `None` on any failure (bad signature, expired)
pub fn verify_token(token: &str, secret: &str) -> Option<SessionClaims> {
    jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Set-Cookie value that establishes a session
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_EXPIRY_HOURS * 3600
    )
}

/// Set-Cookie value that clears the session
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract a cookie value from request headers
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(http::header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(42, false, "test-secret").unwrap();
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, 42);
        assert!(!claims.staff);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let token = create_token(42, true, "test-secret").unwrap();
        assert!(verify_token(&token, "other-secret").is_none());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = create_token(42, false, "test-secret").unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        assert!(verify_token(&tampered, "test-secret").is_none());
    }

    #[test]
    fn test_cookie_value_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            "a=1; sh_session=abc.def.ghi; b=2".parse().unwrap(),
        );
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), Some("abc.def.ghi"));
        assert_eq!(cookie_value(&headers, "missing"), None);
        assert_eq!(cookie_value(&headers, "b"), Some("2"));
    }

    #[test]
    fn test_cookie_value_no_header() {
        let headers = HeaderMap::new();
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), None);
    }
}
