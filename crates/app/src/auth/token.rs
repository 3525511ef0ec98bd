//! Session token formatting, parsing and hashing.
//!
//! Tokens look like `ps_<session uuid>.<hex secret>`. Only a SHA-256 digest of the whole token is
//! stored, so a leaked sessions table cannot be replayed.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Session token prefix.
pub const SESSION_TOKEN_PREFIX: &str = "ps";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

const SESSION_TOKEN_SECRET_HEX_CHARS: usize = SESSION_TOKEN_SECRET_BYTES * 2;

#[derive(Clone)]
pub struct SessionSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SESSION_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self::from_bytes(bytes)
    }

    fn to_hex(&self) -> String {
        self.bytes.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(**redacted**)")
    }
}

impl Drop for SessionSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn format_session_token(session_uuid: Uuid, secret: &SessionSecret) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}.{}",
        session_uuid.simple(),
        secret.to_hex()
    )
}

/// Check a presented token is well formed and return its session uuid.
///
/// # Errors
///
/// Returns an error when the prefix, uuid or secret segment is malformed.
pub fn parse_session_token(token: &str) -> Result<Uuid, SessionTokenError> {
    let rest = token
        .strip_prefix(SESSION_TOKEN_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .ok_or(SessionTokenError::InvalidFormat)?;

    let (uuid_segment, secret_hex) = rest
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let session_uuid = Uuid::try_parse(uuid_segment)
        .ok()
        .ok_or(SessionTokenError::InvalidFormat)?;

    if secret_hex.len() != SESSION_TOKEN_SECRET_HEX_CHARS
        || !secret_hex.bytes().all(|byte| byte.is_ascii_hexdigit())
    {
        return Err(SessionTokenError::InvalidSecretEncoding);
    }

    Ok(session_uuid)
}

/// Digest stored in place of the raw token.
#[must_use]
pub fn hash_session_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn formatted_tokens_parse_back_to_their_session() -> TestResult {
        let session = Uuid::now_v7();
        let token = format_session_token(session, &SessionSecret::generate());

        assert!(token.starts_with("ps_"), "unexpected token {token}");
        assert_eq!(parse_session_token(&token)?, session);

        Ok(())
    }

    #[test]
    fn parse_rejects_foreign_or_truncated_tokens() {
        let session = Uuid::nil().simple();

        assert_eq!(
            parse_session_token(&format!("lt_{session}.{}", "a".repeat(64))),
            Err(SessionTokenError::InvalidFormat)
        );
        assert_eq!(
            parse_session_token(&format!("ps_{session}.abc")),
            Err(SessionTokenError::InvalidSecretEncoding)
        );
        assert_eq!(
            parse_session_token(&format!("ps_{session}.{}", "z".repeat(64))),
            Err(SessionTokenError::InvalidSecretEncoding)
        );
        assert_eq!(
            parse_session_token("ps_not-a-uuid"),
            Err(SessionTokenError::InvalidFormat)
        );
    }

    #[test]
    fn hash_is_hex_sha256() {
        let hash = hash_session_token("ps_token");

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_session_token("ps_token"));
        assert_ne!(hash, hash_session_token("ps_other"));
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = SessionSecret::from_bytes([0xAB; SESSION_TOKEN_SECRET_BYTES]);

        assert_eq!(format!("{secret:?}"), "SessionSecret(**redacted**)");
    }
}
