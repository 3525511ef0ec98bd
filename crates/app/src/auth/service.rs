//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    AuthServiceError, IssuedSession, Principal, SessionSecret, format_session_token,
    hash_session_token,
    models::NewSession,
    parse_session_token,
    repository::PgAuthRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new session for the given principal.
    ///
    /// The raw token is only available on the returned value.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be stored.
    pub async fn issue_session(
        &self,
        principal: Principal,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedSession, AuthServiceError> {
        let uuid = Uuid::now_v7();
        let token = format_session_token(uuid, &SessionSecret::generate());

        self.repository
            .create_session(&NewSession {
                uuid,
                principal,
                token_hash: hash_session_token(&token),
                expires_at,
            })
            .await?;

        Ok(IssuedSession {
            uuid,
            token,
            principal,
            expires_at,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthServiceError> {
        parse_session_token(token)?;

        let session = self
            .repository
            .find_session_by_token_hash(&hash_session_token(token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if session
            .expires_at
            .is_some_and(|expires_at| expires_at <= Timestamp::now())
        {
            return Err(AuthServiceError::Expired);
        }

        Ok(session.principal)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a presented session token to its principal.
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthServiceError>;
}
