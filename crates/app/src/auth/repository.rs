//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::auth::models::{ActiveSession, NewSession, Principal, Role};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_SESSION_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_session_by_token_hash.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_session(&self, session: &NewSession) -> Result<(), sqlx::Error> {
        query(CREATE_SESSION_SQL)
            .bind(session.uuid)
            .bind(&session.token_hash)
            .bind(session.principal.role.as_str())
            .bind(session.principal.uuid)
            .bind(session.expires_at.map(SqlxTimestamp::from))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_session_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        query_as::<Postgres, ActiveSession>(FIND_SESSION_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role = row
            .try_get::<String, _>("role")?
            .parse::<Role>()
            .map_err(|error| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(error),
            })?;

        Ok(Self {
            principal: Principal {
                uuid: row.try_get("principal_uuid")?,
                role,
            },
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
