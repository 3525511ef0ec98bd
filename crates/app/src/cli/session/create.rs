use clap::Args;
use jiff::{SignedDuration, Timestamp};
use platter_app::{
    auth::{PgAuthService, Principal, Role},
    database::{self, PoolSettings},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateSessionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Kind of principal: user, restaurant or admin
    #[arg(long)]
    role: Role,

    /// UUID of the user, restaurant or admin the session acts as
    #[arg(long)]
    principal: Uuid,

    /// Lifetime of the session in hours; sessions never expire when omitted
    #[arg(long)]
    ttl_hours: Option<u32>,
}

pub(crate) async fn run(args: CreateSessionArgs) -> Result<(), String> {
    let expires_at = match args.ttl_hours {
        Some(0) => return Err("ttl-hours must be positive".to_string()),
        Some(hours) => Some(
            Timestamp::now()
                .checked_add(SignedDuration::from_hours(i64::from(hours)))
                .map_err(|error| format!("invalid ttl-hours: {error}"))?,
        ),
        None => None,
    };

    let pool = database::connect(&args.database_url, &PoolSettings::default())
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let issued = PgAuthService::new(pool)
        .issue_session(
            Principal {
                uuid: args.principal,
                role: args.role,
            },
            expires_at,
        )
        .await
        .map_err(|error| format!("failed to create session: {error}"))?;

    println!("session_uuid: {}", issued.uuid);
    println!("role: {}", issued.principal.role);
    println!("principal_uuid: {}", issued.principal.uuid);

    if let Some(expires_at) = issued.expires_at {
        println!("expires_at: {expires_at}");
    }

    println!("token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
