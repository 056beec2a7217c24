use agritrack_core::migrations::run_pending_migrations;
use diesel::{Connection, PgConnection};
use eyre::{Report, WrapErr};
use secrecy::{ExposeSecret, SecretString};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Report> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let database_url = env::var("DATABASE_URL")
        .map(|url| SecretString::new(url.into()))
        .wrap_err("DATABASE_URL must be set")?;

    let mut conn = PgConnection::establish(database_url.expose_secret())
        .wrap_err("failed to connect to PostgreSQL")?;

    let applied = run_pending_migrations(&mut conn)?;
    info!(applied, "database schema is up to date");
    Ok(())
}
