use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use eyre::{Report, WrapErr};
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::time::Duration;
use tracing::info;

const MAX_POOL_SIZE: u32 = 20;

pub fn database_url() -> Result<SecretString, Report> {
    env::var("DATABASE_URL")
        .map(|url| SecretString::new(url.into()))
        .wrap_err("DATABASE_URL must be set")
}

pub fn create_db_pool() -> Result<Pool<ConnectionManager<PgConnection>>, Report> {
    let db_url = database_url()?;

    let manager = ConnectionManager::<PgConnection>::new(db_url.expose_secret());

    let pool = Pool::builder()
        .max_size(MAX_POOL_SIZE)
        .min_idle(Some(2))
        .connection_timeout(Duration::from_secs(8))
        .idle_timeout(Some(Duration::from_secs(300)))
        .max_lifetime(Some(Duration::from_secs(1800)))
        .test_on_check_out(true)
        .build(manager)
        .wrap_err("failed to create PostgreSQL connection pool")?;

    info!(max_size = MAX_POOL_SIZE, "PostgreSQL connection pool created");

    Ok(pool)
}
