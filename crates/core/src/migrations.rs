use diesel::PgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use eyre::{eyre, Report};
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies every migration not yet recorded. Safe to run repeatedly.
pub fn run_pending_migrations(conn: &mut PgConnection) -> Result<usize, Report> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("failed to run migrations: {e}"))?;

    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}
