use std::env;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use dotenvy::dotenv;
use log::info;

use crate::errors::{CustomResult, Error};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// # establish a database connection
/// reads `DATABASE_URL` from the environment (or the .env file)
/// and connects to it.
pub fn establish_connection() -> PgConnection {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgConnection::establish(&database_url)
        .unwrap_or_else(|_| panic!("Error connecting to {}", database_url))
}

/// # run pending migrations
/// applies the embedded migration list in order. every schema change lives
/// in `migrations/` as a versioned entry instead of ad-hoc alter scripts.
pub fn run_migrations(conn: &mut PgConnection) -> CustomResult<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::MigrationError {
            message: e.to_string(),
        })?;

    for version in applied {
        info!(target:"models/general", "applied migration: {}", version);
    }

    Ok(())
}
