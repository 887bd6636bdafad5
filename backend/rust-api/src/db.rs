use anyhow::{Context, Result};
use sqlx::sqlite::{
    Sqlite, SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
};
use sqlx::Transaction;
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;

const SCHEMA: [&str; 4] = [
    r#"CREATE TABLE IF NOT EXISTS players (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        gender TEXT NOT NULL CHECK(gender IN ('male', 'female')),
        money INTEGER NOT NULL DEFAULT 100,
        level INTEGER NOT NULL DEFAULT 1,
        experience INTEGER NOT NULL DEFAULT 0,
        current_scenario TEXT NOT NULL DEFAULT 'town_center',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS questions (
        id TEXT PRIMARY KEY,
        question TEXT NOT NULL,
        option_a TEXT NOT NULL,
        option_b TEXT NOT NULL,
        option_c TEXT NOT NULL,
        option_d TEXT NOT NULL,
        correct_answer TEXT NOT NULL CHECK(correct_answer IN ('a', 'b', 'c', 'd')),
        difficulty TEXT NOT NULL DEFAULT 'easy',
        reward INTEGER NOT NULL DEFAULT 10,
        category TEXT NOT NULL DEFAULT 'general'
    )"#,
    r#"CREATE TABLE IF NOT EXISTS interactions (
        id TEXT PRIMARY KEY,
        player_id TEXT NOT NULL,
        question_id TEXT NOT NULL,
        selected_answer TEXT NOT NULL,
        is_correct BOOLEAN NOT NULL,
        money_change INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        FOREIGN KEY (player_id) REFERENCES players(id),
        FOREIGN KEY (question_id) REFERENCES questions(id)
    )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_interactions_player_created
        ON interactions(player_id, created_at)"#,
];

/// Opens the SQLite pool described by `config.database_url`.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let in_memory = is_in_memory(&config.database_url);

    let mut options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("Invalid database URL: {}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        // Readers keep going while a writer holds the lock
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool_options = if in_memory {
        // An in-memory database lives only as long as its connection.
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .context("Failed to open SQLite database")?;

    tracing::info!("SQLite database opened: {}", config.database_url);

    Ok(pool)
}

/// Creates tables and indexes that do not exist yet. Safe to run on every start.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to execute schema statement: {}", statement))?;
    }

    tracing::debug!("Database schema ensured");

    Ok(())
}

/// Transaction holding the write lock from its first statement. Concurrent
/// writers wait on `busy_timeout` instead of hitting SQLITE_BUSY on lock upgrade.
pub async fn begin_write(
    pool: &SqlitePool,
) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
