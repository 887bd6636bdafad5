use crate::db;
use crate::metrics::{track_db_operation, PLAYERS_CREATED_TOTAL};
use crate::models::{CreatePlayerRequest, Player, PlayerStats, UpdatePlayerRequest};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::{ServiceError, ServiceResult};

const PLAYER_COLUMNS: &str =
    "id, name, gender, money, level, experience, current_scenario, created_at, updated_at";

pub struct PlayerService {
    db: SqlitePool,
}

impl PlayerService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Creates a player with starting money, level, experience and scenario.
    /// The request is expected to be validated already; the gender is re-checked here.
    pub async fn create_player(&self, req: CreatePlayerRequest) -> ServiceResult<Player> {
        let gender = req
            .parsed_gender()
            .ok_or_else(|| ServiceError::validation("Gender must be one of: male, female"))?;

        let player = Player::new(Uuid::new_v4().to_string(), req.name, gender, Utc::now());

        track_db_operation(
            "insert",
            "players",
            sqlx::query(
                r#"INSERT INTO players
                    (id, name, gender, money, level, experience, current_scenario, created_at, updated_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            )
            .bind(&player.id)
            .bind(&player.name)
            .bind(player.gender)
            .bind(player.money)
            .bind(player.level)
            .bind(player.experience)
            .bind(&player.current_scenario)
            .bind(player.created_at)
            .bind(player.updated_at)
            .execute(&self.db),
        )
        .await?;

        PLAYERS_CREATED_TOTAL.inc();
        tracing::info!("Player created: {} ({})", player.id, player.gender);

        Ok(player)
    }

    pub async fn get_player(&self, player_id: &str) -> ServiceResult<Player> {
        let mut conn = self.db.acquire().await?;
        fetch_player(&mut conn, player_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Player not found"))
    }

    /// Applies a partial update. The stored record is read and written back in one
    /// transaction so a concurrent writer cannot interleave between the two.
    pub async fn update_player(
        &self,
        player_id: &str,
        patch: UpdatePlayerRequest,
    ) -> ServiceResult<Player> {
        let mut tx = db::begin_write(&self.db).await?;

        let mut player = fetch_player(&mut tx, player_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Player not found"))?;

        patch.apply_to(&mut player);
        player.updated_at = Utc::now();

        track_db_operation(
            "update",
            "players",
            sqlx::query(
                r#"UPDATE players
                   SET money = ?, level = ?, experience = ?, current_scenario = ?, updated_at = ?
                   WHERE id = ?"#,
            )
            .bind(player.money)
            .bind(player.level)
            .bind(player.experience)
            .bind(&player.current_scenario)
            .bind(player.updated_at)
            .bind(&player.id)
            .execute(&mut *tx),
        )
        .await?;

        tx.commit().await?;

        tracing::info!("Player updated: {}", player.id);

        Ok(player)
    }

    pub async fn player_stats(&self, player_id: &str) -> ServiceResult<PlayerStats> {
        let mut conn = self.db.acquire().await?;

        if fetch_player(&mut conn, player_id).await?.is_none() {
            return Err(ServiceError::not_found("Player not found"));
        }

        let (total, correct, earned): (i64, i64, i64) = track_db_operation(
            "aggregate",
            "interactions",
            sqlx::query_as(
                r#"SELECT
                       COUNT(*),
                       COALESCE(SUM(CASE WHEN is_correct THEN 1 ELSE 0 END), 0),
                       COALESCE(SUM(CASE WHEN money_change > 0 THEN money_change ELSE 0 END), 0)
                   FROM interactions
                   WHERE player_id = ?"#,
            )
            .bind(player_id)
            .fetch_one(&mut *conn),
        )
        .await?;

        Ok(PlayerStats::from_counts(total, correct, earned))
    }
}

pub(crate) async fn fetch_player(
    conn: &mut SqliteConnection,
    player_id: &str,
) -> Result<Option<Player>, sqlx::Error> {
    let query = format!("SELECT {} FROM players WHERE id = ?", PLAYER_COLUMNS);

    track_db_operation(
        "select",
        "players",
        sqlx::query_as::<_, Player>(&query)
            .bind(player_id)
            .fetch_optional(&mut *conn),
    )
    .await
}
