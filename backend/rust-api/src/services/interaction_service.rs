use crate::db;
use crate::metrics::{track_db_operation, INTERACTIONS_RECORDED_TOTAL};
use crate::models::{
    CreateInteractionRequest, Interaction, InteractionResult, InteractionWithQuestion, Score,
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::player_service::fetch_player;
use super::{ServiceError, ServiceResult};

/// Maximum number of rows returned by the history endpoint
pub const HISTORY_LIMIT: i64 = 50;

pub struct InteractionService {
    db: SqlitePool,
}

impl InteractionService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Scores an answer, stores the interaction and applies money/experience to the player.
    ///
    /// Everything runs in one transaction: the interaction row and the balance change
    /// are committed together or not at all. The balance is changed with an in-statement
    /// increment so two answers from the same player cannot overwrite each other.
    pub async fn record_interaction(
        &self,
        req: CreateInteractionRequest,
    ) -> ServiceResult<InteractionResult> {
        let mut tx = db::begin_write(&self.db).await?;

        let question: Option<(String, i64)> = track_db_operation(
            "select",
            "questions",
            sqlx::query_as("SELECT correct_answer, reward FROM questions WHERE id = ?")
                .bind(&req.question_id)
                .fetch_optional(&mut *tx),
        )
        .await?;
        let (correct_answer, reward) =
            question.ok_or_else(|| ServiceError::not_found("Question not found"))?;

        if fetch_player(&mut tx, &req.player_id).await?.is_none() {
            return Err(ServiceError::not_found("Player not found"));
        }

        let score = Score::compute(&req.selected_answer, &correct_answer, reward);
        let now = Utc::now();

        let interaction = Interaction {
            id: Uuid::new_v4().to_string(),
            player_id: req.player_id,
            question_id: req.question_id,
            selected_answer: req.selected_answer,
            is_correct: score.is_correct,
            money_change: score.money_change,
            created_at: now,
        };

        track_db_operation(
            "insert",
            "interactions",
            sqlx::query(
                r#"INSERT INTO interactions
                    (id, player_id, question_id, selected_answer, is_correct, money_change, created_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?)"#,
            )
            .bind(&interaction.id)
            .bind(&interaction.player_id)
            .bind(&interaction.question_id)
            .bind(&interaction.selected_answer)
            .bind(interaction.is_correct)
            .bind(interaction.money_change)
            .bind(interaction.created_at)
            .execute(&mut *tx),
        )
        .await?;

        track_db_operation(
            "update",
            "players",
            sqlx::query(
                r#"UPDATE players
                   SET money = money + ?, experience = experience + ?, updated_at = ?
                   WHERE id = ?"#,
            )
            .bind(score.money_change)
            .bind(score.experience_gain)
            .bind(now)
            .bind(&interaction.player_id)
            .execute(&mut *tx),
        )
        .await?;

        tx.commit().await?;

        let correct_label = if score.is_correct { "true" } else { "false" };
        INTERACTIONS_RECORDED_TOTAL
            .with_label_values(&[correct_label])
            .inc();

        tracing::info!(
            "Interaction recorded: player={}, question={}, correct={}, money_change={}",
            interaction.player_id,
            interaction.question_id,
            score.is_correct,
            score.money_change
        );

        Ok(InteractionResult {
            interaction,
            is_correct: score.is_correct,
            money_change: score.money_change,
            experience_gain: score.experience_gain,
            correct_answer,
        })
    }

    /// Most recent interactions of a player, newest first, joined with question details.
    /// An unknown player simply has no history.
    pub async fn player_history(
        &self,
        player_id: &str,
    ) -> ServiceResult<Vec<InteractionWithQuestion>> {
        let rows = track_db_operation(
            "select",
            "interactions",
            sqlx::query_as::<_, InteractionWithQuestion>(
                r#"SELECT i.id, i.player_id, i.question_id, i.selected_answer, i.is_correct,
                          i.money_change, i.created_at,
                          q.question AS question_text, q.correct_answer, q.difficulty, q.category
                   FROM interactions i
                   JOIN questions q ON i.question_id = q.id
                   WHERE i.player_id = ?
                   ORDER BY i.created_at DESC, i.rowid DESC
                   LIMIT ?"#,
            )
            .bind(player_id)
            .bind(HISTORY_LIMIT)
            .fetch_all(&self.db),
        )
        .await?;

        Ok(rows)
    }
}
