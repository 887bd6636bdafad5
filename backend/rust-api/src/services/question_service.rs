use crate::metrics::track_db_operation;
use crate::models::{Question, QuestionFilter};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{ServiceError, ServiceResult};

const QUESTION_COLUMNS: &str =
    "id, question, option_a, option_b, option_c, option_d, correct_answer, difficulty, reward, category";

pub struct QuestionService {
    db: SqlitePool,
}

impl QuestionService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Uniformly picks one question matching both filters exactly.
    /// Missing filters fall back to `easy` / `general`.
    pub async fn random_question(&self, filter: &QuestionFilter) -> ServiceResult<Question> {
        let difficulty = filter.difficulty_or_default();
        let category = filter.category_or_default();

        let query = format!(
            "SELECT {} FROM questions WHERE difficulty = ? AND category = ? ORDER BY RANDOM() LIMIT 1",
            QUESTION_COLUMNS
        );

        let question = track_db_operation(
            "select",
            "questions",
            sqlx::query_as::<_, Question>(&query)
                .bind(difficulty)
                .bind(category)
                .fetch_optional(&self.db),
        )
        .await?;

        question.ok_or_else(|| {
            tracing::debug!(
                "No question for difficulty={}, category={}",
                difficulty,
                category
            );
            ServiceError::not_found("No questions found for specified criteria")
        })
    }

    /// All questions matching the given filters, ordered by difficulty then category.
    pub async fn list_questions(&self, filter: &QuestionFilter) -> ServiceResult<Vec<Question>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM questions", QUESTION_COLUMNS));

        let mut has_condition = false;
        if let Some(difficulty) = filter.difficulty() {
            builder.push(" WHERE difficulty = ").push_bind(difficulty.to_string());
            has_condition = true;
        }
        if let Some(category) = filter.category() {
            builder
                .push(if has_condition { " AND " } else { " WHERE " })
                .push("category = ")
                .push_bind(category.to_string());
        }
        builder.push(" ORDER BY difficulty, category, id");

        let questions = track_db_operation(
            "select",
            "questions",
            builder.build_query_as::<Question>().fetch_all(&self.db),
        )
        .await?;

        Ok(questions)
    }

    pub async fn get_question(&self, question_id: &str) -> ServiceResult<Question> {
        let query = format!("SELECT {} FROM questions WHERE id = ?", QUESTION_COLUMNS);

        track_db_operation(
            "select",
            "questions",
            sqlx::query_as::<_, Question>(&query)
                .bind(question_id)
                .fetch_optional(&self.db),
        )
        .await?
        .ok_or_else(|| ServiceError::not_found("Question not found"))
    }
}
