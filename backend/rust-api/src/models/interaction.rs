use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::question::ANSWER_OPTIONS;

pub const CORRECT_EXPERIENCE_GAIN: i64 = 10;
pub const INCORRECT_EXPERIENCE_GAIN: i64 = 5;

/// One answer attempt, stored in the "interactions" table. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Interaction {
    pub id: String,
    pub player_id: String,
    pub question_id: String,
    pub selected_answer: String,
    pub is_correct: bool,
    pub money_change: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInteractionRequest {
    #[validate(length(min = 1, message = "player_id is required"))]
    pub player_id: String,

    #[validate(length(min = 1, message = "question_id is required"))]
    pub question_id: String,

    #[validate(custom(function = "validate_answer_option"))]
    pub selected_answer: String,
}

/// Outcome of scoring one answer against a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub is_correct: bool,
    pub money_change: i64,
    pub experience_gain: i64,
}

impl Score {
    /// Correct answers earn the full reward, wrong ones lose half of it
    /// (integer division, truncating toward zero). Experience is flat.
    pub fn compute(selected_answer: &str, correct_answer: &str, reward: i64) -> Self {
        let is_correct = selected_answer == correct_answer;

        if is_correct {
            Score {
                is_correct,
                money_change: reward,
                experience_gain: CORRECT_EXPERIENCE_GAIN,
            }
        } else {
            Score {
                is_correct,
                money_change: -(reward / 2),
                experience_gain: INCORRECT_EXPERIENCE_GAIN,
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InteractionResult {
    pub interaction: Interaction,
    pub is_correct: bool,
    pub money_change: i64,
    pub experience_gain: i64,
    pub correct_answer: String,
}

/// History row: an interaction joined with the question it answered.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InteractionWithQuestion {
    pub id: String,
    pub player_id: String,
    pub question_id: String,
    pub selected_answer: String,
    pub is_correct: bool,
    pub money_change: i64,
    pub created_at: DateTime<Utc>,
    pub question_text: String,
    pub correct_answer: String,
    pub difficulty: String,
    pub category: String,
}

fn validate_answer_option(value: &str) -> Result<(), ValidationError> {
    if ANSWER_OPTIONS.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("answer_option")
            .with_message("selected_answer must be one of: a, b, c, d".into()))
    }
}
