use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

pub const DEFAULT_MONEY: i64 = 100;
pub const DEFAULT_LEVEL: i64 = 1;
pub const DEFAULT_EXPERIENCE: i64 = 0;
pub const DEFAULT_SCENARIO: &str = "town_center";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player profile and progress, stored in the "players" table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    /// May go negative: wrong answers are never floored
    pub money: i64,
    pub level: i64,
    pub experience: i64,
    pub current_scenario: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    pub fn new(id: String, name: String, gender: Gender, now: DateTime<Utc>) -> Self {
        Player {
            id,
            name,
            gender,
            money: DEFAULT_MONEY,
            level: DEFAULT_LEVEL,
            experience: DEFAULT_EXPERIENCE,
            current_scenario: DEFAULT_SCENARIO.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlayerRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
}

impl CreatePlayerRequest {
    /// Gender after validation; `None` when `validate()` was skipped and the value is bad.
    pub fn parsed_gender(&self) -> Option<Gender> {
        self.gender.parse().ok()
    }
}

/// Partial update: every present field replaces the stored one, absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePlayerRequest {
    pub money: Option<i64>,

    #[validate(range(min = 1, message = "Level must be at least 1"))]
    pub level: Option<i64>,

    pub experience: Option<i64>,

    #[validate(
        length(min = 1, max = 100, message = "Scenario must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub current_scenario: Option<String>,
}

impl UpdatePlayerRequest {
    /// Coalesces the patch over a stored record.
    pub fn apply_to(self, player: &mut Player) {
        if let Some(money) = self.money {
            player.money = money;
        }
        if let Some(level) = self.level {
            player.level = level;
        }
        if let Some(experience) = self.experience {
            player.experience = experience;
        }
        if let Some(scenario) = self.current_scenario {
            player.current_scenario = scenario;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_interactions: i64,
    pub correct_answers: i64,
    /// Sum of positive money changes only; penalties are not subtracted
    pub total_money_earned: i64,
    pub accuracy_percentage: f64,
}

impl PlayerStats {
    pub fn from_counts(total_interactions: i64, correct_answers: i64, total_money_earned: i64) -> Self {
        let accuracy_percentage = if total_interactions > 0 {
            let raw = correct_answers as f64 * 100.0 / total_interactions as f64;
            (raw * 100.0).round() / 100.0
        } else {
            0.0
        };

        PlayerStats {
            total_interactions,
            correct_answers,
            total_money_earned,
            accuracy_percentage,
        }
    }
}

fn validate_gender(value: &str) -> Result<(), ValidationError> {
    value.parse::<Gender>().map(|_| ()).map_err(|_| {
        ValidationError::new("gender").with_message("Gender must be one of: male, female".into())
    })
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Value must not be blank".into()));
    }
    Ok(())
}
