use serde::{Deserialize, Serialize};

/// Valid values for `correct_answer` and `selected_answer`
pub const ANSWER_OPTIONS: [&str; 4] = ["a", "b", "c", "d"];

pub const DEFAULT_DIFFICULTY: &str = "easy";
pub const DEFAULT_CATEGORY: &str = "general";

/// Multiple-choice quiz item from the "questions" table. Read-only after seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
    pub difficulty: String,
    pub reward: i64,
    pub category: String,
}

/// Query parameters for question lookups. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionFilter {
    pub difficulty: Option<String>,
    pub category: Option<String>,
}

impl QuestionFilter {
    pub fn difficulty(&self) -> Option<&str> {
        non_empty(self.difficulty.as_deref())
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    /// Difficulty for a random pick, which always filters on both axes.
    pub fn difficulty_or_default(&self) -> &str {
        self.difficulty().unwrap_or(DEFAULT_DIFFICULTY)
    }

    pub fn category_or_default(&self) -> &str {
        self.category().unwrap_or(DEFAULT_CATEGORY)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_for_random_pick() {
        let filter = QuestionFilter::default();
        assert_eq!(filter.difficulty_or_default(), "easy");
        assert_eq!(filter.category_or_default(), "general");

        let filter = QuestionFilter {
            difficulty: Some("medium".to_string()),
            category: Some(String::new()),
        };
        assert_eq!(filter.difficulty_or_default(), "medium");
        assert_eq!(filter.category_or_default(), "general");
        assert_eq!(filter.category(), None);
    }
}
