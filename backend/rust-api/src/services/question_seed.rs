use crate::models::Question;
use sqlx::SqlitePool;

struct SeedQuestion {
    id: &'static str,
    question: &'static str,
    options: [&'static str; 4],
    correct_answer: &'static str,
    difficulty: &'static str,
    category: &'static str,
    reward: i64,
}

impl SeedQuestion {
    fn to_question(&self) -> Question {
        let [a, b, c, d] = self.options;
        Question {
            id: self.id.to_string(),
            question: self.question.to_string(),
            option_a: a.to_string(),
            option_b: b.to_string(),
            option_c: c.to_string(),
            option_d: d.to_string(),
            correct_answer: self.correct_answer.to_string(),
            difficulty: self.difficulty.to_string(),
            reward: self.reward,
            category: self.category.to_string(),
        }
    }
}

const SEED_QUESTIONS: [SeedQuestion; 5] = [
    SeedQuestion {
        id: "q1",
        question: "What is the past tense of 'go'?",
        options: ["goed", "went", "gone", "going"],
        correct_answer: "b",
        difficulty: "easy",
        category: "grammar",
        reward: 10,
    },
    SeedQuestion {
        id: "q2",
        question: "Which word means 'happy'?",
        options: ["sad", "angry", "joyful", "tired"],
        correct_answer: "c",
        difficulty: "easy",
        category: "vocabulary",
        reward: 10,
    },
    SeedQuestion {
        id: "q3",
        question: "Complete: I ___ to the store yesterday.",
        options: ["go", "goes", "went", "going"],
        correct_answer: "c",
        difficulty: "easy",
        category: "grammar",
        reward: 10,
    },
    SeedQuestion {
        id: "q4",
        question: "What is the plural of 'child'?",
        options: ["childs", "children", "childes", "child"],
        correct_answer: "b",
        difficulty: "medium",
        category: "grammar",
        reward: 15,
    },
    SeedQuestion {
        id: "q5",
        question: "Which word is a synonym for 'big'?",
        options: ["small", "tiny", "large", "little"],
        correct_answer: "c",
        difficulty: "easy",
        category: "vocabulary",
        reward: 10,
    },
];

/// The built-in catalog inserted on first start.
pub fn seed_catalog() -> Vec<Question> {
    SEED_QUESTIONS.iter().map(SeedQuestion::to_question).collect()
}

/// Inserts the built-in questions when the table is empty. Returns how many
/// rows were inserted; zero when the catalog already had data.
pub async fn seed_questions(db: &SqlitePool) -> Result<u64, sqlx::Error> {
    let mut tx = crate::db::begin_write(db).await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
        .fetch_one(&mut *tx)
        .await?;

    if count > 0 {
        tracing::debug!("Questions table has {} rows, seed skipped", count);
        return Ok(0);
    }

    let mut inserted = 0;
    for question in seed_catalog() {
        let result = sqlx::query(
            r#"INSERT OR IGNORE INTO questions
                (id, question, option_a, option_b, option_c, option_d, correct_answer, difficulty, category, reward)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&question.id)
        .bind(&question.question)
        .bind(&question.option_a)
        .bind(&question.option_b)
        .bind(&question.option_c)
        .bind(&question.option_d)
        .bind(&question.correct_answer)
        .bind(&question.difficulty)
        .bind(&question.category)
        .bind(question.reward)
        .execute(&mut *tx)
        .await?;

        inserted += result.rows_affected();
    }

    tx.commit().await?;

    Ok(inserted)
}
