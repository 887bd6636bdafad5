pub mod interaction;
pub mod player;
pub mod question;

pub use interaction::{
    CreateInteractionRequest, Interaction, InteractionResult, InteractionWithQuestion, Score,
};
pub use player::{CreatePlayerRequest, Gender, Player, PlayerStats, UpdatePlayerRequest};
pub use question::{Question, QuestionFilter};
