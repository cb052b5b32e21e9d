use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque ID types for type safety
pub type GameId = String;
pub type PlayerIndex = usize;
pub type Points = i64;

/// Number of catalog categories placed on the board per stage
pub const CATEGORIES_PER_STAGE: usize = 4;

/// Chance that an opened question hides its prompt until a player commits
pub const SURPRISE_PROBABILITY: f64 = 0.15;

/// Wrong answers allowed on one question before the answer is shown
pub const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Setup,
    Playing,
    Finished,
}

/// Lifecycle of a single opened question.
///
/// `Closed` means no question is open. Opening a question enters
/// `PlayerSelecting` directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnPhase {
    #[default]
    Closed,
    PlayerSelecting,
    Answering,
    Resolved,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub title: &'static str,
    pub file: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Stage {
    pub name: &'static str,
    pub multipliers: &'static [Points],
}

impl Stage {
    /// Difficulty level of questions asked in the stage at `index`
    pub fn level(index: usize) -> u32 {
        index as u32 + 1
    }
}

pub const CATEGORIES: &[Category] = &[
    Category { id: "animals", title: "Animals", file: "animals.json" },
    Category { id: "blog", title: "Bloggers", file: "blog.json" },
    Category { id: "books", title: "Literature", file: "books.json" },
    Category { id: "cars", title: "Cars", file: "cars.json" },
    Category { id: "eng", title: "English", file: "eng.json" },
    Category { id: "logic", title: "Logic & Riddles", file: "logic.json" },
    Category { id: "math", title: "Mathematics", file: "math.json" },
    Category { id: "music", title: "Music", file: "music.json" },
    Category { id: "space", title: "Space", file: "space.json" },
    Category { id: "words", title: "Russian Language", file: "words.json" },
    Category { id: "world", title: "World Around Us", file: "world.json" },
    Category { id: "color", title: "Colors & Shapes", file: "color.json" },
];

pub const STAGES: &[Stage] = &[
    Stage { name: "Stage 1", multipliers: &[100, 200, 300, 400, 500] },
    Stage { name: "Stage 2", multipliers: &[200, 400, 600, 800, 1000] },
    Stage { name: "Stage 3", multipliers: &[300, 600, 900, 1200, 1500] },
];

/// One record of a category data file: `{q, a, level, img?}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    #[serde(rename = "q")]
    pub prompt: String,
    #[serde(rename = "a")]
    pub answer: String,
    pub level: u32,
    #[serde(rename = "img", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub score: Points,
}

/// A board cell: (stage, category column within the stage, row within the column)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub stage: usize,
    pub category: usize,
    pub cell: usize,
}

impl CellId {
    pub fn new(stage: usize, category: usize, cell: usize) -> Self {
        Self {
            stage,
            category,
            cell,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.stage, self.category, self.cell)
    }
}

/// The question behind an opened cell, alive until the turn closes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveQuestion {
    pub cell: CellId,
    pub category: String,
    pub points: Points,
    pub prompt: String,
    pub answer: String,
    pub image: Option<String>,
    /// "Cat in the bag": prompt withheld until the first player commits
    pub surprise: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TurnState {
    pub phase: TurnPhase,
    pub attempts: u32,
    pub blocked: BTreeSet<PlayerIndex>,
    pub answering: Option<PlayerIndex>,
    pub prompt_revealed: bool,
    pub host_answer_visible: bool,
}

impl TurnState {
    /// Fresh turn for a just-opened question
    pub fn opened(surprise: bool) -> Self {
        Self {
            phase: TurnPhase::PlayerSelecting,
            prompt_revealed: !surprise,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_fills_every_stage() {
        assert_eq!(CATEGORIES.len(), STAGES.len() * CATEGORIES_PER_STAGE);
        let ids: HashSet<_> = CATEGORIES.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CATEGORIES.len());
    }

    #[test]
    fn test_stage_levels_are_one_based() {
        assert_eq!(Stage::level(0), 1);
        assert_eq!(Stage::level(2), 3);
    }

    #[test]
    fn test_question_wire_format() {
        let q: Question =
            serde_json::from_str(r#"{"q": "2+2?", "a": "4", "level": 1}"#).unwrap();
        assert_eq!(q.prompt, "2+2?");
        assert_eq!(q.answer, "4");
        assert!(q.image.is_none());

        let q: Question =
            serde_json::from_str(r#"{"q": "Who?", "a": "Cat", "level": 2, "img": "cat.png"}"#)
                .unwrap();
        assert_eq!(q.image.as_deref(), Some("cat.png"));
    }

    #[test]
    fn test_cell_id_display() {
        assert_eq!(CellId::new(1, 2, 3).to_string(), "1-2-3");
    }

    #[test]
    fn test_opened_turn_withholds_surprise_prompt() {
        let turn = TurnState::opened(true);
        assert_eq!(turn.phase, TurnPhase::PlayerSelecting);
        assert!(!turn.prompt_revealed);
        assert!(TurnState::opened(false).prompt_revealed);
    }
}
