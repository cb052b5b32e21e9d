//! Read-only view of the game that the presentation layer renders.
//!
//! The snapshot never leaks what the room should not see yet: a surprise
//! question's prompt stays hidden until a player commits, and the answer only
//! appears once the turn is resolved or the host chose to show it.

use serde::{Deserialize, Serialize};

use super::{GameState, Standing};
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub game_id: Option<GameId>,
    pub version: u64,
    pub phase: GamePhase,
    pub stage: usize,
    pub stage_name: Option<String>,
    pub level: u32,
    pub board: Vec<BoardColumn>,
    pub players: Vec<PlayerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<TurnView>,
    /// Only filled once the game is finished
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<Standing>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardColumn {
    pub category_id: String,
    pub title: String,
    pub cells: Vec<BoardCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardCell {
    pub cell: CellId,
    pub points: Points,
    pub used: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerView {
    pub index: PlayerIndex,
    pub name: String,
    pub score: Points,
    pub blocked: bool,
    pub answering: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnView {
    pub cell: CellId,
    pub category: String,
    pub points: Points,
    pub phase: TurnPhase,
    pub surprise: bool,
    pub prompt: Option<String>,
    pub image: Option<String>,
    pub answer: Option<String>,
    pub attempts: u32,
    pub blocked: Vec<PlayerIndex>,
    pub answering: Option<PlayerIndex>,
    pub selectable: Vec<PlayerIndex>,
}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_id: self.id.clone(),
            version: self.version,
            phase: self.phase,
            stage: self.stage,
            stage_name: self.current_stage().map(|s| s.name.to_string()),
            level: self.level(),
            board: self.board(),
            players: self.player_views(),
            turn: self.turn_view(),
            results: if self.phase == GamePhase::Finished {
                self.results()
            } else {
                Vec::new()
            },
        }
    }

    fn board(&self) -> Vec<BoardColumn> {
        let Some(stage) = self.current_stage() else {
            return Vec::new();
        };

        self.stage_categories
            .iter()
            .enumerate()
            .map(|(category_index, category)| BoardColumn {
                category_id: category.id.to_string(),
                title: category.title.to_string(),
                cells: stage
                    .multipliers
                    .iter()
                    .enumerate()
                    .map(|(cell_index, points)| {
                        let cell = CellId::new(self.stage, category_index, cell_index);
                        BoardCell {
                            cell,
                            points: *points,
                            used: self.used_cells.contains(&cell),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    fn player_views(&self) -> Vec<PlayerView> {
        self.players
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerView {
                index,
                name: player.name.clone(),
                score: player.score,
                blocked: self.is_blocked(index),
                answering: self.turn.answering == Some(index),
            })
            .collect()
    }

    fn turn_view(&self) -> Option<TurnView> {
        let question = self.current_question.as_ref()?;
        let turn = &self.turn;
        let show_answer = turn.phase == TurnPhase::Resolved || turn.host_answer_visible;

        Some(TurnView {
            cell: question.cell,
            category: question.category.clone(),
            points: question.points,
            phase: turn.phase,
            surprise: question.surprise,
            prompt: turn.prompt_revealed.then(|| question.prompt.clone()),
            image: if turn.prompt_revealed {
                question.image.clone()
            } else {
                None
            },
            answer: show_answer.then(|| question.answer.clone()),
            attempts: turn.attempts,
            blocked: turn.blocked.iter().copied().collect(),
            answering: turn.answering,
            selectable: self.selectable_players(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::StageAdvance;

    fn pool() -> Vec<Question> {
        (0..5)
            .map(|i| Question {
                prompt: format!("Q{}", i),
                answer: format!("A{}", i),
                level: 1,
                image: Some(format!("img{}.png", i)),
            })
            .collect()
    }

    #[test]
    fn test_setup_snapshot_is_empty() {
        let game = GameState::with_seed(3);
        let snapshot = game.snapshot();

        assert_eq!(snapshot.phase, GamePhase::Setup);
        assert!(snapshot.board.is_empty());
        assert!(snapshot.players.is_empty());
        assert!(snapshot.turn.is_none());
        assert!(snapshot.results.is_empty());
    }

    #[test]
    fn test_board_marks_used_cells() {
        let mut game = GameState::with_seed(3);
        game.start_game(&["Alice", "Bob"]).unwrap();
        game.open_question(2, 3, &pool()).unwrap();
        game.skip().unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.stage_name.as_deref(), Some("Stage 1"));
        assert_eq!(snapshot.board.len(), 4);
        for column in &snapshot.board {
            assert_eq!(column.cells.len(), 5);
        }

        let cell = &snapshot.board[2].cells[3];
        assert!(cell.used);
        assert_eq!(cell.points, 400);
        let used = snapshot
            .board
            .iter()
            .flat_map(|c| &c.cells)
            .filter(|c| c.used)
            .count();
        assert_eq!(used, 1);
    }

    #[test]
    fn test_answer_hidden_until_resolved() {
        let mut game = GameState::with_seed(3);
        game.start_game(&["Alice"]).unwrap();
        game.open_question(0, 0, &pool()).unwrap();
        game.select_player(0).unwrap();

        let turn = game.snapshot().turn.unwrap();
        assert!(turn.answer.is_none());
        assert!(turn.prompt.is_some());
        assert_eq!(turn.answering, Some(0));

        game.mark_wrong().unwrap();
        let snapshot = game.snapshot();
        let turn = snapshot.turn.unwrap();
        assert_eq!(turn.phase, TurnPhase::Resolved);
        assert!(turn.answer.is_some());
        assert_eq!(turn.blocked, vec![0]);
        assert!(snapshot.players[0].blocked);
        assert_eq!(snapshot.players[0].score, -100);
    }

    #[test]
    fn test_host_answer_toggle_shows_answer() {
        let mut game = GameState::with_seed(3);
        game.start_game(&["Alice", "Bob"]).unwrap();
        game.open_question(1, 0, &pool()).unwrap();

        game.toggle_host_answer().unwrap();
        assert!(game.snapshot().turn.unwrap().answer.is_some());
    }

    #[test]
    fn test_surprise_hides_prompt_and_image() {
        let mut game = (0..500u64)
            .find_map(|seed| {
                let mut game = GameState::with_seed(seed);
                game.start_game(&["Alice", "Bob"]).unwrap();
                game.open_question(0, 0, &pool()).unwrap();
                game.current_question()
                    .is_some_and(|q| q.surprise)
                    .then_some(game)
            })
            .expect("some seed yields a surprise question");

        let turn = game.snapshot().turn.unwrap();
        assert!(turn.surprise);
        assert!(turn.prompt.is_none());
        assert!(turn.image.is_none());

        game.select_player(0).unwrap();
        let turn = game.snapshot().turn.unwrap();
        assert!(turn.prompt.is_some());
        assert!(turn.image.is_some());
    }

    #[test]
    fn test_finished_snapshot_carries_results() {
        let mut game = GameState::with_seed(3);
        game.start_game(&["Alice", "Bob"]).unwrap();
        while game.advance_stage().unwrap() != StageAdvance::Finished {}

        let snapshot = game.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Finished);
        assert_eq!(snapshot.results.len(), 2);
        assert_eq!(snapshot.results[0].name, "Alice");
    }
}
