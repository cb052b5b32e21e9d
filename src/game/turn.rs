use rand::Rng;

use super::score::{score_delta, AnswerOutcome};
use super::{GameError, GameState};
use crate::questions::select_by_level;
use crate::types::*;

/// Result of trying to open a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// The category has no questions at this stage's level; nothing changed
    NoQuestions,
}

/// Where the turn ended up after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Wrong answer, other players may still try
    AwaitingPlayer,
    /// No attempts left; the answer is shown and the cell is used
    Resolved,
    /// Question closed; the board is back in front of the players
    Closed { stage_complete: bool },
}

impl GameState {
    /// Category in column `index` of the current board
    pub fn stage_category(&self, index: usize) -> Result<Category, GameError> {
        self.ensure_playing()?;
        self.stage_categories
            .get(index)
            .copied()
            .ok_or(GameError::UnknownCategory(index))
    }

    /// Open the cell at (`category_index`, `cell_index`) of the current stage.
    ///
    /// `questions` is the category's full question set. The question shown is
    /// `eligible[cell_index % eligible.len()]`, so a short pool wraps around.
    pub fn open_question(
        &mut self,
        category_index: usize,
        cell_index: usize,
        questions: &[Question],
    ) -> Result<OpenOutcome, GameError> {
        let category = self.stage_category(category_index)?;
        if self.current_question.is_some() {
            return Err(GameError::QuestionAlreadyOpen);
        }

        let points = self
            .current_stage()
            .and_then(|stage| stage.multipliers.get(cell_index))
            .copied()
            .ok_or(GameError::UnknownCell(cell_index))?;

        let cell = CellId::new(self.stage, category_index, cell_index);
        if self.used_cells.contains(&cell) {
            return Err(GameError::CellUsed(cell));
        }

        let level = self.level();
        let eligible = select_by_level(questions, level, &mut self.rng);
        if eligible.is_empty() {
            tracing::warn!(
                "No questions found for level {} in category {}",
                level,
                category.id
            );
            return Ok(OpenOutcome::NoQuestions);
        }

        let question = &eligible[cell_index % eligible.len()];
        let surprise = self.rng.random_bool(SURPRISE_PROBABILITY);

        self.current_question = Some(ActiveQuestion {
            cell,
            category: category.title.to_string(),
            points,
            prompt: question.prompt.clone(),
            answer: question.answer.clone(),
            image: question.image.clone(),
            surprise,
        });
        self.turn = TurnState::opened(surprise);
        self.touch();

        tracing::info!(
            "Opened cell {} ({} for {}){}",
            cell,
            category.id,
            points,
            if surprise { " as a surprise" } else { "" }
        );
        Ok(OpenOutcome::Opened)
    }

    /// Hand the open question to a player
    pub fn select_player(&mut self, index: PlayerIndex) -> Result<(), GameError> {
        self.expect_turn_phase(TurnPhase::PlayerSelecting, "select a player")?;
        if index >= self.players.len() {
            return Err(GameError::UnknownPlayer(index));
        }
        if self.is_blocked(index) {
            return Err(GameError::PlayerBlocked(index));
        }

        self.turn.answering = Some(index);
        self.turn.phase = TurnPhase::Answering;

        let surprise = self
            .current_question
            .as_ref()
            .is_some_and(|q| q.surprise);
        if surprise && self.turn.attempts == 0 {
            self.turn.prompt_revealed = true;
        }

        self.touch();
        tracing::info!("Player {} is answering", index);
        Ok(())
    }

    /// Award the points and close the question
    pub fn mark_correct(&mut self) -> Result<TurnOutcome, GameError> {
        let (player, points) = self.answering_player("mark an answer correct")?;
        self.players[player].score += score_delta(AnswerOutcome::Correct, points);
        tracing::info!("Player {} answered correctly (+{})", player, points);
        Ok(self.finish_turn())
    }

    /// Deduct the points and block the player for this question.
    ///
    /// The turn resolves once `MAX_ATTEMPTS` wrong answers were given or every
    /// player is blocked, whichever comes first.
    pub fn mark_wrong(&mut self) -> Result<TurnOutcome, GameError> {
        let (player, points) = self.answering_player("mark an answer wrong")?;
        self.players[player].score += score_delta(AnswerOutcome::Wrong, points);

        self.turn.blocked.insert(player);
        self.turn.attempts += 1;
        self.turn.answering = None;
        tracing::info!(
            "Player {} answered wrong (-{}), attempt {}",
            player,
            points,
            self.turn.attempts
        );

        let outcome =
            if self.turn.attempts >= MAX_ATTEMPTS || self.turn.blocked.len() >= self.players.len() {
                self.turn.phase = TurnPhase::Resolved;
                if let Some(question) = &self.current_question {
                    self.used_cells.insert(question.cell);
                }
                TurnOutcome::Resolved
            } else {
                self.turn.phase = TurnPhase::PlayerSelecting;
                TurnOutcome::AwaitingPlayer
            };

        self.touch();
        Ok(outcome)
    }

    /// Close the question without scoring anyone
    pub fn skip(&mut self) -> Result<TurnOutcome, GameError> {
        if self.current_question.is_none() {
            return Err(GameError::NoOpenQuestion);
        }
        tracing::info!("Question skipped");
        Ok(self.finish_turn())
    }

    /// Close the open question, whatever state its turn is in
    pub fn close(&mut self) -> Result<TurnOutcome, GameError> {
        if self.current_question.is_none() {
            return Err(GameError::NoOpenQuestion);
        }
        Ok(self.finish_turn())
    }

    /// Show or hide the answer on the host screen; returns the new visibility
    pub fn toggle_host_answer(&mut self) -> Result<bool, GameError> {
        if self.current_question.is_none() {
            return Err(GameError::NoOpenQuestion);
        }
        self.turn.host_answer_visible = !self.turn.host_answer_visible;
        self.touch();
        Ok(self.turn.host_answer_visible)
    }

    fn expect_turn_phase(&self, phase: TurnPhase, action: &'static str) -> Result<(), GameError> {
        if self.current_question.is_none() {
            return Err(GameError::NoOpenQuestion);
        }
        if self.turn.phase != phase {
            return Err(GameError::InvalidTurnPhase {
                action,
                phase: self.turn.phase,
            });
        }
        Ok(())
    }

    fn answering_player(&self, action: &'static str) -> Result<(PlayerIndex, Points), GameError> {
        self.expect_turn_phase(TurnPhase::Answering, action)?;
        match (self.turn.answering, &self.current_question) {
            (Some(player), Some(question)) => Ok((player, question.points)),
            _ => Err(GameError::InvalidTurnPhase {
                action,
                phase: self.turn.phase,
            }),
        }
    }

    /// Mark the cell used, drop the question and report stage completion
    fn finish_turn(&mut self) -> TurnOutcome {
        if let Some(question) = self.current_question.take() {
            self.used_cells.insert(question.cell);
        }
        self.turn = TurnState::default();
        self.touch();

        TurnOutcome::Closed {
            stage_complete: self.is_stage_complete(self.stage),
        }
    }
}
