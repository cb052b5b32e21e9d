use super::player::build_roster;
use super::{GameError, GameState};
use crate::shuffle::shuffled;
use crate::types::*;

/// What happened when the game moved past a completed stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAdvance {
    NextStage(usize),
    Finished,
}

impl GameState {
    /// Start a new game with the given player names.
    ///
    /// Blank names are ignored; if none remain the game does not start and
    /// nothing changes. The catalog is shuffled once here, and stage `k` takes
    /// the categories at shuffled positions `[4k, 4k + 4)`.
    pub fn start_game<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), GameError> {
        let players = build_roster(names);
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        self.id = Some(ulid::Ulid::new().to_string());
        self.players = players;
        self.used_cells.clear();
        self.current_question = None;
        self.shuffled_categories = shuffled(CATEGORIES, &mut self.rng);
        self.phase = GamePhase::Playing;
        self.load_stage(0);
        self.touch();

        tracing::info!(
            "Game {} started with {} players",
            self.id.as_deref().unwrap_or_default(),
            self.players.len()
        );
        Ok(())
    }

    /// Put the stage's categories on the board and reset the turn.
    ///
    /// Used cells are kept: cell ids carry the stage index, so stages never
    /// collide.
    pub fn load_stage(&mut self, stage: usize) {
        self.stage = stage;
        self.stage_categories = self.categories_for_stage(stage);
        self.turn = TurnState::default();
        tracing::info!(
            "Loaded stage {} with categories {:?}",
            stage,
            self.stage_categories.iter().map(|c| c.id).collect::<Vec<_>>()
        );
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn current_stage(&self) -> Option<&'static Stage> {
        STAGES.get(self.stage)
    }

    /// Difficulty level asked in the current stage
    pub fn level(&self) -> u32 {
        Stage::level(self.stage)
    }

    pub fn stage_categories(&self) -> &[Category] {
        &self.stage_categories
    }

    pub fn is_last_stage(&self) -> bool {
        self.stage + 1 >= STAGES.len()
    }

    fn categories_for_stage(&self, stage: usize) -> Vec<Category> {
        self.shuffled_categories
            .iter()
            .skip(stage * CATEGORIES_PER_STAGE)
            .take(CATEGORIES_PER_STAGE)
            .copied()
            .collect()
    }

    /// Every cell id on the board of `stage`
    pub fn stage_cells(&self, stage: usize) -> Vec<CellId> {
        let Some(plan) = STAGES.get(stage) else {
            return Vec::new();
        };
        let columns = self.categories_for_stage(stage).len();

        (0..columns)
            .flat_map(|category| {
                (0..plan.multipliers.len()).map(move |cell| CellId::new(stage, category, cell))
            })
            .collect()
    }

    /// Number of used cells belonging to `stage`
    pub fn used_in_stage(&self, stage: usize) -> usize {
        self.used_cells.iter().filter(|c| c.stage == stage).count()
    }

    /// True iff every cell of the stage has been used
    pub fn is_stage_complete(&self, stage: usize) -> bool {
        if stage >= STAGES.len() {
            return false;
        }
        self.stage_cells(stage)
            .iter()
            .all(|cell| self.used_cells.contains(cell))
    }

    /// Move to the next stage, or finish the game after the last one
    pub fn advance_stage(&mut self) -> Result<StageAdvance, GameError> {
        self.ensure_playing()?;
        if self.current_question.is_some() {
            return Err(GameError::QuestionAlreadyOpen);
        }

        let advance = if self.is_last_stage() {
            self.phase = GamePhase::Finished;
            tracing::info!("Game finished after stage {}", self.stage);
            StageAdvance::Finished
        } else {
            let next = self.stage + 1;
            self.load_stage(next);
            StageAdvance::NextStage(next)
        };

        self.touch();
        Ok(advance)
    }

    /// Back to the start screen. Scores are discarded.
    pub fn restart(&mut self) {
        self.id = None;
        self.phase = GamePhase::Setup;
        self.players.clear();
        self.stage = 0;
        self.shuffled_categories.clear();
        self.stage_categories.clear();
        self.used_cells.clear();
        self.current_question = None;
        self.turn = TurnState::default();
        self.touch();
        tracing::info!("Game reset");
    }
}
