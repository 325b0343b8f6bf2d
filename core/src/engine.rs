use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Display cap of the timer; past it the win message leaves the time out.
pub const DEFAULT_MAX_SECONDS_ELAPSED: u32 = 999;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Progress of the current game. Replaced as a whole on every new game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSession {
    status: GameStatus,
    revealed_count: CellCount,
    cells_to_reveal: CellCount,
    mines_left: CellCount,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    fn new(board: &Board) -> Self {
        Self {
            status: GameStatus::InProgress,
            revealed_count: 0,
            cells_to_reveal: board.safe_cell_count(),
            mines_left: board.mine_count(),
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cells_to_reveal(&self) -> CellCount {
        self.cells_to_reveal
    }

    pub fn mines_left(&self) -> CellCount {
        self.mines_left
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }
}

/// Runs one game at a time and keeps the collaborators in sync with it.
#[derive(Debug)]
pub struct GameEngine<S = SeededSource> {
    config: GameConfig,
    board: Board,
    session: GameSession,
    source: S,
    collaborators: Collaborators,
    max_seconds_elapsed: u32,
}

impl<S: MineSource> GameEngine<S> {
    /// Builds the engine and starts the first game right away.
    pub fn new(config: GameConfig, mut source: S, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;
        let board = Board::from_config(&config, &mut source)?;
        let session = GameSession::new(&board);

        let mut engine = Self {
            config,
            board,
            session,
            source,
            collaborators,
            max_seconds_elapsed: DEFAULT_MAX_SECONDS_ELAPSED,
        };
        engine.announce_new_game();
        Ok(engine)
    }

    pub fn with_max_seconds_elapsed(mut self, max_seconds_elapsed: u32) -> Self {
        self.max_seconds_elapsed = max_seconds_elapsed;
        self
    }

    /// Replaces the board and session with a fresh game. On error the
    /// current game is left untouched.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        let board = Board::from_config(&config, &mut self.source)?;

        self.session = GameSession::new(&board);
        self.board = board;
        self.config = config;
        self.announce_new_game();
        Ok(())
    }

    /// New game with the current dimensions.
    pub fn restart(&mut self) -> Result<()> {
        self.new_game(self.config)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn is_finished(&self) -> bool {
        self.session.status.is_finished()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.session.revealed_count
    }

    pub fn cells_to_reveal(&self) -> CellCount {
        self.session.cells_to_reveal
    }

    /// What the remaining-mines counter shows: mines minus flags.
    pub fn mines_left(&self) -> CellCount {
        self.session.mines_left
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.session.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.board.cell_at(coords)
    }

    pub fn snapshot(&self) -> Vec<CellView> {
        self.board.snapshot()
    }

    /// Reveals a hidden cell, flood filling through zero cells.
    ///
    /// Flagged and already revealed cells are ignored, as is everything once
    /// the game is over.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.is_finished() || self.board[coords].state() != CellState::Hidden {
            return Ok(RevealOutcome::NoChange);
        }

        if self.board[coords].is_mine() {
            log::debug!("Mine hit at {:?}", coords);
            self.session.triggered_mine = Some(coords);
            self.end_game(false);
            return Ok(RevealOutcome::HitMine);
        }

        let changed = self.reveal_safe_region(coords);
        self.collaborators.render.cells_changed(&changed);

        if self.session.revealed_count == self.session.cells_to_reveal {
            self.end_game(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Flags or unflags a hidden cell.
    ///
    /// Flagging is refused once the counter reaches zero so it never shows a
    /// negative number; unflagging always works.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        let outcome = match self.board[coords].state() {
            CellState::Revealed => FlagOutcome::NoChange,
            CellState::Flagged => {
                self.board[coords].toggle_flag();
                self.session.mines_left += 1;
                self.collaborators.counter.increment();
                FlagOutcome::Unflagged
            }
            CellState::Hidden if self.session.mines_left == 0 => {
                log::debug!("No flags left, ignoring flag at {:?}", coords);
                FlagOutcome::NoChange
            }
            CellState::Hidden => {
                self.board[coords].toggle_flag();
                self.session.mines_left -= 1;
                self.collaborators.counter.decrement();
                FlagOutcome::Flagged
            }
        };

        if outcome.has_update() {
            log::debug!("{:?} at {:?}", outcome, coords);
            self.collaborators
                .render
                .cells_changed(&[self.board[coords].view()]);
        }
        Ok(outcome)
    }

    /// Finishes the game. Losing exposes every mine. Calling this on a
    /// finished game does nothing.
    pub fn end_game(&mut self, won: bool) {
        if self.is_finished() {
            return;
        }

        self.session.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        self.collaborators.timer.stop();

        let result = if won {
            GameResult::won(
                self.collaborators.timer.elapsed_secs(),
                self.max_seconds_elapsed,
            )
        } else {
            let exposed = self.reveal_all_mines();
            self.collaborators.render.cells_changed(&exposed);
            GameResult::lost()
        };

        log::debug!(
            "Game ended: {:?}, {} of {} cells revealed",
            self.session.status,
            self.session.revealed_count,
            self.session.cells_to_reveal
        );
        self.collaborators.notifier.set_mood(if won {
            Mood::Positive
        } else {
            Mood::Negative
        });
        self.collaborators.notifier.game_over(&result);
    }

    fn announce_new_game(&mut self) {
        log::info!(
            "New game: {}x{} with {} mines",
            self.config.cols,
            self.config.rows,
            self.config.mines
        );

        let Collaborators {
            render,
            counter,
            timer,
            notifier,
        } = &mut self.collaborators;
        counter.set_value(self.board.mine_count());
        timer.start();
        notifier.set_mood(Mood::Neutral);
        render.board_reset(self.board.size(), &self.board.snapshot());
    }

    /// Reveals `start` and, through every zero cell reached, its neighbors.
    ///
    /// Cells are revealed as soon as they are queued, so none is visited
    /// twice and the queue never holds more than the board.
    fn reveal_safe_region(&mut self, start: Coord2) -> Vec<CellView> {
        let mut changed = Vec::new();
        let mut to_visit = VecDeque::new();
        self.reveal_safe_cell(start, &mut changed, &mut to_visit);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.board.neighbors_of(visit_coords) {
                if self.board[pos].state() == CellState::Hidden {
                    self.reveal_safe_cell(pos, &mut changed, &mut to_visit);
                }
            }
        }

        log::debug!("Revealed {} cells from {:?}", changed.len(), start);
        changed
    }

    fn reveal_safe_cell(
        &mut self,
        coords: Coord2,
        changed: &mut Vec<CellView>,
        to_visit: &mut VecDeque<Coord2>,
    ) {
        debug_assert!(!self.board[coords].is_mine());

        let adjacent_mines = self.board.count_adjacent_mines(coords);
        self.board[coords].reveal(adjacent_mines);
        self.session.revealed_count += 1;
        changed.push(self.board[coords].view());
        log::trace!("Revealed {:?}, adjacent mines: {}", coords, adjacent_mines);

        if adjacent_mines == 0 {
            to_visit.push_back(coords);
        }
    }

    /// Exposes all mines, flagged or not, returning their new views.
    fn reveal_all_mines(&mut self) -> Vec<CellView> {
        let mines: Vec<Coord2> = self
            .board
            .iter_cells()
            .filter(|cell| cell.is_mine() && !cell.is_revealed())
            .map(Cell::coords)
            .collect();

        mines
            .into_iter()
            .map(|coords| {
                self.board[coords].reveal_mine();
                self.board[coords].view()
            })
            .collect()
    }
}
