use core::time::Duration;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Over
/// - InProgress -> Won
/// - Over | Won -> NotStarted (restart)
/// - any -> Exited
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Fresh board, timer not running
    #[default]
    NotStarted,
    /// At least one cell revealed, timer running
    InProgress,
    /// A mine was revealed
    Over,
    /// Every safe cell is no longer hidden
    Won,
    /// Player left for the difficulty selection, the session is done
    Exited,
}

impl GameStatus {
    /// Cell clicks are only processed before the game ended.
    pub const fn accepts_moves(self) -> bool {
        matches!(self, Self::NotStarted | Self::InProgress)
    }

    /// Game ended, only restart or exit remain.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Over | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickKind {
    /// Reveal
    Primary,
    /// Cycle the mark
    Secondary,
}

/// Click already translated to grid coordinates, possibly out of range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEvent {
    pub kind: ClickKind,
    pub grid_x: i32,
    pub grid_y: i32,
}

/// Raw click in renderer pixels, translated through the session `Layout`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: ClickKind,
    pub x: i32,
    pub y: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Cell(CellEvent),
    Pointer(PointerEvent),
    Restart,
    ExitToMenu,
}

/// What an input did to the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionUpdate {
    Ignored,
    Marked(CellState),
    Revealed(RevealOutcome),
    Restarted,
    Exited,
}

impl SessionUpdate {
    /// Whether this update could have changed anything a renderer shows
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// One game from difficulty selection until the player leaves, restarts replace the board in place.
#[derive(Clone, Debug)]
pub struct Session<C: Clock = SystemClock> {
    config: GameConfig,
    difficulty: Option<Difficulty>,
    layout: Layout,
    board: Board,
    visibility: Visibility,
    flags_placed: CellCount,
    status: GameStatus,
    started_at: Option<Instant>,
    elapsed: Duration,
    triggered_mine: Option<Coord2>,
    seeds: SmallRng,
    clock: C,
}

impl Session<SystemClock> {
    /// New game on a random board for `difficulty`.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::for_difficulty(difficulty, rand::random(), SystemClock)
    }
}

impl<C: Clock> Session<C> {
    /// Every board of this session, restarts included, is derived from `seed`.
    pub fn for_difficulty(difficulty: Difficulty, seed: u64, clock: C) -> Self {
        let mut session = Self::generated(difficulty.config(), seed, clock);
        session.difficulty = Some(difficulty);
        session
    }

    /// Custom board settings, rejected when the board is empty or cannot hold the mines.
    pub fn with_config(config: GameConfig, seed: u64, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::generated(config, seed, clock))
    }

    /// Starts from a known board; restarts still draw random boards of the same size and mine count.
    pub fn from_board(board: Board, seed: u64, clock: C) -> Self {
        let config = board.game_config();
        Self::assemble(config, board, SmallRng::seed_from_u64(seed), clock)
    }

    pub fn with_layout(mut self, layout: Layout) -> Result<Self> {
        layout.validate()?;
        self.layout = layout;
        Ok(self)
    }

    fn generated(config: GameConfig, seed: u64, clock: C) -> Self {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let board = RandomBoardGenerator::new(seeds.random()).generate(config);
        Self::assemble(config, board, seeds, clock)
    }

    fn assemble(config: GameConfig, board: Board, seeds: SmallRng, clock: C) -> Self {
        log::debug!(
            "New session {}x{} with {} mines",
            config.size.0,
            config.size.1,
            config.mines
        );
        Self {
            config,
            difficulty: None,
            layout: Layout::default(),
            visibility: Visibility::new(board.size()),
            board,
            flags_placed: 0,
            status: GameStatus::default(),
            started_at: None,
            elapsed: Duration::ZERO,
            triggered_mine: None,
            seeds,
            clock,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn cell_state(&self, coords: Coord2) -> CellState {
        self.visibility[coords]
    }

    /// What the player may see at `coords`, content is only exposed once revealed.
    pub fn cell_view(&self, coords: Coord2) -> CellView {
        CellView::new(self.visibility[coords], self.board[coords])
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Mines minus flags, negative when the player placed more flags than there are mines.
    pub fn remaining_mines(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flags_placed as isize)
    }

    /// Time as of the last tick, zero before the first reveal and frozen once the game ended.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Hit regions for restart and exit, only offered after the game ended.
    pub fn controls(&self) -> Option<Controls> {
        self.status.is_terminal().then(|| Controls {
            restart: self.layout.restart_region(self.size()),
            exit: self.layout.exit_region(self.size()),
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(self)
    }

    /// Per-frame update, recomputes the elapsed time while the game is running.
    pub fn tick(&mut self) -> Duration {
        if let (GameStatus::InProgress, Some(started_at)) = (self.status, self.started_at) {
            self.elapsed = self.clock.now().saturating_duration_since(started_at);
        }
        self.elapsed
    }

    pub fn handle(&mut self, event: InputEvent) -> SessionUpdate {
        match event {
            InputEvent::Cell(CellEvent {
                kind,
                grid_x,
                grid_y,
            }) => match checked_coords(grid_x, grid_y, self.size()) {
                Some(coords) => self.click(kind, coords),
                None => {
                    log::trace!("Ignoring click outside the grid at ({}, {})", grid_x, grid_y);
                    SessionUpdate::Ignored
                }
            },
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::Restart => self.restart(),
            InputEvent::ExitToMenu => self.exit(),
        }
    }

    /// Routes a pixel click, to the grid while playing and to the control regions once the game ended.
    pub fn handle_pointer(&mut self, PointerEvent { kind, x, y }: PointerEvent) -> SessionUpdate {
        if let Some(controls) = self.controls() {
            return match kind {
                ClickKind::Primary if controls.restart.contains((x, y)) => self.restart(),
                ClickKind::Primary if controls.exit.contains((x, y)) => self.exit(),
                _ => SessionUpdate::Ignored,
            };
        }

        match self.layout.cell_at((x, y), self.size()) {
            Some(coords) => self.click(kind, coords),
            None => {
                log::trace!("Ignoring pointer outside the grid at ({}, {})", x, y);
                SessionUpdate::Ignored
            }
        }
    }

    fn click(&mut self, kind: ClickKind, coords: Coord2) -> SessionUpdate {
        match kind {
            ClickKind::Primary => self.reveal_at(coords),
            ClickKind::Secondary => self.toggle_mark_at(coords),
        }
    }

    /// Primary action, the first cell actually revealed starts the timer.
    pub fn reveal_at(&mut self, coords: Coord2) -> SessionUpdate {
        if !self.status.accepts_moves()
            || self.board.validate_coords(coords).is_err()
            || !is_revealable(&self.visibility, coords)
        {
            return SessionUpdate::Ignored;
        }

        let now = self.clock.now();
        self.mark_started(now);

        let outcome = reveal(coords, &self.board, &mut self.visibility);
        match outcome {
            RevealOutcome::Loss => {
                self.triggered_mine = Some(coords);
                self.end_game(GameStatus::Over, now);
            }
            RevealOutcome::Win => self.end_game(GameStatus::Won, now),
            RevealOutcome::Continue => {}
        }
        SessionUpdate::Revealed(outcome)
    }

    /// Secondary action, works before the first reveal but not after the game ended.
    pub fn toggle_mark_at(&mut self, coords: Coord2) -> SessionUpdate {
        if !self.status.accepts_moves() || self.board.validate_coords(coords).is_err() {
            return SessionUpdate::Ignored;
        }

        let transition = self.visibility.toggle_mark(coords);
        if !transition.has_update() {
            return SessionUpdate::Ignored;
        }
        self.flags_placed = self
            .flags_placed
            .saturating_add_signed(transition.flag_delta().into());
        log::trace!(
            "Marked {:?} as {:?}, flags placed: {}",
            coords,
            transition.to,
            self.flags_placed
        );
        SessionUpdate::Marked(transition.to)
    }

    /// Fresh board for the same settings, only once the game has ended.
    pub fn restart(&mut self) -> SessionUpdate {
        if !self.status.is_terminal() {
            return SessionUpdate::Ignored;
        }

        self.board = RandomBoardGenerator::new(self.seeds.random()).generate(self.config);
        self.visibility = Visibility::new(self.board.size());
        self.flags_placed = 0;
        self.status = GameStatus::NotStarted;
        self.started_at = None;
        self.elapsed = Duration::ZERO;
        self.triggered_mine = None;
        log::debug!("Restarted session");
        SessionUpdate::Restarted
    }

    /// Leaves the session for good, the shell goes back to difficulty selection.
    pub fn exit(&mut self) -> SessionUpdate {
        if self.status == GameStatus::Exited {
            return SessionUpdate::Ignored;
        }
        self.tick();
        self.status = GameStatus::Exited;
        log::debug!("Exited session");
        SessionUpdate::Exited
    }

    /// Checks if the state is initial and changes to in-progress recording the start time
    fn mark_started(&mut self, now: Instant) {
        if self.status == GameStatus::NotStarted {
            log::debug!("Game started");
            self.started_at = Some(now);
            self.elapsed = Duration::ZERO;
            self.status = GameStatus::InProgress;
        }
    }

    fn end_game(&mut self, status: GameStatus, now: Instant) {
        if let Some(started_at) = self.started_at {
            self.elapsed = now.saturating_duration_since(started_at);
        }
        self.status = status;
        log::debug!("Game ended {:?} after {:?}", status, self.elapsed);
    }

    #[cfg(test)]
    pub(crate) fn board(&self) -> &Board {
        &self.board
    }
}
