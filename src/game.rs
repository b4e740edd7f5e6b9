//! Core game state and logic

use crate::bag::Bag;
use crate::board::Board;
use crate::piece::Piece;
use crate::score::{EngineConfig, Score};
use std::ops::ControlFlow;
use std::time::Duration;

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    TogglePause,
    Quit,
}

/// What a lock sequence did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub cleared: usize,
    pub points: u64,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub current: &'a Piece,
    pub next: &'a Piece,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub mode: Mode,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current: Piece,
    next: Piece,
    bag: Bag,
    score: Score,
    mode: Mode,
    config: EngineConfig,
    /// Time between gravity steps, recomputed on every lock
    gravity: Duration,
}

impl Game {
    /// Create a new game seeded from entropy
    pub fn new(config: EngineConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Create a new game with a fixed bag seed
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        let mut bag = Bag::with_seed(seed);
        let current = bag.draw();
        let next = bag.draw();
        let score = Score::new();
        tracing::info!("new game, seed={:016x}", seed);

        Self {
            board: Board::new(),
            current,
            next,
            bag,
            gravity: config.gravity_interval(score.level),
            score,
            mode: Mode::Running,
            config,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Current time between gravity steps
    pub fn gravity_interval(&self) -> Duration {
        self.gravity
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            current: &self.current,
            next: &self.next,
            score: self.score.points,
            level: self.score.level,
            lines: self.score.lines,
            mode: self.mode,
        }
    }

    /// Process an action. `Break` means the player asked to quit.
    ///
    /// Rejected moves are silent no-ops. While paused only `TogglePause`
    /// and `Quit` do anything; after game over only `Quit` does.
    pub fn process_action(&mut self, action: Action) -> ControlFlow<()> {
        if action == Action::Quit {
            return ControlFlow::Break(());
        }

        match self.mode {
            Mode::Running => match action {
                Action::MoveLeft => self.shift(-1),
                Action::MoveRight => self.shift(1),
                Action::Rotate => self.rotate(),
                Action::SoftDrop => self.soft_drop(),
                Action::HardDrop => {
                    self.hard_drop();
                }
                Action::TogglePause => {
                    self.mode = Mode::Paused;
                    tracing::debug!("paused");
                }
                Action::Quit => {}
            },
            Mode::Paused => {
                if action == Action::TogglePause {
                    self.mode = Mode::Running;
                    tracing::debug!("resumed");
                }
            }
            Mode::GameOver => {}
        }
        ControlFlow::Continue(())
    }

    /// One gravity step: fall a row, or lock if the piece is resting.
    /// Does nothing unless running.
    pub fn gravity_tick(&mut self) -> Option<LockOutcome> {
        if self.mode != Mode::Running {
            return None;
        }
        if self.board.collides(&self.current, 0, 1) {
            Some(self.lock_sequence())
        } else {
            self.current.y += 1;
            None
        }
    }

    fn shift(&mut self, dx: i32) {
        if !self.board.collides(&self.current, dx, 0) {
            self.current.x += dx;
        }
    }

    fn rotate(&mut self) {
        self.current.rotate();
        if self.board.collides(&self.current, 0, 0) {
            self.current.undo_rotate();
        }
    }

    fn soft_drop(&mut self) {
        if !self.board.collides(&self.current, 0, 1) {
            self.current.y += 1;
        }
    }

    /// Drop to the lowest legal row and lock
    fn hard_drop(&mut self) -> LockOutcome {
        while !self.board.collides(&self.current, 0, 1) {
            self.current.y += 1;
        }
        self.lock_sequence()
    }

    /// Lock the current piece, clear lines, score, and spawn the next piece
    fn lock_sequence(&mut self) -> LockOutcome {
        self.board.lock(&self.current);
        let cleared = self.board.clear_lines();

        let previous_level = self.score.level;
        let points = self.score.add_clear(cleared);
        self.gravity = self.config.gravity_interval(self.score.level);

        tracing::debug!(
            "locked {:?} at ({}, {}), cleared={}, points={}",
            self.current.kind,
            self.current.x,
            self.current.y,
            cleared,
            points
        );
        if self.score.level != previous_level {
            tracing::info!(
                "level {} reached, gravity={}ms",
                self.score.level,
                self.gravity.as_millis()
            );
        }

        let following = self.bag.draw();
        self.current = std::mem::replace(&mut self.next, following);

        if self.board.collides(&self.current, 0, 0) {
            self.mode = Mode::GameOver;
            tracing::info!(
                "game over, score={} level={} lines={}",
                self.score.points,
                self.score.level,
                self.score.lines
            );
        }

        LockOutcome { cleared, points }
    }
}
