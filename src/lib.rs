//! TERTIS - Terminal Tetris
//!
//! The engine (`board`, `piece`, `bag`, `score`, `game`) has no I/O and never
//! reads the clock. `driver` adds the gravity timer; `input`, `menu`,
//! `display`, `settings` and `ui` are the terminal front end.

pub mod bag;
pub mod board;
pub mod display;
pub mod driver;
pub mod game;
pub mod input;
pub mod menu;
pub mod piece;
pub mod score;
pub mod settings;
pub mod tetromino;
pub mod ui;
