//! Conway's Game of Life on a fixed-size torus.
//!
//! The core is [`grid::LiveSet`] (sparse live cells), [`stepping`] (the
//! transition function) and [`session::SessionController`] (the state machine
//! that sequences editing, stepping and speed). The egui front end in [`ui`]
//! and the file store in [`persist`] sit on top of it.

pub mod config;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod persist;
pub mod session;
pub mod stepping;
pub mod ui;

pub use error::LifeError;
pub use grid::{Coord, GridSize, LiveSet, wrap};
pub use session::{Command, Flow, Mode, SessionController};
pub use stepping::next_generation;
