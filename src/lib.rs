//! Perfect-maze generation and traversal.
//!
//! A [`Maze`] carves its grid with a randomized backtracker, opens a few extra
//! walls to add loops, and then validates player moves against the carved
//! walls. Presentation code reads [`Cell`] flags through [`Maze::grid`].

pub mod cell;
pub mod command;
pub mod config;
pub mod direction;
pub mod error;
pub mod generator;
pub mod grid;
pub mod marker;
pub mod maze;
pub mod random;
pub mod traversal;

pub use cell::{Cell, Position, Walls};
pub use command::{Command, CommandOutcome};
pub use config::{CompletionPolicy, MazeConfig};
pub use direction::Direction;
pub use error::{MazeError, MoveError};
pub use generator::{GenerationState, GenerationStats};
pub use grid::Grid;
pub use marker::TargetMarker;
pub use maze::Maze;
pub use random::UnitRandom;
pub use traversal::MoveOutcome;
