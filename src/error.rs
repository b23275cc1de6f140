use thiserror::Error;

/// Errors raised while building or generating a maze.
#[derive(Debug, Error, PartialEq)]
pub enum MazeError {
    #[error("maze dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("loop-opening threshold {0} is outside [0, 1]")]
    InvalidLoopThreshold(f64),
    #[error("cell ({x}, {z}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        z: usize,
        width: usize,
        height: usize,
    },
    #[error("backtracking history exhausted after visiting {visited} of {total} cells")]
    InternalInvariantViolation { visited: usize, total: usize },
}

/// Reasons a player move is rejected. A rejected move changes nothing.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("the maze has not been generated yet")]
    NotGenerated,
    #[error("the maze is already completed")]
    AlreadyCompleted,
    #[error("cannot move past the edge of the maze")]
    AtBoundary,
    #[error("a wall blocks the way")]
    Blocked,
}
