use log::trace;

use crate::cell::Position;
use crate::config::CompletionPolicy;
use crate::direction::Direction;
use crate::error::MoveError;
use crate::generator::GenerationState;
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub position: Position,
    pub move_count: usize,
    pub completed: bool,
}

#[derive(Debug)]
pub struct Traversal {
    current: Position,
    target: Position,
    move_count: usize,
    completed: bool,
    policy: CompletionPolicy,
    max_life: u8,
}

impl Traversal {
    pub fn new(target: Position, policy: CompletionPolicy, max_life: u8) -> Self {
        Self {
            current: (0, 0),
            target,
            move_count: 0,
            completed: false,
            policy,
            max_life,
        }
    }

    pub fn current(&self) -> Position {
        self.current
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    /// Validates a move against the walls; applies it only when every check
    /// passes.
    pub fn try_move(
        &mut self,
        grid: &mut Grid,
        state: GenerationState,
        dir: Direction,
    ) -> Result<MoveOutcome, MoveError> {
        let result = self.check(grid, state, dir);
        let next = match result {
            Ok(next) => next,
            Err(err) => {
                trace!("move {:?} from {:?} rejected: {}", dir, self.current, err);
                return Err(err);
            }
        };

        grid[self.current].set_current(false);
        let cell = &mut grid[next];
        cell.mark_passed();
        cell.activate(self.max_life);
        self.current = next;
        self.move_count += 1;

        for cell in grid.cells_mut() {
            if cell.is_passed() {
                cell.decay();
            }
        }

        self.check_completed();
        Ok(MoveOutcome {
            position: self.current,
            move_count: self.move_count,
            completed: self.completed,
        })
    }

    /// Sets the sticky completion flag when standing on the target.
    pub(crate) fn check_completed(&mut self) -> bool {
        if self.current == self.target {
            self.completed = true;
        }
        self.completed
    }

    fn check(
        &self,
        grid: &Grid,
        state: GenerationState,
        dir: Direction,
    ) -> Result<Position, MoveError> {
        if state != GenerationState::Done {
            return Err(MoveError::NotGenerated);
        }
        if self.completed && self.policy == CompletionPolicy::LockOnCompletion {
            return Err(MoveError::AlreadyCompleted);
        }
        let next = grid.step(self.current, dir).ok_or(MoveError::AtBoundary)?;
        if grid[self.current].has_wall(dir) {
            return Err(MoveError::Blocked);
        }
        Ok(next)
    }
}
