use crate::direction::Direction;
use crate::error::{MazeError, MoveError};
use crate::generator::GenerationState;
use crate::maze::Maze;
use crate::random::UnitRandom;
use crate::traversal::MoveOutcome;

/// Abstract player input, independent of any keyboard layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveUp,
    MoveRight,
    MoveDown,
    Reset,
    Regenerate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Moved(MoveOutcome),
    Rejected(MoveError),
    Reset { performed: bool },
    Generating(GenerationState),
}

impl Command {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveUp => Some(Direction::Up),
            Command::MoveRight => Some(Direction::Right),
            Command::MoveDown => Some(Direction::Down),
            Command::Reset | Command::Regenerate => None,
        }
    }

    /// Applies the command to `maze`. `carve_steps` bounds how much of a
    /// regeneration happens now; pass `usize::MAX` to finish it in one go.
    ///
    /// Only generator invariant violations surface as errors; rejected moves
    /// are ordinary outcomes.
    pub fn apply<R: UnitRandom + ?Sized>(
        self,
        maze: &mut Maze,
        rng: &mut R,
        carve_steps: usize,
    ) -> Result<CommandOutcome, MazeError> {
        if let Some(dir) = self.direction() {
            return Ok(match maze.try_move(dir) {
                Ok(outcome) => CommandOutcome::Moved(outcome),
                Err(err) => CommandOutcome::Rejected(err),
            });
        }
        match self {
            Command::Reset => Ok(CommandOutcome::Reset {
                performed: maze.reset(),
            }),
            _ => {
                maze.reset();
                let state = maze.advance(rng, carve_steps)?;
                Ok(CommandOutcome::Generating(state))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn moves_before_generation_are_rejected_outcomes() {
        let mut maze = Maze::new(MazeConfig::new(3, 3)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let out = Command::MoveRight.apply(&mut maze, &mut rng, usize::MAX);
        assert_eq!(out, Ok(CommandOutcome::Rejected(MoveError::NotGenerated)));
    }

    #[test]
    fn regenerate_then_reset() {
        let mut maze = Maze::new(MazeConfig::new(4, 4)).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let out = Command::Regenerate
            .apply(&mut maze, &mut rng, usize::MAX)
            .unwrap();
        assert_eq!(out, CommandOutcome::Generating(GenerationState::Done));
        assert!(maze.grid().is_fully_connected());

        let out = Command::Reset.apply(&mut maze, &mut rng, usize::MAX).unwrap();
        assert_eq!(out, CommandOutcome::Reset { performed: true });
        assert_eq!(maze.state(), GenerationState::Idle);

        let out = Command::Reset.apply(&mut maze, &mut rng, usize::MAX).unwrap();
        assert_eq!(out, CommandOutcome::Reset { performed: false });
    }

    #[test]
    fn partial_regenerate_leaves_carving_in_progress() {
        let mut maze = Maze::new(MazeConfig::new(6, 6)).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let out = Command::Regenerate.apply(&mut maze, &mut rng, 2).unwrap();
        assert_eq!(out, CommandOutcome::Generating(GenerationState::Carving));
        assert_eq!(
            Command::MoveDown.apply(&mut maze, &mut rng, 2).unwrap(),
            CommandOutcome::Rejected(MoveError::NotGenerated)
        );
    }
}
