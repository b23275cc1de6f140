use log::{debug, info};

use crate::cell::{Cell, Position};
use crate::config::MazeConfig;
use crate::direction::Direction;
use crate::error::{MazeError, MoveError};
use crate::generator::{GenerationState, GenerationStats, Generator};
use crate::grid::Grid;
use crate::random::UnitRandom;
use crate::traversal::{MoveOutcome, Traversal};

/// One maze session: the grid plus generation and traversal state.
///
/// A session starts at the reset baseline: every wall present, the origin
/// activated and passed, the far corner marked as target.
#[derive(Debug)]
pub struct Maze {
    config: MazeConfig,
    grid: Grid,
    generator: Generator,
    traversal: Traversal,
    pristine: bool,
}

impl Maze {
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        config.validate()?;
        Ok(Self {
            grid: baseline(&config),
            generator: Generator::new(),
            traversal: Traversal::new(config.target(), config.completion_policy, config.max_life),
            config,
            pristine: true,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, x: usize, z: usize) -> Result<&Cell, MazeError> {
        self.grid.get(x, z)
    }

    pub fn state(&self) -> GenerationState {
        self.generator.state()
    }

    pub fn stats(&self) -> GenerationStats {
        self.generator.stats()
    }

    /// The single active position: the carving cursor while generating,
    /// the player otherwise.
    pub fn current(&self) -> Position {
        match self.generator.state() {
            GenerationState::Carving | GenerationState::Finalizing => self.generator.current(),
            GenerationState::Idle | GenerationState::Done => self.traversal.current(),
        }
    }

    pub fn target(&self) -> Position {
        self.traversal.target()
    }

    pub fn move_count(&self) -> usize {
        self.traversal.move_count()
    }

    pub fn completed(&self) -> bool {
        self.traversal.completed()
    }

    /// True while nothing has happened since the last reset.
    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    /// Discards the grid and returns to the ungenerated baseline.
    /// Returns `false` when already there.
    pub fn reset(&mut self) -> bool {
        if self.pristine {
            return false;
        }
        self.rebuild();
        debug!("maze reset");
        true
    }

    /// Carves the whole maze. A no-op once generation is done.
    pub fn generate<R: UnitRandom + ?Sized>(&mut self, rng: &mut R) -> Result<(), MazeError> {
        self.advance(rng, usize::MAX).map(|_| ())
    }

    /// Reset followed by a complete generation.
    pub fn regenerate<R: UnitRandom + ?Sized>(&mut self, rng: &mut R) -> Result<(), MazeError> {
        self.reset();
        self.generate(rng)
    }

    /// Runs at most `max_steps` carving steps, for callers that spread
    /// generation across frames.
    ///
    /// If generation hits an internal invariant violation the session is
    /// rebuilt at the reset baseline before the error is returned.
    pub fn advance<R: UnitRandom + ?Sized>(
        &mut self,
        rng: &mut R,
        max_steps: usize,
    ) -> Result<GenerationState, MazeError> {
        if self.generator.state() == GenerationState::Done {
            return Ok(GenerationState::Done);
        }
        self.pristine = false;
        match self
            .generator
            .advance(&mut self.grid, rng, &self.config, max_steps)
        {
            Ok(GenerationState::Done) => {
                self.traversal.check_completed();
                let stats = self.generator.stats();
                info!(
                    "generated {}x{} maze: {} carves, {} backtracks, {} loops",
                    self.config.width,
                    self.config.height,
                    stats.steps,
                    stats.backtracks,
                    stats.loops_opened
                );
                Ok(GenerationState::Done)
            }
            Ok(state) => Ok(state),
            Err(err) => {
                self.rebuild();
                Err(err)
            }
        }
    }

    pub fn try_move(&mut self, dir: Direction) -> Result<MoveOutcome, MoveError> {
        self.traversal
            .try_move(&mut self.grid, self.generator.state(), dir)
    }

    fn rebuild(&mut self) {
        self.grid = baseline(&self.config);
        self.generator = Generator::new();
        self.traversal = Traversal::new(
            self.config.target(),
            self.config.completion_policy,
            self.config.max_life,
        );
        self.pristine = true;
    }
}

fn baseline(config: &MazeConfig) -> Grid {
    let mut grid = Grid::filled(config.width, config.height, config.max_life);
    let origin = &mut grid[(0, 0)];
    origin.activate(config.max_life);
    origin.mark_passed();
    grid[config.target()].mark_target();
    grid
}
