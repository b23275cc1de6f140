//! Randomized depth-first backtracker with a sparse loop-opening pass.

use log::{debug, error};

use crate::cell::Position;
use crate::config::MazeConfig;
use crate::direction::Direction;
use crate::error::MazeError;
use crate::grid::Grid;
use crate::random::UnitRandom;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Carving,
    Finalizing,
    Done,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub steps: usize,
    pub backtracks: usize,
    pub loops_opened: usize,
}

#[derive(Debug)]
pub struct Generator {
    state: GenerationState,
    history: Vec<Position>,
    current: Position,
    visited: usize,
    total: usize,
    stats: GenerationStats,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            state: GenerationState::Idle,
            history: Vec::new(),
            current: (0, 0),
            visited: 0,
            total: 0,
            stats: GenerationStats::default(),
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn current(&self) -> Position {
        self.current
    }

    pub fn visited(&self) -> usize {
        self.visited
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// Starts carving from the origin, which reset has already activated.
    fn begin(&mut self, grid: &Grid) {
        self.history.clear();
        self.history.push((0, 0));
        self.current = (0, 0);
        self.visited = 1;
        self.total = grid.len();
        self.stats = GenerationStats::default();
        self.state = GenerationState::Carving;
        debug!(
            "carving {}x{} maze ({} cells)",
            grid.width(),
            grid.height(),
            self.total
        );
    }

    /// Runs up to `max_steps` carving steps, finalizing once every cell is
    /// visited. Returns the state reached.
    ///
    /// On `InternalInvariantViolation` the generator drops back to `Idle`; the
    /// grid is left partially carved and must be discarded by the caller.
    pub fn advance<R: UnitRandom + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        config: &MazeConfig,
        max_steps: usize,
    ) -> Result<GenerationState, MazeError> {
        if self.state == GenerationState::Idle {
            self.begin(grid);
        }

        let mut steps = 0;
        while self.state == GenerationState::Carving {
            if self.visited >= self.total {
                debug!(
                    "carving finished after {} steps, {} backtracks",
                    self.stats.steps, self.stats.backtracks
                );
                self.state = GenerationState::Finalizing;
                break;
            }
            if steps == max_steps {
                break;
            }
            if let Err(err) = self.carve_step(grid, rng, config.max_life) {
                error!("maze generation aborted: {}", err);
                self.history.clear();
                self.state = GenerationState::Idle;
                return Err(err);
            }
            steps += 1;
        }

        if self.state == GenerationState::Finalizing {
            self.finalize(grid, rng, config)?;
            self.state = GenerationState::Done;
        }
        Ok(self.state)
    }

    /// Carves the whole maze in one call.
    pub fn run<R: UnitRandom + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        config: &MazeConfig,
    ) -> Result<(), MazeError> {
        self.advance(grid, rng, config, usize::MAX).map(|_| ())
    }

    fn carve_step<R: UnitRandom + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        max_life: u8,
    ) -> Result<(), MazeError> {
        let candidates = unvisited_neighbors(grid, self.current)?;
        if !candidates.is_empty() {
            let next = candidates[rng.index(candidates.len())];
            grid.remove_wall_between(self.current, next);
            grid.get_mut(self.current.0, self.current.1)?
                .set_current(false);
            grid.get_mut(next.0, next.1)?.activate(max_life);
            self.history.push(next);
            self.current = next;
            self.visited += 1;
            self.stats.steps += 1;
            return Ok(());
        }

        self.history.pop();
        let Some(&previous) = self.history.last() else {
            return Err(MazeError::InternalInvariantViolation {
                visited: self.visited,
                total: self.total,
            });
        };
        grid.get_mut(self.current.0, self.current.1)?
            .set_current(false);
        grid.get_mut(previous.0, previous.1)?.set_current(true);
        self.current = previous;
        self.stats.backtracks += 1;
        Ok(())
    }

    fn finalize<R: UnitRandom + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        config: &MazeConfig,
    ) -> Result<(), MazeError> {
        self.history = Vec::new();

        grid.get_mut(self.current.0, self.current.1)?
            .set_current(false);
        self.current = (0, 0);
        let origin = grid.get_mut(0, 0)?;
        origin.activate(config.max_life);
        origin.mark_passed();

        self.stats.loops_opened = open_loops(grid, rng, config.loop_threshold);

        for cell in grid.cells_mut() {
            cell.set_shade(rng.next_unit() as f32);
        }

        debug!(
            "maze finalized: {} extra walls opened",
            self.stats.loops_opened
        );
        Ok(())
    }
}

/// Unvisited cells one clamped step away, in `Direction::ALL` order.
/// A clamped step that lands back on `pos` is never a candidate.
fn unvisited_neighbors(grid: &Grid, pos: Position) -> Result<Vec<Position>, MazeError> {
    let mut candidates = Vec::with_capacity(4);
    for dir in Direction::ALL {
        let next = grid.neighbor(pos, dir);
        if next == pos {
            continue;
        }
        if !grid.get(next.0, next.1)?.is_visited() {
            candidates.push(next);
        }
    }
    Ok(candidates)
}

/// Opens one extra wall for each cell whose sample beats `threshold`.
/// Returns the number of walls actually removed; clamped self-neighbors and
/// already open walls count for nothing.
fn open_loops<R: UnitRandom + ?Sized>(grid: &mut Grid, rng: &mut R, threshold: f64) -> usize {
    let mut opened = 0;
    for z in 0..grid.height() {
        for x in 0..grid.width() {
            if rng.next_unit() <= threshold {
                continue;
            }
            let dir = Direction::ALL[rng.index(Direction::ALL.len())];
            let next = grid.neighbor((x, z), dir);
            if next != (x, z) && !grid.is_open((x, z), dir) {
                opened += 1;
            }
            grid.remove_wall_between((x, z), next);
        }
    }
    opened
}
