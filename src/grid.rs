use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

use crate::cell::{Cell, Position};
use crate::direction::Direction;
use crate::error::MazeError;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates `width * height` closed, unvisited cells.
    pub fn new(width: usize, height: usize, max_life: u8) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Self::filled(width, height, max_life))
    }

    /// Same as `new` for dimensions already validated by the caller.
    pub(crate) fn filled(width: usize, height: usize, max_life: u8) -> Self {
        debug_assert!(width > 0 && height > 0);
        let mut cells = Vec::with_capacity(width * height);
        for z in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, z, max_life));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: usize, z: usize) -> bool {
        x < self.width && z < self.height
    }

    pub fn get(&self, x: usize, z: usize) -> Result<&Cell, MazeError> {
        let idx = self.offset(x, z)?;
        Ok(&self.cells[idx])
    }

    pub(crate) fn get_mut(&mut self, x: usize, z: usize) -> Result<&mut Cell, MazeError> {
        let idx = self.offset(x, z)?;
        Ok(&mut self.cells[idx])
    }

    /// Cells in row-major order (z outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.height).flat_map(move |z| (0..width).map(move |x| (x, z)))
    }

    /// Adjacent position, clamped to the grid edge.
    ///
    /// Stepping off the grid yields `pos` itself, so callers must treat a
    /// self-neighbor explicitly.
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Position {
        let (dx, dz) = dir.delta();
        let x = (pos.0 as isize + dx).clamp(0, self.width as isize - 1) as usize;
        let z = (pos.1 as isize + dz).clamp(0, self.height as isize - 1) as usize;
        (x, z)
    }

    /// Strict adjacent position, `None` past the edge.
    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dx, dz) = dir.delta();
        let x = pos.0 as isize + dx;
        let z = pos.1 as isize + dz;
        if x < 0 || z < 0 {
            return None;
        }
        let (x, z) = (x as usize, z as usize);
        if !self.contains(x, z) {
            return None;
        }
        Some((x, z))
    }

    /// True when `dir` leads to an in-bounds cell with no wall in between.
    pub fn is_open(&self, pos: Position, dir: Direction) -> bool {
        if self.step(pos, dir).is_none() {
            return false;
        }
        match self.get(pos.0, pos.1) {
            Ok(cell) => !cell.has_wall(dir),
            Err(_) => false,
        }
    }

    /// Removes the facing walls of two adjacent cells. No-op when `a == b`.
    pub(crate) fn remove_wall_between(&mut self, a: Position, b: Position) {
        if a == b {
            return;
        }
        let Some(dir) = Direction::between(a, b) else {
            debug_assert!(false, "cells {:?} and {:?} are not adjacent", a, b);
            return;
        };
        if !self.contains(a.0, a.1) || !self.contains(b.0, b.1) {
            return;
        }
        let ia = a.1 * self.width + a.0;
        let ib = b.1 * self.width + b.0;
        self.cells[ia].remove_wall(dir);
        self.cells[ib].remove_wall(dir.opposite());
    }

    /// Breadth-first flood over open walls, indexed row-major.
    pub fn reachable_from(&self, start: Position) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        if !self.contains(start.0, start.1) {
            return seen;
        }
        let mut q = VecDeque::new();
        seen[start.1 * self.width + start.0] = true;
        q.push_back(start);
        while let Some(pos) = q.pop_front() {
            for dir in Direction::ALL {
                if !self.is_open(pos, dir) {
                    continue;
                }
                let Some(next) = self.step(pos, dir) else {
                    continue;
                };
                let idx = next.1 * self.width + next.0;
                if !seen[idx] {
                    seen[idx] = true;
                    q.push_back(next);
                }
            }
        }
        seen
    }

    pub fn is_fully_connected(&self) -> bool {
        self.reachable_from((0, 0)).iter().all(|&r| r)
    }

    /// True when every open wall is mirrored by the neighbor facing back.
    pub fn walls_are_symmetric(&self) -> bool {
        self.positions().all(|pos| {
            Direction::ALL.into_iter().all(|dir| match self.step(pos, dir) {
                Some(next) => {
                    let here = self.cells[pos.1 * self.width + pos.0].has_wall(dir);
                    let there = self.cells[next.1 * self.width + next.0].has_wall(dir.opposite());
                    here == there
                }
                None => true,
            })
        })
    }

    fn offset(&self, x: usize, z: usize) -> Result<usize, MazeError> {
        if !self.contains(x, z) {
            return Err(MazeError::OutOfBounds {
                x,
                z,
                width: self.width,
                height: self.height,
            });
        }
        Ok(z * self.width + x)
    }
}

/// Panicking access for positions already known to be in range.
impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        assert!(self.contains(pos.0, pos.1), "cell {:?} out of bounds", pos);
        &self.cells[pos.1 * self.width + pos.0]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, pos: Position) -> &mut Cell {
        assert!(self.contains(pos.0, pos.1), "cell {:?} out of bounds", pos);
        &mut self.cells[pos.1 * self.width + pos.0]
    }
}
