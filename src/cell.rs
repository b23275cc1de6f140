use crate::direction::Direction;

pub type Position = (usize, usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walls {
    sides: [bool; 4],
}

impl Walls {
    pub fn all() -> Self {
        Self { sides: [true; 4] }
    }

    pub fn has(&self, dir: Direction) -> bool {
        self.sides[dir.index()]
    }

    pub fn count(&self) -> usize {
        self.sides.iter().filter(|&&w| w).count()
    }

    pub(crate) fn remove(&mut self, dir: Direction) {
        self.sides[dir.index()] = false;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    position: Position,
    walls: Walls,
    visited: bool,
    current: bool,
    passed: bool,
    target: bool,
    life: u8,
    shade: f32,
}

impl Cell {
    pub(crate) fn new(x: usize, z: usize, max_life: u8) -> Self {
        Self {
            position: (x, z),
            walls: Walls::all(),
            visited: false,
            current: false,
            passed: false,
            target: false,
            life: max_life,
            shade: 0.0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn x(&self) -> usize {
        self.position.0
    }

    pub fn z(&self) -> usize {
        self.position.1
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls.has(dir)
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn is_current(&self) -> bool {
        self.current
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    pub fn is_target(&self) -> bool {
        self.target
    }

    pub fn life(&self) -> u8 {
        self.life
    }

    /// Cosmetic base tint in `[0, 1)`, assigned once a maze is generated.
    pub fn shade(&self) -> f32 {
        self.shade
    }

    pub(crate) fn activate(&mut self, max_life: u8) {
        self.visited = true;
        self.current = true;
        self.life = max_life;
    }

    pub(crate) fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    pub(crate) fn mark_passed(&mut self) {
        self.passed = true;
    }

    pub(crate) fn mark_target(&mut self) {
        self.target = true;
    }

    pub(crate) fn set_shade(&mut self, shade: f32) {
        self.shade = shade;
    }

    pub(crate) fn remove_wall(&mut self, dir: Direction) {
        self.walls.remove(dir);
    }

    pub(crate) fn decay(&mut self) {
        self.life = self.life.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_closed_and_unvisited() {
        let cell = Cell::new(3, 4, 9);
        assert_eq!(cell.position(), (3, 4));
        assert_eq!(cell.walls().count(), 4);
        assert!(!cell.is_visited());
        assert!(!cell.is_current());
        assert!(!cell.is_passed());
        assert!(!cell.is_target());
        assert_eq!(cell.life(), 9);
    }

    #[test]
    fn decay_floors_at_zero_and_activate_restores() {
        let mut cell = Cell::new(0, 0, 2);
        cell.decay();
        cell.decay();
        cell.decay();
        assert_eq!(cell.life(), 0);
        cell.activate(2);
        assert_eq!(cell.life(), 2);
        assert!(cell.is_visited());
        assert!(cell.is_current());
    }

    #[test]
    fn removing_a_wall_only_touches_that_side() {
        let mut cell = Cell::new(0, 0, 9);
        cell.remove_wall(Direction::Up);
        assert!(!cell.has_wall(Direction::Up));
        assert!(cell.has_wall(Direction::Left));
        assert!(cell.has_wall(Direction::Right));
        assert!(cell.has_wall(Direction::Down));
        assert_eq!(cell.walls().count(), 3);
    }
}
