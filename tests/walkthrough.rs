use std::collections::VecDeque;

use maze_explorer::{
    Command, CommandOutcome, CompletionPolicy, Direction, GenerationState, Maze, MazeConfig,
    MoveError, Position,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Directions of a shortest open path from the current cell to the target.
fn solve(maze: &Maze) -> Vec<Direction> {
    let grid = maze.grid();
    let width = grid.width();
    let mut prev: Vec<Option<(Position, Direction)>> = vec![None; grid.len()];
    let start = maze.current();
    let mut q = VecDeque::new();
    q.push_back(start);
    let mut seen = vec![false; grid.len()];
    seen[start.1 * width + start.0] = true;
    while let Some(pos) = q.pop_front() {
        for dir in Direction::ALL {
            if !grid.is_open(pos, dir) {
                continue;
            }
            let next = grid.step(pos, dir).unwrap();
            let idx = next.1 * width + next.0;
            if !seen[idx] {
                seen[idx] = true;
                prev[idx] = Some((pos, dir));
                q.push_back(next);
            }
        }
    }
    let mut path = Vec::new();
    let mut at = maze.target();
    while at != start {
        let (from, dir) = prev[at.1 * width + at.0].expect("target reachable");
        path.push(dir);
        at = from;
    }
    path.reverse();
    path
}

#[test]
fn default_sized_maze_generates_and_is_connected() {
    let mut maze = Maze::new(MazeConfig::default()).unwrap();
    maze.generate(&mut StdRng::seed_from_u64(2024)).unwrap();
    assert_eq!(maze.state(), GenerationState::Done);
    assert_eq!(
        maze.grid().cells().filter(|c| c.is_visited()).count(),
        42 * 27
    );
    assert!(maze.grid().is_fully_connected());
    assert!(maze.grid().walls_are_symmetric());
    assert_eq!(maze.current(), (0, 0));
}

#[test]
fn two_by_one_sequence() {
    let mut maze = Maze::new(MazeConfig::new(2, 1)).unwrap();
    maze.generate(&mut StdRng::seed_from_u64(77)).unwrap();
    assert!(!maze.cell(0, 0).unwrap().has_wall(Direction::Right));
    let outcome = maze.try_move(Direction::Right).unwrap();
    assert_eq!(outcome.position, (1, 0));
    assert!(outcome.completed);
    assert!(maze.completed());
    assert_eq!(maze.move_count(), 1);
}

#[test]
fn solving_the_maze_completes_it() {
    let mut maze = Maze::new(MazeConfig::new(15, 9)).unwrap();
    maze.generate(&mut StdRng::seed_from_u64(3)).unwrap();
    let path = solve(&maze);
    for (i, dir) in path.iter().enumerate() {
        let outcome = maze.try_move(*dir).unwrap();
        assert_eq!(outcome.completed, i + 1 == path.len());
    }
    assert!(maze.completed());
    assert_eq!(maze.current(), (14, 8));
    assert_eq!(maze.move_count(), path.len());
    let trail = maze.grid().cells().filter(|c| c.is_passed()).count();
    assert_eq!(trail, path.len() + 1);
}

#[test]
fn permissive_policy_keeps_moving_after_completion() {
    let mut maze = Maze::new(MazeConfig::new(2, 1)).unwrap();
    maze.generate(&mut StdRng::seed_from_u64(1)).unwrap();
    maze.try_move(Direction::Right).unwrap();
    let back = maze.try_move(Direction::Left).unwrap();
    assert_eq!(back.position, (0, 0));
    assert!(back.completed);
    assert_eq!(back.move_count, 2);
}

#[test]
fn lock_policy_freezes_after_completion() {
    let config = MazeConfig::new(2, 1).with_completion_policy(CompletionPolicy::LockOnCompletion);
    let mut maze = Maze::new(config).unwrap();
    maze.generate(&mut StdRng::seed_from_u64(1)).unwrap();
    maze.try_move(Direction::Right).unwrap();
    assert_eq!(
        maze.try_move(Direction::Left),
        Err(MoveError::AlreadyCompleted)
    );
    assert_eq!(maze.move_count(), 1);
}

#[test]
fn chunked_generation_matches_one_shot_generation() {
    let config = MazeConfig::new(12, 10);
    let mut whole = Maze::new(config).unwrap();
    whole.generate(&mut StdRng::seed_from_u64(99)).unwrap();

    let mut chunked = Maze::new(config).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let mut frames = 0;
    while chunked.advance(&mut rng, 5).unwrap() != GenerationState::Done {
        frames += 1;
    }
    assert!(frames > 1);
    assert_eq!(chunked.grid(), whole.grid());
    assert_eq!(chunked.stats(), whole.stats());
}

#[test]
fn reset_after_play_restores_baseline() {
    let config = MazeConfig::new(6, 6);
    let fresh = Maze::new(config).unwrap();
    let mut maze = Maze::new(config).unwrap();
    maze.generate(&mut StdRng::seed_from_u64(5)).unwrap();
    for dir in solve(&maze) {
        maze.try_move(dir).unwrap();
    }
    assert!(maze.completed());

    assert!(maze.reset());
    assert_eq!(maze.grid(), fresh.grid());
    assert_eq!(maze.move_count(), 0);
    assert!(!maze.completed());
    assert_eq!(maze.current(), (0, 0));
    assert_eq!(maze.state(), GenerationState::Idle);
    let origin = maze.cell(0, 0).unwrap();
    assert!(origin.is_visited() && origin.is_passed());

    assert!(!maze.reset());
    assert_eq!(maze.grid(), fresh.grid());
}

#[test]
fn commands_drive_a_full_session() {
    let mut maze = Maze::new(MazeConfig::new(3, 3)).unwrap();
    let mut rng = StdRng::seed_from_u64(12);

    assert_eq!(
        Command::MoveDown.apply(&mut maze, &mut rng, usize::MAX).unwrap(),
        CommandOutcome::Rejected(MoveError::NotGenerated)
    );
    assert_eq!(
        Command::Regenerate
            .apply(&mut maze, &mut rng, usize::MAX)
            .unwrap(),
        CommandOutcome::Generating(GenerationState::Done)
    );
    for dir in solve(&maze) {
        let command = match dir {
            Direction::Left => Command::MoveLeft,
            Direction::Up => Command::MoveUp,
            Direction::Right => Command::MoveRight,
            Direction::Down => Command::MoveDown,
        };
        let outcome = command.apply(&mut maze, &mut rng, usize::MAX).unwrap();
        assert!(matches!(outcome, CommandOutcome::Moved(_)));
    }
    assert!(maze.completed());
    assert_eq!(
        Command::Reset.apply(&mut maze, &mut rng, usize::MAX).unwrap(),
        CommandOutcome::Reset { performed: true }
    );
    assert!(!maze.completed());
}
