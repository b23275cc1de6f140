mod ui;

use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_explorer::config::{DEFAULT_HEIGHT, DEFAULT_MAX_LIFE, DEFAULT_WIDTH};
use maze_explorer::{
    Command, CommandOutcome, CompletionPolicy, GenerationState, Maze, MazeConfig, TargetMarker,
};
use ui::{Action, Renderer};

const DEFAULT_TICK_MS: u64 = 100;
const DEFAULT_RENDER_FPS: u64 = 60;
const DEFAULT_CARVE_STEPS: u32 = 8;

/// Generate a maze and walk it in the terminal.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(
        long,
        default_value_t = DEFAULT_WIDTH as u32,
        value_parser = clap::value_parser!(u32).range(1..=512)
    )]
    width: u32,

    /// Maze height in cells
    #[arg(
        long,
        default_value_t = DEFAULT_HEIGHT as u32,
        value_parser = clap::value_parser!(u32).range(1..=512)
    )]
    height: u32,

    /// Number of moves a trail stays visible
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_LIFE,
        value_parser = clap::value_parser!(u8).range(1..)
    )]
    max_life: u8,

    /// Random seed; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Ignore moves once the target is reached
    #[arg(long)]
    lock_on_complete: bool,

    /// Carve the maze visibly over several frames
    #[arg(long)]
    animate: bool,

    /// Carving steps per frame when animating
    #[arg(
        long,
        default_value_t = DEFAULT_CARVE_STEPS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    carve_steps: u32,

    /// Frames drawn per second
    #[arg(
        long,
        env = "MAZE_FPS",
        default_value_t = DEFAULT_RENDER_FPS,
        value_parser = clap::value_parser!(u64).range(1..=1000)
    )]
    fps: u64,

    /// Milliseconds between target-marker animation steps
    #[arg(
        long,
        env = "MAZE_TICK_MS",
        default_value_t = DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    tick_ms: u64,
}

impl Args {
    fn maze_config(&self) -> MazeConfig {
        let policy = if self.lock_on_complete {
            CompletionPolicy::LockOnCompletion
        } else {
            CompletionPolicy::Permissive
        };
        MazeConfig::new(self.width as usize, self.height as usize)
            .with_max_life(self.max_life)
            .with_completion_policy(policy)
    }

    fn carve_budget(&self) -> usize {
        if self.animate {
            self.carve_steps as usize
        } else {
            usize::MAX
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let maze = Maze::new(args.maze_config()).context("invalid maze configuration")?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        "starting {}x{} maze (seed {:?})",
        args.width, args.height, args.seed
    );

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &args, maze, rng);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, args: &Args, mut maze: Maze, mut rng: StdRng) -> Result<()> {
    let mut renderer = Renderer::new();
    let mut marker = TargetMarker::new();
    let carve_steps = args.carve_budget();
    let tick = Duration::from_millis(args.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / args.fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match ui::action_for(key) {
                    Some(Action::Quit) => return Ok(()),
                    Some(Action::Command(command)) => {
                        handle_command(command, &mut maze, &mut rng, carve_steps)?
                    }
                    None => {}
                }
            }
        }

        if matches!(
            maze.state(),
            GenerationState::Carving | GenerationState::Finalizing
        ) {
            maze.advance(&mut rng, carve_steps)
                .context("maze generation failed")?;
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            marker.tick();
        }

        ui::render(stdout, &maze, &marker, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn handle_command(
    command: Command,
    maze: &mut Maze,
    rng: &mut StdRng,
    carve_steps: usize,
) -> Result<()> {
    // The board freezes on completion until a reset or a new maze.
    if maze.completed() && command.direction().is_some() {
        return Ok(());
    }
    let outcome = command
        .apply(maze, rng, carve_steps)
        .context("maze generation failed")?;
    match outcome {
        CommandOutcome::Moved(moved) if moved.completed => {
            info!("maze completed in {} moves", moved.move_count)
        }
        CommandOutcome::Rejected(err) => debug!("{:?} ignored: {}", command, err),
        CommandOutcome::Reset { performed } => debug!("reset requested, performed: {}", performed),
        _ => {}
    }
    Ok(())
}
