use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use maze_explorer::{Cell, Command, Direction, GenerationState, Maze, TargetMarker};

const CELL_W: usize = 2;
const HUD_ROWS: u16 = 1;
const FOLLOW_MARGIN: usize = 4;
const MARKER_BARS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

const WALL_COLOR: Color = Color::Grey;
const CURSOR_COLOR: Color = Color::Rgb {
    r: 0x4a,
    g: 0x13,
    b: 0x4f,
};
const TARGET_COLOR: Color = Color::Rgb {
    r: 0x44,
    g: 0xff,
    b: 0x44,
};
const UNVISITED_COLOR: Color = Color::Rgb {
    r: 0x70,
    g: 0x10,
    b: 0x10,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Command(Command),
    Quit,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        _ => return None,
    }
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('w' | 'W' | 'k') | KeyCode::Up => Action::Command(Command::MoveUp),
        KeyCode::Char('a' | 'A' | 'h') | KeyCode::Left => Action::Command(Command::MoveLeft),
        KeyCode::Char('s' | 'S' | 'j') | KeyCode::Down => Action::Command(Command::MoveDown),
        KeyCode::Char('d' | 'D' | 'l') | KeyCode::Right => Action::Command(Command::MoveRight),
        KeyCode::Char('r' | 'R') => Action::Command(Command::Reset),
        KeyCode::Char('g' | 'G') => Action::Command(Command::Regenerate),
        _ => return None,
    };
    Some(action)
}

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Wall,
    Floor,
    Unvisited,
    Trail,
    Cursor,
    Player,
    Target(usize),
}

#[derive(Clone, Copy, PartialEq)]
struct Tile {
    glyph: Glyph,
    color: Color,
}

const BLANK: Tile = Tile {
    glyph: Glyph::Floor,
    color: Color::Reset,
};

/// Top-left tile of the visible window onto the maze.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    x: usize,
    z: usize,
}

impl Viewport {
    /// Slides at most one tile per axis towards keeping `focus` away from
    /// the window edges.
    fn follow(&mut self, focus: (usize, usize), view: (usize, usize), map: (usize, usize)) {
        self.x = follow_axis(self.x, focus.0, view.0, map.0);
        self.z = follow_axis(self.z, focus.1, view.1, map.1);
    }
}

fn follow_axis(start: usize, focus: usize, view: usize, map: usize) -> usize {
    if map <= view {
        return 0;
    }
    let margin = FOLLOW_MARGIN.min(view / 3);
    let start = start.min(map - view);
    if focus < start + margin {
        start.saturating_sub(1)
    } else if focus + margin >= start + view {
        (start + 1).min(map - view)
    } else {
        start
    }
}

pub struct Renderer {
    last: Vec<Tile>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    view: (usize, usize),
    viewport: Viewport,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: HUD_ROWS,
            view: (0, 0),
            viewport: Viewport::default(),
        }
    }
}

pub fn render(
    stdout: &mut Stdout,
    maze: &Maze,
    marker: &TargetMarker,
    renderer: &mut Renderer,
) -> io::Result<()> {
    let map_w = maze.grid().width() * 2 + 1;
    let map_h = maze.grid().height() * 2 + 1;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    let avail_w = term_w as usize / CELL_W;
    let avail_h = term_h.saturating_sub(HUD_ROWS) as usize;
    if avail_w < 3 || avail_h < 3 {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            3 * CELL_W,
            3 + HUD_ROWS,
            term_w,
            term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let view = (map_w.min(avail_w), map_h.min(avail_h));
    if view != renderer.view {
        renderer.view = view;
        renderer.last = vec![BLANK; view.0 * view.1];
        renderer.needs_full = true;
    }

    let origin_x = (term_w - (view.0 * CELL_W) as u16) / 2;
    let origin_y = (term_h - HUD_ROWS - view.1 as u16) / 2 + HUD_ROWS;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let (cx, cz) = maze.current();
    renderer
        .viewport
        .follow((cx * 2 + 1, cz * 2 + 1), view, (map_w, map_h));

    let hud = hud_text(maze);
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - HUD_ROWS))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for vz in 0..view.1 {
        for vx in 0..view.0 {
            let tile = tile_for(
                maze,
                marker,
                renderer.viewport.x + vx,
                renderer.viewport.z + vz,
            );
            let idx = vz * view.0 + vx;
            if renderer.needs_full || tile != renderer.last[idx] {
                renderer.last[idx] = tile;
                draw_tile(stdout, renderer, vx, vz, tile)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn hud_text(maze: &Maze) -> String {
    if maze.completed() {
        return format!(
            "maze completed in {} moves  (g new maze, r reset, q quit)",
            maze.move_count()
        );
    }
    match maze.state() {
        GenerationState::Idle => "press g to generate a maze  (q quit)".to_string(),
        GenerationState::Carving | GenerationState::Finalizing => {
            let visited = maze.grid().cells().filter(|c| c.is_visited()).count();
            format!("carving... {}/{} cells", visited, maze.grid().len())
        }
        GenerationState::Done => format!(
            "{} moves  (wasd/arrows move, g new maze, r reset, q quit)",
            maze.move_count()
        ),
    }
}

/// Maps a tile of the doubled-resolution board to what sits there: cells on
/// odd/odd tiles, wall segments between them, fixed corners on even/even.
fn tile_for(maze: &Maze, marker: &TargetMarker, tx: usize, tz: usize) -> Tile {
    let grid = maze.grid();
    let closed = match (tx % 2, tz % 2) {
        (0, 0) => true,
        (1, 1) => return cell_tile(maze, marker, &grid[((tx - 1) / 2, (tz - 1) / 2)]),
        (0, _) => {
            let z = (tz - 1) / 2;
            if tx == 0 {
                grid[(0, z)].has_wall(Direction::Left)
            } else {
                grid[(tx / 2 - 1, z)].has_wall(Direction::Right)
            }
        }
        _ => {
            let x = (tx - 1) / 2;
            if tz == 0 {
                grid[(x, 0)].has_wall(Direction::Up)
            } else {
                grid[(x, tz / 2 - 1)].has_wall(Direction::Down)
            }
        }
    };
    if closed {
        Tile {
            glyph: Glyph::Wall,
            color: WALL_COLOR,
        }
    } else {
        BLANK
    }
}

fn cell_tile(maze: &Maze, marker: &TargetMarker, cell: &Cell) -> Tile {
    if cell.position() == maze.current() {
        return match maze.state() {
            GenerationState::Carving | GenerationState::Finalizing => Tile {
                glyph: Glyph::Cursor,
                color: CURSOR_COLOR,
            },
            GenerationState::Idle | GenerationState::Done => Tile {
                glyph: Glyph::Player,
                color: Color::Yellow,
            },
        };
    }
    if cell.is_target() {
        let level = (marker.height() * (MARKER_BARS.len() - 1) as f64).round() as usize;
        return Tile {
            glyph: Glyph::Target(level.min(MARKER_BARS.len() - 1)),
            color: TARGET_COLOR,
        };
    }
    if cell.is_passed() && cell.life() > 0 {
        return Tile {
            glyph: Glyph::Trail,
            color: trail_color(cell, maze.config().max_life),
        };
    }
    if cell.is_visited() {
        return BLANK;
    }
    Tile {
        glyph: Glyph::Unvisited,
        color: UNVISITED_COLOR,
    }
}

/// Blue fade proportional to remaining life, tinted by the cell's shade.
fn trail_color(cell: &Cell, max_life: u8) -> Color {
    let fade = cell.life() as f32 / max_life.max(1) as f32;
    let shade = cell.shade();
    Color::Rgb {
        r: (shade * 0.01 * 255.0) as u8,
        g: 0,
        b: ((shade * 0.8 + 0.2) * fade * 255.0) as u8,
    }
}

fn draw_tile(
    stdout: &mut Stdout,
    renderer: &Renderer,
    x: usize,
    y: usize,
    tile: Tile,
) -> io::Result<()> {
    let text = match tile.glyph {
        Glyph::Wall => "██",
        Glyph::Floor => "  ",
        Glyph::Unvisited => "░░",
        Glyph::Trail => "██",
        Glyph::Cursor => "▓▓",
        Glyph::Player => "◉",
        Glyph::Target(level) => MARKER_BARS[level],
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(tile.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
