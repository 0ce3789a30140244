mod app;
mod render;
mod stats;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use maze_core::{Coord, Direction, Doorway, MazeConfig};
use std::io::{self, Write};
use std::time::Instant;

/// Command-line options for the maze player
#[derive(Parser)]
#[command(name = "maze", about = "Generate and play a perfect maze in the terminal")]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = 16)]
    width: usize,
    /// Maze height in cells
    #[arg(long, default_value_t = 12)]
    height: usize,
    /// Seed for reproducible maze sequences
    #[arg(long)]
    seed: Option<u64>,
    /// Cell edge length hint forwarded to the engine
    #[arg(long, default_value_t = 24)]
    cell_size: u32,
    /// Border thickness hint, must stay below the cell size
    #[arg(long, default_value_t = 2)]
    border: u32,
}

impl Args {
    /// Entrance on the top-left cell's left wall, exit on the bottom-right
    /// cell's right wall. Dimension errors are left to engine validation.
    fn config(&self) -> MazeConfig {
        MazeConfig {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            border: self.border,
            entrance: Doorway::new(Coord::new(0, 0), Direction::Left),
            exit: Doorway::new(
                Coord::new(
                    self.width.saturating_sub(1),
                    self.height.saturating_sub(1),
                ),
                Direction::Right,
            ),
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut app = match App::new(args.config(), args.seed) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with a timeout so playback keeps ticking
        let tick_rate = app.tick_rate();
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }
                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        // Tick playback and timers
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
