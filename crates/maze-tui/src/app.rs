use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use maze_core::{
    Coord, Direction, Generator, MazeConfig, MazeError, MoveOutcome, Navigator, Playback,
    SessionState, Solver,
};
use std::time::Duration;

/// Ticks between two answer-playback steps
pub const PLAYBACK_STEP_TICKS: u32 = 2;

/// Ticks a status message stays on screen
const MESSAGE_TICKS: u32 = 25;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// The main application state
pub struct App {
    /// Maze parameters for this run
    config: MazeConfig,
    /// Generator reused across `n` presses; a seeded one replays the same
    /// maze sequence
    generator: Generator,
    solver: Solver,
    /// Current play session
    pub session: Navigator,
    /// Color theme
    pub theme: Theme,
    /// Highlight cells the player has already crossed
    pub show_visited: bool,
    /// Highlight decision cells (three or more openings) on the visited path
    pub show_splits: bool,
    /// Show the live statistics panel
    pub show_stats: bool,
    /// Running answer replay, if any
    playback: Option<Playback>,
    /// Cell the replay cursor currently marks
    pub playback_cursor: Option<Coord>,
    /// Ticks since the replay last advanced
    playback_ticks: u32,
    /// Transient status message
    pub message: Option<String>,
    message_timer: u32,
    /// Top-left of the drawn grid in terminal cells; render keeps this
    /// current so mouse clicks can be mapped back onto the maze
    pub grid_origin: (u16, u16),
}

impl App {
    /// Generate the first maze and start a session. Configuration errors
    /// surface here, before the terminal is taken over.
    pub fn new(config: MazeConfig, seed: Option<u64>) -> Result<Self, MazeError> {
        let mut generator = match seed {
            Some(seed) => Generator::with_seed(config.clone(), seed)?,
            None => Generator::new(config.clone())?,
        };
        let solver = Solver::new();
        let session = new_session(&mut generator, &solver, &config)?;

        Ok(Self {
            config,
            generator,
            solver,
            session,
            theme: Theme::dark(),
            show_visited: false,
            show_splits: false,
            show_stats: false,
            playback: None,
            playback_cursor: None,
            playback_ticks: 0,
            message: None,
            message_timer: 0,
            grid_origin: (0, 0),
        })
    }

    /// Faster cadence while a replay is running
    pub fn tick_rate(&self) -> Duration {
        if self.playback.is_some() {
            Duration::from_millis(60)
        } else {
            Duration::from_millis(100)
        }
    }

    /// Advance timers and the answer replay (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if let Some(playback) = self.playback.as_mut() {
            self.playback_ticks += 1;
            if self.playback_ticks >= PLAYBACK_STEP_TICKS {
                self.playback_ticks = 0;
                match playback.next() {
                    Some(coord) => self.playback_cursor = Some(coord),
                    None => {
                        self.playback = None;
                        self.playback_cursor = None;
                    }
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Up => self.try_step(Direction::Up),
            KeyCode::Right => self.try_step(Direction::Right),
            KeyCode::Down => self.try_step(Direction::Down),
            KeyCode::Left => self.try_step(Direction::Left),
            KeyCode::Char('v') => self.show_visited = !self.show_visited,
            KeyCode::Char('o') => self.show_splits = !self.show_splits,
            KeyCode::Char('t') => self.show_stats = !self.show_stats,
            KeyCode::Char('a') => self.toggle_playback(),
            KeyCode::Char('n') => self.new_maze(),
            _ => {}
        }
        AppAction::Continue
    }

    /// Left click jumps onto a previously visited cell
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(coord) = self.cell_at(mouse.column, mouse.row) {
                if !self.session.jump_to(coord) && self.session.state() == SessionState::Playing {
                    self.set_message("jumps only land on cells you have visited");
                }
            }
        }
    }

    fn try_step(&mut self, direction: Direction) {
        match self.session.step(direction) {
            MoveOutcome::Moved(_) => {}
            MoveOutcome::Finished => {
                // The summary banner takes over; a running replay would
                // only fight it for attention.
                self.cancel_playback();
            }
            // Wall bumps are silent no-ops
            MoveOutcome::Rejected => {}
        }
    }

    fn toggle_playback(&mut self) {
        if self.playback.is_some() {
            self.cancel_playback();
        } else {
            self.playback = Some(self.session.answer_playback());
            self.playback_ticks = 0;
        }
    }

    fn cancel_playback(&mut self) {
        self.playback = None;
        self.playback_cursor = None;
        self.playback_ticks = 0;
    }

    /// Generate a fresh maze, dropping any replay of the old one
    pub fn new_maze(&mut self) {
        match new_session(&mut self.generator, &self.solver, &self.config) {
            Ok(session) => {
                self.session = session;
                self.cancel_playback();
                self.set_message("new maze");
            }
            Err(e) => self.set_message(format!("{}", e)),
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.message_timer = MESSAGE_TICKS;
    }

    /// Map a terminal position onto the maze cell drawn there, if any.
    /// Render draws each cell as a 3-wide interior inside shared 1-char
    /// borders, so cells repeat every 4 columns and every 2 rows.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Coord> {
        let col = column.checked_sub(self.grid_origin.0)?;
        let row = row.checked_sub(self.grid_origin.1)?;
        if col % 4 == 0 || row % 2 == 0 {
            return None; // on a border line
        }
        let coord = Coord::new((col / 4) as usize, (row / 2) as usize);
        self.session.grid().contains(coord).then_some(coord)
    }
}

fn new_session(
    generator: &mut Generator,
    solver: &Solver,
    config: &MazeConfig,
) -> Result<Navigator, MazeError> {
    let grid = generator.generate()?;
    let solution = solver.solve(&grid, config.entrance.cell, config.exit.cell)?;
    Ok(Navigator::new(grid, solution, config.entrance, config.exit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Doorway;

    fn test_app() -> App {
        let config = MazeConfig::new(
            6,
            4,
            Doorway::new(Coord::new(0, 0), Direction::Left),
            Doorway::new(Coord::new(5, 3), Direction::Right),
        );
        App::new(config, Some(13)).unwrap()
    }

    #[test]
    fn cell_at_maps_interiors_only() {
        let mut app = test_app();
        app.grid_origin = (10, 5);

        // Interior of cell (0,0) spans columns 11..=13 on row 6.
        assert_eq!(app.cell_at(11, 6), Some(Coord::new(0, 0)));
        assert_eq!(app.cell_at(13, 6), Some(Coord::new(0, 0)));
        assert_eq!(app.cell_at(15, 6), Some(Coord::new(1, 0)));
        assert_eq!(app.cell_at(11, 8), Some(Coord::new(0, 1)));

        // Border lines and positions outside the grid map to nothing.
        assert_eq!(app.cell_at(10, 6), None);
        assert_eq!(app.cell_at(11, 5), None);
        assert_eq!(app.cell_at(0, 0), None);
        assert_eq!(app.cell_at(11 + 6 * 4, 6), None);
    }

    #[test]
    fn new_maze_cancels_playback() {
        let mut app = test_app();
        app.handle_key(KeyEvent::from(KeyCode::Char('a')));
        assert!(app.playback.is_some());

        // Let the replay advance at least one step.
        for _ in 0..PLAYBACK_STEP_TICKS {
            app.tick();
        }
        assert!(app.playback_cursor.is_some());

        app.new_maze();
        assert!(app.playback.is_none());
        assert!(app.playback_cursor.is_none());
    }

    #[test]
    fn toggles_flip_without_touching_the_session() {
        let mut app = test_app();
        let position = app.session.position();
        app.handle_key(KeyEvent::from(KeyCode::Char('v')));
        app.handle_key(KeyEvent::from(KeyCode::Char('o')));
        app.handle_key(KeyEvent::from(KeyCode::Char('t')));
        assert!(app.show_visited && app.show_splits && app.show_stats);
        assert_eq!(app.session.position(), position);
        assert_eq!(app.session.moves(), 0);
    }
}
