//! Core maze engine: grid data model, perfect-maze generation, unique-path
//! solving, and the interactive navigation session.
//!
//! A renderer (see the `maze-tui` crate) consumes this API: it reads wall and
//! visited flags off the [`Grid`], feeds directional input into the
//! [`Navigator`], and paces the [`Playback`] of the solved route.

mod generator;
mod grid;
mod navigator;
mod solver;

pub use generator::{Generator, MIN_CELL_SIZE};
pub use grid::{Cell, Grid};
pub use navigator::{MoveOutcome, Navigator, Playback, SessionState, SessionSummary};
pub use solver::{Solution, Solver};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A cell coordinate: `x` grows rightward, `y` grows downward, both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The coordinate one cell over in `direction`, or `None` when the step
    /// would leave the coordinate space at zero. Grid bounds are checked
    /// separately by [`Grid::contains`].
    pub fn step(self, direction: Direction) -> Option<Coord> {
        match direction {
            Direction::Up => self.y.checked_sub(1).map(|y| Coord::new(self.x, y)),
            Direction::Right => Some(Coord::new(self.x + 1, self.y)),
            Direction::Down => Some(Coord::new(self.x, self.y + 1)),
            Direction::Left => self.x.checked_sub(1).map(|x| Coord::new(x, self.y)),
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A movement direction, doubling as the wall-side index on a cell
/// (`Up` = top wall, `Right` = right wall, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in fixed top/right/bottom/left order. The solver and
    /// the neighbor enumeration rely on this order being stable.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// A boundary cell together with its externally-open side. The entrance
/// doorway is where play begins; the exit doorway is the carving root and
/// where play ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doorway {
    pub cell: Coord,
    pub side: Direction,
}

impl Doorway {
    pub fn new(cell: Coord, side: Direction) -> Self {
        Self { cell, side }
    }
}

/// Immutable maze parameters, passed into the engine constructors rather
/// than read from any ambient state.
///
/// `cell_size` and `border` are layout hints for renderers; the engine
/// validates them against the configured minimums but does not otherwise
/// use them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Maze width in cells
    pub width: usize,
    /// Maze height in cells
    pub height: usize,
    /// Cell edge length hint for renderers
    pub cell_size: u32,
    /// Border thickness hint, at least 1 and below `cell_size`
    pub border: u32,
    /// Where play begins
    pub entrance: Doorway,
    /// Carving root and where play ends
    pub exit: Doorway,
}

impl MazeConfig {
    /// A config with the given dimensions and doorways and default layout
    /// hints.
    pub fn new(width: usize, height: usize, entrance: Doorway, exit: Doorway) -> Self {
        Self {
            width,
            height,
            cell_size: 24,
            border: 2,
            entrance,
            exit,
        }
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::new(
            16,
            12,
            Doorway::new(Coord::new(0, 0), Direction::Left),
            Doorway::new(Coord::new(15, 11), Direction::Right),
        )
    }
}

/// Errors surfaced by the engine. Rejected moves and jumps are ordinary
/// return values on the [`Navigator`], not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Width or height of zero, reported before any grid allocation.
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// Doorway or layout parameters that cannot produce a maze, reported
    /// before carving begins.
    #[error("invalid maze configuration: {0}")]
    InvalidConfiguration(String),

    /// A grid invariant did not hold; indicates a generator bug, never a
    /// user mistake.
    #[error("maze invariant violated: {0}")]
    InternalConsistency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stops_at_zero() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Right), Some(Coord::new(1, 0)));
        assert_eq!(origin.step(Direction::Down), Some(Coord::new(0, 1)));
    }

    #[test]
    fn opposite_round_trips() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn config_serde_round_trip() {
        let config = MazeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: MazeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
