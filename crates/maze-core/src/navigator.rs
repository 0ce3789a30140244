use crate::grid::Grid;
use crate::solver::Solution;
use crate::{Coord, Direction, Doorway};
use serde::{Deserialize, Serialize};

/// Whether a session is still accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Finished,
}

/// Result of a single step attempt. Rejections are ordinary outcomes, not
/// errors: a wall bump leaves the session exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The step was applied; the player now stands here.
    Moved(Coord),
    /// The step left through the exit door; the session is over.
    Finished,
    /// Closed wall, disallowed door, or finished session; nothing changed.
    Rejected,
}

/// End-of-session statistics handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub moves: usize,
    pub jumps: usize,
    pub steps_to_solve: usize,
    /// `steps_to_solve / moves * 100`; `None` when the session finished
    /// without a single counted move.
    pub accuracy_percent: Option<f64>,
}

/// Interactive navigation session over a carved maze.
///
/// Owns the grid for the duration of play: accepted steps and jumps mark
/// cells visited, and the renderer reads walls, visited flags, and the
/// queries below through this session.
pub struct Navigator {
    grid: Grid,
    solution: Solution,
    entrance: Doorway,
    exit: Doorway,
    /// `None` is the finished sentinel; no further input is accepted.
    position: Option<Coord>,
    moves: usize,
    jumps: usize,
}

impl Navigator {
    /// Start a session at the entrance cell. The entrance is marked visited
    /// immediately: the player stands there from move zero.
    pub fn new(mut grid: Grid, solution: Solution, entrance: Doorway, exit: Doorway) -> Self {
        grid.set_visited(entrance.cell);
        Self {
            grid,
            solution,
            entrance,
            exit,
            position: Some(entrance.cell),
            moves: 0,
            jumps: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn entrance(&self) -> Doorway {
        self.entrance
    }

    pub fn exit(&self) -> Doorway {
        self.exit
    }

    pub fn state(&self) -> SessionState {
        if self.position.is_some() {
            SessionState::Playing
        } else {
            SessionState::Finished
        }
    }

    /// Where the player stands, or `None` once the maze has been exited.
    pub fn position(&self) -> Option<Coord> {
        self.position
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn jumps(&self) -> usize {
        self.jumps
    }

    pub fn steps_to_solve(&self) -> usize {
        self.solution.steps()
    }

    /// Attempt one step. Counters only change on an accepted, non-finishing
    /// step; the finishing step sets the sentinel instead of moving.
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        let Some(current) = self.position else {
            return MoveOutcome::Rejected;
        };
        // The entrance door lets players in, never back out.
        if current == self.entrance.cell && direction == self.entrance.side {
            return MoveOutcome::Rejected;
        }
        if !self.grid.is_open(current, direction) {
            return MoveOutcome::Rejected;
        }
        if current == self.exit.cell && direction == self.exit.side {
            self.position = None;
            return MoveOutcome::Finished;
        }
        let Some(next) = current
            .step(direction)
            .filter(|coord| self.grid.contains(*coord))
        else {
            // Open boundary walls other than the doorways do not exist on a
            // generated grid; treat one like a closed wall.
            return MoveOutcome::Rejected;
        };
        self.grid.set_visited(next);
        self.moves += 1;
        self.position = Some(next);
        MoveOutcome::Moved(next)
    }

    /// Jump onto a cell the player has already stood on. Rejected (returning
    /// `false`, with no state change) for unvisited targets or once the
    /// session is finished.
    pub fn jump_to(&mut self, target: Coord) -> bool {
        if self.position.is_none() {
            return false;
        }
        if !self.grid.contains(target) || !self.grid.is_visited(target) {
            return false;
        }
        self.grid.set_visited(target); // idempotent: the target was visited already
        self.position = Some(target);
        self.jumps += 1;
        true
    }

    /// Whether the carving gave the player a genuine choice at `coord`
    /// (three or more openings).
    pub fn is_decision_cell(&self, coord: Coord) -> bool {
        self.grid.contains(coord) && self.grid.openings_count(coord) >= 3
    }

    /// Whether the player has stood on `coord` during this session.
    pub fn is_on_visited_path(&self, coord: Coord) -> bool {
        self.grid.contains(coord) && self.grid.is_visited(coord)
    }

    /// Final statistics; `Some` only once the session is finished.
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.position.is_some() {
            return None;
        }
        let accuracy_percent =
            (self.moves > 0).then(|| self.solution.steps() as f64 / self.moves as f64 * 100.0);
        Some(SessionSummary {
            moves: self.moves,
            jumps: self.jumps,
            steps_to_solve: self.solution.steps(),
            accuracy_percent,
        })
    }

    /// A replay of the solved route for the renderer to pace: yields each
    /// path coordinate lazily, entrance first, ending at the exit. Iterating
    /// never touches session state.
    pub fn answer_playback(&self) -> Playback {
        Playback::new(self.solution.path().to_vec())
    }
}

/// Lazy, restartable walk over the solution route.
///
/// The stored path is in exit-to-entrance order, so the walk runs from the
/// last element (the entrance) back to index 0 (the exit), the order a
/// player would cross the cells. The consumer owns the pacing; dropping the
/// value cancels the replay.
pub struct Playback {
    path: Vec<Coord>,
    remaining: usize,
}

impl Playback {
    fn new(path: Vec<Coord>) -> Self {
        let remaining = path.len();
        Self { path, remaining }
    }

    /// Rewind to the entrance end to replay from the start.
    pub fn reset(&mut self) {
        self.remaining = self.path.len();
    }
}

impl Iterator for Playback {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.path[self.remaining])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Playback {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Doorway, Generator, MazeConfig, Solver};

    fn session(width: usize, height: usize, seed: u64) -> Navigator {
        let cfg = MazeConfig::new(
            width,
            height,
            Doorway::new(Coord::new(0, 0), Direction::Left),
            Doorway::new(Coord::new(width - 1, height - 1), Direction::Right),
        );
        let grid = Generator::with_seed(cfg.clone(), seed).unwrap().generate().unwrap();
        let solution = Solver::new()
            .solve(&grid, cfg.entrance.cell, cfg.exit.cell)
            .unwrap();
        Navigator::new(grid, solution, cfg.entrance, cfg.exit)
    }

    #[test]
    fn closed_wall_step_rejected() {
        let mut nav = session(2, 1, 4);
        assert_eq!(nav.step(Direction::Up), MoveOutcome::Rejected);
        assert_eq!(nav.step(Direction::Down), MoveOutcome::Rejected);
        assert_eq!(nav.position(), Some(Coord::new(0, 0)));
        assert_eq!(nav.moves(), 0);
    }

    #[test]
    fn entrance_door_is_entry_only() {
        let mut nav = session(2, 1, 4);
        // The entrance wall is open, yet stepping out through it is refused.
        assert!(nav.grid().is_open(Coord::new(0, 0), Direction::Left));
        assert_eq!(nav.step(Direction::Left), MoveOutcome::Rejected);
        assert_eq!(nav.moves(), 0);
    }

    #[test]
    fn two_by_one_walkthrough() {
        let mut nav = session(2, 1, 4);
        assert_eq!(nav.state(), SessionState::Playing);
        assert!(!nav.is_decision_cell(Coord::new(0, 0)));

        assert_eq!(nav.step(Direction::Right), MoveOutcome::Moved(Coord::new(1, 0)));
        assert_eq!(nav.moves(), 1);
        assert!(nav.is_on_visited_path(Coord::new(1, 0)));
        assert!(nav.summary().is_none());

        assert_eq!(nav.step(Direction::Right), MoveOutcome::Finished);
        assert_eq!(nav.state(), SessionState::Finished);
        assert_eq!(nav.position(), None);
        assert_eq!(nav.moves(), 1);

        let summary = nav.summary().unwrap();
        assert_eq!(summary.moves, 1);
        assert_eq!(summary.steps_to_solve, 1);
        assert_eq!(summary.accuracy_percent, Some(100.0));

        // Finished is terminal: nothing is accepted afterwards.
        assert_eq!(nav.step(Direction::Right), MoveOutcome::Rejected);
        assert_eq!(nav.step(Direction::Left), MoveOutcome::Rejected);
        assert!(!nav.jump_to(Coord::new(0, 0)));
        assert_eq!(nav.moves(), 1);
        assert_eq!(nav.jumps(), 0);
    }

    #[test]
    fn jump_requires_a_visited_target() {
        let mut nav = session(6, 6, 11);
        assert!(!nav.jump_to(Coord::new(5, 5)));
        assert!(!nav.jump_to(Coord::new(9, 9)));
        assert_eq!(nav.jumps(), 0);
        assert_eq!(nav.position(), Some(Coord::new(0, 0)));

        // Walk one accepted step, then jump back to the entrance.
        let moved = Direction::ALL
            .into_iter()
            .any(|d| matches!(nav.step(d), MoveOutcome::Moved(_)));
        assert!(moved, "some direction out of the entrance is open");
        assert!(nav.jump_to(Coord::new(0, 0)));
        assert_eq!(nav.jumps(), 1);
        assert_eq!(nav.position(), Some(Coord::new(0, 0)));
    }

    #[test]
    fn decision_cell_queries() {
        // Hand-carved 3x3: a corridor (0,0)-(0,1)-(1,1) with branches from
        // (1,1) to (2,1) and down to the exit at (1,2). (1,1) has exactly
        // three openings, (0,1) exactly two.
        let mut grid = Grid::new(3, 3).unwrap();
        grid.remove_wall_between(Coord::new(0, 0), Coord::new(0, 1));
        grid.remove_wall_between(Coord::new(0, 1), Coord::new(1, 1));
        grid.remove_wall_between(Coord::new(1, 1), Coord::new(2, 1));
        grid.remove_wall_between(Coord::new(1, 1), Coord::new(1, 2));
        let entrance = Doorway::new(Coord::new(0, 0), Direction::Left);
        let exit = Doorway::new(Coord::new(1, 2), Direction::Down);
        grid.open_wall(entrance.cell, entrance.side);
        grid.open_wall(exit.cell, exit.side);

        let solution = Solver::new().solve(&grid, entrance.cell, exit.cell).unwrap();
        let nav = Navigator::new(grid, solution, entrance, exit);

        assert!(nav.is_decision_cell(Coord::new(1, 1)));
        assert!(!nav.is_decision_cell(Coord::new(0, 1)));
        assert!(!nav.is_decision_cell(Coord::new(9, 9)));
    }

    #[test]
    fn playback_walks_entrance_to_exit() {
        let nav = session(2, 1, 4);
        let mut playback = nav.answer_playback();
        assert_eq!(playback.len(), 2);
        assert_eq!(playback.next(), Some(Coord::new(0, 0)));
        assert_eq!(playback.next(), Some(Coord::new(1, 0)));
        assert_eq!(playback.next(), None);

        playback.reset();
        let replayed: Vec<_> = playback.collect();
        assert_eq!(replayed, vec![Coord::new(0, 0), Coord::new(1, 0)]);

        // Replaying never disturbed the session.
        assert_eq!(nav.position(), Some(Coord::new(0, 0)));
        assert_eq!(nav.moves(), 0);
    }

    #[test]
    fn zero_move_finish_has_undefined_accuracy() {
        // Degenerate hand-built session: a single cell with both doors.
        let mut grid = Grid::new(1, 1).unwrap();
        let entrance = Doorway::new(Coord::new(0, 0), Direction::Left);
        let exit = Doorway::new(Coord::new(0, 0), Direction::Right);
        grid.open_wall(entrance.cell, entrance.side);
        grid.open_wall(exit.cell, exit.side);
        let solution = Solver::new().solve(&grid, entrance.cell, exit.cell).unwrap();

        let mut nav = Navigator::new(grid, solution, entrance, exit);
        assert_eq!(nav.step(Direction::Right), MoveOutcome::Finished);

        let summary = nav.summary().unwrap();
        assert_eq!(summary.moves, 0);
        assert_eq!(summary.accuracy_percent, None);
    }
}
