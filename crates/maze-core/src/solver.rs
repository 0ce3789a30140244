use crate::grid::Grid;
use crate::{Coord, Direction, MazeError};
use serde::{Deserialize, Serialize};

/// The unique route through a carved maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    path: Vec<Coord>,
    steps: usize,
}

impl Solution {
    pub(crate) fn new(path: Vec<Coord>) -> Self {
        let steps = path.len().saturating_sub(1);
        Self { path, steps }
    }

    /// Path coordinates in exit-to-entrance order: index 0 is the exit
    /// cell, the last element is the entrance cell. Callers wanting
    /// entrance-to-exit order walk it back to front.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Number of edges on the path, the minimum (and only) move count.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// Unique-path maze solver.
///
/// Because the generator carves a spanning tree, any path the search finds
/// is the only one; failed branches are simply abandoned and can never hide
/// a second route.
#[derive(Debug, Default)]
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Depth-first search from `entrance` to `exit` through open walls, in
    /// fixed top/right/bottom/left order with an explicit stack (no
    /// recursion depth limit to hit on large grids).
    ///
    /// Re-solving an unmutated grid yields an identical [`Solution`]. A
    /// grid whose exit is unreachable reports
    /// [`MazeError::InternalConsistency`]: the generator's spanning-tree
    /// guarantee was violated.
    pub fn solve(&self, grid: &Grid, entrance: Coord, exit: Coord) -> Result<Solution, MazeError> {
        if !grid.contains(entrance) || !grid.contains(exit) {
            return Err(MazeError::InvalidConfiguration(format!(
                "entrance {} or exit {} is outside the {}x{} grid",
                entrance,
                exit,
                grid.width(),
                grid.height()
            )));
        }

        let mut visited = vec![false; grid.width() * grid.height()];
        visited[grid.index(entrance)] = true;
        let mut stack = vec![Frame {
            cell: entrance,
            cursor: 0,
        }];

        while !stack.is_empty() {
            let top = stack.len() - 1;
            if stack[top].cell == exit {
                // The live stack is the entrance-to-exit route; the
                // reported path is its unwind order, exit first.
                let path = stack.iter().rev().map(|frame| frame.cell).collect();
                return Ok(Solution::new(path));
            }

            let mut next = None;
            {
                let frame = &mut stack[top];
                while frame.cursor < Direction::ALL.len() {
                    let direction = Direction::ALL[frame.cursor];
                    frame.cursor += 1;
                    if !grid.is_open(frame.cell, direction) {
                        continue;
                    }
                    let Some(candidate) = frame
                        .cell
                        .step(direction)
                        .filter(|coord| grid.contains(*coord))
                    else {
                        // An open boundary wall is a doorway, not a passage.
                        continue;
                    };
                    if !visited[grid.index(candidate)] {
                        next = Some(candidate);
                        break;
                    }
                }
            }

            match next {
                Some(candidate) => {
                    visited[grid.index(candidate)] = true;
                    stack.push(Frame {
                        cell: candidate,
                        cursor: 0,
                    });
                }
                None => {
                    stack.pop();
                }
            }
        }

        Err(MazeError::InternalConsistency(format!(
            "no route from entrance {entrance} to exit {exit}; the grid is not a spanning tree"
        )))
    }
}

struct Frame {
    cell: Coord,
    cursor: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Doorway, Generator, MazeConfig};

    fn generate(width: usize, height: usize, seed: u64) -> (Grid, MazeConfig) {
        let cfg = MazeConfig::new(
            width,
            height,
            Doorway::new(Coord::new(0, 0), Direction::Left),
            Doorway::new(Coord::new(width - 1, height - 1), Direction::Right),
        );
        let grid = Generator::with_seed(cfg.clone(), seed).unwrap().generate().unwrap();
        (grid, cfg)
    }

    #[test]
    fn two_by_one_path() {
        let (grid, cfg) = generate(2, 1, 9);
        let solution = Solver::new()
            .solve(&grid, cfg.entrance.cell, cfg.exit.cell)
            .unwrap();
        assert_eq!(solution.path(), [Coord::new(1, 0), Coord::new(0, 0)]);
        assert_eq!(solution.steps(), 1);
    }

    #[test]
    fn path_connects_exit_to_entrance() {
        let (grid, cfg) = generate(10, 8, 77);
        let solution = Solver::new()
            .solve(&grid, cfg.entrance.cell, cfg.exit.cell)
            .unwrap();

        let path = solution.path();
        assert_eq!(path.first(), Some(&cfg.exit.cell));
        assert_eq!(path.last(), Some(&cfg.entrance.cell));
        assert_eq!(solution.steps(), path.len() - 1);

        for pair in path.windows(2) {
            let open = Direction::ALL.iter().any(|&direction| {
                pair[0].step(direction) == Some(pair[1]) && grid.is_open(pair[0], direction)
            });
            assert!(open, "{} and {} are not connected", pair[0], pair[1]);
        }
    }

    #[test]
    fn solve_is_idempotent() {
        let (grid, cfg) = generate(9, 9, 5);
        let solver = Solver::new();
        let first = solver.solve(&grid, cfg.entrance.cell, cfg.exit.cell).unwrap();
        let second = solver.solve(&grid, cfg.entrance.cell, cfg.exit.cell).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unreachable_exit_is_an_internal_error() {
        // An uncarved grid: every wall still present.
        let grid = Grid::new(2, 1).unwrap();
        let result = Solver::new().solve(&grid, Coord::new(0, 0), Coord::new(1, 0));
        assert!(matches!(result, Err(MazeError::InternalConsistency(_))));
    }

    #[test]
    fn out_of_bounds_endpoints_rejected() {
        let grid = Grid::new(2, 2).unwrap();
        let result = Solver::new().solve(&grid, Coord::new(0, 0), Coord::new(5, 0));
        assert!(matches!(result, Err(MazeError::InvalidConfiguration(_))));
    }
}
