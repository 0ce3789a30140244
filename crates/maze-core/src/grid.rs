use crate::{Coord, Direction, MazeError};
use serde::{Deserialize, Serialize};

/// A single maze cell: four wall flags plus the play-history mark.
///
/// `visited` belongs to interactive play only ("the player has stood here").
/// The carving and solving traversals keep their own buffers so the three
/// uses can never contaminate each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    fn new() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }

    /// Whether the wall on `side` is present (impassable).
    pub fn has_wall(&self, side: Direction) -> bool {
        self.walls[side.index()]
    }

    /// Whether the player has stood on this cell.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    fn open(&mut self, side: Direction) {
        self.walls[side.index()] = false;
    }
}

/// A fixed-size rectangular grid of cells, stored row-major.
///
/// Walls are only ever removed in matched pairs: when a cell's wall facing a
/// neighbor is cleared, the neighbor's facing wall is cleared with it. The
/// sole exception is the two boundary doorways the generator opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An uncarved grid: every wall present, nothing visited. Fails with
    /// [`MazeError::InvalidDimension`] before allocating when either
    /// dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::new(); width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    pub(crate) fn index(&self, coord: Coord) -> usize {
        coord.y * self.width + coord.x
    }

    /// The cell at `coord`. Panics when `coord` is out of bounds; callers
    /// gate on [`Grid::contains`] for unchecked input.
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index(coord)]
    }

    fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let index = self.index(coord);
        &mut self.cells[index]
    }

    /// Whether the wall on `direction` of `coord` has been removed.
    pub fn is_open(&self, coord: Coord, direction: Direction) -> bool {
        !self.cell(coord).has_wall(direction)
    }

    /// In-bounds neighbors of `coord` in fixed top/right/bottom/left order,
    /// each tagged with the direction from `coord` toward it.
    pub fn neighbors(&self, coord: Coord) -> Vec<(Coord, Direction)> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| {
                coord
                    .step(direction)
                    .filter(|next| self.contains(*next))
                    .map(|next| (next, direction))
            })
            .collect()
    }

    /// Clears the matching wall flags on both `a` and `b`. A no-op unless
    /// the cells are in bounds and orthogonally adjacent.
    pub fn remove_wall_between(&mut self, a: Coord, b: Coord) {
        if !self.contains(a) || !self.contains(b) {
            return;
        }
        let Some(direction) = adjacency(a, b) else {
            return;
        };
        self.cell_mut(a).open(direction);
        self.cell_mut(b).open(direction.opposite());
    }

    /// Opens a single wall without touching the neighbor. Reserved for the
    /// generator's boundary doorways.
    pub(crate) fn open_wall(&mut self, coord: Coord, side: Direction) {
        self.cell_mut(coord).open(side);
    }

    /// Number of open sides on `coord`, 0..=4. Three or more marks a
    /// decision cell: the carving gave the player a genuine choice there.
    pub fn openings_count(&self, coord: Coord) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&side| !self.cell(coord).has_wall(side))
            .count()
    }

    pub fn is_visited(&self, coord: Coord) -> bool {
        self.cell(coord).is_visited()
    }

    pub(crate) fn set_visited(&mut self, coord: Coord) {
        self.cell_mut(coord).visited = true;
    }
}

/// The direction from `a` toward `b` when the two are orthogonally adjacent.
fn adjacency(a: Coord, b: Coord) -> Option<Direction> {
    if a.y == b.y {
        if b.x == a.x + 1 {
            return Some(Direction::Right);
        }
        if a.x == b.x + 1 {
            return Some(Direction::Left);
        }
    }
    if a.x == b.x {
        if b.y == a.y + 1 {
            return Some(Direction::Down);
        }
        if a.y == b.y + 1 {
            return Some(Direction::Up);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(MazeError::InvalidDimension { width: 0, height: 5 })
        );
        assert_eq!(
            Grid::new(5, 0),
            Err(MazeError::InvalidDimension { width: 5, height: 0 })
        );
    }

    #[test]
    fn new_grid_is_fully_walled() {
        let grid = Grid::new(3, 2).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(grid.openings_count(Coord::new(x, y)), 0);
                assert!(!grid.is_visited(Coord::new(x, y)));
            }
        }
    }

    #[test]
    fn walls_removed_in_pairs() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.remove_wall_between(Coord::new(0, 0), Coord::new(1, 0));
        assert!(grid.is_open(Coord::new(0, 0), Direction::Right));
        assert!(grid.is_open(Coord::new(1, 0), Direction::Left));
        assert_eq!(grid.openings_count(Coord::new(0, 0)), 1);
        assert_eq!(grid.openings_count(Coord::new(1, 0)), 1);

        grid.remove_wall_between(Coord::new(1, 1), Coord::new(1, 0));
        assert!(grid.is_open(Coord::new(1, 1), Direction::Up));
        assert!(grid.is_open(Coord::new(1, 0), Direction::Down));
    }

    #[test]
    fn remove_wall_ignores_non_adjacent() {
        let mut grid = Grid::new(3, 3).unwrap();
        let before = grid.clone();
        grid.remove_wall_between(Coord::new(0, 0), Coord::new(2, 0));
        grid.remove_wall_between(Coord::new(0, 0), Coord::new(1, 1));
        grid.remove_wall_between(Coord::new(0, 0), Coord::new(0, 0));
        grid.remove_wall_between(Coord::new(0, 0), Coord::new(5, 5));
        assert_eq!(grid, before);
    }

    #[test]
    fn neighbors_follow_fixed_order() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            grid.neighbors(Coord::new(1, 1)),
            vec![
                (Coord::new(1, 0), Direction::Up),
                (Coord::new(2, 1), Direction::Right),
                (Coord::new(1, 2), Direction::Down),
                (Coord::new(0, 1), Direction::Left),
            ]
        );
        // Corners and edges drop the out-of-bounds sides.
        assert_eq!(grid.neighbors(Coord::new(0, 0)).len(), 2);
        assert_eq!(grid.neighbors(Coord::new(1, 0)).len(), 3);
    }

    #[test]
    fn decision_cell_threshold() {
        let mut grid = Grid::new(3, 3).unwrap();
        let center = Coord::new(1, 1);
        grid.remove_wall_between(center, Coord::new(0, 1));
        grid.remove_wall_between(center, Coord::new(2, 1));
        assert_eq!(grid.openings_count(center), 2);

        grid.remove_wall_between(center, Coord::new(1, 0));
        assert_eq!(grid.openings_count(center), 3);
    }
}
