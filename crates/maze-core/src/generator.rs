use crate::grid::Grid;
use crate::{Coord, Direction, Doorway, MazeConfig, MazeError};

/// Smallest cell edge a renderer can draw a border inside.
pub const MIN_CELL_SIZE: u32 = 2;

/// Perfect-maze generator.
///
/// Carves a spanning tree over the grid graph with a randomized depth-first
/// backtracker rooted at the exit cell, then opens the entrance and exit
/// boundary walls. Every cell ends up reachable and exactly one simple path
/// connects any two cells, which is what makes the solved route unique.
pub struct Generator {
    config: MazeConfig,
    rng: SimpleRng,
}

impl Generator {
    /// Create a generator after validating `config`. A failed validation
    /// reports [`MazeError`] before anything is allocated or mutated.
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        validate(&config)?;
        Ok(Self {
            config,
            rng: SimpleRng::new(),
        })
    }

    /// Create a generator with a specific seed for reproducible mazes.
    pub fn with_seed(config: MazeConfig, seed: u64) -> Result<Self, MazeError> {
        validate(&config)?;
        Ok(Self {
            config,
            rng: SimpleRng::with_seed(seed),
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Carve a fresh maze. Each call produces an independent grid; with an
    /// unseeded generator no two calls are required to agree.
    pub fn generate(&mut self) -> Result<Grid, MazeError> {
        let mut grid = Grid::new(self.config.width, self.config.height)?;
        self.carve(&mut grid);
        self.install_doors(&mut grid);
        Ok(grid)
    }

    /// Depth-first backtracking carve rooted at the exit cell.
    ///
    /// An explicit frame stack stands in for recursion so a 200x200 maze
    /// cannot overflow, while keeping the recursive traversal semantics:
    /// each cell's in-bounds neighbors are shuffled once, the walk descends
    /// into the first neighbor still uncarved at that moment, and the
    /// remaining neighbors are retried when the walk backtracks.
    fn carve(&mut self, grid: &mut Grid) {
        let mut carved = vec![false; grid.width() * grid.height()];
        let root = self.config.exit.cell;
        carved[grid.index(root)] = true;

        let mut neighbors = grid.neighbors(root);
        self.rng.shuffle(&mut neighbors);
        let mut stack = vec![Frame {
            cell: root,
            neighbors,
            cursor: 0,
        }];

        while !stack.is_empty() {
            let top = stack.len() - 1;
            let mut next = None;
            {
                let frame = &mut stack[top];
                while frame.cursor < frame.neighbors.len() {
                    let (candidate, _) = frame.neighbors[frame.cursor];
                    frame.cursor += 1;
                    if !carved[grid.index(candidate)] {
                        next = Some((frame.cell, candidate));
                        break;
                    }
                }
            }

            match next {
                Some((from, to)) => {
                    grid.remove_wall_between(from, to);
                    carved[grid.index(to)] = true;
                    let mut neighbors = grid.neighbors(to);
                    self.rng.shuffle(&mut neighbors);
                    stack.push(Frame {
                        cell: to,
                        neighbors,
                        cursor: 0,
                    });
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Open the two configured boundary walls. These are the only walls on
    /// the outer boundary that are ever open.
    fn install_doors(&self, grid: &mut Grid) {
        grid.open_wall(self.config.entrance.cell, self.config.entrance.side);
        grid.open_wall(self.config.exit.cell, self.config.exit.side);
    }
}

struct Frame {
    cell: Coord,
    neighbors: Vec<(Coord, Direction)>,
    cursor: usize,
}

fn validate(config: &MazeConfig) -> Result<(), MazeError> {
    if config.width == 0 || config.height == 0 {
        return Err(MazeError::InvalidDimension {
            width: config.width,
            height: config.height,
        });
    }
    if config.cell_size < MIN_CELL_SIZE {
        return Err(MazeError::InvalidConfiguration(format!(
            "cell size {} is below the minimum of {}",
            config.cell_size, MIN_CELL_SIZE
        )));
    }
    if config.border == 0 {
        return Err(MazeError::InvalidConfiguration(
            "border must be at least 1".to_string(),
        ));
    }
    if config.border >= config.cell_size {
        return Err(MazeError::InvalidConfiguration(format!(
            "border {} must be smaller than cell size {}",
            config.border, config.cell_size
        )));
    }
    if config.entrance.cell == config.exit.cell {
        return Err(MazeError::InvalidConfiguration(format!(
            "entrance and exit occupy the same cell {}",
            config.entrance.cell
        )));
    }
    validate_doorway(config, config.entrance, "entrance")?;
    validate_doorway(config, config.exit, "exit")?;
    Ok(())
}

fn validate_doorway(config: &MazeConfig, doorway: Doorway, role: &str) -> Result<(), MazeError> {
    let cell = doorway.cell;
    if cell.x >= config.width || cell.y >= config.height {
        return Err(MazeError::InvalidConfiguration(format!(
            "{role} cell {} is outside the {}x{} grid",
            cell, config.width, config.height
        )));
    }
    let outward = match doorway.side {
        Direction::Up => cell.y == 0,
        Direction::Right => cell.x == config.width - 1,
        Direction::Down => cell.y == config.height - 1,
        Direction::Left => cell.x == 0,
    };
    if !outward {
        return Err(MazeError::InvalidConfiguration(format!(
            "{role} side {:?} of cell {} does not face the grid boundary",
            doorway.side, cell
        )));
    }
    Ok(())
}

/// Small PCG-style PRNG so the engine needs no RNG dependency and keeps
/// working on wasm through `getrandom`.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: a static counter still keeps generations distinct.
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        let seed = u64::from_le_bytes(seed_bytes);
        Self::with_seed(seed)
    }

    fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform value in `0..bound`. Rejection sampling instead of a bare
    /// modulo keeps every shuffle permutation equally likely.
    fn next_usize(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0 && bound <= u32::MAX as usize);
        let bound = bound as u32;
        let zone = (u32::MAX / bound) * bound;
        loop {
            let value = self.next_u32();
            if value < zone {
                return (value % bound) as usize;
            }
        }
    }

    /// Unbiased Fisher-Yates shuffle.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_usize(i + 1);
            slice.swap(i, j);
        }
    }
}
