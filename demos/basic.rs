//! Basic example of using the maze engine

use maze_core::{Coord, Direction, Generator, Grid, MazeConfig, Solver};

fn main() {
    let config = MazeConfig::default();
    println!(
        "Generating a {}x{} maze...\n",
        config.width, config.height
    );

    let mut generator = match Generator::new(config.clone()) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("Bad configuration: {}", e);
            return;
        }
    };

    let grid = match generator.generate() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            return;
        }
    };
    print_grid(&grid);

    // Solve it
    let solver = Solver::new();
    match solver.solve(&grid, config.entrance.cell, config.exit.cell) {
        Ok(solution) => {
            println!("\nShortest route: {} steps", solution.steps());

            // The stored path runs exit-to-entrance; replay it the way a
            // player would walk it.
            print!("Route: ");
            for (i, coord) in solution.path().iter().rev().enumerate() {
                if i > 0 {
                    print!(" -> ");
                }
                print!("{}", coord);
            }
            println!();
        }
        Err(e) => {
            println!("No solution found (this shouldn't happen for a generated maze!): {}", e);
        }
    }
}

/// Dump the maze as ASCII, one `+---+` border row per cell row.
fn print_grid(grid: &Grid) {
    for y in 0..grid.height() {
        let mut top = String::new();
        let mut mid = String::new();
        for x in 0..grid.width() {
            let coord = Coord::new(x, y);
            top.push('+');
            top.push_str(if grid.is_open(coord, Direction::Up) { "   " } else { "---" });
            mid.push(if grid.is_open(coord, Direction::Left) { ' ' } else { '|' });
            mid.push_str("   ");
        }
        top.push('+');
        mid.push(if grid.is_open(Coord::new(grid.width() - 1, y), Direction::Right) {
            ' '
        } else {
            '|'
        });
        println!("{}", top);
        println!("{}", mid);
    }
    let mut bottom = String::new();
    for x in 0..grid.width() {
        let coord = Coord::new(x, grid.height() - 1);
        bottom.push('+');
        bottom.push_str(if grid.is_open(coord, Direction::Down) { "   " } else { "---" });
    }
    bottom.push('+');
    println!("{}", bottom);
}
