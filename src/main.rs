use docopt::Docopt;
use fnv::FnvHashSet;
use labyrinth::{
    cells::Cell,
    exits, generators,
    grids::{large_maze_grid, LargeMazeGrid},
    units::{MazeSize, StepLimit},
};
use rand::{rngs::StdRng, SeedableRng};
use serde_derive::Deserialize;
use std::{fs::File, io, io::prelude::*};

const USAGE: &str = "Labyrinth

Usage:
    labyrinth_driver -h | --help
    labyrinth_driver [--maze-size=<n>] [--start-x=<x> --start-z=<z>] [--step-limit=<n>] [--seed=<s>] [--carve-exit] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help            Show this screen.
    --maze-size=<n>      Outer coordinate bound of the doubled lattice; passage cells sit at the odd interior coordinates [default: 10].
    --start-x=<x>        x coordinate of the carving start cell [default: 1].
    --start-z=<z>        z coordinate of the carving start cell [default: 1].
    --step-limit=<n>     Global cap on depth-first descents for the whole run [default: 1000].
    --seed=<s>           Seed the random source for a reproducible maze. Entropy-seeded when absent.
    --carve-exit         Puncture the boundary at the (maze-size, maze-size) corner.
    --text-out=<path>    Write the text rendering of the maze to a file instead of stdout.
    --save-edges=<path>  Save the carved passages to a text file: line 1 is 'cells walls', each further line one open wall as 'x1 z1 x2 z2'.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_maze_size: i32,
    flag_start_x: i32,
    flag_start_z: i32,
    flag_step_limit: usize,
    flag_seed: Option<u64>,
    flag_carve_exit: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

// We'll put our errors in an `errors` module; everything else in this file
// uses `errors::*` for the types the `error_chain!` macro creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            Maze(::labyrinth::grid::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    // Help and version requests surface as non-fatal docopt errors; `exit`
    // prints the usage and terminates with status 0 rather than routing them
    // through the error chain as failures.
    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let maze_size = MazeSize(args.flag_maze_size);
    let mut maze_grid = large_maze_grid(maze_size)
        .ok_or("--maze-size must be at least 2 and fit the grid index type")?;

    let mut rng: StdRng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start_cell = Cell::new(args.flag_start_x, args.flag_start_z);
    let result = generators::recursive_backtracker(
        &mut maze_grid,
        start_cell,
        StepLimit(args.flag_step_limit),
        &mut rng,
    )?;

    if args.flag_carve_exit {
        exits::carve_exit(&mut maze_grid, Cell::new(maze_size.0, maze_size.0))?;
    }

    if args.flag_text_out.is_empty() {
        println!("{}", maze_grid);
    } else {
        write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        save_open_walls(&maze_grid, &args.flag_save_edges)?;
    }

    println!(
        "cells visited: {}, walls opened: {}",
        result.cells_visited, result.walls_opened
    );

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_open_walls(maze_grid: &LargeMazeGrid, file_path: &str) -> Result<()> {
    let graph_data = format_open_walls(&maze_grid.open_walls());

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write carved walls to text file {}", file_path))?;

    Ok(())
}

// The header counts the distinct cells the edge lines name, not just the
// generation-visited cells - a carved exit references boundary cells no
// generation run ever visits.
fn format_open_walls(open_walls: &[(Cell, Cell)]) -> String {
    let distinct_cells: FnvHashSet<Cell> = open_walls.iter().flat_map(|&(a, b)| [a, b]).collect();

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", distinct_cells.len(), open_walls.len()));
    for (a, b) in open_walls {
        graph_data.push_str(&format!("{} {} {} {}\n", a.x, a.z, b.x, b.z));
    }
    graph_data
}
