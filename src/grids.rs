use crate::grid::MazeGrid;
use crate::units::MazeSize;

use std::cmp;

pub type SmallMazeGrid = MazeGrid<u8>;
pub type MediumMazeGrid = MazeGrid<u16>;
pub type LargeMazeGrid = MazeGrid<u32>;

pub fn small_maze_grid(maze_size: MazeSize) -> Option<SmallMazeGrid> {
    if grid_fits_index_type(maze_size, u8::MAX as usize) {
        Some(SmallMazeGrid::new(maze_size))
    } else {
        None
    }
}

pub fn medium_maze_grid(maze_size: MazeSize) -> Option<MediumMazeGrid> {
    if grid_fits_index_type(maze_size, u16::MAX as usize) {
        Some(MediumMazeGrid::new(maze_size))
    } else {
        None
    }
}

pub fn large_maze_grid(maze_size: MazeSize) -> Option<LargeMazeGrid> {
    if grid_fits_index_type(maze_size, u32::MAX as usize) {
        Some(LargeMazeGrid::new(maze_size))
    } else {
        None
    }
}

/// Both node and wall counts must stay below the index type's maximum -
/// petgraph reserves the maximum value as its invalid-index sentinel.
fn grid_fits_index_type(maze_size: MazeSize, index_max: usize) -> bool {
    let MazeSize(n) = maze_size;
    if n < 2 {
        return false;
    }
    let lattice = (n + 1) as usize;
    let nodes_count = lattice * lattice;
    let walls_count = 2 * lattice * (n - 1) as usize;
    cmp::max(nodes_count, walls_count) < index_max
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn small_grid_capacity() {
        // maze_size 11 needs 240 wall indices, 12 needs 286: past u8.
        assert!(small_maze_grid(MazeSize(11)).is_some());
        assert!(small_maze_grid(MazeSize(12)).is_none());
    }

    #[test]
    fn degenerate_sizes_are_rejected() {
        assert!(small_maze_grid(MazeSize(1)).is_none());
        assert!(small_maze_grid(MazeSize(0)).is_none());
        assert!(small_maze_grid(MazeSize(-4)).is_none());
        assert!(medium_maze_grid(MazeSize(1)).is_none());
        assert!(large_maze_grid(MazeSize(1)).is_none());
    }

    #[test]
    fn medium_grid_capacity() {
        // Wall indices are the binding limit: 2(n+1)(n-1) for maze_size n.
        assert!(medium_maze_grid(MazeSize(181)).is_some());
        assert!(medium_maze_grid(MazeSize(182)).is_none());
        assert!(large_maze_grid(MazeSize(182)).is_some());
    }
}
