use crate::cells::Cell;
use crate::grid::{IndexType, MazeError, MazeGrid};

/// Puncture the boundary at a corner: open the wall between `corner_cell`
/// and each of its two interior-ward neighbours, creating an entrance or
/// exit. For the `(maze_size, maze_size)` corner that is the cell one step
/// down and the cell one step left.
///
/// Deliberately exempt from the strict-interior bounds check - the corner
/// and its neighbours may sit on the boundary lines - and the neighbours
/// need not have been visited by any generation run. Opening an already
/// open wall changes nothing, so repeat calls are harmless.
///
/// The only failure is `InvalidAdjacency` for a `corner_cell` so far off
/// the lattice that no wall entries touch it.
pub fn carve_exit<GridIndexType: IndexType>(
    grid: &mut MazeGrid<GridIndexType>,
    corner_cell: Cell,
) -> Result<(), MazeError> {
    let n = grid.maze_size().0;
    let toward_centre = |coordinate: i32| if 2 * coordinate < n { 2 } else { -2 };

    let horizontal = Cell::new(corner_cell.x + toward_centre(corner_cell.x), corner_cell.z);
    let vertical = Cell::new(corner_cell.x, corner_cell.z + toward_centre(corner_cell.z));

    for neighbour in &[horizontal, vertical] {
        let wall = grid.wall_between(corner_cell, *neighbour)?;
        grid.open_wall(wall);
    }
    Ok(())
}
