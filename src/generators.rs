use crate::cells::Cell;
use crate::grid::{IndexType, MazeError, MazeGrid};
use crate::units::StepLimit;

use rand::Rng;

/// What a generation run did to the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GenerationResult {
    /// Cells incorporated into the carved tree, the start cell included.
    pub cells_visited: usize,
    /// Walls opened; always `cells_visited - 1` for a non-empty run.
    pub walls_opened: usize,
}

/// Carve a maze with the randomized recursive-backtracker algorithm,
/// starting from `start_cell`.
///
/// Depth-first: descend into a randomly chosen unvisited neighbour, and on
/// exhausting a cell's neighbours resume its parent. The recursion is an
/// explicit stack of cells, so deep mazes cannot overflow the call stack.
///
/// `step_limit` caps the number of descents for the whole run. The counter
/// is global, not per-branch: once spent, no further descent ever happens
/// anywhere, though the cells already on the stack still carve walls to
/// their remaining unvisited neighbours while backtracking out. Large
/// portions of a big grid can stay unreached under a small limit; the
/// limit is the only early-termination control and truncates depth, not
/// breadth.
///
/// Neighbour candidates are always listed in the fixed `+z, +x, -x, -z`
/// order before the uniform draw, so runs with an identically seeded `rng`
/// carve identical mazes.
///
/// Fails with `InvalidStartCell` if `start_cell` is outside the maze area;
/// nothing is carved in that case. An empty neighbour list is a normal
/// backtrack, never an error.
pub fn recursive_backtracker<GridIndexType, R>(
    grid: &mut MazeGrid<GridIndexType>,
    start_cell: Cell,
    step_limit: StepLimit,
    rng: &mut R,
) -> Result<GenerationResult, MazeError>
where
    GridIndexType: IndexType,
    R: Rng,
{
    if !grid.is_in_maze_area(start_cell) {
        return Err(MazeError::InvalidStartCell(start_cell));
    }

    let StepLimit(step_limit) = step_limit;
    let mut descents = 0;
    let mut cells_visited = 1;
    let mut walls_opened = 0;

    grid.clear_visited();
    grid.mark_visited(start_cell);

    let mut stack = vec![start_cell];
    while let Some(&cell) = stack.last() {
        let unvisited = grid.unvisited_neighbours(cell);
        if unvisited.is_empty() {
            // Backtrack: resume the parent cell.
            stack.pop();
            continue;
        }

        let chosen = unvisited[rng.gen_range(0..unvisited.len())];
        let wall = grid.wall_between(cell, chosen)?;
        grid.open_wall(wall);
        walls_opened += 1;

        // Marking at carve time, not descent time, keeps limit-truncated
        // picks out of later neighbour lists; they stay as leaves.
        grid.mark_visited(chosen);
        cells_visited += 1;

        if descents < step_limit {
            descents += 1;
            stack.push(chosen);
        }
    }

    Ok(GenerationResult {
        cells_visited,
        walls_opened,
    })
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::grids::{small_maze_grid, SmallMazeGrid};
    use crate::units::MazeSize;

    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashSet, VecDeque};

    fn gc(x: i32, z: i32) -> Cell {
        Cell::new(x, z)
    }

    /// Cells reachable from `start` through carved passages.
    fn reachable_cells(grid: &SmallMazeGrid, start: Cell) -> HashSet<Cell> {
        let mut seen: HashSet<Cell> = [start].iter().cloned().collect();
        let mut frontier: VecDeque<Cell> = [start].iter().cloned().collect();
        while let Some(cell) = frontier.pop_front() {
            for neighbour in cell.neighbours() {
                if grid.is_linked(cell, neighbour) && seen.insert(neighbour) {
                    frontier.push_back(neighbour);
                }
            }
        }
        seen
    }

    #[test]
    fn out_of_bounds_start_is_rejected() {
        let mut g = small_maze_grid(MazeSize(6)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let check_rejected = |g: &mut SmallMazeGrid, rng: &mut StdRng, start: Cell| {
            let result = recursive_backtracker(g, start, StepLimit(100), rng);
            assert_eq!(result, Err(MazeError::InvalidStartCell(start)));
        };
        check_rejected(&mut g, &mut rng, gc(0, 0));
        check_rejected(&mut g, &mut rng, gc(6, 6));
        check_rejected(&mut g, &mut rng, gc(-1, 3));
        check_rejected(&mut g, &mut rng, gc(3, 6));

        // A rejected run carves nothing.
        assert_eq!(g.open_walls_count(), 0);
        assert_eq!(g.visited_count(), 0);
    }

    #[test]
    fn carves_a_spanning_tree_of_the_interior() {
        // maze_size 6: passage cells at the odd interior coordinates
        // {1, 3, 5} on each axis, 9 in all.
        let mut g = small_maze_grid(MazeSize(6)).unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        let result =
            recursive_backtracker(&mut g, gc(3, 3), StepLimit(100), &mut rng).unwrap();

        assert_eq!(result.cells_visited, 9);
        assert_eq!(result.walls_opened, 8);
        assert_eq!(g.open_walls_count(), 8);
        assert_eq!(g.visited_count(), 9);

        let reached = reachable_cells(&g, gc(3, 3));
        assert_eq!(reached.len(), 9);
        for cell in g.passage_cells() {
            assert!(reached.contains(&cell));
        }
    }

    #[test]
    fn identical_seeds_carve_identical_mazes() {
        let carve = |seed: u64| {
            let mut g = small_maze_grid(MazeSize(10)).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            recursive_backtracker(&mut g, gc(1, 1), StepLimit(1000), &mut rng).unwrap();
            g.open_walls()
        };
        assert_eq!(carve(7), carve(7));
        assert_eq!(carve(1234), carve(1234));
    }

    #[test]
    fn step_limit_one_descends_exactly_one_cell() {
        let mut g = small_maze_grid(MazeSize(10)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let start = gc(5, 5);

        let result = recursive_backtracker(&mut g, start, StepLimit(1), &mut rng).unwrap();

        // Only the start cell and the single descended-into cell ever run a
        // neighbour loop, so everything visited lies within two passages of
        // the start and still forms a tree.
        assert_eq!(result.walls_opened, result.cells_visited - 1);
        for cell in g.passage_cells().filter(|c| g.is_visited(*c)) {
            let steps = ((cell.x - start.x).abs() + (cell.z - start.z).abs()) / 2;
            assert!(steps <= 2, "cell {:?} is {} passages from start", cell, steps);
        }
        // The start has 4 interior neighbours and the descended cell at
        // most 3 more: never more than 8 cells in total.
        assert!(result.cells_visited <= 8);

        let reached = reachable_cells(&g, start);
        assert_eq!(reached.len(), result.cells_visited);
    }

    #[test]
    fn truncated_runs_stay_acyclic() {
        for limit in &[0, 1, 2, 5, 17] {
            let mut g = small_maze_grid(MazeSize(10)).unwrap();
            let mut rng = StdRng::seed_from_u64(42);
            let result =
                recursive_backtracker(&mut g, gc(1, 1), StepLimit(*limit), &mut rng).unwrap();
            assert_eq!(result.walls_opened, result.cells_visited - 1);
            assert_eq!(g.open_walls_count(), result.walls_opened);
        }
    }

    #[test]
    fn regeneration_restarts_the_visited_set() {
        let mut g = small_maze_grid(MazeSize(6)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        recursive_backtracker(&mut g, gc(3, 3), StepLimit(100), &mut rng).unwrap();
        assert_eq!(g.visited_count(), 9);

        // A second run on the same grid begins with a cleared visited set.
        let result =
            recursive_backtracker(&mut g, gc(1, 1), StepLimit(100), &mut rng).unwrap();
        assert_eq!(result.cells_visited, 9);
        assert_eq!(g.visited_count(), 9);
    }

    #[test]
    fn quickcheck_spanning_tree_property() {
        fn property(size_seed: u8, rng_seed: u64) -> TestResult {
            // Interesting maze sizes only: 2..=11 fits the u8 grid index.
            let maze_size = 2 + (size_seed % 10) as i32;
            let mut g = match small_maze_grid(MazeSize(maze_size)) {
                Some(g) => g,
                None => return TestResult::discard(),
            };
            let passage_count = g.passage_cells().count();
            if passage_count == 0 {
                return TestResult::discard();
            }

            let start = gc(1, 1);
            let mut rng = StdRng::seed_from_u64(rng_seed);
            let result =
                recursive_backtracker(&mut g, start, StepLimit(passage_count + 1), &mut rng)
                    .unwrap();

            let all_visited = result.cells_visited == passage_count;
            let tree_edges = result.walls_opened == result.cells_visited - 1;
            let connected = reachable_cells(&g, start).len() == result.cells_visited;
            TestResult::from_bool(all_visited && tree_edges && connected)
        }
        quickcheck(property as fn(u8, u64) -> TestResult);
    }
}
