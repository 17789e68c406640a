use crate::cells::{Cell, CellSmallVec};
use crate::units::MazeSize;

use fnv::FnvHasher;
use itertools::Itertools;
use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::visit::EdgeRef;
use petgraph::{Graph, Undirected};
use std::cmp;
use std::collections::HashSet;
use std::error;
use std::fmt;
use std::hash::BuildHasherDefault;

type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    /// Generation was asked to start from a cell outside the maze area.
    InvalidStartCell(Cell),
    /// A wall was requested between two cells that are not lattice
    /// neighbours. A caller/integration bug, not a runtime condition.
    InvalidAdjacency(Cell, Cell),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::InvalidStartCell(cell) => {
                write!(f, "start cell ({}, {}) is outside the maze area", cell.x, cell.z)
            }
            MazeError::InvalidAdjacency(a, b) => write!(
                f,
                "no wall exists between ({}, {}) and ({}, {})",
                a.x, a.z, b.x, b.z
            ),
        }
    }
}

impl error::Error for MazeError {}

/// Key for one wall segment, order-independent in the cell pair that named
/// it. Only meaningful for the grid that issued it.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct WallId<GridIndexType: IndexType>(graph::EdgeIndex<GridIndexType>);

/// Wall and visited state for a `maze_size` x `maze_size` doubled lattice.
///
/// Every lattice location in `[0, maze_size]` on both axes is a graph node
/// and every unordered pair of locations exactly 2 apart along one axis has
/// exactly one edge, created closed. Carving a passage flips the edge's
/// `open` weight; the edges themselves are never added or removed after
/// construction, so wall lookups cannot observe a missing entry.
pub struct MazeGrid<GridIndexType: IndexType> {
    graph: Graph<(), bool, Undirected, GridIndexType>,
    maze_size: MazeSize,
    visited: FnvHashSet<Cell>,
}

impl<GridIndexType: IndexType> fmt::Debug for MazeGrid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "MazeGrid :: maze_size: {:?}, walls: {}, open: {}, visited: {}",
            self.maze_size,
            self.walls_count(),
            self.open_walls_count(),
            self.visited_count()
        )
    }
}

impl<GridIndexType: IndexType> MazeGrid<GridIndexType> {
    pub fn new(maze_size: MazeSize) -> MazeGrid<GridIndexType> {
        let n = cmp::max(maze_size.0, 0);
        let lattice = (n + 1) as usize;
        let nodes_count = lattice * lattice;
        let edges_count = if n >= 2 {
            2 * lattice * (n - 1) as usize
        } else {
            0
        };

        let mut grid = MazeGrid {
            graph: Graph::with_capacity(nodes_count, edges_count),
            maze_size: MazeSize(n),
            visited: HashSet::with_capacity_and_hasher(nodes_count, Default::default()),
        };
        for _ in 0..nodes_count {
            let _ = grid.graph.add_node(());
        }

        // One closed wall per 2-apart pair, each pair added exactly once.
        for z in 0..=n {
            for x in 0..=n {
                let here = grid
                    .node_index(Cell::new(x, z))
                    .expect("lattice coordinate must be a node");
                if x + 2 <= n {
                    let east = grid
                        .node_index(Cell::new(x + 2, z))
                        .expect("lattice coordinate must be a node");
                    let _ = grid.graph.add_edge(here, east, false);
                }
                if z + 2 <= n {
                    let north = grid
                        .node_index(Cell::new(x, z + 2))
                        .expect("lattice coordinate must be a node");
                    let _ = grid.graph.add_edge(here, north, false);
                }
            }
        }

        grid
    }

    #[inline]
    pub fn maze_size(&self) -> MazeSize {
        self.maze_size
    }

    /// Total lattice locations, `(maze_size + 1)^2`.
    #[inline]
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn walls_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn open_walls_count(&self) -> usize {
        self.graph
            .edge_references()
            .filter(|edge| *edge.weight())
            .count()
    }

    /// Is the cell strictly inside the maze area? Cells on the 0 or
    /// `maze_size` boundary lines are outside; only `carve_exit` touches
    /// those.
    #[inline]
    pub fn is_in_maze_area(&self, cell: Cell) -> bool {
        let MazeSize(n) = self.maze_size;
        cell.x > 0 && cell.x < n && cell.z > 0 && cell.z < n
    }

    #[inline]
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    #[inline]
    pub fn mark_visited(&mut self, cell: Cell) {
        self.visited.insert(cell);
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Forget all visited marks. Only sensible at the start of a fresh
    /// generation run; carved walls are untouched.
    pub fn clear_visited(&mut self) {
        self.visited.clear();
    }

    /// The four adjacent lattice locations in the fixed `+z, +x, -x, -z`
    /// order, unfiltered.
    pub fn neighbours(&self, cell: Cell) -> CellSmallVec {
        cell.neighbours()
    }

    /// Adjacent cells inside the maze area and not yet visited, in the
    /// fixed neighbour order.
    pub fn unvisited_neighbours(&self, cell: Cell) -> CellSmallVec {
        cell.neighbours()
            .iter()
            .cloned()
            .filter(|&neighbour| self.is_in_maze_area(neighbour) && !self.is_visited(neighbour))
            .collect()
    }

    /// The wall segment between two adjacent cells, in either argument
    /// order.
    pub fn wall_between(&self, a: Cell, b: Cell) -> Result<WallId<GridIndexType>, MazeError> {
        if !a.is_adjacent_to(b) {
            return Err(MazeError::InvalidAdjacency(a, b));
        }
        let a_index = self.node_index(a).ok_or(MazeError::InvalidAdjacency(a, b))?;
        let b_index = self.node_index(b).ok_or(MazeError::InvalidAdjacency(a, b))?;
        self.graph
            .find_edge(a_index, b_index)
            .map(WallId)
            .ok_or(MazeError::InvalidAdjacency(a, b))
    }

    /// Carve the wall open. Opening an already open wall changes nothing.
    pub fn open_wall(&mut self, wall: WallId<GridIndexType>) {
        if let Some(open) = self.graph.edge_weight_mut(wall.0) {
            *open = true;
        }
    }

    pub fn is_open(&self, wall: WallId<GridIndexType>) -> bool {
        self.graph.edge_weight(wall.0).copied().unwrap_or(false)
    }

    /// Are two cells connected by a carved passage?
    pub fn is_linked(&self, a: Cell, b: Cell) -> bool {
        self.wall_between(a, b)
            .map(|wall| self.is_open(wall))
            .unwrap_or(false)
    }

    /// All carved walls as cell pairs, each normalized smaller-cell-first
    /// and the whole list sorted, so two identically carved grids compare
    /// equal.
    pub fn open_walls(&self) -> Vec<(Cell, Cell)> {
        self.graph
            .edge_references()
            .filter(|edge| *edge.weight())
            .map(|edge| {
                let a = self.index_to_cell(edge.source().index());
                let b = self.index_to_cell(edge.target().index());
                (cmp::min(a, b), cmp::max(a, b))
            })
            .sorted()
            .collect()
    }

    /// Row-major iteration over every lattice location in
    /// `[0, maze_size]` on both axes.
    pub fn iter(&self) -> CellIter {
        let lattice = (self.maze_size.0 + 1) as usize;
        CellIter {
            current_cell_number: 0,
            lattice_width: lattice,
            cells_count: lattice * lattice,
        }
    }

    /// The odd-coordinate cells strictly inside the maze area - the
    /// locations a generation run can visit.
    pub fn passage_cells(&self) -> impl Iterator<Item = Cell> {
        let MazeSize(n) = self.maze_size;
        self.iter()
            .filter(move |cell| cell.x % 2 == 1 && cell.z % 2 == 1 && cell.x < n && cell.z < n)
    }

    fn node_index(&self, cell: Cell) -> Option<graph::NodeIndex<GridIndexType>> {
        let MazeSize(n) = self.maze_size;
        if cell.x < 0 || cell.z < 0 || cell.x > n || cell.z > n {
            return None;
        }
        let lattice = (n + 1) as usize;
        Some(graph::NodeIndex::new(
            cell.z as usize * lattice + cell.x as usize,
        ))
    }

    fn index_to_cell(&self, node_index: usize) -> Cell {
        let lattice = (self.maze_size.0 + 1) as usize;
        Cell::new((node_index % lattice) as i32, (node_index / lattice) as i32)
    }
}

impl<'a, GridIndexType: IndexType> IntoIterator for &'a MazeGrid<GridIndexType> {
    type Item = Cell;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<GridIndexType: IndexType> fmt::Display for MazeGrid<GridIndexType> {
    /// One character per lattice location: `#` for intact walls and
    /// junctions, space for passage cells and carved walls. Rows print
    /// from `z = maze_size` down so that +z points up the page.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL: char = '#';
        const OPEN: char = ' ';

        let lattice = (self.maze_size.0 + 1) as usize;
        let mut canvas = vec![vec![WALL; lattice]; lattice];

        for cell in self.passage_cells() {
            canvas[cell.z as usize][cell.x as usize] = OPEN;
        }
        for (a, b) in self.open_walls() {
            let mid = a.midpoint(b);
            for location in &[a, mid, b] {
                canvas[location.z as usize][location.x as usize] = OPEN;
            }
        }

        for row in canvas.iter().rev() {
            for glyph in row {
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    lattice_width: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Cell;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let x = (self.current_cell_number % self.lattice_width) as i32;
            let z = (self.current_cell_number / self.lattice_width) as i32;
            self.current_cell_number += 1;
            Some(Cell::new(x, z))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
