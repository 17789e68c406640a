//! **labyrinth** is a maze carving library: randomized depth-first
//! backtracking over a doubled-coordinate wall grid, with optional
//! boundary exit carving.

pub mod cells;
pub mod exits;
pub mod generators;
pub mod grid;
pub mod grids;
pub mod units;
