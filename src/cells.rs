use smallvec::SmallVec;

/// A location on the doubled-coordinate maze lattice.
///
/// Passage cells sit at odd `(x, z)` pairs, leaving the even positions free
/// for the wall segments between them, so two cells are adjacent when they
/// are exactly 2 units apart along one axis.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

pub type CellSmallVec = SmallVec<[Cell; 4]>;

/// Offsets to the four adjacent cells, in the fixed order `+z, +x, -x, -z`.
///
/// The order is load-bearing: neighbour candidates are always produced in
/// this sequence, so a seeded rng draws over a stable list and two runs with
/// the same seed carve the same maze.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(0, 2), (2, 0), (-2, 0), (0, -2)];

impl Cell {
    pub fn new(x: i32, z: i32) -> Cell {
        Cell { x, z }
    }

    /// The four adjacent lattice locations, in the fixed offset order.
    ///
    /// No bounds filtering happens here; callers decide what is inside the
    /// maze area.
    pub fn neighbours(&self) -> CellSmallVec {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dx, dz)| Cell::new(self.x + dx, self.z + dz))
            .collect()
    }

    /// Is `other` exactly one wall away: 2 units along a single axis?
    pub fn is_adjacent_to(&self, other: Cell) -> bool {
        let dx = (self.x - other.x).abs();
        let dz = (self.z - other.z).abs();
        (dx, dz) == (2, 0) || (dx, dz) == (0, 2)
    }

    /// The lattice location midway between two adjacent cells - where the
    /// wall segment between them sits.
    pub fn midpoint(&self, other: Cell) -> Cell {
        Cell::new((self.x + other.x) / 2, (self.z + other.z) / 2)
    }
}

impl From<(i32, i32)> for Cell {
    fn from(x_z_pair: (i32, i32)) -> Cell {
        Cell::new(x_z_pair.0, x_z_pair.1)
    }
}
