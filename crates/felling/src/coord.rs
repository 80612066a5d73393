//! Grid coordinates and the neighbor offsets every search routine walks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// World-space block coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset by `(dx, dy, dz)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    #[inline]
    pub const fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    #[inline]
    pub fn step(self, direction: Horizontal) -> Self {
        let (dx, dz) = direction.offset();
        self.offset(dx, 0, dz)
    }

    /// The eight horizontal neighbors, in [`Horizontal::ALL`] order.
    pub fn horizontal_neighbors(self) -> impl Iterator<Item = Coordinate> {
        Horizontal::ALL.into_iter().map(move |dir| self.step(dir))
    }

    /// Cells of the canopy box around a log: `-r..=r` horizontally, `0..=r` upward only.
    pub fn canopy_box(self, radius: i32) -> impl Iterator<Item = Coordinate> {
        (-radius..=radius).flat_map(move |dx| {
            (0..=radius).flat_map(move |dy| {
                (-radius..=radius).map(move |dz| self.offset(dx, dy, dz))
            })
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Horizontal compass direction. `+x` is east, `+z` is south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizontal {
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
}

impl Horizontal {
    /// Scan order used for branch candidates and probes. Changing it changes which
    /// branch claims a shared log first.
    pub const ALL: [Horizontal; 8] = [
        Horizontal::East,
        Horizontal::SouthEast,
        Horizontal::South,
        Horizontal::SouthWest,
        Horizontal::West,
        Horizontal::NorthWest,
        Horizontal::North,
        Horizontal::NorthEast,
    ];

    /// `(dx, dz)` offset of this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Horizontal::East => (1, 0),
            Horizontal::SouthEast => (1, 1),
            Horizontal::South => (0, 1),
            Horizontal::SouthWest => (-1, 1),
            Horizontal::West => (-1, 0),
            Horizontal::NorthWest => (-1, -1),
            Horizontal::North => (0, -1),
            Horizontal::NorthEast => (1, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn horizontal_neighbors_skip_vertical_axis() {
        let origin = Coordinate::new(3, 10, -2);
        let neighbors: Vec<_> = origin.horizontal_neighbors().collect();
        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.iter().all(|n| n.y == origin.y && *n != origin));

        let unique: HashSet<_> = neighbors.iter().copied().collect();
        assert_eq!(unique.len(), 8);
        assert_eq!(neighbors[0], Coordinate::new(4, 10, -2));
        assert_eq!(neighbors[2], Coordinate::new(3, 10, -1));
    }

    #[test]
    fn canopy_box_is_upward_only() {
        let origin = Coordinate::new(0, 5, 0);
        let cells: Vec<_> = origin.canopy_box(1).collect();
        assert_eq!(cells.len(), 3 * 2 * 3);
        assert!(cells.iter().all(|c| c.y == 5 || c.y == 6));
        assert!(cells.contains(&origin));
        assert!(cells.contains(&Coordinate::new(-1, 6, 1)));
    }

    #[test]
    fn display_matches_tuple_form() {
        assert_eq!(Coordinate::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }
}
