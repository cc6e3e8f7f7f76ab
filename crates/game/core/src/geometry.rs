//! Grid coordinates and cardinal directions.
//!
//! Coordinates follow screen orientation: `y` grows downward, so north is
//! `y - 1` and south is `y + 1`.

use std::fmt;
use std::str::FromStr;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point shifted by `(dx, dy)`, or `None` when the result
    /// falls outside the `i32` coordinate range.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Returns the point `distance` steps away in `direction`, or `None`
    /// when that coordinate is not representable.
    pub fn step(self, direction: Direction, distance: u32) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let distance = i64::from(distance);
        Self::from_wide(
            i64::from(self.x) + i64::from(dx) * distance,
            i64::from(self.y) + i64::from(dy) * distance,
        )
    }

    /// Narrows a wide coordinate pair back to grid range.
    pub fn from_wide(x: i64, y: i64) -> Option<Self> {
        Some(Self::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
    }

    /// Squared Euclidean distance, exact in integer arithmetic.
    pub fn distance_squared(self, other: Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Formats as the composite `"x,y"` key.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Error returned when a string is not an `"x,y"` pair.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("expected point as \"x,y\", got {input:?}")]
pub struct ParsePointError {
    input: String,
}

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePointError {
            input: s.to_owned(),
        };
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Self::new(x, y))
    }
}

/// One of the four directions a tile links to its neighbors in.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Neighbor order used when listing a tile's adjacent tiles.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Slot of this direction in a four-element neighbor array.
    pub(crate) const fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::East => 3,
        }
    }
}
