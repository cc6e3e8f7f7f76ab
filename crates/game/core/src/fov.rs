//! Field of view by recursive shadowcasting.
//!
//! The area around the origin is split into eight octants. Each octant is
//! scanned row by row moving away from the origin while a slope interval
//! `[start, end]` tracks the directions that are still unobstructed. A
//! blocking cell narrows the interval for the rows behind it; when a blocked
//! run ends partway through a row, the part before it is handed to a
//! recursive scan and the current scan continues with the narrowed interval.
//!
//! The algorithm knows nothing about tiles: callers provide a blocking
//! predicate and a visit callback. Points on octant boundaries are reached
//! from two octants, so `visit` may see the same point more than once; use
//! [`visible_points`] when a de-duplicated set is needed.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::geometry::Point;

/// Coordinate transforms `(xx, xy, yx, yy)` mapping an octant's
/// `(col, row)` frame onto grid offsets.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// Visits every point within `radius` of `origin` that has an unobstructed
/// line of sight to it.
///
/// The origin itself is always visited first. Blocking points are visited
/// (walls are visible) but hide what lies behind them. A point is inside the
/// radius when its squared Euclidean distance is at most `radius²`.
pub fn compute_fov<B, V>(origin: Point, is_blocking: B, visit: V, radius: u32)
where
    B: FnMut(Point) -> bool,
    V: FnMut(Point),
{
    let mut caster = Shadowcaster {
        origin,
        radius: i64::from(radius),
        is_blocking,
        visit,
    };

    (caster.visit)(origin);

    for octant in OCTANTS {
        caster.cast(octant, 1, Slope::ONE, Slope::ZERO);
    }
}

/// De-duplicated set of points visible from `origin`.
pub fn visible_points<B>(origin: Point, is_blocking: B, radius: u32) -> BTreeSet<Point>
where
    B: FnMut(Point) -> bool,
{
    let mut visible = BTreeSet::new();
    compute_fov(
        origin,
        is_blocking,
        |point| {
            visible.insert(point);
        },
        radius,
    );
    visible
}

/// Exact rational slope `num / den` with a positive denominator.
#[derive(Clone, Copy, Debug)]
struct Slope {
    num: i64,
    den: i64,
}

impl Slope {
    const ONE: Self = Self { num: 1, den: 1 };
    const ZERO: Self = Self { num: 0, den: 1 };

    /// Slope through the far-left corner of cell `(col, row)`, measured from
    /// the origin cell's center.
    fn left_edge(col: i64, row: i64) -> Self {
        Self {
            num: 2 * col + 1,
            den: 2 * row - 1,
        }
    }

    /// Slope through the near-right corner of cell `(col, row)`.
    fn right_edge(col: i64, row: i64) -> Self {
        Self {
            num: 2 * col - 1,
            den: 2 * row + 1,
        }
    }
}

impl PartialEq for Slope {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slope {}

impl PartialOrd for Slope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slope {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying keeps the order.
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

struct Shadowcaster<B, V> {
    origin: Point,
    radius: i64,
    is_blocking: B,
    visit: V,
}

impl<B, V> Shadowcaster<B, V>
where
    B: FnMut(Point) -> bool,
    V: FnMut(Point),
{
    fn cast(
        &mut self,
        (xx, xy, yx, yy): (i32, i32, i32, i32),
        first_row: i64,
        mut start: Slope,
        end: Slope,
    ) {
        if start < end {
            return;
        }

        let radius_squared = self.radius * self.radius;
        let mut next_start = start;

        for row in first_row..=self.radius {
            let mut blocked = false;

            // Cells run from the octant's diagonal (col == row) to its axis.
            for col in (0..=row).rev() {
                let left = Slope::left_edge(col, row);
                let right = Slope::right_edge(col, row);

                if start < right {
                    continue;
                }
                if end > left {
                    break;
                }

                let (dx, dy) = (-col, -row);
                // Cells beyond the i32 range are opaque and never visited.
                let point = Point::from_wide(
                    i64::from(self.origin.x) + dx * i64::from(xx) + dy * i64::from(xy),
                    i64::from(self.origin.y) + dx * i64::from(yx) + dy * i64::from(yy),
                );

                if let Some(point) = point.filter(|_| col * col + row * row <= radius_squared) {
                    (self.visit)(point);
                }

                let is_blocking = point.is_none_or(|point| (self.is_blocking)(point));
                if blocked {
                    if is_blocking {
                        next_start = right;
                    } else {
                        blocked = false;
                        start = next_start;
                    }
                } else if is_blocking && row < self.radius {
                    blocked = true;
                    self.cast((xx, xy, yx, yy), row + 1, start, left);
                    next_start = right;
                }
            }

            if blocked {
                break;
            }
        }
    }
}
