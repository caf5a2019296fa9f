//! Map-space geometry shared by the executors.
//!
//! Two coordinate flavors exist: [`FPoint`] for continuous map coordinates
//! (caster positions, aim points, hazard origins) and [`Point`] for whole
//! tiles (collision queries, spawn placement, loot drops).

use core::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

/// Continuous map position in map units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FPoint {
    pub x: f32,
    pub y: f32,
}

impl FPoint {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the tile containing this point.
    pub fn floor(self) -> Point {
        Point::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    pub fn distance(self, other: FPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Whole-tile map position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of the tile in map units.
    pub fn center(self) -> FPoint {
        FPoint::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}

/// One of the eight rows of a directional sprite sheet.
///
/// Row 0 faces south-west and the rows advance clockwise in 45° steps, so
/// row 5 faces east (+x) and row 7 faces south (+y).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction(u8);

impl Direction {
    pub const COUNT: u8 = 8;

    pub fn new(row: u8) -> Self {
        Self(row % Self::COUNT)
    }

    pub fn row(self) -> u8 {
        self.0
    }

    /// Direction a caster at `from` faces when looking at `to`.
    pub fn between(from: FPoint, to: FPoint) -> Self {
        let octant = theta(from, to) / FRAC_PI_4;
        let rounded = if octant < 0.0 {
            (octant - 0.5).ceil()
        } else {
            (octant + 0.5).floor()
        };
        let row = (rounded as i32 + 5).rem_euclid(Self::COUNT as i32);
        Self(row as u8)
    }
}

/// Polar angle (radians) of the vector from `from` to `to`.
///
/// A zero-length vector yields `-π/2`.
pub fn theta(from: FPoint, to: FPoint) -> f32 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 {
        if dy > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 }
    } else {
        dy.atan2(dx)
    }
}

/// Moves `distance` units from `pos` along one of the eight directions.
pub fn step_towards(pos: FPoint, direction: Direction, distance: f32) -> FPoint {
    let straight = distance;
    let diagonal = distance * FRAC_1_SQRT_2;
    let (dx, dy) = match direction.row() {
        0 => (-diagonal, diagonal),
        1 => (-straight, 0.0),
        2 => (-diagonal, -diagonal),
        3 => (0.0, -straight),
        4 => (diagonal, -diagonal),
        5 => (straight, 0.0),
        6 => (diagonal, diagonal),
        _ => (0.0, straight),
    };
    FPoint::new(pos.x + dx, pos.y + dy)
}

/// Clamps `target` into the axis-aligned box of half-size `range` around
/// `source`. A non-positive or non-finite range leaves the target untouched.
pub fn limit_range(range: f32, source: FPoint, target: FPoint) -> FPoint {
    if !range.is_finite() || range <= 0.0 {
        return target;
    }
    FPoint::new(
        target.x.clamp(source.x - range, source.x + range),
        target.y.clamp(source.y - range, source.y + range),
    )
}
