//! Block locations and the axis-aligned boxes built from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::region::same_name;

/// A block position in a named world and dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionLocation {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub dimension: String,
    pub world: String,
}

impl RegionLocation {
    pub const OVERWORLD: &'static str = "minecraft:overworld";

    #[must_use]
    pub fn new(
        x: i32,
        y: i32,
        z: i32,
        dimension: impl Into<String>,
        world: impl Into<String>,
    ) -> Self {
        Self {
            x,
            y,
            z,
            dimension: dimension.into(),
            world: world.into(),
        }
    }

    /// True when both locations are in the same world and dimension (case-insensitive).
    #[must_use]
    pub fn same_space(&self, other: &Self) -> bool {
        same_name(&self.world, &other.world) && same_name(&self.dimension, &other.dimension)
    }

    /// Same world and dimension, shifted by the given offsets.
    #[must_use]
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
            dimension: self.dimension.clone(),
            world: self.world.clone(),
        }
    }
}

impl fmt::Display for RegionLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) @ {}/{}",
            self.x, self.y, self.z, self.world, self.dimension
        )
    }
}

/// Inclusive integer box normalized from two arbitrary corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cuboid {
    pub min_x: i32,
    pub min_y: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub max_z: i32,
}

impl Cuboid {
    /// Build from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: &RegionLocation, b: &RegionLocation) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            min_z: a.z.min(b.z),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
            max_z: a.z.max(b.z),
        }
    }

    #[must_use]
    pub const fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= self.min_x
            && x <= self.max_x
            && y >= self.min_y
            && y <= self.max_y
            && z >= self.min_z
            && z <= self.max_z
    }

    /// Number of blocks inside the box.
    #[must_use]
    pub fn volume(&self) -> u64 {
        let span = |min: i32, max: i32| u64::from(max.abs_diff(min)) + 1;
        span(self.min_x, self.max_x) * span(self.min_y, self.max_y) * span(self.min_z, self.max_z)
    }
}

/// Direction a region can be grown in. North is -z, east is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    North,
    South,
    East,
    West,
}

impl Direction {
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Self::Up),
            "down" | "d" => Some(Self::Down),
            "north" | "n" => Some(Self::North),
            "south" | "s" => Some(Self::South),
            "east" | "e" => Some(Self::East),
            "west" | "w" => Some(Self::West),
            _ => None,
        }
    }
}
