//! Shared region types for RegionGuard.
//!
//! No storage, server or permission dependencies: regions are plain data here.
//! - **[location](location)** — block coordinates with world and dimension
//! - **[keys](keys)** — closed flag/interact/explosion/vehicle/mob enumerations
//! - **[table](table)** — per-region tables keyed by those enumerations
//! - **[member](member)** — region members and roles
//! - **[region](region)** — local and global regions

pub mod keys;
pub mod location;
pub mod member;
pub mod region;
pub mod table;

pub use keys::{
    Explosion, ExplosionRule, Flag, Interact, Mob, MobRule, TableKey, Vehicle, VehicleRule,
    strip_namespace,
};
pub use location::{Cuboid, Direction, RegionLocation};
pub use member::{RegionMember, RegionRole};
pub use region::{GlobalRegion, LocalRegion, Region, RegionCommon, RegionKind, same_name};
pub use table::FlagTable;
