//! Local and global regions.
//!
//! [`Region`] is a closed variant type: code that needs bounds, priority or
//! members goes through [`Region::as_local`] and handles the global case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::keys::{Explosion, ExplosionRule, Flag, Interact, Mob, MobRule, Vehicle, VehicleRule};
use crate::location::{Cuboid, Direction, RegionLocation};
use crate::member::RegionMember;
use crate::table::FlagTable;

pub const DEFAULT_GAMEMODE: &str = "notset";

fn default_gamemode() -> String {
    DEFAULT_GAMEMODE.to_owned()
}

/// Region and world names compare case-insensitively, Unicode included.
#[must_use]
pub fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Local,
    Global,
}

impl std::fmt::Display for RegionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "LOCAL"),
            Self::Global => write!(f, "GLOBAL"),
        }
    }
}

/// State shared by both region variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCommon {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "gamemode", default = "default_gamemode")]
    pub game_mode: String,
    #[serde(default)]
    pub flags: FlagTable<Flag>,
    #[serde(default)]
    pub interacts: FlagTable<Interact>,
    #[serde(default)]
    pub explosions: FlagTable<Explosion>,
    #[serde(default)]
    pub vehicles: FlagTable<Vehicle>,
    #[serde(default)]
    pub mobs: FlagTable<Mob>,
    /// Commands usable inside the region, keyed by root command name.
    #[serde(default)]
    pub commands: BTreeMap<String, bool>,
}

impl RegionCommon {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            game_mode: default_gamemode(),
            flags: FlagTable::new(),
            interacts: FlagTable::new(),
            explosions: FlagTable::new(),
            vehicles: FlagTable::new(),
            mobs: FlagTable::new(),
            commands: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn flag(&self, flag: Flag) -> bool {
        self.flags.get(flag)
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.flags.set(flag, value);
    }

    #[must_use]
    pub fn interact(&self, interact: Interact) -> bool {
        self.interacts.get(interact)
    }

    pub fn set_interact(&mut self, interact: Interact, value: bool) {
        self.interacts.set(interact, value);
    }

    #[must_use]
    pub fn explosion(&self, explosion: Explosion) -> ExplosionRule {
        self.explosions.get(explosion)
    }

    pub fn set_explosion_damage(&mut self, explosion: Explosion, value: bool) {
        self.explosions.get_mut(explosion).damage = value;
    }

    pub fn set_explosion_destroy(&mut self, explosion: Explosion, value: bool) {
        self.explosions.get_mut(explosion).destroy = value;
    }

    #[must_use]
    pub fn vehicle(&self, vehicle: Vehicle) -> VehicleRule {
        self.vehicles.get(vehicle)
    }

    pub fn set_vehicle_place(&mut self, vehicle: Vehicle, value: bool) {
        self.vehicles.get_mut(vehicle).place = value;
    }

    pub fn set_vehicle_destroy(&mut self, vehicle: Vehicle, value: bool) {
        self.vehicles.get_mut(vehicle).destroy = value;
    }

    #[must_use]
    pub fn mob(&self, mob: Mob) -> MobRule {
        self.mobs.get(mob)
    }

    pub fn set_mob_spawn(&mut self, mob: Mob, value: bool) {
        self.mobs.get_mut(mob).spawn = value;
    }

    pub fn set_mob_pve(&mut self, mob: Mob, value: bool) {
        self.mobs.get_mut(mob).pve = value;
    }

    pub fn set_mob_damage(&mut self, mob: Mob, value: bool) {
        self.mobs.get_mut(mob).damage = value;
    }

    pub fn set_mob_drop(&mut self, mob: Mob, value: bool) {
        self.mobs.get_mut(mob).drop = value;
    }

    /// Adds or overwrites a command entry. Names are stored lowercase without a leading `/`.
    pub fn add_command(&mut self, command: &str, enabled: bool) {
        self.commands.insert(normalize_command(command), enabled);
    }

    pub fn remove_command(&mut self, command: &str) -> Option<bool> {
        self.commands.remove(&normalize_command(command))
    }

    /// `None` when the command is not listed for this region.
    #[must_use]
    pub fn command(&self, command: &str) -> Option<bool> {
        self.commands.get(&normalize_command(command)).copied()
    }

    /// Reconcile every keyed table against the current enumerations.
    /// Returns the number of entries added; a second call always returns 0.
    pub fn update_flags(&mut self) -> usize {
        self.flags.reconcile()
            + self.interacts.reconcile()
            + self.explosions.reconcile()
            + self.vehicles.reconcile()
            + self.mobs.reconcile()
    }
}

/// `/Home arg` -> `home`.
fn normalize_command(command: &str) -> String {
    command
        .trim()
        .trim_start_matches('/')
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// The fallback region of one world. Its name is the world name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalRegion {
    #[serde(flatten)]
    pub common: RegionCommon,
}

impl GlobalRegion {
    #[must_use]
    pub fn new(world: impl Into<String>) -> Self {
        Self {
            common: RegionCommon::new(world),
        }
    }
}

/// A bounded region between two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalRegion {
    #[serde(flatten)]
    pub common: RegionCommon,
    #[serde(default)]
    pub priority: i32,
    pub pos1: RegionLocation,
    pub pos2: RegionLocation,
    #[serde(default)]
    pub teleport: Option<RegionLocation>,
    #[serde(default)]
    pub spawn: Option<RegionLocation>,
    #[serde(default)]
    pub members: Vec<RegionMember>,
}

impl LocalRegion {
    #[must_use]
    pub fn new(name: impl Into<String>, pos1: RegionLocation, pos2: RegionLocation) -> Self {
        Self {
            common: RegionCommon::new(name),
            priority: 0,
            pos1,
            pos2,
            teleport: None,
            spawn: None,
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn world(&self) -> &str {
        &self.pos1.world
    }

    #[must_use]
    pub fn dimension(&self) -> &str {
        &self.pos1.dimension
    }

    #[must_use]
    pub fn bounds(&self) -> Cuboid {
        Cuboid::from_corners(&self.pos1, &self.pos2)
    }

    /// Inclusive containment in the normalized box, same world and dimension.
    #[must_use]
    pub fn contains(&self, location: &RegionLocation) -> bool {
        self.pos1.same_space(location)
            && self.bounds().contains(location.x, location.y, location.z)
    }

    #[must_use]
    pub fn member(&self, uuid: &Uuid) -> Option<&RegionMember> {
        self.members.iter().find(|member| member.uuid == *uuid)
    }

    #[must_use]
    pub fn is_member(&self, uuid: &Uuid) -> bool {
        self.member(uuid).is_some()
    }

    #[must_use]
    pub fn is_owner(&self, uuid: &Uuid) -> bool {
        self.member(uuid).is_some_and(RegionMember::is_owner)
    }

    pub fn owners(&self) -> impl Iterator<Item = &RegionMember> {
        self.members.iter().filter(|member| member.is_owner())
    }

    /// Appends the member. Returns false (and changes nothing) if the UUID is already listed.
    pub fn add_member(&mut self, member: RegionMember) -> bool {
        if self.is_member(&member.uuid) {
            return false;
        }
        self.members.push(member);
        true
    }

    pub fn remove_member(&mut self, uuid: &Uuid) -> Option<RegionMember> {
        let index = self.members.iter().position(|member| member.uuid == *uuid)?;
        Some(self.members.remove(index))
    }

    /// Grow (or shrink, with a negative count) the box on one face.
    pub fn expand(&mut self, direction: Direction, blocks: i32) {
        let (pos1, pos2) = (&mut self.pos1, &mut self.pos2);
        match direction {
            Direction::Up => {
                let top = if pos1.y >= pos2.y { pos1 } else { pos2 };
                top.y = top.y.saturating_add(blocks);
            }
            Direction::Down => {
                let bottom = if pos1.y <= pos2.y { pos1 } else { pos2 };
                bottom.y = bottom.y.saturating_sub(blocks);
            }
            Direction::South => {
                let face = if pos1.z >= pos2.z { pos1 } else { pos2 };
                face.z = face.z.saturating_add(blocks);
            }
            Direction::North => {
                let face = if pos1.z <= pos2.z { pos1 } else { pos2 };
                face.z = face.z.saturating_sub(blocks);
            }
            Direction::East => {
                let face = if pos1.x >= pos2.x { pos1 } else { pos2 };
                face.x = face.x.saturating_add(blocks);
            }
            Direction::West => {
                let face = if pos1.x <= pos2.x { pos1 } else { pos2 };
                face.x = face.x.saturating_sub(blocks);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Local(LocalRegion),
    Global(GlobalRegion),
}

impl Region {
    #[must_use]
    pub const fn kind(&self) -> RegionKind {
        match self {
            Self::Local(_) => RegionKind::Local,
            Self::Global(_) => RegionKind::Global,
        }
    }

    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    #[must_use]
    pub const fn as_local(&self) -> Option<&LocalRegion> {
        match self {
            Self::Local(local) => Some(local),
            Self::Global(_) => None,
        }
    }

    pub fn as_local_mut(&mut self) -> Option<&mut LocalRegion> {
        match self {
            Self::Local(local) => Some(local),
            Self::Global(_) => None,
        }
    }

    #[must_use]
    pub const fn common(&self) -> &RegionCommon {
        match self {
            Self::Local(local) => &local.common,
            Self::Global(global) => &global.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut RegionCommon {
        match self {
            Self::Local(local) => &mut local.common,
            Self::Global(global) => &mut global.common,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.common().name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.common_mut().name = name.into();
    }

    #[must_use]
    pub fn flag(&self, flag: Flag) -> bool {
        self.common().flag(flag)
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.common_mut().set_flag(flag, value);
    }

    #[must_use]
    pub fn interact(&self, interact: Interact) -> bool {
        self.common().interact(interact)
    }

    pub fn set_interact(&mut self, interact: Interact, value: bool) {
        self.common_mut().set_interact(interact, value);
    }

    pub fn update_flags(&mut self) -> usize {
        self.common_mut().update_flags()
    }

    /// Membership only exists on local regions.
    #[must_use]
    pub fn is_member(&self, uuid: &Uuid) -> bool {
        self.as_local().is_some_and(|local| local.is_member(uuid))
    }

    #[must_use]
    pub fn is_owner(&self, uuid: &Uuid) -> bool {
        self.as_local().is_some_and(|local| local.is_owner(uuid))
    }

    /// A fresh record of the same variant carrying every field of this one,
    /// reconciled against the current key enumerations.
    #[must_use]
    pub fn upgraded(&self) -> Self {
        let common = self.common();
        let mut fresh = match self {
            Self::Local(old) => {
                let mut local = LocalRegion::new(&common.name, old.pos1.clone(), old.pos2.clone());
                local.priority = old.priority;
                local.members = old.members.clone();
                local.spawn = old.spawn.clone();
                local.teleport = old.teleport.clone();
                Self::Local(local)
            }
            Self::Global(_) => Self::Global(GlobalRegion::new(&common.name)),
        };
        let target = fresh.common_mut();
        target.game_mode = common.game_mode.clone();
        target.flags = common.flags.clone();
        target.interacts = common.interacts.clone();
        target.explosions = common.explosions.clone();
        target.vehicles = common.vehicles.clone();
        target.mobs = common.mobs.clone();
        target.commands = common.commands.clone();
        fresh.update_flags();
        fresh
    }
}

impl From<LocalRegion> for Region {
    fn from(local: LocalRegion) -> Self {
        Self::Local(local)
    }
}

impl From<GlobalRegion> for Region {
    fn from(global: GlobalRegion) -> Self {
        Self::Global(global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::RegionRole;

    fn at(x: i32, y: i32, z: i32) -> RegionLocation {
        RegionLocation::new(x, y, z, RegionLocation::OVERWORLD, "world")
    }

    fn spawn_region() -> LocalRegion {
        LocalRegion::new("Spawn", at(0, 0, 0), at(10, 10, 10))
    }

    #[test]
    fn containment_ignores_corner_order() {
        let region = spawn_region();
        let mut swapped = region.clone();
        std::mem::swap(&mut swapped.pos1, &mut swapped.pos2);
        for point in [at(0, 0, 0), at(10, 10, 10), at(5, 5, 5), at(11, 5, 5), at(-1, 0, 0)] {
            assert_eq!(region.contains(&point), swapped.contains(&point));
        }
        assert!(region.contains(&at(10, 0, 10)));
        assert!(!region.contains(&at(10, 11, 10)));
    }

    #[test]
    fn containment_checks_world_and_dimension() {
        let region = spawn_region();
        let nether = RegionLocation::new(5, 5, 5, "minecraft:the_nether", "world");
        let other_world = RegionLocation::new(5, 5, 5, RegionLocation::OVERWORLD, "creative");
        assert!(!region.contains(&nether));
        assert!(!region.contains(&other_world));
    }

    #[test]
    fn membership_and_ownership() {
        let owner = Uuid::new_v4();
        let member = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let mut local = spawn_region();
        assert!(local.add_member(RegionMember::new(owner, "alice", RegionRole::Owner)));
        assert!(local.add_member(RegionMember::new(member, "bob", RegionRole::Member)));
        assert!(!local.add_member(RegionMember::new(member, "bob", RegionRole::Owner)));

        let region = Region::from(local);
        assert!(region.is_owner(&owner));
        assert!(region.is_member(&member) && !region.is_owner(&member));
        assert!(!region.is_member(&stranger));
        assert!(!Region::from(GlobalRegion::new("world")).is_member(&owner));
    }

    #[test]
    fn remove_member_keeps_order() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let mut local = spawn_region();
        for (i, id) in ids.iter().enumerate() {
            local.add_member(RegionMember::new(*id, format!("p{i}"), RegionRole::Member));
        }
        assert_eq!(local.remove_member(&ids[1]).map(|m| m.username), Some("p1".to_owned()));
        let left: Vec<Uuid> = local.members.iter().map(|m| m.uuid).collect();
        assert_eq!(left, vec![ids[0], ids[2]]);
        assert!(local.remove_member(&ids[1]).is_none());
    }

    #[test]
    fn update_flags_is_idempotent() {
        let mut common = RegionCommon::new("old");
        common.flags = FlagTable::empty();
        common.flags.set(Flag::Pvp, false);
        common.mobs = FlagTable::empty();

        let first = common.update_flags();
        let snapshot = common.clone();
        let second = common.update_flags();

        assert!(first > 0);
        assert_eq!(second, 0);
        assert_eq!(common, snapshot);
        assert!(!common.flag(Flag::Pvp));
        assert!(common.flags.is_complete() && common.mobs.is_complete());
    }

    #[test]
    fn upgraded_copies_every_field() {
        let mut local = spawn_region();
        local.priority = 7;
        local.spawn = Some(at(1, 2, 3));
        local.add_member(RegionMember::new(Uuid::new_v4(), "alice", RegionRole::Owner));
        local.common.game_mode = "creative".into();
        local.common.add_command("/Home", false);
        local.common.set_explosion_destroy(Explosion::Tnt, false);
        local.common.interacts = FlagTable::empty();
        local.common.set_interact(Interact::Lever, false);

        let fresh = Region::Local(local.clone()).upgraded();
        let fresh_local = fresh.as_local().unwrap();
        assert_eq!(fresh_local.priority, 7);
        assert_eq!(fresh_local.members, local.members);
        assert_eq!(fresh_local.spawn, local.spawn);
        assert_eq!(fresh.common().game_mode, "creative");
        assert_eq!(fresh.common().command("home"), Some(false));
        assert!(!fresh.common().explosion(Explosion::Tnt).destroy);
        assert!(!fresh.interact(Interact::Lever));
        assert!(fresh.common().interacts.is_complete());
    }

    #[test]
    fn expand_moves_the_outer_face() {
        let mut local = LocalRegion::new("r", at(10, 70, 0), at(0, 60, 5));
        local.expand(Direction::Up, 5);
        local.expand(Direction::West, 2);
        local.expand(Direction::North, 3);
        let bounds = local.bounds();
        assert_eq!((bounds.min_x, bounds.max_x), (-2, 10));
        assert_eq!((bounds.min_y, bounds.max_y), (60, 75));
        assert_eq!((bounds.min_z, bounds.max_z), (-3, 5));
    }

    #[test]
    fn commands_are_normalized() {
        let mut common = RegionCommon::new("r");
        common.add_command("/Spawn now", true);
        assert_eq!(common.command("spawn"), Some(true));
        assert_eq!(common.command("/SPAWN"), Some(true));
        assert_eq!(common.remove_command("spawn"), Some(true));
        assert_eq!(common.command("spawn"), None);
    }

    #[test]
    fn local_json_uses_persisted_key_names() {
        let mut local = spawn_region();
        local.priority = 5;
        let json = serde_json::to_value(&local).unwrap();
        for key in ["name", "gamemode", "flags", "interacts", "explosions", "vehicles", "mobs",
            "commands", "priority", "pos1", "pos2", "teleport", "spawn", "members"]
        {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["teleport"].is_null());
        let back: LocalRegion = serde_json::from_value(json).unwrap();
        assert_eq!(back, local);
    }
}
