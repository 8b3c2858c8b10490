//! Closed enumerations that key the per-region tables.
//!
//! Every key has a stable serialized name, a legacy name (the serialized name
//! without underscores, as written by the old flat region files) and a declared
//! default that fills tables created before the key existed.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A closed enumeration usable as the key of a [`FlagTable`](crate::FlagTable).
pub trait TableKey: Copy + Ord + fmt::Debug + 'static {
    type Value: Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned;

    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Human-readable table name used in log messages.
    const TABLE: &'static str;

    fn name(self) -> &'static str;

    fn default_value(self) -> Self::Value;

    fn legacy_name(self) -> String {
        self.name().replace('_', "")
    }

    /// Case-insensitive lookup; accepts the serialized or the legacy name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| {
            key.name().eq_ignore_ascii_case(name) || key.legacy_name().eq_ignore_ascii_case(name)
        })
    }
}

/// `minecraft:oak_door` -> `oak_door`.
#[must_use]
pub fn strip_namespace(id: &str) -> &str {
    id.rsplit_once(':').map_or(id, |(_, path)| path)
}

macro_rules! table_key {
    (
        $(#[$meta:meta])*
        $vis:vis enum $ty:ident: $value:ty, $table:literal {
            $($variant:ident => $name:literal = $default:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $ty {
            $($variant),+
        }

        impl TableKey for $ty {
            type Value = $value;

            const ALL: &'static [Self] = &[$(Self::$variant),+];

            const TABLE: &'static str = $table;

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }

            fn default_value(self) -> $value {
                match self {
                    $(Self::$variant => $default),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

table_key! {
    /// Named policy switches. Every flag except [`Flag::Invincible`] means
    /// "allowed when on"; invincible blocks damage when on.
    pub enum Flag: bool, "flag" {
        Place => "place" = true,
        Destroy => "destroy" = true,
        Pvp => "pvp" = true,
        ExpDrop => "exp_drop" = true,
        ItemDrop => "item_drop" = true,
        ItemPickup => "item_pickup" = true,
        Enderpearl => "enderpearl" = true,
        Sleep => "sleep" = true,
        Lighter => "lighter" = true,
        Chests => "chests" = true,
        TrappedChests => "trapped_chests" = true,
        EnderChests => "ender_chests" = true,
        WaterFlow => "water_flow" = true,
        LavaFlow => "lava_flow" = true,
        OtherLiquidsFlow => "other_liquids_flow" = true,
        LeafDecay => "leaf_decay" = true,
        FireSpread => "fire_spread" = true,
        IceMelt => "ice_melt" = true,
        VinesGrowth => "vines_growth" = true,
        Trample => "trample" = true,
        PotionSplash => "potion_splash" = true,
        FallDamage => "fall_damage" = true,
        CanTp => "can_tp" = true,
        CanSpawn => "can_spawn" = true,
        Hunger => "hunger" = true,
        WallDamage => "wall_damage" = true,
        Drown => "drown" = true,
        Invincible => "invincible" = false,
        CactusDamage => "cactus_damage" = true,
        FireDamage => "fire_damage" = true,
        HideLocations => "hide_locations" = false,
        HideFlags => "hide_flags" = false,
        HideMembers => "hide_members" = false,
        HideRegion => "hide_region" = false,
        SendChat => "send_chat" = true,
        EndermanGrief => "enderman_grief" = true,
        EnderDragonBlockDamage => "ender_dragon_block_damage" = true,
        Exit => "exit" = true,
        Enter => "enter" = true,
    }
}

impl Flag {
    /// Flags whose "on" state blocks the behaviour instead of allowing it.
    #[must_use]
    pub const fn blocks_when_set(self) -> bool {
        matches!(self, Self::Invincible)
    }
}

table_key! {
    /// Right-click use of a block type.
    pub enum Interact: bool, "interact" {
        Door => "door" = true,
        Trapdoor => "trapdoor" = true,
        FenceGate => "fence_gate" = true,
        Button => "button" = true,
        Lever => "lever" = true,
        PressurePlate => "pressure_plate" = true,
        Anvil => "anvil" = true,
        Furnace => "furnace" = true,
        CraftingTable => "crafting_table" = true,
        EnchantingTable => "enchanting_table" = true,
        BrewingStand => "brewing_stand" = true,
        Beacon => "beacon" = true,
        Hopper => "hopper" = true,
        Dispenser => "dispenser" = true,
        Dropper => "dropper" = true,
        Barrel => "barrel" = true,
        ShulkerBox => "shulker_box" = true,
        Jukebox => "jukebox" = true,
        NoteBlock => "note_block" = true,
        Repeater => "repeater" = true,
        Comparator => "comparator" = true,
        DaylightDetector => "daylight_detector" = true,
        Bed => "bed" = true,
        Cake => "cake" = true,
        FlowerPot => "flower_pot" = true,
        Lectern => "lectern" = true,
        Workstation => "workstation" = true,
        ItemFrame => "item_frame" = true,
        ArmorStand => "armor_stand" = true,
    }
}

impl Interact {
    /// Map a namespaced block or entity id onto its interact kind.
    #[must_use]
    pub fn for_block(id: &str) -> Option<Self> {
        let path = strip_namespace(id);
        if let Some(exact) = Self::from_name(path) {
            return Some(exact);
        }
        let kind = if path.ends_with("_trapdoor") {
            Self::Trapdoor
        } else if path.ends_with("_door") {
            Self::Door
        } else if path.ends_with("_fence_gate") {
            Self::FenceGate
        } else if path.ends_with("_button") {
            Self::Button
        } else if path.ends_with("_pressure_plate") {
            Self::PressurePlate
        } else if path.ends_with("anvil") {
            Self::Anvil
        } else if matches!(path, "blast_furnace" | "smoker") {
            Self::Furnace
        } else if path.ends_with("shulker_box") {
            Self::ShulkerBox
        } else if path.ends_with("_bed") {
            Self::Bed
        } else if path.ends_with("candle_cake") {
            Self::Cake
        } else if path.starts_with("potted_") {
            Self::FlowerPot
        } else if path == "glow_item_frame" {
            Self::ItemFrame
        } else if matches!(
            path,
            "loom"
                | "grindstone"
                | "stonecutter"
                | "cartography_table"
                | "smithing_table"
                | "composter"
                | "bell"
        ) {
            Self::Workstation
        } else {
            return None;
        };
        Some(kind)
    }
}

/// What an explosion from one source may do inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionRule {
    /// Entities take damage.
    pub damage: bool,
    /// Blocks are destroyed.
    pub destroy: bool,
}

impl ExplosionRule {
    pub const ALLOWED: Self = Self {
        damage: true,
        destroy: true,
    };
}

table_key! {
    pub enum Explosion: ExplosionRule, "explosion" {
        Tnt => "tnt" = ExplosionRule::ALLOWED,
        Creeper => "creeper" = ExplosionRule::ALLOWED,
        GhastFireball => "ghast_fireball" = ExplosionRule::ALLOWED,
        Wither => "wither" = ExplosionRule::ALLOWED,
        WitherSkull => "wither_skull" = ExplosionRule::ALLOWED,
        EndCrystal => "end_crystal" = ExplosionRule::ALLOWED,
        TntMinecart => "tnt_minecart" = ExplosionRule::ALLOWED,
        Bed => "bed" = ExplosionRule::ALLOWED,
        RespawnAnchor => "respawn_anchor" = ExplosionRule::ALLOWED,
        Other => "other" = ExplosionRule::ALLOWED,
    }
}

impl Explosion {
    /// Map the id of whatever exploded onto an explosion source; unknown ids are [`Explosion::Other`].
    #[must_use]
    pub fn for_source(id: &str) -> Self {
        let path = strip_namespace(id);
        if let Some(exact) = Self::from_name(path) {
            return exact;
        }
        if path == "fireball" {
            Self::GhastFireball
        } else if path.ends_with("_bed") {
            Self::Bed
        } else {
            Self::Other
        }
    }
}

/// Whether a vehicle type may be placed or broken inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRule {
    pub place: bool,
    pub destroy: bool,
}

impl VehicleRule {
    pub const ALLOWED: Self = Self {
        place: true,
        destroy: true,
    };
}

table_key! {
    pub enum Vehicle: VehicleRule, "vehicle" {
        Boat => "boat" = VehicleRule::ALLOWED,
        ChestBoat => "chest_boat" = VehicleRule::ALLOWED,
        Minecart => "minecart" = VehicleRule::ALLOWED,
        ChestMinecart => "chest_minecart" = VehicleRule::ALLOWED,
        FurnaceMinecart => "furnace_minecart" = VehicleRule::ALLOWED,
        HopperMinecart => "hopper_minecart" = VehicleRule::ALLOWED,
        TntMinecart => "tnt_minecart" = VehicleRule::ALLOWED,
        CommandBlockMinecart => "command_block_minecart" = VehicleRule::ALLOWED,
        SpawnerMinecart => "spawner_minecart" = VehicleRule::ALLOWED,
    }
}

impl Vehicle {
    /// Map an entity or item id onto a vehicle type; every wood variant of a boat is a boat.
    #[must_use]
    pub fn for_entity(id: &str) -> Option<Self> {
        let path = strip_namespace(id);
        if let Some(exact) = Self::from_name(path) {
            return Some(exact);
        }
        if path.ends_with("_chest_boat") || path.ends_with("_chest_raft") {
            Some(Self::ChestBoat)
        } else if path.ends_with("_boat") || path.ends_with("_raft") {
            Some(Self::Boat)
        } else {
            None
        }
    }
}

/// Per-mob switches inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobRule {
    /// The mob may spawn.
    pub spawn: bool,
    /// Players may damage the mob.
    pub pve: bool,
    /// The mob may damage players.
    pub damage: bool,
    /// The mob drops loot on death.
    pub drop: bool,
}

impl MobRule {
    pub const ALLOWED: Self = Self {
        spawn: true,
        pve: true,
        damage: true,
        drop: true,
    };
}

table_key! {
    pub enum Mob: MobRule, "mob" {
        Zombie => "zombie" = MobRule::ALLOWED,
        Husk => "husk" = MobRule::ALLOWED,
        Drowned => "drowned" = MobRule::ALLOWED,
        Skeleton => "skeleton" = MobRule::ALLOWED,
        Stray => "stray" = MobRule::ALLOWED,
        Creeper => "creeper" = MobRule::ALLOWED,
        Spider => "spider" = MobRule::ALLOWED,
        CaveSpider => "cave_spider" = MobRule::ALLOWED,
        Enderman => "enderman" = MobRule::ALLOWED,
        Witch => "witch" = MobRule::ALLOWED,
        Slime => "slime" = MobRule::ALLOWED,
        Phantom => "phantom" = MobRule::ALLOWED,
        Blaze => "blaze" = MobRule::ALLOWED,
        Ghast => "ghast" = MobRule::ALLOWED,
        Pillager => "pillager" = MobRule::ALLOWED,
        Vindicator => "vindicator" = MobRule::ALLOWED,
        Cow => "cow" = MobRule::ALLOWED,
        Pig => "pig" = MobRule::ALLOWED,
        Sheep => "sheep" = MobRule::ALLOWED,
        Chicken => "chicken" = MobRule::ALLOWED,
        Horse => "horse" = MobRule::ALLOWED,
        Wolf => "wolf" = MobRule::ALLOWED,
        Cat => "cat" = MobRule::ALLOWED,
        Villager => "villager" = MobRule::ALLOWED,
        IronGolem => "iron_golem" = MobRule::ALLOWED,
        Bee => "bee" = MobRule::ALLOWED,
    }
}

impl Mob {
    #[must_use]
    pub fn for_entity(id: &str) -> Option<Self> {
        Self::from_name(strip_namespace(id))
    }
}
