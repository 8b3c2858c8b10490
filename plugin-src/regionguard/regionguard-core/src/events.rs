//! Engine-agnostic world events. The server adapter fills these in from its
//! own event types, runs the handlers and applies `cancelled` afterwards.

use regionguard_types::{RegionLocation, strip_namespace};
use uuid::Uuid;

use crate::permission::VehicleAction;

pub const FIRE: &str = "fire";
pub const SOUL_FIRE: &str = "soul_fire";
pub const FARMLAND: &str = "farmland";
pub const ITEM: &str = "item";
pub const CHEST: &str = "chest";
pub const TRAPPED_CHEST: &str = "trapped_chest";
pub const ENDER_CHEST: &str = "ender_chest";

/// Blocks that drop produce and get trampled.
#[must_use]
pub fn is_crop(block: &str) -> bool {
    matches!(
        strip_namespace(block),
        "wheat"
            | "carrots"
            | "potatoes"
            | "beetroots"
            | "melon_stem"
            | "pumpkin_stem"
            | "attached_melon_stem"
            | "attached_pumpkin_stem"
            | "nether_wart"
            | "sweet_berry_bush"
            | "cocoa"
            | "torchflower_crop"
            | "pitcher_crop"
    )
}

#[must_use]
pub fn is_fire(block: &str) -> bool {
    matches!(strip_namespace(block), FIRE | SOUL_FIRE)
}

pub trait Cancellable {
    fn cancelled(&self) -> bool;

    fn set_cancelled(&mut self, cancelled: bool);
}

macro_rules! cancellable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Cancellable for $ty {
                fn cancelled(&self) -> bool {
                    self.cancelled
                }

                fn set_cancelled(&mut self, cancelled: bool) {
                    self.cancelled = cancelled;
                }
            }
        )+
    };
}

/// A block is about to change on its own (fire ticking, liquids, growth).
#[derive(Debug, Clone)]
pub struct BlockChangePreEvent {
    /// The block causing the change.
    pub source: String,
    pub location: RegionLocation,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct BlockPlaceEvent {
    /// `None` when no player placed it (dispensers, mobs).
    pub player: Option<Uuid>,
    pub block: String,
    /// What was there before.
    pub replaced: String,
    pub location: RegionLocation,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct BlockBreakEvent {
    pub player: Option<Uuid>,
    pub block: String,
    pub location: RegionLocation,
    pub cancelled: bool,
}

/// An entity spawned because of a block, e.g. the item dropped by a broken crop.
#[derive(Debug, Clone)]
pub struct EntitySpawnFromBlockEvent {
    pub entity: String,
    pub block: String,
    pub location: RegionLocation,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerInteractBlockEvent {
    pub player: Uuid,
    pub block: String,
    pub location: RegionLocation,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerAttackEvent {
    pub attacker: Uuid,
    pub attacker_location: RegionLocation,
    pub victim: Uuid,
    pub victim_location: RegionLocation,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct ExplosionEvent {
    /// Id of whatever exploded: `tnt`, `creeper`, `fireball`...
    pub source: String,
    pub location: RegionLocation,
    /// Blocks the explosion would destroy. Protected ones are removed by the handler.
    pub blocks: Vec<RegionLocation>,
    /// Whether nearby entities take damage.
    pub damages_entities: bool,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct VehicleEvent {
    pub player: Option<Uuid>,
    pub vehicle: String,
    pub action: VehicleAction,
    pub location: RegionLocation,
    pub cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct MobSpawnEvent {
    pub entity: String,
    pub location: RegionLocation,
    pub cancelled: bool,
}

cancellable!(
    BlockChangePreEvent,
    BlockPlaceEvent,
    BlockBreakEvent,
    EntitySpawnFromBlockEvent,
    PlayerInteractBlockEvent,
    PlayerAttackEvent,
    ExplosionEvent,
    VehicleEvent,
    MobSpawnEvent,
);
