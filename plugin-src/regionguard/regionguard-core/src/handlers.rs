//! Event handlers: one per protected behaviour. The server adapter registers
//! them against its own dispatcher and forwards events.

use std::sync::Arc;

use regionguard_types::{Explosion, Flag, Interact, Mob, Vehicle, strip_namespace};

use crate::RegionGuard;
use crate::events::{
    BlockBreakEvent, BlockChangePreEvent, BlockPlaceEvent, CHEST, ENDER_CHEST, ExplosionEvent,
    EntitySpawnFromBlockEvent, FARMLAND, ITEM, MobSpawnEvent, PlayerAttackEvent,
    PlayerInteractBlockEvent, TRAPPED_CHEST, VehicleEvent, is_crop, is_fire,
};
use crate::permission::{EventScope, ExplosionEffect, MobAction};

/// A handler that may cancel the event it is given.
pub trait EventHandler<E>: Send + Sync {
    fn handle_blocking(&self, event: &mut E);
}

pub struct FireSpreadHandler {
    pub guard: Arc<RegionGuard>,
}

impl EventHandler<BlockChangePreEvent> for FireSpreadHandler {
    fn handle_blocking(&self, event: &mut BlockChangePreEvent) {
        if !is_fire(&event.source) {
            return;
        }
        let location = event.location.clone();
        self.guard.handle_flag_event(
            Some(event),
            Flag::FireSpread,
            &location,
            None,
            EventScope::Global,
        );
    }
}

/// Farmland turned back to dirt, crops broken by players and the items they drop.
pub struct TrampleHandler {
    pub guard: Arc<RegionGuard>,
}

impl EventHandler<BlockPlaceEvent> for TrampleHandler {
    fn handle_blocking(&self, event: &mut BlockPlaceEvent) {
        if strip_namespace(&event.replaced) != FARMLAND {
            return;
        }
        let location = event.location.clone();
        self.guard
            .handle_flag_event(Some(event), Flag::Trample, &location, None, EventScope::Global);
    }
}

impl EventHandler<BlockBreakEvent> for TrampleHandler {
    fn handle_blocking(&self, event: &mut BlockBreakEvent) {
        let Some(player) = event.player else {
            return;
        };
        if !is_crop(&event.block) {
            return;
        }
        let location = event.location.clone();
        self.guard.handle_flag_event(
            Some(event),
            Flag::Trample,
            &location,
            Some(&player),
            EventScope::Global,
        );
    }
}

impl EventHandler<EntitySpawnFromBlockEvent> for TrampleHandler {
    fn handle_blocking(&self, event: &mut EntitySpawnFromBlockEvent) {
        if strip_namespace(&event.entity) != ITEM || !is_crop(&event.block) {
            return;
        }
        let location = event.location.clone();
        self.guard
            .handle_flag_event(Some(event), Flag::Trample, &location, None, EventScope::Global);
    }
}

pub struct BlockPlaceHandler {
    pub guard: Arc<RegionGuard>,
}

impl EventHandler<BlockPlaceEvent> for BlockPlaceHandler {
    fn handle_blocking(&self, event: &mut BlockPlaceEvent) {
        let Some(player) = event.player else {
            return;
        };
        let location = event.location.clone();
        self.guard.handle_flag_event(
            Some(event),
            Flag::Place,
            &location,
            Some(&player),
            EventScope::Local,
        );
    }
}

pub struct BlockBreakHandler {
    pub guard: Arc<RegionGuard>,
}

impl EventHandler<BlockBreakEvent> for BlockBreakHandler {
    fn handle_blocking(&self, event: &mut BlockBreakEvent) {
        let Some(player) = event.player else {
            return;
        };
        let location = event.location.clone();
        self.guard.handle_flag_event(
            Some(event),
            Flag::Destroy,
            &location,
            Some(&player),
            EventScope::Local,
        );
    }
}

/// Right-click on a block. Chests are governed by their own flags, every
/// other usable block by its interact switch.
pub struct InteractHandler {
    pub guard: Arc<RegionGuard>,
}

impl EventHandler<PlayerInteractBlockEvent> for InteractHandler {
    fn handle_blocking(&self, event: &mut PlayerInteractBlockEvent) {
        let player = event.player;
        let location = event.location.clone();
        let chest_flag = match strip_namespace(&event.block) {
            CHEST => Some(Flag::Chests),
            TRAPPED_CHEST => Some(Flag::TrappedChests),
            ENDER_CHEST => Some(Flag::EnderChests),
            _ => None,
        };
        if let Some(flag) = chest_flag {
            self.guard.handle_flag_event(
                Some(event),
                flag,
                &location,
                Some(&player),
                EventScope::Local,
            );
            return;
        }
        let Some(interact) = Interact::for_block(&event.block) else {
            return;
        };
        self.guard
            .handle_interact(Some(event), interact, &location, &player);
    }
}

/// Player versus player damage, decided where the victim stands.
pub struct PvpHandler {
    pub guard: Arc<RegionGuard>,
}

impl EventHandler<PlayerAttackEvent> for PvpHandler {
    fn handle_blocking(&self, event: &mut PlayerAttackEvent) {
        let attacker = event.attacker;
        let victim_location = event.victim_location.clone();
        let attacker_location = event.attacker_location.clone();
        let cancelled = self.guard.handle_flag_event(
            Some(&mut *event),
            Flag::Pvp,
            &victim_location,
            Some(&attacker),
            EventScope::Global,
        );
        if cancelled {
            return;
        }
        // Hitting out of a no-PvP region is not allowed either.
        self.guard.handle_flag_event(
            Some(event),
            Flag::Pvp,
            &attacker_location,
            Some(&attacker),
            EventScope::Global,
        );
    }
}

/// Drops protected blocks from the blast and stops entity damage where disabled.
pub struct ExplosionHandler {
    pub guard: Arc<RegionGuard>,
}

impl EventHandler<ExplosionEvent> for ExplosionHandler {
    fn handle_blocking(&self, event: &mut ExplosionEvent) {
        let explosion = Explosion::for_source(&event.source);
        let guard = &self.guard;
        event.blocks.retain(|block| {
            !guard.handle_explosion(None, explosion, ExplosionEffect::Destroy, block)
        });
        if event.damages_entities
            && guard.handle_explosion(None, explosion, ExplosionEffect::Damage, &event.location)
        {
            event.damages_entities = false;
        }
    }
}

pub struct VehicleHandler {
    pub guard: Arc<RegionGuard>,
}

impl EventHandler<VehicleEvent> for VehicleHandler {
    fn handle_blocking(&self, event: &mut VehicleEvent) {
        let Some(vehicle) = Vehicle::for_entity(&event.vehicle) else {
            return;
        };
        let (action, player, location) = (event.action, event.player, event.location.clone());
        self.guard
            .handle_vehicle(Some(event), vehicle, action, &location, player.as_ref());
    }
}

pub struct MobSpawnHandler {
    pub guard: Arc<RegionGuard>,
}

impl EventHandler<MobSpawnEvent> for MobSpawnHandler {
    fn handle_blocking(&self, event: &mut MobSpawnEvent) {
        let Some(mob) = Mob::for_entity(&event.entity) else {
            return;
        };
        let location = event.location.clone();
        self.guard
            .handle_mob(Some(event), mob, MobAction::Spawn, &location, None);
    }
}
