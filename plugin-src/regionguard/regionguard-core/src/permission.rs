//! Allow/deny decisions for a resolved region.
//!
//! Every function here is pure: it answers "should the event be cancelled"
//! and leaves cancelling, messaging and logging to the caller.

use regionguard_types::{Explosion, Flag, Interact, Mob, Region, Vehicle};
use uuid::Uuid;

use crate::host::Host;

/// Whether a flag event concerns the region's own members (`Local`) or the
/// world at large (`Global`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    /// Inside a local region only bypass holders and members may act, whatever the flag says.
    Local,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionEffect {
    Damage,
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleAction {
    Place,
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobAction {
    Spawn,
    Pve,
    Damage,
    Drop,
}

/// Permission lookups against the host, bound to the configured bypass node.
#[derive(Clone, Copy)]
pub struct Permissions<'a> {
    host: &'a dyn Host,
    bypass: &'a str,
}

impl<'a> Permissions<'a> {
    #[must_use]
    pub fn new(host: &'a dyn Host, bypass: &'a str) -> Self {
        Self { host, bypass }
    }

    #[must_use]
    pub fn has_bypass(&self, actor: &Uuid) -> bool {
        self.host.has_permission(actor, self.bypass)
    }

    /// Bypass or membership. Ownership is not required.
    #[must_use]
    pub fn has_region_permission(&self, region: &Region, actor: &Uuid) -> bool {
        self.has_bypass(actor) || region.is_member(actor)
    }

    /// Editing region metadata needs ownership (or the bypass node).
    #[must_use]
    pub fn can_edit(&self, region: &Region, actor: &Uuid) -> bool {
        self.has_bypass(actor) || region.is_owner(actor)
    }
}

/// Decide a flag-based event. Returns `true` when the event must be cancelled.
#[must_use]
pub fn flag_decision(
    flag: Flag,
    region: Option<&Region>,
    actor: Option<&Uuid>,
    scope: EventScope,
    permissions: &Permissions<'_>,
) -> bool {
    let Some(region) = region else {
        return false;
    };
    let value = region.flag(flag);
    let base = if flag.blocks_when_set() { value } else { !value };
    let Some(actor) = actor else {
        return base;
    };
    if scope == EventScope::Local && region.is_local() {
        return !permissions.has_region_permission(region, actor);
    }
    base && !permissions.has_bypass(actor)
}

/// A disabled switch cancels unless the actor has permission on the region.
fn gated(allowed: bool, region: &Region, actor: Option<&Uuid>, permissions: &Permissions<'_>) -> bool {
    if allowed {
        return false;
    }
    actor.is_none_or(|actor| !permissions.has_region_permission(region, actor))
}

#[must_use]
pub fn interact_decision(
    interact: Interact,
    region: Option<&Region>,
    actor: Option<&Uuid>,
    permissions: &Permissions<'_>,
) -> bool {
    region.is_some_and(|region| gated(region.interact(interact), region, actor, permissions))
}

/// Explosions have no actor; a disabled effect is always cancelled.
#[must_use]
pub fn explosion_decision(explosion: Explosion, effect: ExplosionEffect, region: Option<&Region>) -> bool {
    let Some(region) = region else {
        return false;
    };
    let rule = region.common().explosion(explosion);
    match effect {
        ExplosionEffect::Damage => !rule.damage,
        ExplosionEffect::Destroy => !rule.destroy,
    }
}

#[must_use]
pub fn vehicle_decision(
    vehicle: Vehicle,
    action: VehicleAction,
    region: Option<&Region>,
    actor: Option<&Uuid>,
    permissions: &Permissions<'_>,
) -> bool {
    region.is_some_and(|region| {
        let rule = region.common().vehicle(vehicle);
        let allowed = match action {
            VehicleAction::Place => rule.place,
            VehicleAction::Destroy => rule.destroy,
        };
        gated(allowed, region, actor, permissions)
    })
}

#[must_use]
pub fn mob_decision(
    mob: Mob,
    action: MobAction,
    region: Option<&Region>,
    actor: Option<&Uuid>,
    permissions: &Permissions<'_>,
) -> bool {
    region.is_some_and(|region| {
        let rule = region.common().mob(mob);
        let allowed = match action {
            MobAction::Spawn => rule.spawn,
            MobAction::Pve => rule.pve,
            MobAction::Damage => rule.damage,
            MobAction::Drop => rule.drop,
        };
        gated(allowed, region, actor, permissions)
    })
}

/// Only commands listed for the region and switched off are denied.
#[must_use]
pub fn command_decision(
    command: &str,
    region: Option<&Region>,
    actor: &Uuid,
    permissions: &Permissions<'_>,
) -> bool {
    region.is_some_and(|region| {
        let allowed = region.common().command(command).unwrap_or(true);
        gated(allowed, region, Some(actor), permissions)
    })
}
