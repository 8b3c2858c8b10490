//! Regions under construction: at most one pending region per player, held in
//! memory until it is saved or cancelled.

use std::collections::HashMap;

use regionguard_types::{LocalRegion, Region, RegionLocation};
use uuid::Uuid;

/// Which corner a wand click sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    First,
    Second,
}

#[derive(Debug, Default)]
pub struct PendingRegions {
    pending: HashMap<Uuid, Region>,
}

impl PendingRegions {
    /// Start a pending region. Does nothing, and returns false, while the
    /// player already has one; [`Self::clear`] it first.
    pub fn set(&mut self, player: Uuid, region: Region) -> bool {
        if self.pending.contains_key(&player) {
            return false;
        }
        self.pending.insert(player, region);
        true
    }

    #[must_use]
    pub fn get(&self, player: &Uuid) -> Option<&Region> {
        self.pending.get(player)
    }

    pub fn get_mut(&mut self, player: &Uuid) -> Option<&mut Region> {
        self.pending.get_mut(player)
    }

    #[must_use]
    pub fn has(&self, player: &Uuid) -> bool {
        self.pending.contains_key(player)
    }

    pub fn clear(&mut self, player: &Uuid) -> Option<Region> {
        self.pending.remove(player)
    }

    /// Unconditional overwrite, returning whatever was pending before.
    pub fn replace(&mut self, player: Uuid, region: Region) -> Option<Region> {
        self.pending.insert(player, region)
    }

    /// Wand click. Creates an unnamed local region with both corners on the
    /// clicked block, or moves one corner of the existing one. Clicking in
    /// another world or dimension restarts the selection there.
    /// `None` when the player is building a global region.
    pub fn select_corner(
        &mut self,
        player: Uuid,
        location: RegionLocation,
        corner: Corner,
    ) -> Option<&LocalRegion> {
        let region = self.pending.entry(player).or_insert_with(|| {
            Region::Local(LocalRegion::new("", location.clone(), location.clone()))
        });
        let local = region.as_local_mut()?;
        if !local.pos1.same_space(&location) {
            local.pos1 = location.clone();
            local.pos2 = location;
        } else {
            match corner {
                Corner::First => local.pos1 = location,
                Corner::Second => local.pos2 = location,
            }
        }
        Some(&*local)
    }

    /// Player left; forget whatever they were building.
    pub fn end_session(&mut self, player: &Uuid) {
        if self.pending.remove(player).is_some() {
            log::debug!("regionguard: Dropped pending region of {player}");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
