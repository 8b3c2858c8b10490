//! RegionGuard — region protection for a shared world.
//!
//! Named 3D regions carry flags, interaction rules and member lists; world
//! events are checked against the region covering their location.
//! - **[config](config)** — `config.toml` loading
//! - **[store](store)** — one JSON file per region
//! - **[resolver](resolver)** — which region governs a location
//! - **[permission](permission)** — allow/deny decisions
//! - **[selection](selection)** — regions under construction
//! - **[migration](migration)** — import of the old region format
//! - **[events](events)** / **[handlers](handlers)** — world events and their handlers
//! - **[info](info)** — region summaries for chat
//!
//! The server adapter implements [`Host`] and calls [`RegionGuard::on_load`].

pub mod config;
pub mod events;
pub mod handlers;
pub mod host;
pub mod info;
pub mod migration;
pub mod permission;
pub mod resolver;
pub mod selection;
pub mod store;

#[cfg(test)]
mod testing;

use std::path::Path;
use std::sync::{Arc, RwLock};

use regionguard_types::{
    Explosion, Flag, Interact, LocalRegion, Mob, Region, RegionLocation, RegionMember, RegionRole,
    TableKey, Vehicle,
};
use uuid::Uuid;

use config::GuardConfig;
use events::Cancellable;
use host::{Host, NamedColor, TextComponent};
use permission::{EventScope, ExplosionEffect, MobAction, Permissions, VehicleAction};
use selection::{Corner, PendingRegions};
use store::{Modified, RegionStore};

/// Plugin state shared by every handler and command.
pub struct RegionGuard {
    config: GuardConfig,
    store: RegionStore,
    pending: RwLock<PendingRegions>,
    host: Arc<dyn Host>,
}

impl RegionGuard {
    #[must_use]
    pub fn new(config: GuardConfig, data_folder: &Path, host: Arc<dyn Host>) -> Self {
        let store = RegionStore::new(data_folder, &config.storage);
        Self {
            config,
            store,
            pending: RwLock::new(PendingRegions::default()),
            host,
        }
    }

    /// Load config, create the region folders and convert legacy regions if any are left.
    pub fn on_load(data_folder: &Path, host: Arc<dyn Host>) -> Result<Self, String> {
        let config = GuardConfig::load(&data_folder.join("config.toml"))?;
        let guard = Self::new(config, data_folder, host);
        guard.store.ensure_dirs()?;

        let legacy = data_folder.join(&guard.config.storage.legacy_dir);
        if guard.config.migration.convert_legacy && migration::needs_conversion(&legacy) {
            log::info!("regionguard: Converting legacy regions from {}", legacy.display());
            let report = migration::convert_legacy(&guard.store, &legacy);
            if report.failed > 0 {
                log::warn!("regionguard: {} legacy regions could not be converted", report.failed);
            }
        }

        let regions = guard.store.load_all();
        let locals = regions.iter().filter(|region| region.is_local()).count();
        log::info!(
            "regionguard: Loaded {locals} local and {} global regions",
            regions.len() - locals
        );
        Ok(guard)
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    #[must_use]
    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    #[must_use]
    pub fn permissions(&self) -> Permissions<'_> {
        Permissions::new(self.host.as_ref(), &self.config.permissions.bypass)
    }

    #[must_use]
    pub fn region_at(&self, location: &RegionLocation) -> Option<Region> {
        self.store.region_at(location)
    }

    fn notify(&self, player: &Uuid, text: &str, color: NamedColor) {
        self.host
            .send_message(player, TextComponent::text(text).color_named(color));
    }

    /// Cancel the event and tell the actor why.
    fn deny(
        &self,
        event: Option<&mut dyn Cancellable>,
        actor: Option<&Uuid>,
        region: &Region,
        what: &str,
    ) {
        if let Some(event) = event {
            event.set_cancelled(true);
        }
        if let Some(actor) = actor {
            let message = TextComponent::text(self.config.messages.no_permission.as_str())
                .color_named(NamedColor::Red);
            self.host.send_action_bar(actor, message);
        }
        log::debug!(
            "regionguard: Denied {what} in {} (actor: {actor:?})",
            region.name()
        );
    }

    // ---------------------------------------------------------------------
    // Event decisions
    // ---------------------------------------------------------------------

    /// Resolve the region at `location` and apply the flag decision.
    /// Returns `true` when the event was cancelled.
    pub fn handle_flag_event(
        &self,
        event: Option<&mut dyn Cancellable>,
        flag: Flag,
        location: &RegionLocation,
        actor: Option<&Uuid>,
        scope: EventScope,
    ) -> bool {
        let region = self.region_at(location);
        self.handle_flag_event_in(event, flag, region.as_ref(), actor, scope)
    }

    /// Same as [`Self::handle_flag_event`] with the region already resolved.
    pub fn handle_flag_event_in(
        &self,
        event: Option<&mut dyn Cancellable>,
        flag: Flag,
        region: Option<&Region>,
        actor: Option<&Uuid>,
        scope: EventScope,
    ) -> bool {
        let cancel = permission::flag_decision(flag, region, actor, scope, &self.permissions());
        if let (true, Some(region)) = (cancel, region) {
            self.deny(event, actor, region, flag.name());
        }
        cancel
    }

    pub fn handle_interact(
        &self,
        event: Option<&mut dyn Cancellable>,
        interact: Interact,
        location: &RegionLocation,
        actor: &Uuid,
    ) -> bool {
        let region = self.region_at(location);
        let cancel = permission::interact_decision(
            interact,
            region.as_ref(),
            Some(actor),
            &self.permissions(),
        );
        if let (true, Some(region)) = (cancel, &region) {
            self.deny(event, Some(actor), region, interact.name());
        }
        cancel
    }

    pub fn handle_explosion(
        &self,
        event: Option<&mut dyn Cancellable>,
        explosion: Explosion,
        effect: ExplosionEffect,
        location: &RegionLocation,
    ) -> bool {
        let region = self.region_at(location);
        let cancel = permission::explosion_decision(explosion, effect, region.as_ref());
        if let (true, Some(region)) = (cancel, &region) {
            self.deny(event, None, region, explosion.name());
        }
        cancel
    }

    pub fn handle_vehicle(
        &self,
        event: Option<&mut dyn Cancellable>,
        vehicle: Vehicle,
        action: VehicleAction,
        location: &RegionLocation,
        actor: Option<&Uuid>,
    ) -> bool {
        let region = self.region_at(location);
        let cancel = permission::vehicle_decision(
            vehicle,
            action,
            region.as_ref(),
            actor,
            &self.permissions(),
        );
        if let (true, Some(region)) = (cancel, &region) {
            self.deny(event, actor, region, vehicle.name());
        }
        cancel
    }

    pub fn handle_mob(
        &self,
        event: Option<&mut dyn Cancellable>,
        mob: Mob,
        action: MobAction,
        location: &RegionLocation,
        actor: Option<&Uuid>,
    ) -> bool {
        let region = self.region_at(location);
        let cancel =
            permission::mob_decision(mob, action, region.as_ref(), actor, &self.permissions());
        if let (true, Some(region)) = (cancel, &region) {
            self.deny(event, actor, region, mob.name());
        }
        cancel
    }

    /// Whether `actor` may run `command` at `location`; a denial is reported to them.
    pub fn handle_command(&self, command: &str, location: &RegionLocation, actor: &Uuid) -> bool {
        let region = self.region_at(location);
        let cancel =
            permission::command_decision(command, region.as_ref(), actor, &self.permissions());
        if let (true, Some(region)) = (cancel, &region) {
            self.deny(None, Some(actor), region, command);
        }
        cancel
    }

    // ---------------------------------------------------------------------
    // Region editing
    // ---------------------------------------------------------------------

    /// Persist a region, replacing the stored record of the same name.
    /// Failures are logged and reported to the actor.
    pub fn save_region(&self, actor: Option<&Uuid>, region: &mut Region) -> bool {
        match self.store.save(region) {
            Ok(path) => {
                log::info!("regionguard: Saved region {} to {}", region.name(), path.display());
                true
            }
            Err(e) => {
                log::error!("regionguard: Failed to save region {}: {e}", region.name());
                if let Some(actor) = actor {
                    self.notify(actor, &self.config.messages.save_failed, NamedColor::Red);
                }
                false
            }
        }
    }

    /// Persist a region under a name nobody uses yet. A taken name is reported
    /// to the actor and nothing is written.
    pub fn create_region(&self, actor: Option<&Uuid>, region: &mut Region) -> bool {
        match self.store.create(region) {
            Ok(Some(path)) => {
                log::info!("regionguard: Created region {} at {}", region.name(), path.display());
                true
            }
            Ok(None) => {
                log::debug!("regionguard: Region name {} is already taken", region.name());
                if let Some(actor) = actor {
                    self.notify(actor, &self.config.messages.name_taken, NamedColor::Red);
                }
                false
            }
            Err(e) => {
                log::error!("regionguard: Failed to create region {}: {e}", region.name());
                if let Some(actor) = actor {
                    self.notify(actor, &self.config.messages.save_failed, NamedColor::Red);
                }
                false
            }
        }
    }

    /// Delete a region by name. Only owners and bypass holders may delete.
    pub fn delete_region(&self, actor: &Uuid, name: &str) -> bool {
        let Some(region) = self.store.find_by_name(name) else {
            return false;
        };
        if !self.permissions().can_edit(&region, actor) {
            self.notify(actor, &self.config.messages.not_owner, NamedColor::Red);
            return false;
        }
        match self.store.remove(&region) {
            Ok(removed) => {
                log::info!("regionguard: Region {} deleted by {actor}", region.name());
                removed
            }
            Err(e) => {
                log::error!("regionguard: Failed to delete region {}: {e}", region.name());
                self.notify(actor, &self.config.messages.save_failed, NamedColor::Red);
                false
            }
        }
    }

    /// Load, edit and save a region in one step. `None` when it does not
    /// exist, the actor may not edit it, or saving failed.
    pub fn edit_region<F>(&self, actor: &Uuid, name: &str, edit: F) -> Option<Region>
    where
        F: FnOnce(&mut Region),
    {
        let region = self.store.find_by_name(name)?;
        if !self.permissions().can_edit(&region, actor) {
            self.notify(actor, &self.config.messages.not_owner, NamedColor::Red);
            return None;
        }
        match self.store.modify(name, edit) {
            Ok(Modified::Saved(edited)) => Some(edited),
            Ok(Modified::Missing) => None,
            Ok(Modified::NameTaken(taken)) => {
                log::debug!("regionguard: Refused renaming {name} to {taken}, the name is taken");
                self.notify(actor, &self.config.messages.name_taken, NamedColor::Red);
                None
            }
            Err(e) => {
                log::error!("regionguard: Failed to update region {name}: {e}");
                self.notify(actor, &self.config.messages.save_failed, NamedColor::Red);
                None
            }
        }
    }

    /// Send the info lines of a region to a player.
    pub fn print_region(&self, player: &Uuid, name: &str) -> bool {
        let Some(region) = self.store.find_by_name(name) else {
            self.notify(player, &self.config.messages.load_failed, NamedColor::Red);
            return false;
        };
        for line in info::describe(&region, player, self.host.as_ref()) {
            self.host.send_message(player, line);
        }
        true
    }

    pub fn print_regions_list(&self, player: &Uuid) {
        let regions = self.store.load_all();
        self.notify(player, "Regions", NamedColor::Gold);
        self.notify(player, &info::list_names(&regions), NamedColor::Yellow);
    }

    // ---------------------------------------------------------------------
    // Pending regions
    // ---------------------------------------------------------------------

    pub fn set_pending(&self, player: Uuid, region: Region) -> bool {
        self.pending
            .write()
            .map(|mut pending| pending.set(player, region))
            .unwrap_or(false)
    }

    #[must_use]
    pub fn pending(&self, player: &Uuid) -> Option<Region> {
        self.pending.read().ok()?.get(player).cloned()
    }

    #[must_use]
    pub fn has_pending(&self, player: &Uuid) -> bool {
        self.pending
            .read()
            .is_ok_and(|pending| pending.has(player))
    }

    pub fn clear_pending(&self, player: &Uuid) -> Option<Region> {
        self.pending.write().ok()?.clear(player)
    }

    pub fn replace_pending(&self, player: Uuid, region: Region) -> Option<Region> {
        self.pending.write().ok()?.replace(player, region)
    }

    /// Edit the pending region in place. `None` when there is none.
    pub fn update_pending<R>(&self, player: &Uuid, edit: impl FnOnce(&mut Region) -> R) -> Option<R> {
        let mut pending = self.pending.write().ok()?;
        pending.get_mut(player).map(edit)
    }

    /// Wand click: set one corner of the player's pending region and confirm it in chat.
    pub fn select_corner(
        &self,
        player: Uuid,
        location: RegionLocation,
        corner: Corner,
    ) -> Option<LocalRegion> {
        let selected = {
            let mut pending = self.pending.write().ok()?;
            pending.select_corner(player, location.clone(), corner).cloned()
        };
        if selected.is_some() {
            let number = match corner {
                Corner::First => 1,
                Corner::Second => 2,
            };
            self.notify(
                &player,
                &format!("Position {number} set to {location}"),
                NamedColor::Green,
            );
        }
        selected
    }

    /// Save the player's pending region as a new region, adding them as owner
    /// of a local region without members. On failure, a taken name included,
    /// the region stays pending.
    pub fn commit_pending(&self, player: &Uuid, username: &str) -> Option<Region> {
        let mut region = self.clear_pending(player)?;
        if let Some(local) = region.as_local_mut() {
            if local.members.is_empty() {
                local.add_member(RegionMember::new(*player, username, RegionRole::Owner));
            }
        }
        if self.create_region(Some(player), &mut region) {
            self.notify(player, &format!("Region {} saved", region.name()), NamedColor::Green);
            Some(region)
        } else {
            self.replace_pending(*player, region);
            None
        }
    }

    /// The player left: forget their pending region.
    pub fn end_session(&self, player: &Uuid) {
        if let Ok(mut pending) = self.pending.write() {
            pending.end_session(player);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::BlockBreakEvent;
    use crate::testing::{TempDir, TestHost};
    use regionguard_types::GlobalRegion;

    const BYPASS: &str = "regionguard:region";

    fn at(x: i32, y: i32, z: i32) -> RegionLocation {
        RegionLocation::new(x, y, z, RegionLocation::OVERWORLD, "world")
    }

    fn setup() -> (TempDir, Arc<TestHost>, RegionGuard) {
        let dir = TempDir::new();
        let host = Arc::new(TestHost::default());
        let guard = RegionGuard::on_load(dir.path(), host.clone()).unwrap();
        (dir, host, guard)
    }

    fn save_spawn(guard: &RegionGuard, owner: Uuid) {
        let mut spawn = LocalRegion::new("Spawn", at(-20, 0, -20), at(20, 100, 20));
        spawn.priority = 5;
        spawn.common.set_flag(Flag::Pvp, false);
        spawn.add_member(RegionMember::new(owner, "alice", RegionRole::Owner));
        assert!(guard.save_region(None, &mut Region::Local(spawn)));
    }

    #[test]
    fn on_load_writes_config_and_folders() {
        let (dir, _host, guard) = setup();
        assert!(dir.path().join("config.toml").exists());
        assert!(dir.path().join("regions").is_dir());
        assert!(dir.path().join("globals").is_dir());
        assert_eq!(guard.config().permissions.bypass, BYPASS);
    }

    #[test]
    fn on_load_converts_legacy_regions_once() {
        let dir = TempDir::new();
        let legacy = dir.path().join("old").join("globals");
        std::fs::create_dir_all(&legacy).unwrap();
        std::fs::write(
            legacy.join("globals.json"),
            r#"{"world": {"flags": {"pvp": false}}}"#,
        )
        .unwrap();

        let host = Arc::new(TestHost::default());
        let guard = RegionGuard::on_load(dir.path(), host.clone()).unwrap();
        assert!(guard.store().find_global("world").is_some_and(|r| !r.flag(Flag::Pvp)));
        assert!(dir.path().join("old_converted").is_dir());

        // A second load finds nothing left to convert.
        assert!(RegionGuard::on_load(dir.path(), host).is_ok());
    }

    #[test]
    fn denied_flag_event_cancels_and_notifies() {
        let (_dir, host, guard) = setup();
        save_spawn(&guard, Uuid::new_v4());
        let stranger = Uuid::new_v4();

        let mut event = BlockBreakEvent {
            player: Some(stranger),
            block: "minecraft:stone".into(),
            location: at(0, 64, 0),
            cancelled: false,
        };
        let cancelled = guard.handle_flag_event(
            Some(&mut event),
            Flag::Destroy,
            &at(0, 64, 0),
            Some(&stranger),
            EventScope::Local,
        );
        assert!(cancelled && event.cancelled);
        assert_eq!(
            host.action_bar_for(&stranger),
            vec![guard.config().messages.no_permission.clone()]
        );
        assert_eq!(host.action_bar.lock().unwrap()[0].1.color, Some(NamedColor::Red));
    }

    #[test]
    fn spawn_pvp_scenario_through_the_store() {
        let (_dir, host, guard) = setup();
        save_spawn(&guard, Uuid::new_v4());
        let (attacker, admin) = (Uuid::new_v4(), Uuid::new_v4());
        host.grant(admin, BYPASS);

        let pvp = |actor: &Uuid| {
            guard.handle_flag_event(None, Flag::Pvp, &at(1, 64, 1), Some(actor), EventScope::Global)
        };
        assert!(pvp(&attacker));
        assert!(!pvp(&admin));
        // Outside the region nothing is protected.
        assert!(!guard.handle_flag_event(
            None,
            Flag::Pvp,
            &at(100, 64, 100),
            Some(&attacker),
            EventScope::Global
        ));
    }

    #[test]
    fn global_region_covers_the_rest_of_the_world() {
        let (_dir, _host, guard) = setup();
        let mut world = Region::Global(GlobalRegion::new("world"));
        world.set_flag(Flag::FireSpread, false);
        assert!(guard.save_region(None, &mut world));
        assert!(guard.handle_flag_event(None, Flag::FireSpread, &at(500, 64, 500), None, EventScope::Global));
    }

    #[test]
    fn commands_are_checked_at_the_location() {
        let (_dir, host, guard) = setup();
        let member = Uuid::new_v4();
        save_spawn(&guard, member);
        guard.edit_region(&member, "spawn", |region| region.common_mut().add_command("/home", false));

        let stranger = Uuid::new_v4();
        assert!(guard.handle_command("/home", &at(0, 64, 0), &stranger));
        assert!(!guard.handle_command("/home", &at(0, 64, 0), &member));
        assert_eq!(host.action_bar_for(&stranger).len(), 1);
    }

    #[test]
    fn only_owners_edit_and_delete() {
        let (_dir, host, guard) = setup();
        let owner = Uuid::new_v4();
        save_spawn(&guard, owner);
        let stranger = Uuid::new_v4();

        assert!(guard.edit_region(&stranger, "Spawn", |r| r.set_flag(Flag::Pvp, true)).is_none());
        assert_eq!(host.messages_for(&stranger), vec![guard.config().messages.not_owner.clone()]);
        assert!(!guard.delete_region(&stranger, "Spawn"));

        let edited = guard.edit_region(&owner, "Spawn", |r| r.set_flag(Flag::Pvp, true)).unwrap();
        assert!(edited.flag(Flag::Pvp));
        assert!(guard.delete_region(&owner, "spawn"));
        assert!(guard.store().find_by_name("Spawn").is_none());
    }

    #[test]
    fn wand_selection_then_commit() {
        let (_dir, host, guard) = setup();
        let player = Uuid::new_v4();
        guard.select_corner(player, at(0, 60, 0), Corner::First).unwrap();
        let local = guard.select_corner(player, at(9, 70, 9), Corner::Second).unwrap();
        assert_eq!(local.bounds().volume(), 10 * 11 * 10);
        assert_eq!(host.messages_for(&player).len(), 2);

        guard.update_pending(&player, |region| region.set_name("Home"));
        let saved = guard.commit_pending(&player, "alice").unwrap();
        assert!(saved.is_owner(&player));
        assert!(!guard.has_pending(&player));
        assert!(guard.store().find_by_name("home").is_some_and(|r| r.is_owner(&player)));
    }

    #[test]
    fn committing_under_a_taken_name_keeps_the_existing_region() {
        let (_dir, host, guard) = setup();
        let admin = Uuid::new_v4();
        save_spawn(&guard, admin);

        let player = Uuid::new_v4();
        guard.select_corner(player, at(100, 60, 100), Corner::First).unwrap();
        guard.select_corner(player, at(110, 70, 110), Corner::Second).unwrap();
        guard.update_pending(&player, |region| region.set_name("spawn"));

        assert!(guard.commit_pending(&player, "mallory").is_none());
        assert!(guard.has_pending(&player));
        assert!(host.messages_for(&player).contains(&guard.config().messages.name_taken));

        let spawn = guard.store().find_by_name("Spawn").unwrap();
        assert_eq!(spawn.name(), "Spawn");
        assert!(spawn.is_owner(&admin));
        assert!(!spawn.is_owner(&player));
        assert_eq!(guard.store().load_all().len(), 1);
    }

    #[test]
    fn renaming_onto_another_region_is_refused() {
        let (_dir, host, guard) = setup();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let mut market = LocalRegion::new("Market", at(0, 0, 0), at(5, 5, 5));
        market.add_member(RegionMember::new(alice, "alice", RegionRole::Owner));
        let mut bazaar = LocalRegion::new("Bazaar", at(50, 0, 50), at(55, 5, 55));
        bazaar.add_member(RegionMember::new(bob, "bob", RegionRole::Owner));
        assert!(guard.create_region(None, &mut Region::Local(market)));
        assert!(guard.create_region(None, &mut Region::Local(bazaar)));

        assert!(guard.edit_region(&alice, "Market", |r| r.set_name("bazaar")).is_none());
        assert_eq!(host.messages_for(&alice), vec![guard.config().messages.name_taken.clone()]);
        assert!(guard.store().find_by_name("Bazaar").is_some_and(|r| r.is_owner(&bob)));
        assert!(guard.store().find_by_name("Market").is_some_and(|r| r.is_owner(&alice)));
    }

    #[test]
    fn edits_survive_a_restart_when_the_retired_folder_name_is_taken() {
        let dir = TempDir::new();
        let legacy = dir.path().join("old").join("globals");
        std::fs::create_dir_all(&legacy).unwrap();
        std::fs::write(legacy.join("globals.json"), r#"{"world": {"flags": {"pvp": false}}}"#)
            .unwrap();
        std::fs::create_dir_all(dir.path().join("old_converted")).unwrap();

        let host = Arc::new(TestHost::default());
        let guard = RegionGuard::on_load(dir.path(), host.clone()).unwrap();
        let edited = guard.store().modify("world", |r| r.set_flag(Flag::Pvp, true)).unwrap();
        assert!(edited.saved().is_some_and(|r| r.flag(Flag::Pvp)));

        let guard = RegionGuard::on_load(dir.path(), host).unwrap();
        assert!(guard.store().find_global("world").is_some_and(|r| r.flag(Flag::Pvp)));
        assert!(!dir.path().join("old").exists());
    }

    #[test]
    fn print_region_colours_members() {
        let (_dir, host, guard) = setup();
        let owner = Uuid::new_v4();
        save_spawn(&guard, owner);
        let viewer = Uuid::new_v4();
        assert!(guard.print_region(&viewer, "spawn"));

        let messages = host.messages.lock().unwrap();
        let members = messages
            .iter()
            .find(|(id, line)| *id == viewer && line.text.starts_with("Members"))
            .map(|(_, line)| line.clone())
            .unwrap();
        assert_eq!(members.extra[0].color, Some(NamedColor::Red));
        host.set_online(owner, true);
        drop(messages);
        assert!(guard.print_region(&owner, "spawn"));
        let messages = host.messages.lock().unwrap();
        let own = messages
            .iter()
            .rev()
            .find(|(id, line)| *id == owner && line.text.starts_with("Members"))
            .map(|(_, line)| line.extra[0].color)
            .unwrap();
        assert_eq!(own, Some(NamedColor::Aqua));
    }

    #[test]
    fn pending_set_is_a_no_op_until_cleared() {
        let (_dir, _host, guard) = setup();
        let player = Uuid::new_v4();
        let first = Region::Global(GlobalRegion::new("first"));
        let second = Region::Global(GlobalRegion::new("second"));
        assert!(guard.set_pending(player, first));
        assert!(!guard.set_pending(player, second.clone()));
        assert_eq!(guard.pending(&player).map(|r| r.name().to_owned()), Some("first".to_owned()));

        guard.end_session(&player);
        assert!(guard.set_pending(player, second));
        assert_eq!(guard.clear_pending(&player).map(|r| r.name().to_owned()), Some("second".to_owned()));
    }
}
