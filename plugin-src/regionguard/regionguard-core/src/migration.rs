//! One-shot import of the old flat region files.
//!
//! The old layout is `<legacy>/regions/*` and `<legacy>/globals/*`, each file a
//! JSON object mapping region names to records whose flags are a single flat
//! map. Converted regions are written through the [`RegionStore`] and never
//! replace a region that already exists. Afterwards the legacy folder is
//! renamed to `<legacy>_converted` (or `<legacy>_converted_N` when that is
//! taken); if no rename works a marker file is left inside it instead.

use std::fs;
use std::path::{Path, PathBuf};

use regionguard_types::{
    Explosion, Flag, GlobalRegion, Interact, LocalRegion, Region, RegionKind, RegionLocation,
    TableKey, Vehicle, region::DEFAULT_GAMEMODE,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::store::RegionStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub converted: usize,
    pub failed: usize,
    /// Records whose name an existing region already has.
    pub skipped: usize,
}

/// Left in the legacy folder when it could not be renamed.
pub const CONVERTED_MARKER: &str = ".converted";

const RETIRE_ATTEMPTS: usize = 100;

#[derive(Deserialize)]
struct LegacyRegion {
    flags: Option<Map<String, Value>>,
    pos1: Option<LegacyPoint>,
    pos2: Option<LegacyPoint>,
    teleport: Option<LegacyPoint>,
    spawn: Option<LegacyPoint>,
    dimension: Option<String>,
    world: Option<String>,
    #[serde(default)]
    priority: i32,
    gamemode: Option<String>,
}

#[derive(Deserialize)]
struct LegacyPoint {
    x: i32,
    y: i32,
    z: i32,
}

impl LegacyPoint {
    fn at(&self, dimension: &str, world: &str) -> RegionLocation {
        RegionLocation::new(self.x, self.y, self.z, dimension, world)
    }
}

/// Reads one boolean out of the flat legacy flag map.
struct LegacyFlags<'a>(&'a Map<String, Value>);

impl LegacyFlags<'_> {
    fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    fn flag(&self, flag: Flag) -> Option<bool> {
        self.get(&flag.legacy_name()).or_else(|| self.get(flag.name()))
    }
}

/// Whether a legacy folder with anything to convert is present.
#[must_use]
pub fn needs_conversion(legacy_root: &Path) -> bool {
    !legacy_root.join(CONVERTED_MARKER).exists()
        && (legacy_root.join("regions").is_dir() || legacy_root.join("globals").is_dir())
}

/// Build a current region out of one legacy record.
pub fn convert_record(name: &str, record: Value, kind: RegionKind) -> Result<Region, String> {
    let legacy: LegacyRegion =
        serde_json::from_value(record).map_err(|e| format!("legacy region {name}: {e}"))?;
    let flags = legacy
        .flags
        .as_ref()
        .ok_or_else(|| format!("legacy region {name}: missing flags"))?;
    let flags = LegacyFlags(flags);

    let mut region = match kind {
        RegionKind::Local => Region::Local(local_shell(name, &legacy)?),
        RegionKind::Global => Region::Global(GlobalRegion::new(name)),
    };
    let common = region.common_mut();

    for &flag in Flag::ALL {
        common.set_flag(flag, flags.flag(flag).unwrap_or_else(|| flag.default_value()));
    }
    let build = flags.get("build");
    common.set_flag(Flag::Place, build.unwrap_or_else(|| Flag::Place.default_value()));
    common.set_flag(Flag::Destroy, build.unwrap_or_else(|| Flag::Destroy.default_value()));

    let chests = flags.get("chests");
    common.set_flag(Flag::Chests, chests.unwrap_or_else(|| Flag::Chests.default_value()));
    common.set_flag(
        Flag::TrappedChests,
        chests.unwrap_or_else(|| Flag::TrappedChests.default_value()),
    );

    let used = flags.get("use");
    for &interact in Interact::ALL {
        common.set_interact(interact, used.unwrap_or_else(|| interact.default_value()));
    }

    let (vehicle_place, vehicle_destroy) = (flags.get("vehicleplace"), flags.get("vehicledestroy"));
    for &vehicle in Vehicle::ALL {
        let default = vehicle.default_value();
        common.set_vehicle_place(vehicle, vehicle_place.unwrap_or(default.place));
        common.set_vehicle_destroy(vehicle, vehicle_destroy.unwrap_or(default.destroy));
    }

    let (destroy, damage) = (flags.get("otherexplosions"), flags.get("otherexplosionsdamage"));
    for &explosion in Explosion::ALL {
        let default = explosion.default_value();
        common.set_explosion_destroy(explosion, destroy.unwrap_or(default.destroy));
        common.set_explosion_damage(explosion, damage.unwrap_or(default.damage));
    }

    // Source-specific keys win over the generic ones.
    let overrides = [
        (Explosion::Tnt, "tnt", "tntdamage"),
        (Explosion::Creeper, "creeperexplosions", "mobdamage"),
    ];
    for (explosion, destroy_key, damage_key) in overrides {
        let default = explosion.default_value();
        common.set_explosion_destroy(explosion, flags.get(destroy_key).unwrap_or(default.destroy));
        common.set_explosion_damage(explosion, flags.get(damage_key).unwrap_or(default.damage));
    }

    Ok(region)
}

fn local_shell(name: &str, legacy: &LegacyRegion) -> Result<LocalRegion, String> {
    let missing = |field: &str| format!("legacy region {name}: missing {field}");
    let dimension = legacy.dimension.as_deref().ok_or_else(|| missing("dimension"))?;
    let world = legacy.world.as_deref().ok_or_else(|| missing("world"))?;
    let pos1 = legacy.pos1.as_ref().ok_or_else(|| missing("pos1"))?;
    let pos2 = legacy.pos2.as_ref().ok_or_else(|| missing("pos2"))?;

    let mut local = LocalRegion::new(name, pos1.at(dimension, world), pos2.at(dimension, world));
    local.teleport = legacy.teleport.as_ref().map(|p| p.at(dimension, world));
    local.spawn = legacy.spawn.as_ref().map(|p| p.at(dimension, world));
    local.priority = legacy.priority;
    local.common.game_mode = legacy
        .gamemode
        .clone()
        .unwrap_or_else(|| DEFAULT_GAMEMODE.to_owned());
    Ok(local)
}

/// Convert every legacy file under `legacy_root` and retire the folder.
/// Broken files and records are logged and counted; the rest still convert.
pub fn convert_legacy(store: &RegionStore, legacy_root: &Path) -> MigrationReport {
    let mut report = MigrationReport::default();
    for (folder, kind) in [("regions", RegionKind::Local), ("globals", RegionKind::Global)] {
        let dir = legacy_root.join(folder);
        if !dir.is_dir() {
            continue;
        }
        for path in legacy_files(&dir) {
            convert_file(store, &path, kind, &mut report);
        }
    }

    match retire(legacy_root) {
        Ok(retired) => log::info!(
            "regionguard: Converted {} legacy regions ({} failed, {} already present), moved {} to {}",
            report.converted,
            report.failed,
            report.skipped,
            legacy_root.display(),
            retired.display()
        ),
        Err(e) => {
            log::error!("regionguard: Could not rename {}: {e}", legacy_root.display());
            let marker = legacy_root.join(CONVERTED_MARKER);
            if let Err(e) = fs::write(&marker, "") {
                log::error!("regionguard: Could not write {}: {e}", marker.display());
            }
        }
    }
    report
}

/// Move the legacy folder to the first free `_converted` name.
fn retire(legacy_root: &Path) -> Result<PathBuf, String> {
    let mut last_error = "every target name is taken".to_owned();
    for attempt in 0..RETIRE_ATTEMPTS {
        let target = converted_path(legacy_root, attempt);
        if target.exists() {
            continue;
        }
        match fs::rename(legacy_root, &target) {
            Ok(()) => return Ok(target),
            Err(e) => last_error = e.to_string(),
        }
    }
    Err(last_error)
}

fn convert_file(store: &RegionStore, path: &Path, kind: RegionKind, report: &mut MigrationReport) {
    let records = fs::read_to_string(path)
        .map_err(|e| format!("read: {e}"))
        .and_then(|text| {
            serde_json::from_str::<Map<String, Value>>(&text).map_err(|e| format!("parse: {e}"))
        });
    let records = match records {
        Ok(records) => records,
        Err(e) => {
            log::error!("regionguard: Skipping legacy file {}: {e}", path.display());
            report.failed += 1;
            return;
        }
    };

    for (name, record) in records {
        let saved =
            convert_record(&name, record, kind).and_then(|mut region| store.create(&mut region));
        match saved {
            Ok(Some(_)) => report.converted += 1,
            Ok(None) => {
                log::warn!("regionguard: Legacy region {name} already exists, keeping the current one");
                report.skipped += 1;
            }
            Err(e) => {
                log::error!("regionguard: {e}");
                report.failed += 1;
            }
        }
    }
}

fn legacy_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect(),
        Err(e) => {
            log::error!("regionguard: list legacy folder {}: {e}", dir.display());
            return Vec::new();
        }
    };
    files.sort();
    files
}

/// `<data>/old` -> `<data>/old_converted`, then `old_converted_1`, `old_converted_2`...
fn converted_path(legacy_root: &Path, attempt: usize) -> PathBuf {
    let name = legacy_root
        .file_name()
        .map_or_else(|| "legacy".into(), |name| name.to_string_lossy().into_owned());
    if attempt == 0 {
        legacy_root.with_file_name(format!("{name}_converted"))
    } else {
        legacy_root.with_file_name(format!("{name}_converted_{attempt}"))
    }
}
