//! Region storage: one pretty-printed JSON file per region, local and global
//! regions in separate folders. Nothing is cached; every query re-reads the
//! folders, so returned lists are snapshots.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use regionguard_types::{GlobalRegion, LocalRegion, Region, RegionKind, RegionLocation, same_name};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::resolver;

/// Outcome of [`RegionStore::modify`].
#[derive(Debug, PartialEq)]
pub enum Modified {
    Saved(Region),
    /// No region has the requested name.
    Missing,
    /// The edit renamed the region onto a name another region holds. Nothing was written.
    NameTaken(String),
}

impl Modified {
    #[must_use]
    pub fn saved(self) -> Option<Region> {
        match self {
            Self::Saved(region) => Some(region),
            Self::Missing | Self::NameTaken(_) => None,
        }
    }
}

/// File-backed region store rooted at the plugin data folder.
pub struct RegionStore {
    regions_dir: PathBuf,
    globals_dir: PathBuf,
    /// Serializes writers so a load-modify-save cycle cannot lose another writer's update.
    write_lock: Mutex<()>,
}

impl RegionStore {
    #[must_use]
    pub fn new(root: &Path, storage: &StorageConfig) -> Self {
        Self {
            regions_dir: root.join(&storage.regions_dir),
            globals_dir: root.join(&storage.globals_dir),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn dir_for(&self, kind: RegionKind) -> &Path {
        match kind {
            RegionKind::Local => &self.regions_dir,
            RegionKind::Global => &self.globals_dir,
        }
    }

    /// Make sure both region folders exist.
    pub fn ensure_dirs(&self) -> Result<(), String> {
        for dir in [&self.regions_dir, &self.globals_dir] {
            fs::create_dir_all(dir)
                .map_err(|e| format!("create region folder {}: {e}", dir.display()))?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, String> {
        self.write_lock
            .lock()
            .map_err(|_| "region store lock poisoned".to_owned())
    }

    /// Every stored region: local regions first, then global ones, each folder
    /// in file-name order. Malformed records are logged and skipped.
    #[must_use]
    pub fn load_all(&self) -> Vec<Region> {
        let mut regions = self.load_dir(RegionKind::Local);
        regions.extend(self.load_dir(RegionKind::Global));
        regions
    }

    fn load_dir(&self, kind: RegionKind) -> Vec<Region> {
        let dir = self.dir_for(kind);
        if !dir.exists() {
            return Vec::new();
        }
        let files = match json_files(dir) {
            Ok(files) => files,
            Err(e) => {
                log::error!("regionguard: {e}");
                return Vec::new();
            }
        };
        let mut regions = Vec::with_capacity(files.len());
        for path in files {
            match read_region(&path, kind) {
                Ok(region) => regions.push(region),
                Err(e) => log::error!("regionguard: Skipping region file {}: {e}", path.display()),
            }
        }
        regions
    }

    /// Case-insensitive exact name match over every stored region.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Region> {
        self.load_all()
            .into_iter()
            .find(|region| same_name(region.name(), name))
    }

    /// The global region of a world, if one was saved.
    #[must_use]
    pub fn find_global(&self, world: &str) -> Option<Region> {
        self.load_dir(RegionKind::Global)
            .into_iter()
            .find(|region| same_name(region.name(), world))
    }

    /// Highest-priority local region at the location, else the world's global region.
    #[must_use]
    pub fn region_at(&self, location: &RegionLocation) -> Option<Region> {
        let regions = self.load_all();
        resolver::resolve(&regions, location).cloned()
    }

    /// Regions the player is listed on.
    #[must_use]
    pub fn regions_of(&self, player: &Uuid) -> Vec<Region> {
        self.load_all()
            .into_iter()
            .filter(|region| region.is_member(player))
            .collect()
    }

    #[must_use]
    pub fn has_region(&self, player: &Uuid) -> bool {
        self.load_all().iter().any(|region| region.is_member(player))
    }

    /// Write the region to `<folder>/<name>.json`, replacing the record of that
    /// name in the same folder. An empty name is replaced by the next free
    /// `RegionN` first.
    pub fn save(&self, region: &mut Region) -> Result<PathBuf, String> {
        let _guard = self.lock()?;
        self.save_locked(region)
    }

    /// Store a new region. `Ok(None)` when any stored region, local or global,
    /// already has the name; nothing is written then.
    pub fn create(&self, region: &mut Region) -> Result<Option<PathBuf>, String> {
        let _guard = self.lock()?;
        if self.find_by_name(region.name()).is_some() {
            return Ok(None);
        }
        self.save_locked(region).map(Some)
    }

    fn save_locked(&self, region: &mut Region) -> Result<PathBuf, String> {
        if region.name().trim().is_empty() {
            let name = self.next_default_name();
            region.set_name(name);
        }
        let name = region.name().to_owned();
        validate_name(&name)?;

        let dir = self.dir_for(region.kind());
        fs::create_dir_all(dir)
            .map_err(|e| format!("create region folder {}: {e}", dir.display()))?;

        let json = match &*region {
            Region::Local(local) => serde_json::to_string_pretty(local),
            Region::Global(global) => serde_json::to_string_pretty(global),
        }
        .map_err(|e| format!("serialize region {name}: {e}"))?;

        let path = dir.join(format!("{name}.json"));
        let tmp = dir.join(format!("{name}.json.tmp"));
        if let Err(e) = write_file(&tmp, json.as_bytes()) {
            let _ = fs::remove_file(&tmp);
            return Err(format!("write region {name}: {e}"));
        }
        // Same record stored under another casing, e.g. `spawn.json` when saving `Spawn`.
        if let Some(previous) = find_file(dir, &name).filter(|previous| *previous != path) {
            if let Err(e) = fs::remove_file(&previous) {
                log::warn!("regionguard: Could not remove stale {}: {e}", previous.display());
            }
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(format!("replace region file {}: {e}", path.display()));
        }
        Ok(path)
    }

    fn next_default_name(&self) -> String {
        let regions = self.load_all();
        let mut index = regions
            .iter()
            .filter(|region| region.name().to_lowercase().starts_with("region"))
            .count();
        loop {
            let candidate = format!("Region{index}");
            if !regions
                .iter()
                .any(|region| same_name(region.name(), &candidate))
            {
                return candidate;
            }
            index += 1;
        }
    }

    /// Delete the region's file. `Ok(false)` when there was nothing to delete.
    pub fn remove(&self, region: &Region) -> Result<bool, String> {
        let _guard = self.lock()?;
        self.remove_locked(region.kind(), region.name())
    }

    fn remove_locked(&self, kind: RegionKind, name: &str) -> Result<bool, String> {
        validate_name(name)?;
        let dir = self.dir_for(kind);
        let Some(path) = find_file(dir, name) else {
            return Ok(false);
        };
        fs::remove_file(&path).map_err(|e| format!("delete region file {}: {e}", path.display()))?;
        Ok(true)
    }

    /// Rebuild the record under the current flag set and write it back.
    pub fn update(&self, region: &Region) -> Result<Region, String> {
        let mut fresh = region.upgraded();
        self.save(&mut fresh)?;
        Ok(fresh)
    }

    /// Load `name`, apply `edit`, upgrade and save, all under the writer lock.
    /// A rename moves the backing file and is refused when another region
    /// already has the new name.
    pub fn modify<F>(&self, name: &str, edit: F) -> Result<Modified, String>
    where
        F: FnOnce(&mut Region),
    {
        let _guard = self.lock()?;
        let Some(mut region) = self.find_by_name(name) else {
            return Ok(Modified::Missing);
        };
        let old_name = region.name().to_owned();
        edit(&mut region);
        let renamed = !same_name(region.name(), &old_name);
        if renamed && self.find_by_name(region.name()).is_some() {
            return Ok(Modified::NameTaken(region.name().to_owned()));
        }
        let mut fresh = region.upgraded();
        self.save_locked(&mut fresh)?;
        if renamed {
            self.remove_locked(fresh.kind(), &old_name)?;
        }
        Ok(Modified::Saved(fresh))
    }
}

fn read_region(path: &Path, kind: RegionKind) -> Result<Region, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("read: {e}"))?;
    let mut region = match kind {
        RegionKind::Local => Region::Local(
            serde_json::from_str::<LocalRegion>(&text).map_err(|e| format!("parse: {e}"))?,
        ),
        RegionKind::Global => Region::Global(
            serde_json::from_str::<GlobalRegion>(&text).map_err(|e| format!("parse: {e}"))?,
        ),
    };
    if region.name().is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            region.set_name(stem);
        }
    }
    region.update_flags();
    Ok(region)
}

/// `*.json` files of a folder, sorted by file name.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("list region folder {}: {e}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

fn find_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let exact = dir.join(format!("{name}.json"));
    if exact.is_file() {
        return Some(exact);
    }
    json_files(dir).ok()?.into_iter().find(|path| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| same_name(stem, name))
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Region names become file names.
fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty()
        || name.contains(['/', '\\', '\0'])
        || name == "."
        || name == ".."
    {
        return Err(format!("invalid region name '{name}'"));
    }
    Ok(())
}
