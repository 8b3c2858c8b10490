//! Plugin configuration, loaded from `config.toml` in the data folder.
//! Regions themselves live in their own JSON files; config only has global settings.

use std::path::Path;

use serde::Deserialize;

/// Top-level config file layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub permissions: PermissionsConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_regions_dir")]
    pub regions_dir: String,
    #[serde(default = "default_globals_dir")]
    pub globals_dir: String,
    #[serde(default = "default_legacy_dir")]
    pub legacy_dir: String,
}

fn default_regions_dir() -> String {
    "regions".into()
}
fn default_globals_dir() -> String {
    "globals".into()
}
fn default_legacy_dir() -> String {
    "old".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            regions_dir: default_regions_dir(),
            globals_dir: default_globals_dir(),
            legacy_dir: default_legacy_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PermissionsConfig {
    /// Permission node that overrides flag denials.
    #[serde(default = "default_bypass")]
    pub bypass: String,
}

fn default_bypass() -> String {
    "regionguard:region".into()
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            bypass: default_bypass(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MigrationConfig {
    #[serde(default = "default_true")]
    pub convert_legacy: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            convert_legacy: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "default_no_permission")]
    pub no_permission: String,
    #[serde(default = "default_save_failed")]
    pub save_failed: String,
    #[serde(default = "default_load_failed")]
    pub load_failed: String,
    #[serde(default = "default_not_owner")]
    pub not_owner: String,
    #[serde(default = "default_name_taken")]
    pub name_taken: String,
}

fn default_no_permission() -> String {
    "You don't have permission to do that here!".into()
}
fn default_save_failed() -> String {
    "The region could not be saved, check the server log.".into()
}
fn default_load_failed() -> String {
    "The region could not be loaded, check the server log.".into()
}
fn default_not_owner() -> String {
    "Only an owner of this region can do that.".into()
}
fn default_name_taken() -> String {
    "A region with that name already exists.".into()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            no_permission: default_no_permission(),
            save_failed: default_save_failed(),
            load_failed: default_load_failed(),
            not_owner: default_not_owner(),
            name_taken: default_name_taken(),
        }
    }
}

const BUNDLED: &str = include_str!("../config.toml");

impl GuardConfig {
    /// Read `config.toml`, first writing the bundled one when the file is missing.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("create data folder {}: {e}", parent.display()))?;
            }
            std::fs::write(path, BUNDLED)
                .map_err(|e| format!("write default config {}: {e}", path.display()))?;
            log::info!("regionguard: Wrote default config to {}", path.display());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("read config {}: {e}", path.display()))?;
        let config: Self =
            toml::from_str(&text).map_err(|e| format!("parse config {}: {e}", path.display()))?;
        config.checked()
    }

    /// Region folders must be distinct and the bypass node non-empty.
    fn checked(mut self) -> Result<Self, String> {
        let storage = &self.storage;
        let folders = [&storage.regions_dir, &storage.globals_dir, &storage.legacy_dir];
        for (i, folder) in folders.iter().enumerate() {
            if folder.trim().is_empty() {
                return Err("storage folders must not be empty".to_owned());
            }
            if folders[..i].contains(folder) {
                return Err(format!("storage folder '{folder}' is configured twice"));
            }
        }
        if self.permissions.bypass.trim().is_empty() {
            log::warn!(
                "regionguard: Empty bypass permission, using {}",
                default_bypass()
            );
            self.permissions.bypass = default_bypass();
        }
        log::info!(
            "regionguard: Bypass permission node is {}",
            self.permissions.bypass
        );
        Ok(self)
    }
}
