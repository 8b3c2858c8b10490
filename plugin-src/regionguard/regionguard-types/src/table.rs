//! Per-region tables keyed by a closed enumeration.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::keys::TableKey;

/// One value per member of `K`.
///
/// Entries can only be missing transiently, right after reading data written
/// under an older key set; [`FlagTable::reconcile`] fills them in. Reads of a
/// missing key return the declared default.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagTable<K: TableKey> {
    entries: BTreeMap<K, K::Value>,
}

impl<K: TableKey> FlagTable<K> {
    /// A complete table holding every declared default.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.reconcile();
        table
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, key: K) -> K::Value {
        self.entries
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.default_value())
    }

    pub fn get_mut(&mut self, key: K) -> &mut K::Value {
        self.entries
            .entry(key)
            .or_insert_with(|| key.default_value())
    }

    pub fn set(&mut self, key: K, value: K::Value) {
        self.entries.insert(key, value);
    }

    /// Apply `value` to every member.
    pub fn set_all(&mut self, value: &K::Value) {
        for key in K::ALL {
            self.entries.insert(*key, value.clone());
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        K::ALL.iter().all(|key| self.entries.contains_key(key))
    }

    /// Add every missing member with its default, leaving existing entries alone.
    /// Returns how many entries were added.
    pub fn reconcile(&mut self) -> usize {
        let before = self.entries.len();
        for key in K::ALL {
            self.entries
                .entry(*key)
                .or_insert_with(|| key.default_value());
        }
        self.entries.len() - before
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &K::Value)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

impl<K: TableKey> Default for FlagTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TableKey> Serialize for FlagTable<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.name(), value)?;
        }
        map.end()
    }
}

impl<'de, K: TableKey> Deserialize<'de> for FlagTable<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, K::Value>::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (name, value) in raw {
            match K::from_name(&name) {
                Some(key) => {
                    entries.insert(key, value);
                }
                None => log::warn!("regionguard: dropping unknown {} key '{name}'", K::TABLE),
            }
        }
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{Explosion, ExplosionRule, Flag};

    #[test]
    fn reconcile_fills_only_missing_keys() {
        let mut table = FlagTable::<Flag>::empty();
        table.set(Flag::Pvp, false);
        assert!(!table.is_complete());
        assert!(table.get(Flag::Place));

        let added = table.reconcile();
        assert_eq!(added, Flag::ALL.len() - 1);
        assert!(table.is_complete());
        assert!(!table.get(Flag::Pvp));
        assert_eq!(table.reconcile(), 0);
    }

    #[test]
    fn unknown_keys_are_dropped_and_missing_keys_stay_missing() {
        let json = r#"{ "pvp": false, "no_such_flag": true, "FIRESPREAD": false }"#;
        let table: FlagTable<Flag> = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.get(Flag::Pvp));
        assert!(!table.get(Flag::FireSpread));
        assert!(!table.contains_key(Flag::Place));
    }

    #[test]
    fn serializes_by_name() {
        let mut table = FlagTable::<Explosion>::empty();
        table.set(
            Explosion::Tnt,
            ExplosionRule {
                damage: true,
                destroy: false,
            },
        );
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["tnt"]["destroy"], serde_json::json!(false));
        assert_eq!(json["tnt"]["damage"], serde_json::json!(true));
    }
}
