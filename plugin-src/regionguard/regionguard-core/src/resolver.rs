//! Which region governs a location.
//!
//! A linear scan over every region per query. Region counts are small and
//! admin-made, so there is no spatial index and no cache.

use regionguard_types::{Region, RegionLocation, same_name};

/// The local region containing `location` with the highest priority.
/// On equal priority the region scanned last wins.
#[must_use]
pub fn local_region_at<'a>(regions: &'a [Region], location: &RegionLocation) -> Option<&'a Region> {
    let mut best: Option<(&Region, i32)> = None;
    for region in regions {
        let Some(local) = region.as_local() else {
            continue;
        };
        if !local.contains(location) {
            continue;
        }
        if best.is_none_or(|(_, priority)| local.priority >= priority) {
            best = Some((region, local.priority));
        }
    }
    best.map(|(region, _)| region)
}

/// The global region named after `world`.
#[must_use]
pub fn global_region_for<'a>(regions: &'a [Region], world: &str) -> Option<&'a Region> {
    regions
        .iter()
        .find(|region| !region.is_local() && same_name(region.name(), world))
}

/// The authoritative region at `location`, or `None` when the spot is unprotected.
#[must_use]
pub fn resolve<'a>(regions: &'a [Region], location: &RegionLocation) -> Option<&'a Region> {
    local_region_at(regions, location).or_else(|| global_region_for(regions, &location.world))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionguard_types::{GlobalRegion, LocalRegion};

    fn at(x: i32, y: i32, z: i32) -> RegionLocation {
        RegionLocation::new(x, y, z, RegionLocation::OVERWORLD, "world")
    }

    fn boxed(name: &str, priority: i32, a: RegionLocation, b: RegionLocation) -> Region {
        let mut local = LocalRegion::new(name, a, b);
        local.priority = priority;
        Region::Local(local)
    }

    #[test]
    fn highest_priority_wins() {
        let regions = vec![
            boxed("outer", 1, at(-50, 0, -50), at(50, 100, 50)),
            boxed("inner", 5, at(-5, 0, -5), at(5, 100, 5)),
            boxed("middle", 3, at(-20, 0, -20), at(20, 100, 20)),
        ];
        assert_eq!(resolve(&regions, &at(0, 64, 0)).map(Region::name), Some("inner"));
        assert_eq!(resolve(&regions, &at(10, 64, 10)).map(Region::name), Some("middle"));
        assert_eq!(resolve(&regions, &at(40, 64, 40)).map(Region::name), Some("outer"));
    }

    #[test]
    fn equal_priority_goes_to_the_last_scanned() {
        let first = boxed("first", 2, at(0, 0, 0), at(10, 10, 10));
        let second = boxed("second", 2, at(10, 10, 10), at(5, 5, 5));
        let forward = vec![first.clone(), second.clone()];
        let backward = vec![second, first];
        assert_eq!(resolve(&forward, &at(7, 7, 7)).map(Region::name), Some("second"));
        assert_eq!(resolve(&backward, &at(7, 7, 7)).map(Region::name), Some("first"));
    }

    #[test]
    fn falls_back_to_the_world_global() {
        let regions = vec![
            Region::Global(GlobalRegion::new("World")),
            boxed("spawn", 0, at(0, 0, 0), at(10, 10, 10)),
            Region::Global(GlobalRegion::new("nether_world")),
        ];
        assert_eq!(resolve(&regions, &at(100, 0, 0)).map(Region::name), Some("World"));

        let elsewhere = RegionLocation::new(0, 0, 0, RegionLocation::OVERWORLD, "creative");
        assert!(resolve(&regions, &elsewhere).is_none());
    }

    #[test]
    fn other_dimensions_do_not_match() {
        let regions = vec![boxed("spawn", 0, at(0, 0, 0), at(10, 10, 10))];
        let nether = RegionLocation::new(5, 5, 5, "minecraft:the_nether", "world");
        assert!(resolve(&regions, &nether).is_none());
    }

    #[test]
    fn a_local_region_named_like_the_world_is_not_a_global() {
        let regions = vec![boxed("world", 0, at(500, 0, 500), at(510, 10, 510))];
        assert!(global_region_for(&regions, "world").is_none());
    }

    #[test]
    fn global_lookup_folds_non_ascii_world_names() {
        let regions = vec![Region::Global(GlobalRegion::new("Ärea"))];
        let location = RegionLocation::new(0, 0, 0, RegionLocation::OVERWORLD, "ärea");
        assert_eq!(resolve(&regions, &location).map(Region::name), Some("Ärea"));
    }
}
