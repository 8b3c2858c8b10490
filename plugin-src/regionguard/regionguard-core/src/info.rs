//! Chat summaries of regions, honouring the `hide_*` flags.

use std::fmt::Write as _;

use regionguard_types::{Explosion, Flag, Interact, Mob, Region, RegionMember, TableKey, Vehicle};
use uuid::Uuid;

use crate::host::{Host, NamedColor, TextComponent};

fn switches<K: TableKey>(keys: &[K], mut on: impl FnMut(K) -> bool) -> String {
    let mut out = String::new();
    for (i, &key) in keys.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}={}", key.name(), if on(key) { "on" } else { "off" });
    }
    out
}

fn line(label: &str, value: impl std::fmt::Display, color: NamedColor) -> TextComponent {
    TextComponent::text(format!("{label}: {value}")).color_named(color)
}

/// Aqua for the viewer, green when online, red otherwise.
fn member_name(member: &RegionMember, viewer: &Uuid, host: &dyn Host) -> TextComponent {
    let color = if member.uuid == *viewer {
        NamedColor::Aqua
    } else if host.is_online(&member.uuid) {
        NamedColor::Green
    } else {
        NamedColor::Red
    };
    let name = if member.is_owner() {
        format!("{} (owner)", member.username)
    } else {
        member.username.clone()
    };
    TextComponent::text(name).color_named(color)
}

/// Lines shown to `viewer` by the region info command.
#[must_use]
pub fn describe(region: &Region, viewer: &Uuid, host: &dyn Host) -> Vec<TextComponent> {
    let mut lines = vec![
        line("Region", region.name(), NamedColor::Gold),
        line("Type", region.kind(), NamedColor::Yellow),
    ];
    let common = region.common();

    if let Some(local) = region.as_local() {
        lines.push(line("Priority", local.priority, NamedColor::Yellow));
        if !region.flag(Flag::HideLocations) {
            lines.push(line("From", &local.pos1, NamedColor::Aqua));
            lines.push(line("To", &local.pos2, NamedColor::Aqua));
            for (label, point) in [("Teleport", &local.teleport), ("Spawn", &local.spawn)] {
                let text = point.as_ref().map_or_else(|| "not set".to_owned(), ToString::to_string);
                lines.push(line(label, text, NamedColor::Aqua));
            }
        }
        if !region.flag(Flag::HideMembers) {
            let mut members = TextComponent::text("Members: ").color_named(NamedColor::Yellow);
            for (i, member) in local.members.iter().enumerate() {
                if i > 0 {
                    members = members.add_child(TextComponent::text(", ").color_named(NamedColor::Yellow));
                }
                members = members.add_child(member_name(member, viewer, host));
            }
            lines.push(members);
        }
    }

    if !region.flag(Flag::HideFlags) {
        let sections = [
            ("Flags", switches(Flag::ALL, |k| common.flag(k))),
            ("Interacts", switches(Interact::ALL, |k| common.interact(k))),
            ("Explosions damage", switches(Explosion::ALL, |k| common.explosion(k).damage)),
            ("Explosions destroy", switches(Explosion::ALL, |k| common.explosion(k).destroy)),
            ("Vehicles place", switches(Vehicle::ALL, |k| common.vehicle(k).place)),
            ("Vehicles destroy", switches(Vehicle::ALL, |k| common.vehicle(k).destroy)),
            ("Mobs spawn", switches(Mob::ALL, |k| common.mob(k).spawn)),
            ("Mobs pve", switches(Mob::ALL, |k| common.mob(k).pve)),
            ("Mobs damage", switches(Mob::ALL, |k| common.mob(k).damage)),
            ("Mobs drop", switches(Mob::ALL, |k| common.mob(k).drop)),
        ];
        for (label, text) in sections {
            lines.push(line(label, text, NamedColor::Yellow));
        }
        let commands: Vec<String> = common
            .commands
            .iter()
            .map(|(name, enabled)| format!("{name}={}", if *enabled { "on" } else { "off" }))
            .collect();
        lines.push(line("Commands", commands.join(", "), NamedColor::Yellow));
    }
    lines
}

/// Comma-separated names, skipping regions flagged `hide_region`.
#[must_use]
pub fn list_names(regions: &[Region]) -> String {
    regions
        .iter()
        .filter(|region| !region.flag(Flag::HideRegion))
        .map(Region::name)
        .collect::<Vec<_>>()
        .join(", ")
}
