use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::entry::RoomTypeEntry;
use crate::error::{CalcError, Result};

/// (id, label, lux min/avg/max, Kelvin min/recommended/max)
type BuiltinRow = (&'static str, &'static str, [f64; 3], [f64; 3]);

#[rustfmt::skip]
const BUILTIN_ROWS: &[BuiltinRow] = &[
    ("kitchen_gen", "Kitchen - General", [150.0, 250.0, 350.0], [3000.0, 3500.0, 4000.0]),
    ("kitchen_task", "Kitchen - Task", [300.0, 500.0, 700.0], [4000.0, 4500.0, 5000.0]),
    ("living_gen", "Living Room - General", [100.0, 150.0, 200.0], [2700.0, 3000.0, 3500.0]),
    ("living_read", "Living Room - Reading", [300.0, 400.0, 500.0], [3000.0, 3500.0, 4000.0]),
    ("bedroom_gen", "Bedroom - General", [60.0, 100.0, 150.0], [2500.0, 2700.0, 3000.0]),
    ("bedroom_read", "Bedroom - Reading", [200.0, 300.0, 400.0], [2700.0, 3000.0, 3500.0]),
    ("office", "Office", [300.0, 400.0, 500.0], [4000.0, 4500.0, 5000.0]),
    ("workshop", "Workshop", [300.0, 500.0, 700.0], [4000.0, 5000.0, 6500.0]),
    ("bathroom_gen", "Bathroom - General", [150.0, 250.0, 350.0], [3000.0, 3500.0, 4000.0]),
    ("bathroom_mirror", "Bathroom - Mirror", [300.0, 500.0, 700.0], [4000.0, 4500.0, 5000.0]),
    ("studio", "Studio/Art Room", [500.0, 750.0, 1000.0], [5000.0, 5500.0, 6500.0]),
    ("dining", "Dining Room", [100.0, 150.0, 200.0], [2700.0, 3000.0, 3500.0]),
    ("hallway", "Hallway", [50.0, 100.0, 150.0], [2700.0, 3000.0, 4000.0]),
    ("laundry", "Laundry", [200.0, 300.0, 400.0], [3500.0, 4000.0, 4500.0]),
    ("gym", "Gym", [200.0, 300.0, 400.0], [4000.0, 4500.0, 5000.0]),
    ("patio", "Outdoor Patio", [50.0, 100.0, 150.0], [2700.0, 3000.0, 4000.0]),
];

static BUILTIN: Lazy<RoomCatalog> = Lazy::new(|| RoomCatalog {
    entries: BUILTIN_ROWS
        .iter()
        .map(|&(id, label, lux, kelvin)| RoomTypeEntry {
            id: id.to_string(),
            label: label.to_string(),
            min_lux: lux[0],
            avg_lux: lux[1],
            max_lux: lux[2],
            min_kelvin: kelvin[0],
            recommended_kelvin: kelvin[1],
            max_kelvin: kelvin[2],
        })
        .collect(),
});

/// Look up a room type in the built-in catalog.
pub fn lookup(room_type_id: &str) -> Result<&'static RoomTypeEntry> {
    RoomCatalog::builtin().lookup(room_type_id)
}

/// Ordered, read-only set of room types.
///
/// The built-in catalog is shared process-wide. Custom catalogs are built from
/// configured entries and validated up front, so a lookup never hands out an
/// entry that breaks the lux or Kelvin ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCatalog {
    entries: Vec<RoomTypeEntry>,
}

impl RoomCatalog {
    /// The static catalog of residential room types
    pub fn builtin() -> &'static RoomCatalog {
        &BUILTIN
    }

    /// Build a catalog from arbitrary entries.
    ///
    /// Fails on the first entry that violates its invariants or repeats an id.
    pub fn from_entries(entries: Vec<RoomTypeEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            entry.validate()?;
            if !seen.insert(entry.id.as_str()) {
                return Err(CalcError::InvalidRoomEntry {
                    id: entry.id.clone(),
                    reason: "duplicate id".to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Copy of this catalog with `overrides` replacing same-id entries and
    /// appending new ones in the order given.
    pub fn with_overrides(&self, overrides: Vec<RoomTypeEntry>) -> Result<Self> {
        let mut entries = self.entries.clone();
        for entry in overrides {
            entry.validate()?;
            match entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }
        Self::from_entries(entries)
    }

    pub fn lookup(&self, room_type_id: &str) -> Result<&RoomTypeEntry> {
        self.entries
            .iter()
            .find(|e| e.id == room_type_id)
            .ok_or_else(|| CalcError::UnknownRoomType(room_type_id.to_string()))
    }

    pub fn contains(&self, room_type_id: &str) -> bool {
        self.entries.iter().any(|e| e.id == room_type_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomTypeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
