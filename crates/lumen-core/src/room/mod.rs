//! Room Lighting Table: recommended illuminance and color temperature per room type.

mod catalog;
mod entry;

pub use catalog::{lookup, RoomCatalog};
pub use entry::RoomTypeEntry;
