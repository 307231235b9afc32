//! # Vessel Data
//!
//! Static reference data (hull classes and factions) keyed by the numeric
//! ids that appear in object updates. Loading it is the application's job;
//! the world model only needs the lookup.

/// A hull class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VesselInfo {
    /// Hull id as sent on the wire.
    pub hull_id: i32,
    /// Class name, e.g. "Light Cruiser".
    pub name: String,
    /// Owning faction id.
    pub faction_id: i32,
    /// Coarse category such as "cruiser" or "base".
    pub broad_type: String,
}

/// A faction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactionInfo {
    /// Faction id.
    pub id: i32,
    /// Faction name.
    pub name: String,
    /// Returns true for factions hostile to the players by default.
    pub enemy: bool,
}

/// Source of static vessel and faction data.
pub trait VesselDataLookup: Send + Sync {
    /// Hull class for `hull_id`.
    fn vessel(&self, hull_id: i32) -> Option<VesselInfo>;

    /// Faction for `id`.
    fn faction(&self, id: i32) -> Option<FactionInfo>;

    /// Faction that owns `hull_id`.
    fn faction_of(&self, hull_id: i32) -> Option<FactionInfo> {
        self.vessel(hull_id).and_then(|v| self.faction(v.faction_id))
    }
}
