//! # Protocol Constants
//!
//! Fixed sizes baked into the server. Changing any of these breaks the wire
//! layout of the records that depend on them.

// =============================================================================
// NETWORK
// =============================================================================

/// TCP port an Artemis server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 2010;

// =============================================================================
// SHIP LAYOUT
// =============================================================================

/// Player ships per server.
pub const MAX_SHIPS: usize = 8;

/// Torpedo tubes per player ship.
pub const TUBE_COUNT: usize = 6;

/// Ship systems tracked by engineering (see [`crate::ShipSystem`]).
pub const SYSTEM_COUNT: usize = 8;

/// Beam frequencies (see [`crate::BeamFrequency`]).
pub const FREQUENCY_COUNT: usize = 5;
