//! # Artemis Shared
//!
//! Protocol vocabulary used by both the world model and the networking stack.
//!
//! ## Contents
//!
//! - [`Version`]: the negotiated protocol version and the supported range
//! - [`type_hash`]: JamCRC identifiers for packet type names
//! - [`BitField`]: packed presence flags at the head of every object record
//! - [`bits`]: the per-object-type bit slot lists and [`ObjectType`]
//! - [`enums`]: small closed protocol enumerations
//!
//! ## Rule
//!
//! This crate performs no I/O. Anything that touches a socket or a world
//! object lives downstream.

#![deny(unsafe_code)]

pub mod bitfield;
pub mod bits;
pub mod constants;
pub mod enums;
pub mod hash;
pub mod version;

pub use bitfield::BitField;
pub use bits::{BitSlot, ObjectType};
pub use constants::{DEFAULT_PORT, MAX_SHIPS, TUBE_COUNT};
pub use enums::{
    AlertStatus, BeamFrequency, BoolState, Console, CreatureType, DriveType, MainScreenView,
    OrdnanceType, ShipSystem, TubeState, Upgrade,
};
pub use hash::type_hash;
pub use version::{Version, VersionParseError};
