//! # Artemis Core
//!
//! The world model a client keeps while connected.
//!
//! ## Model
//!
//! - [`Property`]: a value, its observation time and its own lock
//! - [`objects`]: players, NPCs, bases, mines, black holes and creatures,
//!   each with a reusable [`Dsl`] builder
//! - [`ObjectStore`]: the caller-owned collection updates are merged into
//!
//! ## Merge Rule
//!
//! A property is copied from a newer partial update only if the update has a
//! value for it and is at least as new as what is stored. Updates may arrive
//! out of order; the newest observation always wins.
//!
//! ## Example
//!
//! ```rust,ignore
//! use artemis_core::{ObjectStore, objects::{Dsl, NpcDsl}};
//!
//! let mut dsl = NpcDsl::default();
//! dsl.ship.shielded.object.x = Some(5_000.0);
//! store.apply_update(dsl.build(id, timestamp).into())?;
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod objects;
pub mod property;
pub mod store;
pub mod vessel;

pub use error::{WorldError, WorldResult};
pub use objects::{
    ArtemisBase, ArtemisBlackHole, ArtemisCreature, ArtemisMine, ArtemisNpc, ArtemisObject,
    ArtemisPlayer, Dsl, WorldObject,
};
pub use property::{Property, PropertyValue};
pub use store::{ObjectStore, StoreOutcome};
pub use vessel::{FactionInfo, VesselDataLookup, VesselInfo};
