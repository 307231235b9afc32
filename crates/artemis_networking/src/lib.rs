//! # Artemis Networking
//!
//! Client side of the Artemis bridge-simulator protocol.
//!
//! ## Architecture
//!
//! - **Protocol**: length-prefixed little-endian frames dispatched by the
//!   JamCRC of the packet type name, plus an optional subtype byte
//! - **Parsers**: version-gated bit-field records decoded into partial
//!   world objects
//! - **Client**: one TCP connection driven by receiver, sender, dispatcher
//!   and heartbeat tasks that talk through bounded queues
//!
//! ## Data Flow
//!
//! ```text
//! SERVER                                   CLIENT
//!   |                                        |
//!   |--- connected (version) --------------->| <- version gate
//!   |--- objectBitStream ------------------->| <- partial objects
//!   |                                        |    -> listeners -> ObjectStore
//!   |<-- heartbeat / valueInt ---------------|
//!   |                                        |
//! ```
//!
//! Any malformed frame ends the connection. There is no resynchronisation
//! and no automatic reconnect.
//!
//! ## Example
//!
//! ```rust,ignore
//! use artemis_networking::{ArtemisClient, ClientConfig};
//! use artemis_core::ArtemisNpc;
//!
//! let client = ArtemisClient::new(ClientConfig::default());
//! client.listeners().on_object::<ArtemisNpc, _>(|npc| println!("{npc:?}"));
//! if client.connect("127.0.0.1", 2010, Duration::from_secs(5)).await {
//!     client.start();
//! }
//! ```

#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod parsers;
pub mod protocol;

// Re-exports for convenience
pub use client::{
    ArtemisClient, ConnectionEvent, ConnectionState, DisconnectCause, ListenerRegistry,
};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, FrameError, ParseError, ParseResult};
pub use parsers::ObjectParsers;
pub use protocol::packets::{ClientPacket, ServerPacket};
pub use protocol::{DecodeContext, PacketReader, PacketRegistry, PacketWriter};

pub use artemis_shared::{Version, DEFAULT_PORT};
