//! # Listener Registry
//!
//! Callbacks for connection events, packets and world objects, dispatched by
//! concrete type.
//!
//! Registration may happen from any thread at any time. Dispatch takes a
//! snapshot of the matching callbacks and runs them with no lock held, so a
//! callback may register further listeners.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use artemis_core::{ArtemisObject, WorldObject};
use artemis_shared::ObjectType;
use parking_lot::RwLock;

use super::events::ConnectionEvent;
use crate::protocol::packets::{ObjectUpdatePacket, ServerPacket};

type EventFn = Arc<dyn Fn(&ConnectionEvent) + Send + Sync>;
type PacketFn = Arc<dyn Fn(&dyn ServerPacket) + Send + Sync>;
type ObjectFn = Arc<dyn Fn(&ArtemisObject) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    events: Vec<EventFn>,
    packets: HashMap<TypeId, Vec<PacketFn>>,
    any_packet: Vec<PacketFn>,
    objects: HashMap<ObjectType, Vec<ObjectFn>>,
}

/// Shared set of callbacks.
#[derive(Default)]
pub struct ListenerRegistry {
    inner: RwLock<Listeners>,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("ListenerRegistry")
            .field("events", &inner.events.len())
            .field("packet_types", &inner.packets.len())
            .field("any_packet", &inner.any_packet.len())
            .field("object_types", &inner.objects.len())
            .finish()
    }
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called for every connection event.
    pub fn on_connection_event<F>(&self, callback: F)
    where
        F: Fn(&ConnectionEvent) + Send + Sync + 'static,
    {
        self.inner.write().events.push(Arc::new(callback));
    }

    /// Called for every decoded packet of type `P`.
    pub fn on_packet<P, F>(&self, callback: F)
    where
        P: ServerPacket,
        F: Fn(&P) + Send + Sync + 'static,
    {
        let wrapped: PacketFn = Arc::new(move |packet: &dyn ServerPacket| {
            if let Some(packet) = packet.downcast_ref::<P>() {
                callback(packet);
            }
        });
        self.inner
            .write()
            .packets
            .entry(TypeId::of::<P>())
            .or_default()
            .push(wrapped);
    }

    /// Called for every decoded packet.
    pub fn on_any_packet<F>(&self, callback: F)
    where
        F: Fn(&dyn ServerPacket) + Send + Sync + 'static,
    {
        self.inner.write().any_packet.push(Arc::new(callback));
    }

    /// Called for every partial object of type `O` in an object update.
    pub fn on_object<O, F>(&self, callback: F)
    where
        O: WorldObject,
        F: Fn(&O) + Send + Sync + 'static,
    {
        let wrapped: ObjectFn = Arc::new(move |object: &ArtemisObject| {
            if let Some(object) = object.downcast_ref::<O>() {
                callback(object);
            }
        });
        self.inner
            .write()
            .objects
            .entry(O::OBJECT_TYPE)
            .or_default()
            .push(wrapped);
    }

    /// Delivers `event` to every connection listener.
    pub fn dispatch_event(&self, event: &ConnectionEvent) {
        let callbacks = self.inner.read().events.clone();
        for callback in &callbacks {
            callback(event);
        }
    }

    /// Delivers `packet` to its typed listeners, then the catch-all
    /// listeners, then the object listeners if it is an object update.
    pub fn dispatch_packet(&self, packet: &dyn ServerPacket) {
        let type_id = Any::type_id(packet.as_any());
        let (typed, any) = {
            let inner = self.inner.read();
            (
                inner.packets.get(&type_id).cloned().unwrap_or_default(),
                inner.any_packet.clone(),
            )
        };
        for callback in typed.iter().chain(&any) {
            callback(packet);
        }

        if let Some(update) = packet.downcast_ref::<ObjectUpdatePacket>() {
            self.dispatch_objects(&update.objects);
        }
    }

    fn dispatch_objects(&self, objects: &[ArtemisObject]) {
        for object in objects {
            let callbacks = self
                .inner
                .read()
                .objects
                .get(&object.object_type())
                .cloned()
                .unwrap_or_default();
            for callback in &callbacks {
                callback(object);
            }
        }
    }

    /// Removes every listener.
    pub fn clear(&self) {
        *self.inner.write() = Listeners::default();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use artemis_core::{ArtemisMine, ArtemisNpc};

    use super::*;
    use crate::client::DisconnectCause;
    use crate::protocol::packets::{HeartbeatPacket, PausePacket};

    #[test]
    fn test_typed_and_any_packet_listeners() {
        let registry = ListenerRegistry::new();
        let pauses = Arc::new(AtomicUsize::new(0));
        let all = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&pauses);
        registry.on_packet::<PausePacket, _>(move |p| {
            assert!(p.paused);
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&all);
        registry.on_any_packet(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch_packet(&PausePacket { paused: true });
        registry.dispatch_packet(&HeartbeatPacket);

        assert_eq!(pauses.load(Ordering::SeqCst), 1);
        assert_eq!(all.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_object_listeners_filter_by_type() {
        let registry = ListenerRegistry::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        registry.on_object::<ArtemisNpc, _>(move |npc| {
            assert_eq!(npc.id(), 4);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let update = ObjectUpdatePacket {
            objects: vec![ArtemisNpc::new(4, 1).into(), ArtemisMine::new(5, 1).into()],
        };
        registry.dispatch_packet(&update);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_may_register_during_dispatch() {
        let registry = Arc::new(ListenerRegistry::new());
        let inner = Arc::clone(&registry);
        registry.on_connection_event(move |_| {
            inner.on_connection_event(|_| {});
        });
        registry.dispatch_event(&ConnectionEvent::Connected);
        registry.dispatch_event(&ConnectionEvent::Disconnected {
            cause: DisconnectCause::LocalDisconnect,
        });
        assert_eq!(registry.inner.read().events.len(), 3);

        registry.clear();
        assert!(registry.inner.read().events.is_empty());
    }
}
