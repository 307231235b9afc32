//! # Artemis Client
//!
//! Connection manager: one TCP socket, four tasks, three queues.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                            ARTEMIS CLIENT                            │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                                                                      │
//! │   socket ──► receiver ──► [inbound] ──┐                              │
//! │                 │                     ├──► dispatcher ──► listeners  │
//! │                 └──────► [events] ────┘                              │
//! │                             ▲                                        │
//! │   heartbeat ────────────────┘                                        │
//! │       │                                                              │
//! │       └────────► [outbound] ◄── send_packet                          │
//! │                      │                                               │
//! │   socket ◄── sender ─┘                                               │
//! │                                                                      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The receiver is the only task that waits on the network indefinitely.
//! The others wake every `poll_interval` and drain their queue without
//! blocking.
//!
//! ## Lifecycle
//!
//! `Idle → Connecting → Connected → Disconnecting → Idle`. Every failure,
//! and [`ArtemisClient::stop`], goes through one teardown path that is
//! guarded by the `Connected → Disconnecting` transition, so each connection
//! ends with exactly one [`ConnectionEvent::Disconnected`]. No listener is
//! called after it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use artemis_shared::Version;
use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::protocol::packets::{
    ClientHeartbeatPacket, ClientPacket, ServerPacket, VersionPacket,
};
use crate::protocol::{read_frame, write_packet, DecodeContext, Origin, PacketRegistry};

mod events;
mod heartbeat;
mod listeners;

pub use events::{ConnectionEvent, ConnectionState, DisconnectCause};
pub use heartbeat::HeartbeatMonitor;
pub use listeners::ListenerRegistry;

// =============================================================================
// QUEUES
// =============================================================================

type Outbound = Box<dyn ClientPacket>;
type Inbound = Box<dyn ServerPacket>;

/// Both ends of the three queues. Tasks clone the ends they use.
struct Queues {
    outbound: (Sender<Outbound>, Receiver<Outbound>),
    inbound: (Sender<Inbound>, Receiver<Inbound>),
    events: (Sender<ConnectionEvent>, Receiver<ConnectionEvent>),
}

impl Queues {
    fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            outbound: crossbeam_channel::bounded(capacity),
            inbound: crossbeam_channel::bounded(capacity),
            events: crossbeam_channel::bounded(capacity),
        }
    }

    /// Discards everything queued.
    fn drain(&self) -> usize {
        self.outbound.1.try_iter().count()
            + self.inbound.1.try_iter().count()
            + self.events.1.try_iter().count()
    }
}

// =============================================================================
// SHARED STATE
// =============================================================================

/// The socket before `start`, and the tasks after.
#[derive(Default)]
struct Connection {
    reader: Option<OwnedReadHalf>,
    writer: Option<OwnedWriteHalf>,
    tasks: Vec<JoinHandle<()>>,
}

struct Inner {
    config: ClientConfig,
    registry: PacketRegistry,
    listeners: ListenerRegistry,
    state: Mutex<ConnectionState>,
    version: RwLock<Version>,
    running: AtomicBool,
    disposed: AtomicBool,
    queues: Mutex<Option<Queues>>,
    connection: Mutex<Option<Connection>>,
    heartbeat: Mutex<HeartbeatMonitor>,
    /// Held around every listener call. Reentrant so a listener may stop the
    /// client from inside its callback.
    dispatch_gate: ReentrantMutex<()>,
    epoch: Instant,
}

impl Inner {
    /// Nanoseconds since the client was created. Used to order property
    /// updates.
    fn timestamp(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.lock() = state;
    }

    fn queue_event(&self, event: ConnectionEvent) {
        let sender = self.queues.lock().as_ref().map(|q| q.events.0.clone());
        match sender.map(|tx| tx.try_send(event)) {
            Some(Ok(())) => {}
            Some(Err(TrySendError::Full(event))) => {
                tracing::warn!("Event queue full, dropping {:?}", event);
            }
            Some(Err(TrySendError::Disconnected(_))) | None => {}
        }
    }

    /// The single teardown path.
    fn stop_with(&self, cause: DisconnectCause) {
        {
            let mut state = self.state.lock();
            if *state != ConnectionState::Connected {
                return;
            }
            *state = ConnectionState::Disconnecting;
        }

        match &cause {
            DisconnectCause::LocalDisconnect => tracing::info!("Disconnecting"),
            other => tracing::warn!("Connection lost: {}", other),
        }

        // Dropping the connection closes any socket half not owned by a task;
        // aborted tasks drop theirs.
        if let Some(connection) = self.connection.lock().take() {
            for task in &connection.tasks {
                task.abort();
            }
        }
        self.running.store(false, Ordering::SeqCst);
        self.heartbeat.lock().disarm();
        if let Some(queues) = self.queues.lock().as_ref() {
            let dropped = queues.drain();
            if dropped > 0 {
                tracing::debug!("Discarded {} queued items", dropped);
            }
        }

        // Waits out a listener call already in progress; the dispatcher
        // sees `running == false` before it calls another.
        let _gate = self.dispatch_gate.lock();
        self.set_state(ConnectionState::Idle);
        self.listeners
            .dispatch_event(&ConnectionEvent::Disconnected { cause });
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Handle to one client connection. Clones share the connection.
#[derive(Clone)]
pub struct ArtemisClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ArtemisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtemisClient")
            .field("state", &self.state())
            .field("version", &self.version())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl ArtemisClient {
    /// Creates an idle client that decodes with the default packet set.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_registry(config, PacketRegistry::server())
    }

    /// Creates an idle client that decodes with `registry`.
    #[must_use]
    pub fn with_registry(config: ClientConfig, registry: PacketRegistry) -> Self {
        let queues = Queues::new(config.queue_capacity);
        let heartbeat = HeartbeatMonitor::new(config.heartbeat_timeout());
        Self {
            inner: Arc::new(Inner {
                config,
                registry,
                listeners: ListenerRegistry::new(),
                state: Mutex::new(ConnectionState::Idle),
                version: RwLock::new(Version::LATEST),
                running: AtomicBool::new(false),
                disposed: AtomicBool::new(false),
                queues: Mutex::new(Some(queues)),
                connection: Mutex::new(None),
                heartbeat: Mutex::new(heartbeat),
                dispatch_gate: ReentrantMutex::new(()),
                epoch: Instant::now(),
            }),
        }
    }

    /// Opens a connection. An existing connection is stopped first.
    ///
    /// Returns false if the client is disposed, another connect or stop is in
    /// progress, or the socket could not be opened within `timeout`.
    pub async fn connect(&self, host: &str, port: u16, timeout: Duration) -> bool {
        if self.inner.disposed.load(Ordering::SeqCst) {
            tracing::warn!("Connect on a disposed client");
            return false;
        }
        if self.state() == ConnectionState::Connected {
            self.stop();
        }
        {
            let mut state = self.inner.state.lock();
            if *state != ConnectionState::Idle {
                return false;
            }
            *state = ConnectionState::Connecting;
        }

        tracing::info!("Connecting to {}:{}", host, port);
        let stream = match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                tracing::warn!("Connect to {}:{} failed: {}", host, port, e);
                self.inner.set_state(ConnectionState::Idle);
                return false;
            }
            Err(_) => {
                tracing::warn!("Connect to {}:{} timed out after {:?}", host, port, timeout);
                self.inner.set_state(ConnectionState::Idle);
                return false;
            }
        };
        if self.inner.disposed.load(Ordering::SeqCst) {
            self.inner.set_state(ConnectionState::Idle);
            return false;
        }
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!("Could not disable Nagle: {}", e);
        }

        let (reader, writer) = stream.into_split();
        *self.inner.version.write() = Version::LATEST;
        if let Some(queues) = self.inner.queues.lock().as_ref() {
            queues.drain();
        }
        *self.inner.connection.lock() = Some(Connection {
            reader: Some(reader),
            writer: Some(writer),
            tasks: Vec::new(),
        });
        self.inner.set_state(ConnectionState::Connected);
        self.inner.queue_event(ConnectionEvent::Connected);
        tracing::info!("Connected to {}:{}", host, port);
        true
    }

    /// Spawns the connection tasks on the current tokio runtime.
    ///
    /// Does nothing unless connected and not yet started, or when called
    /// outside a runtime.
    pub fn start(&self) {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("start called outside a tokio runtime");
            return;
        };
        if self.state() != ConnectionState::Connected {
            return;
        }
        let (outbound, inbound, events) = {
            let queues = self.inner.queues.lock();
            let Some(q) = queues.as_ref() else {
                return;
            };
            (q.outbound.clone(), q.inbound.clone(), q.events.clone())
        };

        let mut connection = self.inner.connection.lock();
        let Some(conn) = connection.as_mut() else {
            return;
        };
        let (Some(reader), Some(writer)) = (conn.reader.take(), conn.writer.take()) else {
            return;
        };
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return;
        }

        self.inner.heartbeat.lock().reset(Instant::now());
        let inner = &self.inner;
        conn.tasks = vec![
            handle.spawn(receive_loop(Arc::clone(inner), reader, inbound.0)),
            handle.spawn(send_loop(Arc::clone(inner), writer, outbound.1)),
            handle.spawn(dispatch_loop(Arc::clone(inner), events.1, inbound.1)),
            handle.spawn(heartbeat_loop(Arc::clone(inner), outbound.0)),
        ];
        tracing::info!("Connection tasks started");
    }

    /// Closes the connection with [`DisconnectCause::LocalDisconnect`].
    /// Does nothing when not connected.
    pub fn stop(&self) {
        self.inner.stop_with(DisconnectCause::LocalDisconnect);
    }

    /// Stops the client for good: closes the queues and removes every
    /// listener. A disposed client cannot connect again.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.stop();
        self.inner.queues.lock().take();
        self.inner.listeners.clear();
        tracing::debug!("Client disposed");
    }

    /// Queues a packet for the server.
    ///
    /// Returns false when not connected, when the negotiated server is too
    /// old for the packet, or when the outbound queue is full.
    pub fn send_packet<P: ClientPacket + 'static>(&self, packet: P) -> bool {
        if self.state() != ConnectionState::Connected {
            return false;
        }
        let version = self.version();
        if packet.minimum_version() > version {
            tracing::warn!("Server {} cannot accept {:?}", version, packet);
            return false;
        }
        let queues = self.inner.queues.lock();
        let Some(queues) = queues.as_ref() else {
            return false;
        };
        match queues.outbound.0.try_send(Box::new(packet)) {
            Ok(()) => true,
            Err(TrySendError::Full(packet)) => {
                tracing::warn!("Outbound queue full, dropping {:?}", packet);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Listener registration.
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.inner.listeners
    }

    /// Version the connection decodes with.
    #[must_use]
    pub fn version(&self) -> Version {
        *self.inner.version.read()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.inner.state.lock()
    }

    /// Returns true while the connection tasks run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// The configuration this client was created with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

// =============================================================================
// TASKS
// =============================================================================

async fn receive_loop(inner: Arc<Inner>, mut reader: OwnedReadHalf, inbound: Sender<Inbound>) {
    let mut context = DecodeContext::new(Version::LATEST, 0);
    let mut negotiated: Option<Version> = None;
    loop {
        let frame = match read_frame(&mut reader, Origin::Server, inner.config.max_frame_len).await
        {
            Ok(frame) => frame,
            Err(e) => {
                inner.stop_with(e.into());
                return;
            }
        };

        context.version = *inner.version.read();
        context.timestamp = inner.timestamp();
        let packet = match inner.registry.decode(&frame, &mut context) {
            Ok(packet) => packet,
            Err(e) => {
                inner.stop_with(e.into());
                return;
            }
        };

        if let Some(announced) = packet.downcast_ref::<VersionPacket>() {
            let version = announced.version;
            match negotiated {
                Some(current) if current != version => {
                    tracing::warn!("Ignoring version {} announced after {}", version, current);
                }
                Some(_) => {}
                None => {
                    if !version.is_supported(inner.config.allow_newer_versions) {
                        inner.stop_with(DisconnectCause::UnsupportedVersion(version));
                        return;
                    }
                    *inner.version.write() = version;
                    negotiated = Some(version);
                    tracing::info!("Server version {}", version);
                }
            }
        }

        if packet.resets_heartbeat() {
            let regained = inner.heartbeat.lock().on_heartbeat(Instant::now());
            if regained {
                tracing::info!("Heartbeat regained");
                inner.queue_event(ConnectionEvent::HeartbeatRegained);
            }
        }

        if !enqueue_inbound(&inner, &inbound, packet).await {
            return;
        }
    }
}

/// Waits for room in the inbound queue. Returns false if it was closed.
async fn enqueue_inbound(inner: &Inner, inbound: &Sender<Inbound>, mut packet: Inbound) -> bool {
    let mut warned = false;
    loop {
        match inbound.try_send(packet) {
            Ok(()) => return true,
            Err(TrySendError::Full(returned)) => {
                if !warned {
                    tracing::warn!("Inbound queue full, receiver waiting");
                    warned = true;
                }
                packet = returned;
                tokio::time::sleep(inner.config.poll_interval()).await;
            }
            Err(TrySendError::Disconnected(_)) => return false,
        }
    }
}

async fn send_loop(inner: Arc<Inner>, mut writer: OwnedWriteHalf, outbound: Receiver<Outbound>) {
    let mut ticker = tokio::time::interval(inner.config.poll_interval());
    loop {
        ticker.tick().await;
        loop {
            match outbound.try_recv() {
                Ok(packet) => {
                    if let Err(e) = write_packet(&mut writer, packet.as_ref()).await {
                        inner.stop_with(e.into());
                        return;
                    }
                    tracing::trace!("Sent {:?}", packet);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    inner.stop_with(DisconnectCause::UnknownError(
                        "outbound queue closed".to_string(),
                    ));
                    return;
                }
            }
        }
    }
}

async fn dispatch_loop(
    inner: Arc<Inner>,
    events: Receiver<ConnectionEvent>,
    inbound: Receiver<Inbound>,
) {
    let mut ticker = tokio::time::interval(inner.config.poll_interval());
    loop {
        ticker.tick().await;
        while let Ok(event) = events.try_recv() {
            let _gate = inner.dispatch_gate.lock();
            if !inner.running.load(Ordering::SeqCst) {
                return;
            }
            tracing::debug!("Event {:?}", event);
            inner.listeners.dispatch_event(&event);
        }
        while let Ok(packet) = inbound.try_recv() {
            let _gate = inner.dispatch_gate.lock();
            if !inner.running.load(Ordering::SeqCst) {
                return;
            }
            tracing::debug!("Dispatching {:?}", packet);
            inner.listeners.dispatch_packet(packet.as_ref());
        }
    }
}

async fn heartbeat_loop(inner: Arc<Inner>, outbound: Sender<Outbound>) {
    let send_every = inner.config.heartbeat_interval();
    let mut ticker = tokio::time::interval(inner.config.poll_interval());
    let mut last_sent = Instant::now();
    loop {
        ticker.tick().await;
        let now = Instant::now();

        if inner.config.auto_send_heartbeat && now.duration_since(last_sent) >= send_every {
            last_sent = now;
            if let Err(TrySendError::Full(_)) = outbound.try_send(Box::new(ClientHeartbeatPacket))
            {
                tracing::warn!("Outbound queue full, skipping heartbeat");
            }
        }

        let lost = inner.heartbeat.lock().check(now);
        if lost {
            tracing::warn!(
                "No heartbeat for {:?}",
                inner.config.heartbeat_timeout()
            );
            inner.queue_event(ConnectionEvent::HeartbeatLost);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packets::ReadyPacket;

    #[test]
    fn test_new_client_is_idle() {
        let client = ArtemisClient::new(ClientConfig::default());
        assert_eq!(client.state(), ConnectionState::Idle);
        assert_eq!(client.version(), Version::LATEST);
        assert!(!client.is_running());
        assert!(!client.send_packet(ReadyPacket));
    }

    #[test]
    fn test_stop_while_idle_emits_nothing() {
        let client = ArtemisClient::new(ClientConfig::default());
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        client
            .listeners()
            .on_connection_event(move |e| sink.lock().push(e.clone()));
        client.stop();
        client.stop();
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_start_outside_runtime_is_noop() {
        let client = ArtemisClient::new(ClientConfig::default());
        client.start();
        assert!(!client.is_running());
    }

    #[test]
    fn test_queues_drain() {
        let queues = Queues::new(4);
        queues
            .events
            .0
            .try_send(ConnectionEvent::Connected)
            .unwrap();
        queues.outbound.0.try_send(Box::new(ReadyPacket)).unwrap();
        assert_eq!(queues.drain(), 2);
        assert_eq!(queues.drain(), 0);
    }

    #[tokio::test]
    async fn test_disposed_client_cannot_connect() {
        let client = ArtemisClient::new(ClientConfig::default());
        client.dispose();
        assert!(
            !client
                .connect("127.0.0.1", 1, Duration::from_millis(50))
                .await
        );
    }
}
