//! # Artemis Monitor
//!
//! Headless client: connects to a server, keeps a world model up to date and
//! reports what it sees until the connection ends.
//!
//! ## Usage
//!
//! ```bash
//! artemis_monitor --host 192.168.1.20 --port 2010 --config client.toml
//! RUST_LOG=artemis_networking=debug artemis_monitor --host localhost
//! ```

use std::sync::Arc;
use std::time::Duration;

use artemis_core::ObjectStore;
use artemis_networking::protocol::packets::{
    DeleteObjectPacket, GameOverPacket, GameStartPacket, ObjectUpdatePacket, VersionPacket,
    WelcomePacket,
};
use artemis_networking::{ArtemisClient, ClientConfig, ConnectionEvent, DEFAULT_PORT};
use artemis_shared::ObjectType;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing_subscriber::EnvFilter;

const REPORTED_TYPES: [ObjectType; 6] = [
    ObjectType::PlayerShip,
    ObjectType::NpcShip,
    ObjectType::Base,
    ObjectType::Mine,
    ObjectType::BlackHole,
    ObjectType::Creature,
];

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         ARTEMIS MONITOR                                          ║");
    println!("║         HEADLESS PROTOCOL CLIENT                                 ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let mut host = String::from("127.0.0.1");
    let mut port = DEFAULT_PORT;
    let mut config_path: Option<String> = None;
    let mut report_secs = 5u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--host" | "-H" => {
                if i + 1 < args.len() {
                    host = args[i + 1].clone();
                    i += 1;
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().unwrap_or(DEFAULT_PORT);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--report" | "-r" => {
                if i + 1 < args.len() {
                    report_secs = args[i + 1].parse().unwrap_or(5).max(1);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: artemis_monitor [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -H, --host <HOST>       Server address (default: 127.0.0.1)");
                println!("  -p, --port <PORT>       Server port (default: {})", DEFAULT_PORT);
                println!("  -c, --config <FILE>     Client configuration (TOML)");
                println!("  -r, --report <SECS>     Object count interval (default: 5)");
                println!("  -h, --help              Show this help");
                return;
            }
            _ => {}
        }
        i += 1;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match config_path.as_deref().map(ClientConfig::load) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        None => ClientConfig::default(),
    };

    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Server:             {}:{}", host, port);
    println!("│ Heartbeat Timeout:  {:?}", config.heartbeat_timeout());
    println!("│ Allow Newer:        {}", config.allow_newer_versions);
    println!("│ Queue Capacity:     {}", config.queue_capacity);
    println!("└─────────────────────────────────────────────────────────────────┘");
    println!();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let connected = runtime.block_on(run(config, &host, port, Duration::from_secs(report_secs)));
    if !connected {
        std::process::exit(1);
    }
}

async fn run(config: ClientConfig, host: &str, port: u16, report_every: Duration) -> bool {
    let client = ArtemisClient::new(config);
    let store = Arc::new(Mutex::new(ObjectStore::new()));
    let finished = Arc::new(Notify::new());

    register_listeners(&client, &store, &finished);

    if !client.connect(host, port, Duration::from_secs(5)).await {
        eprintln!("❌ Could not connect to {}:{}", host, port);
        return false;
    }
    client.start();

    let reporter = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(report_every);
            loop {
                ticker.tick().await;
                let store = store.lock();
                let counts: Vec<String> = REPORTED_TYPES
                    .iter()
                    .map(|&t| format!("{}={}", t, store.iter_type(t).count()))
                    .collect();
                tracing::info!("{} objects: {}", store.len(), counts.join(" "));
            }
        })
    };

    finished.notified().await;
    reporter.abort();
    client.dispose();
    true
}

fn register_listeners(client: &ArtemisClient, store: &Arc<Mutex<ObjectStore>>, finished: &Arc<Notify>) {
    let listeners = client.listeners();

    let done = Arc::clone(finished);
    let world = Arc::clone(store);
    listeners.on_connection_event(move |event| match event {
        ConnectionEvent::Disconnected { cause } => {
            println!("🔌 Disconnected: {}", cause);
            world.lock().clear();
            done.notify_one();
        }
        other => println!("📡 {:?}", other),
    });

    listeners.on_packet::<WelcomePacket, _>(|p| println!("👋 {}", p.message));
    listeners.on_packet::<VersionPacket, _>(|p| println!("🛰  Server version {}", p.version));
    listeners.on_packet::<GameStartPacket, _>(|p| {
        println!("🚀 Game started (type {}, difficulty {})", p.game_type, p.difficulty);
    });
    listeners.on_packet::<GameOverPacket, _>(|_| println!("🏁 Game over"));

    let world = Arc::clone(store);
    listeners.on_packet::<ObjectUpdatePacket, _>(move |p| {
        let mut world = world.lock();
        for object in &p.objects {
            if let Err(e) = world.apply_update(object.clone()) {
                tracing::warn!("Dropped update: {}", e);
            }
        }
    });

    let world = Arc::clone(store);
    listeners.on_packet::<DeleteObjectPacket, _>(move |p| {
        world.lock().remove(p.target_type, p.id);
    });
}
