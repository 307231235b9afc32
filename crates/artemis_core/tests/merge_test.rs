//! Integration test for the merge protocol across threads and object types.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use artemis_core::objects::{BaseDsl, CreatureDsl, NpcDsl, PlayerDsl};
use artemis_core::{
    ArtemisNpc, ArtemisPlayer, Dsl, FactionInfo, ObjectStore, StoreOutcome, VesselDataLookup,
    VesselInfo, WorldError, WorldObject,
};
use artemis_shared::{BoolState, CreatureType, ObjectType};

struct FixedVessels {
    vessels: HashMap<i32, VesselInfo>,
}

impl VesselDataLookup for FixedVessels {
    fn vessel(&self, hull_id: i32) -> Option<VesselInfo> {
        self.vessels.get(&hull_id).cloned()
    }

    fn faction(&self, id: i32) -> Option<FactionInfo> {
        (id == 2).then(|| FactionInfo {
            id,
            name: "Kralien".to_owned(),
            enemy: true,
        })
    }
}

#[test]
fn test_out_of_order_updates_converge() {
    let mut store = ObjectStore::new();
    let mut dsl = NpcDsl::default();

    dsl.ship.shielded.object.x = Some(300.0);
    let newest = dsl.build(50, 30);
    dsl.ship.shielded.object.x = Some(100.0);
    dsl.ship.shielded.object.z = Some(100.0);
    let oldest = dsl.build(50, 10);
    dsl.ship.shielded.object.x = Some(200.0);
    let middle = dsl.build(50, 20);

    assert_eq!(store.apply_update(newest.into()), Ok(StoreOutcome::Inserted));
    assert_eq!(store.apply_update(oldest.into()), Ok(StoreOutcome::Merged));
    assert_eq!(store.apply_update(middle.into()), Ok(StoreOutcome::Merged));

    let npc = store.get_as::<ArtemisNpc>(50).unwrap();
    assert_eq!(npc.fields().x.snapshot(), (300.0, 30));
    // z was only ever sent by the oldest update; the destination stamp was 30.
    assert!(!npc.fields().z.has_value());
}

#[test]
fn test_concurrent_merges_never_tear() {
    let player = Arc::new(ArtemisPlayer::new(1, 0));
    let handles: Vec<_> = (1..=8u64)
        .map(|t| {
            let player = Arc::clone(&player);
            thread::spawn(move || {
                let mut dsl = PlayerDsl::default();
                for round in 0..200u64 {
                    let ts = round * 8 + t;
                    dsl.energy = Some(ts as f32);
                    let update = dsl.build(1, ts);
                    player.merge_from(&update);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let (energy, ts) = player.energy.snapshot();
    assert_eq!(ts, 199 * 8 + 8);
    assert_eq!(energy, ts as f32);
}

#[test]
fn test_apply_requires_empty_destination() {
    let mut dsl = CreatureDsl {
        creature_type: Some(CreatureType::Typhon),
        ..CreatureDsl::default()
    };
    let creature = dsl.build(9, 1);
    dsl.health = Some(10.0);
    assert_eq!(
        dsl.apply(&creature, 2),
        Err(WorldError::AlreadyPopulated { id: 9 })
    );
    assert!(!creature.health.has_value());
}

#[test]
fn test_vessel_lookup_through_hull_id() {
    let data = FixedVessels {
        vessels: HashMap::from([(
            1001,
            VesselInfo {
                hull_id: 1001,
                name: "Light Cruiser".to_owned(),
                faction_id: 2,
                broad_type: "cruiser".to_owned(),
            },
        )]),
    };

    let mut dsl = BaseDsl::default();
    let unknown_hull = dsl.build(1, 1);
    assert!(unknown_hull.shielded.vessel(&data).is_none());

    dsl.shielded.hull_id = Some(1001);
    let base = dsl.build(2, 1);
    let vessel = base.shielded.vessel(&data).unwrap();
    assert_eq!(vessel.name, "Light Cruiser");
    assert!(data.faction_of(1001).unwrap().enemy);
}

#[test]
fn test_docked_flag_survives_unrelated_updates() {
    let mut store = ObjectStore::new();
    let docked = PlayerDsl {
        docked: Some(BoolState::True),
        docking_base: Some(77),
        ..PlayerDsl::default()
    }
    .build(4, 1);
    store.apply_update(docked.into()).unwrap();

    let energy = PlayerDsl {
        energy: Some(800.0),
        ..PlayerDsl::default()
    }
    .build(4, 2);
    store.apply_update(energy.into()).unwrap();

    let player = store.get_as::<ArtemisPlayer>(4).unwrap();
    assert_eq!(player.docked.value(), BoolState::True);
    assert_eq!(player.docking_base.value(), 77);
    assert_eq!(store.iter_type(ObjectType::PlayerShip).count(), 1);
}

#[test]
fn test_repeated_merge_is_a_no_op() {
    let destination = PlayerDsl {
        docked: Some(BoolState::True),
        docking_base: Some(77),
        energy: Some(1000.0),
        ..PlayerDsl::default()
    }
    .build(4, 1);

    let mut dsl = PlayerDsl {
        energy: Some(640.0),
        docking_base: Some(77),
        ..PlayerDsl::default()
    };
    dsl.ship.impulse = Some(0.5);
    dsl.ship.shielded.object.x = Some(1200.0);
    let source = dsl.build(4, 5);

    destination.merge_from(&source);
    let once = format!("{destination:?}");
    assert_eq!(destination.docked.snapshot(), (BoolState::False, 5));
    assert_eq!(destination.docking_base.snapshot(), (0, 5));

    destination.merge_from(&source);
    assert_eq!(format!("{destination:?}"), once);
}
