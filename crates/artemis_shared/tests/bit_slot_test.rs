//! Integration test for the version-gated bit slot lists.

use artemis_shared::bits::{
    AnomalyBit, AsteroidBit, BaseBit, BlackHoleBit, CreatureBit, DroneBit, EngineeringBit,
    GenericMeshBit, MineBit, NebulaBit, NpcBit, PlayerBit, TorpedoBit, UpgradesBit, WeaponsBit,
};
use artemis_shared::{BitField, BitSlot, ObjectType, OrdnanceType, Version};

/// Versions the client can negotiate, in ascending order.
fn supported_versions() -> Vec<Version> {
    vec![
        Version::MINIMUM,
        Version::new(2, 6, 1),
        Version::new(2, 6, 2),
        Version::V2_6_3,
        Version::new(2, 6, 204),
        Version::V2_7_0,
        Version::new(2, 7, 1),
        Version::new(2, 8, 0),
        Version::LATEST,
    ]
}

/// Slots are appended in version order and never move once present.
fn assert_append_only<S: BitSlot>() {
    let slots: Vec<S> = S::slots().collect();
    assert_eq!(slots.len(), S::COUNT, "{slots:?}");

    for pair in slots.windows(2) {
        assert!(
            pair[0].introduced() <= pair[1].introduced(),
            "{:?} introduced after {:?}",
            pair[0],
            pair[1]
        );
    }

    for slot in &slots {
        let mut seen: Option<i32> = None;
        for version in supported_versions() {
            let index = slot.index(version);
            if let Some(previous) = seen {
                assert_eq!(index, previous, "{slot:?} moved at {version}");
            } else if index >= 0 {
                assert_eq!(index as usize, slot.ordinal());
                seen = Some(index);
            }
        }
    }
}

#[test]
fn test_every_slot_list_is_append_only() {
    assert_append_only::<PlayerBit>();
    assert_append_only::<WeaponsBit>();
    assert_append_only::<EngineeringBit>();
    assert_append_only::<UpgradesBit>();
    assert_append_only::<NpcBit>();
    assert_append_only::<BaseBit>();
    assert_append_only::<MineBit>();
    assert_append_only::<AnomalyBit>();
    assert_append_only::<NebulaBit>();
    assert_append_only::<TorpedoBit>();
    assert_append_only::<BlackHoleBit>();
    assert_append_only::<AsteroidBit>();
    assert_append_only::<GenericMeshBit>();
    assert_append_only::<CreatureBit>();
    assert_append_only::<DroneBit>();
}

#[test]
fn test_bit_count_never_shrinks() {
    let versions = supported_versions();
    for object_type in ObjectType::ALL {
        for pair in versions.windows(2) {
            let older = object_type.bit_count(pair[0]);
            let newer = object_type.bit_count(pair[1]);
            assert!(
                newer >= older,
                "{object_type} shrank from {older} to {newer} between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_fourteen_slots_make_two_bytes() {
    let count = ObjectType::Base.bit_count(Version::MINIMUM);
    assert_eq!(count, 14);
    let field = BitField::new(count);
    assert_eq!(field.byte_count(), 2);
    assert!(field.is_clear());
}

#[test]
fn test_ordnance_follows_weapons_layout() {
    for version in supported_versions() {
        let ordnance = OrdnanceType::count(version);
        let tubes = 3 * artemis_shared::TUBE_COUNT;
        assert_eq!(WeaponsBit::bit_count(version), ordnance + tubes);
    }
}
