//! Benchmark for frame and object decoding.
//!
//! TARGET: a 200-ship update frame decoded well under one server tick
//!
//! Run with: cargo bench --package artemis_networking --bench protocol_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use artemis_networking::protocol::packets::OBJECT_BIT_STREAM;
use artemis_networking::protocol::{
    decode_header, encode_frame, Origin, RawFrame, HEADER_LEN,
};
use artemis_networking::{DecodeContext, PacketRegistry, PacketWriter};
use artemis_shared::bits::NpcBit;
use artemis_shared::{type_hash, BitField, BitSlot, ObjectType, Version};

const NPC_SLOTS: [NpcBit; 8] = [
    NpcBit::Name,
    NpcBit::Impulse,
    NpcBit::IsEnemy,
    NpcBit::X,
    NpcBit::Y,
    NpcBit::Z,
    NpcBit::Heading,
    NpcBit::ShieldsFront,
];

fn npc_update_frame(ships: i32) -> Vec<u8> {
    let version = Version::LATEST;
    let mut bits = BitField::new(ObjectType::NpcShip.bit_count(version));
    for slot in NPC_SLOTS {
        bits.set(slot.index(version), true);
    }

    let mut body = PacketWriter::new();
    for id in 0..ships {
        body.write_u8(ObjectType::NpcShip.id())
            .write_i32(1000 + id)
            .write_bytes(bits.as_bytes())
            .write_string("K")
            .write_f32(0.5)
            .write_i32(1)
            .write_f32(id as f32 * 10.0)
            .write_f32(0.0)
            .write_f32(50_000.0 - id as f32)
            .write_f32(1.57)
            .write_f32(80.0);
    }
    body.write_i32(0);
    encode_frame(Origin::Server, type_hash(OBJECT_BIT_STREAM), body.as_slice())
}

fn to_raw(frame: &[u8]) -> RawFrame {
    let mut header = [0u8; HEADER_LEN];
    header.copy_from_slice(&frame[..HEADER_LEN]);
    RawFrame {
        header: decode_header(&header, u32::MAX).unwrap(),
        body: frame[HEADER_LEN..].to_vec(),
    }
}

fn benchmark_header(c: &mut Criterion) {
    let frame = npc_update_frame(1);
    let mut header = [0u8; HEADER_LEN];
    header.copy_from_slice(&frame[..HEADER_LEN]);

    c.bench_function("frame_header_decode", |b| {
        b.iter(|| decode_header(black_box(&header), 1 << 20).unwrap())
    });
}

fn benchmark_object_update(c: &mut Criterion) {
    let registry = PacketRegistry::server();
    let mut group = c.benchmark_group("object_update_decode");

    for ships in [1, 50, 200] {
        let raw = to_raw(&npc_update_frame(ships));
        let mut context = DecodeContext::new(Version::LATEST, 1);
        group.throughput(Throughput::Elements(ships as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ships), &raw, |b, raw| {
            b.iter(|| registry.decode(black_box(raw), &mut context).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_header, benchmark_object_update);
criterion_main!(benches);
