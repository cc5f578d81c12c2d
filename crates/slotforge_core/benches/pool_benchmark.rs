//! # Storage Engine Benchmark
//!
//! Measures the per-frame operations a scene performs:
//! - entity churn (create / destroy with lowest-free-slot reuse)
//! - typed component reads and writes
//! - alive-entity scans
//!
//! Run with: `cargo bench --package slotforge_core`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slotforge_core::{Component, ComponentTypeId, EntityId, StorageEngine};

const ENTITY_COUNT: usize = 10_000;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Transform {
    x: f64,
    y: f64,
    angle: f64,
    active: bool,
}

impl Component for Transform {
    fn exists(&self) -> bool {
        self.active
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Health {
    hp: i32,
}

impl Component for Health {
    fn exists(&self) -> bool {
        self.hp > 0
    }
}

const TRANSFORM: ComponentTypeId = ComponentTypeId::new(0);
const HEALTH: ComponentTypeId = ComponentTypeId::new(1);

fn populated(count: usize) -> StorageEngine {
    let mut engine = StorageEngine::new(count);
    engine.register::<Transform>(TRANSFORM);
    engine.register::<Health>(HEALTH);
    for _ in 0..count {
        let id = engine.create_entity("bench").expect("capacity sized to count");
        engine
            .set_component(id, HEALTH, Health { hp: 100 })
            .expect("registered");
    }
    engine
}

/// Benchmark: destroy one entity and create another in a full pool.
fn bench_entity_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("entity_churn");

    for count in [100, 1_000, ENTITY_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut engine = populated(count);
            let victim = EntityId::new(u32::try_from(count / 2).expect("fits"));
            b.iter(|| {
                engine.destroy_entity(victim).expect("alive");
                black_box(engine.create_entity("respawn").expect("slot freed"))
            });
        });
    }

    group.finish();
}

/// Benchmark: move every entity once through the typed accessor.
fn bench_component_update(c: &mut Criterion) {
    let mut engine = populated(ENTITY_COUNT);
    let ids: Vec<EntityId> = engine.alive_entities().collect();

    c.bench_function("update_transform_10k", |b| {
        b.iter(|| {
            for &id in &ids {
                engine
                    .update_component::<Transform, _>(id, TRANSFORM, |t| {
                        t.x += 0.016;
                        t.y += 0.016;
                        t.angle += 0.001;
                    })
                    .expect("alive");
            }
        });
    });
}

/// Benchmark: read one component for every alive entity.
fn bench_component_read(c: &mut Criterion) {
    let engine = populated(ENTITY_COUNT);

    c.bench_function("read_health_10k", |b| {
        b.iter(|| {
            let total: i64 = engine
                .alive_entities()
                .filter_map(|id| engine.get_component::<Health>(id, HEALTH).ok())
                .map(|h| i64::from(h.hp))
                .sum();
            black_box(total)
        });
    });
}

criterion_group!(
    benches,
    bench_entity_churn,
    bench_component_update,
    bench_component_read,
);
criterion_main!(benches);
