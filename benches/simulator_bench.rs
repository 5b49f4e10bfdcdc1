//! Simulator throughput benchmarks: fights per second for short and long lineups.
//!
//! Run with: `cargo bench --bench simulator`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use cosmos_solver::combat::{simulate_fight, SimulationConfig};
use cosmos_solver::data::{Ability, AbilityKind, Army, Catalog, Element, Monster, MonsterId, Rarity, Target};

fn bench_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for (i, element) in Element::ALL.iter().enumerate() {
        let i = i as i32;
        catalog
            .add_monster(
                Monster::normal(40 + 10 * i, 8 + 2 * i, 1000 + 200 * i, format!("m{i}"), *element),
                None,
            )
            .unwrap();
    }
    catalog
        .add_base_hero(
            Monster::hero(
                60,
                9,
                "Valk",
                Element::Air,
                Rarity::Legendary,
                Ability::new(AbilityKind::Valkyrie, Target::All, Element::Air, 1.0),
            ),
            None,
        )
        .unwrap();
    catalog
        .add_base_hero(
            Monster::hero(
                45,
                5,
                "Sparks",
                Element::Fire,
                Rarity::Rare,
                Ability::new(AbilityKind::Aoe, Target::All, Element::Fire, 3.0),
            ),
            None,
        )
        .unwrap();
    catalog.add_leveled_hero("Valk", 10).unwrap();
    catalog.add_leveled_hero("Sparks", 10).unwrap();
    catalog
}

fn army(catalog: &Catalog, ids: &[u16]) -> Army {
    let ids: Vec<MonsterId> = ids.iter().map(|&i| MonsterId(i)).collect();
    Army::from_ids(catalog, &ids).unwrap()
}

fn bench_simulator(c: &mut Criterion) {
    let catalog = bench_catalog();
    let config = SimulationConfig::default();

    let mut group = c.benchmark_group("simulator");
    group.sample_size(100);
    group.throughput(Throughput::Elements(1));

    // Single monster each side
    group.bench_with_input("duel", &(army(&catalog, &[0]), army(&catalog, &[3])), |b, (left, right)| {
        b.iter_batched(
            || (*left, *right),
            |(l, r)| black_box(simulate_fight(&catalog, &l, &r, &config)),
            BatchSize::SmallInput,
        );
    });

    // Full lineups with splash and spread attacks
    group.bench_with_input(
        "full_lineups",
        &(
            army(&catalog, &[4, 0, 1, 2, 3, 5]),
            army(&catalog, &[3, 3, 2, 2, 1, 0]),
        ),
        |b, (left, right)| {
            b.iter_batched(
                || (*left, *right),
                |(l, r)| black_box(simulate_fight(&catalog, &l, &r, &config)),
                BatchSize::SmallInput,
            );
        },
    );

    group.finish();
}

criterion_group!(benches, bench_simulator);
criterion_main!(benches);
