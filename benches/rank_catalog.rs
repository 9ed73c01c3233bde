use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crop_suitability::{combined_advice, rank_catalog, score, score_selection, ClimateData, PlantCatalog, SoilData};

fn bench_scoring(c: &mut Criterion) {
    let catalog = PlantCatalog::builtin().expect("embedded catalog");
    let soil = SoilData::fallback();
    let climate = ClimateData::fallback();
    let onion = catalog.require("oignon").expect("oignon in catalog");

    c.bench_function("score_single_crop", |b| {
        b.iter(|| score(black_box(onion), black_box(&soil), black_box(&climate)))
    });

    c.bench_function("rank_catalog", |b| {
        b.iter(|| rank_catalog(black_box(&catalog), black_box(&soil), black_box(&climate)))
    });

    let selection = ["oignon", "tomate", "mil", "oignon", "inconnu"];
    c.bench_function("selection_and_advice", |b| {
        b.iter(|| {
            let ranking = rank_catalog(&catalog, &soil, &climate);
            let scores = score_selection(&catalog, black_box(&selection), &soil, &climate);
            combined_advice(&scores, &ranking)
        })
    });
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
