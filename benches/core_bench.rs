use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use interactive_snake_editor::{
    parse_snake_record, write_snake_record, HermiteSplineModel, LinearSplineModel, Snake,
    SnakeRecord,
};
use std::hint::black_box;

fn bench_xml_parsing(c: &mut Criterion) {
    let xml_content = include_str!("../tests/fixtures/snake_config.xml");

    c.bench_function("xml_parse_snake_config", |b| {
        b.iter(|| {
            let record = parse_snake_record(black_box(xml_content)).expect("XML parse failed");
            black_box(record.control_points.len())
        })
    });
}

fn bench_xml_writing(c: &mut Criterion) {
    let model = HermiteSplineModel::new(64, 1024, 1024, None).expect("M = 64 ist gültig");
    let record = SnakeRecord::from_snake("bench", &model);

    c.bench_function("xml_write_hermite_64", |b| {
        b.iter(|| {
            let xml = write_snake_record(black_box(&record)).expect("XML write failed");
            black_box(xml.len())
        })
    });
}

fn bench_skin(c: &mut Criterion) {
    let mut group = c.benchmark_group("skin");

    for &m in &[8usize, 64usize] {
        group.bench_with_input(BenchmarkId::new("linear_compute", m), &m, |b, &m| {
            let mut model = LinearSplineModel::new(m, 1024, 1024, None).expect("M ist gültig");
            b.iter(|| {
                model.compute_skin();
                black_box(model.skin().len())
            })
        });

        group.bench_with_input(BenchmarkId::new("hermite_compute", m), &m, |b, &m| {
            let mut model = HermiteSplineModel::new(m, 1024, 1024, None).expect("M ist gültig");
            b.iter(|| {
                model.compute_skin();
                black_box(model.skin().len())
            })
        });

        group.bench_with_input(BenchmarkId::new("hermite_scales", m), &m, |b, &m| {
            let model = HermiteSplineModel::new(m, 1024, 1024, None).expect("M ist gültig");
            b.iter(|| black_box(model.scales().len()))
        });
    }

    group.finish();
}

criterion_group!(core_benches, bench_xml_parsing, bench_xml_writing, bench_skin);
criterion_main!(core_benches);
