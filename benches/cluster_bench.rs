use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use intentify::cluster::{AgglomerativeClustering, Granularity, Linkage};
use intentify::embedding::{HashingEncoder, SentenceEncoder};
use intentify::vector::core::matrix::DistanceMatrix;
use intentify::vector::{DistanceMetric, Vector};

fn generate_test_vectors(count: usize, dimension: usize) -> Vec<Vector> {
    let mut vectors = Vec::with_capacity(count);
    for i in 0..count {
        let mut data = Vec::with_capacity(dimension);
        for j in 0..dimension {
            let value = ((i as f32 * 0.1 + j as f32 * 0.01).sin() * 0.5 + 0.5) * 2.0 - 1.0;
            data.push(value);
        }
        vectors.push(Vector::new(data));
    }
    vectors
}

fn generate_sentences(count: usize) -> Vec<String> {
    let topics = ["refund order", "call back", "package arrive", "reset password"];
    (0..count)
        .map(|i| format!("{} request {}", topics[i % topics.len()], i / topics.len()))
        .collect()
}

fn bench_distance_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");

    for count in [100, 500] {
        let vectors = generate_test_vectors(count, 384);
        group.bench_with_input(BenchmarkId::from_parameter(count), &vectors, |b, vectors| {
            b.iter(|| {
                let matrix = DistanceMatrix::compute(black_box(vectors), DistanceMetric::Cosine);
                black_box(matrix.unwrap())
            })
        });
    }

    group.finish();
}

fn bench_clustering(c: &mut Criterion) {
    let vectors = generate_test_vectors(300, 384);
    let granularity = Granularity::DEFAULT;

    let mut group = c.benchmark_group("agglomerative");

    for linkage in [
        Linkage::Average,
        Linkage::Single,
        Linkage::Complete,
        Linkage::Weighted,
    ] {
        let clustering = AgglomerativeClustering::new().with_linkage(linkage);
        group.bench_function(linkage.name(), |b| {
            b.iter(|| black_box(clustering.fit(black_box(&vectors), granularity).unwrap()))
        });
    }

    group.finish();
}

fn bench_hashing_encoder(c: &mut Criterion) {
    let encoder = HashingEncoder::default();
    let sentences = generate_sentences(1000);

    c.bench_function("hashing_encoder_1000", |b| {
        b.iter(|| black_box(encoder.encode(black_box(&sentences)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_distance_matrix,
    bench_clustering,
    bench_hashing_encoder
);
criterion_main!(benches);
