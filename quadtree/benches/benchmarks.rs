use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quadtree::quadtree::{Config, QuadTree};
use quadtree::shapes::Rectangle;
use rand::prelude::*;

fn insert_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 1000.0, 1000.0));

    c.bench_function("quadtree_insert", |b| {
        b.iter(|| {
            let x = rng.gen_range(0.0f32..1000.0);
            let y = rng.gen_range(0.0f32..1000.0);
            tree.insert(black_box(x), black_box(y), 0u32).unwrap();
        })
    });
}

fn remove_nearest_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 1000.0, 1000.0));
    for i in 0..10_000u32 {
        let x = rng.gen_range(0.0f32..1000.0);
        let y = rng.gen_range(0.0f32..1000.0);
        tree.insert(x, y, i).unwrap();
    }

    c.bench_function("quadtree_remove_nearest", |b| {
        b.iter(|| {
            let x = rng.gen_range(0.0f32..1000.0);
            let y = rng.gen_range(0.0f32..1000.0);
            // Reinsert so the tree stays populated across iterations.
            if let Some(element) = tree.remove_nearest(black_box(x), black_box(y)).unwrap() {
                tree.insert(element.x, element.y, element.data).unwrap();
            }
        })
    });
}

fn elements_in_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut tree = QuadTree::with_config(
        Rectangle::new(0.0, 0.0, 1000.0, 1000.0),
        Config {
            elements_per_node: 16,
            ..Config::default()
        },
    );
    for i in 0..10_000u32 {
        let x = rng.gen_range(0.0f32..1000.0);
        let y = rng.gen_range(0.0f32..1000.0);
        tree.insert(x, y, i).unwrap();
    }

    let mut out = Vec::new();
    c.bench_function("quadtree_elements_in", |b| {
        b.iter(|| {
            let x = rng.gen_range(0.0f32..900.0);
            let y = rng.gen_range(0.0f32..900.0);
            tree.elements_in(Rectangle::new(x, y, 100.0, 100.0), &mut out)
                .unwrap();
            black_box(out.len());
        })
    });
}

fn nearest_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 1000.0, 1000.0));
    for i in 0..10_000u32 {
        let x = rng.gen_range(0.0f32..1000.0);
        let y = rng.gen_range(0.0f32..1000.0);
        tree.insert(x, y, i).unwrap();
    }

    c.bench_function("quadtree_nearest", |b| {
        b.iter(|| {
            let x = rng.gen_range(0.0f32..1000.0);
            let y = rng.gen_range(0.0f32..1000.0);
            black_box(tree.nearest(x, y).unwrap());
        })
    });

    c.bench_function("quadtree_nearest_padded", |b| {
        b.iter(|| {
            let x = rng.gen_range(0.0f32..1000.0);
            let y = rng.gen_range(0.0f32..1000.0);
            black_box(tree.nearest_padded(x, y).unwrap());
        })
    });
}

criterion_group!(
    benches,
    insert_benchmark,
    remove_nearest_benchmark,
    elements_in_benchmark,
    nearest_benchmark
);
criterion_main!(benches);
