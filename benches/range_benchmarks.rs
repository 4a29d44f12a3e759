//! Benchmarks for block range and entity queries.
//!
//! Run with: cargo bench

use blockspan_core::{EntityTypeStrategy, selected_blocks, selection_contains_entity};
use blockspan_model::{ContentState, EditorState, Entity, Mutability};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Builds a document of `blocks` blocks with a link in every tenth block.
fn generate_document(blocks: usize) -> EditorState {
    let mut builder = ContentState::builder();
    for i in 0..blocks {
        builder = builder.block_with_key(
            format!("b{i}"),
            format!("Block {}: This is a sample line of text for benchmarking purposes.", i),
        );
        if i % 10 == 9 {
            builder = builder.entity(8, 12, Entity::new("LINK", Mutability::Mutable));
        }
    }
    let content = builder.build().expect("benchmark document is valid");
    let state = EditorState::new(content);
    let all = state.select_all();
    state.force_selection(all)
}

/// Benchmarks collecting whole-document ranges.
fn bench_selected_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("selected_blocks");

    for size in [10, 100, 1000, 10000].iter() {
        let state = generate_document(*size);
        let selection = state.selection().clone();

        group.bench_with_input(BenchmarkId::new("whole_document", size), &state, |b, state| {
            b.iter(|| {
                let blocks = selected_blocks(
                    state.current_content(),
                    black_box(&selection.anchor_key),
                    black_box(&selection.focus_key),
                )
                .unwrap();
                black_box(blocks)
            })
        });
    }

    group.finish();
}

/// Benchmarks entity checks that hit early and ones that scan everything.
fn bench_contains_entity(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains_entity");

    let state = generate_document(10000);
    let links = selection_contains_entity(EntityTypeStrategy::new("LINK"));
    let images = selection_contains_entity(EntityTypeStrategy::new("IMAGE"));

    group.bench_function("early_match", |b| {
        b.iter(|| black_box(links.contains(black_box(&state), None).unwrap()))
    });

    group.bench_function("full_scan", |b| {
        b.iter(|| black_box(images.contains(black_box(&state), None).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_selected_blocks, bench_contains_entity);

criterion_main!(benches);
