//! Reduced model benchmarks.
//!
//! Measures full classification throughput and the cost of keystroke-sized
//! edits, which is what an editor pays on every key press.

use std::hint::black_box;

use brace_reduced::ReducedModel;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Generate N small functions with comments and literals mixed in.
fn generate_n_functions(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "/* function {i} */\nint func{i}(int x) {{\n    // add\n    return x + {i}; \"s{{\";\n}}\n"
            )
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduced/classify");

    for num_functions in [10, 100, 1000, 5000] {
        let source = generate_n_functions(num_functions);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_functions),
            &source,
            |b, src| b.iter(|| black_box(ReducedModel::classify(src))),
        );
    }

    group.finish();
}

/// Type one character in the middle of the buffer and delete it again.
fn bench_keystroke(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduced/keystroke");

    for num_functions in [100, 1000, 5000] {
        let source = generate_n_functions(num_functions);
        let mid = source.len() / 2;
        let mid = (mid..source.len())
            .find(|&i| source.is_char_boundary(i))
            .unwrap_or(0);
        let mut typed = source.clone();
        typed.insert(mid, 'x');
        let offset = u32::try_from(mid).unwrap_or(0);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_functions),
            &source,
            |b, src| {
                let mut model = ReducedModel::classify(src);
                b.iter(|| {
                    black_box(model.apply_edit(&typed, offset, 0, "x"));
                    black_box(model.apply_edit(src, offset, 1, ""));
                });
            },
        );
    }

    group.finish();
}

/// Type one character at the very start of the buffer and delete it again.
///
/// Every span after the edit lies behind it, so this is the case where
/// shifting offsets would cost the whole buffer.
fn bench_keystroke_at_start(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduced/keystroke_start");

    for num_functions in [100, 1000, 5000] {
        let source = generate_n_functions(num_functions);
        let typed = format!("x{source}");

        group.bench_with_input(
            BenchmarkId::from_parameter(num_functions),
            &source,
            |b, src| {
                let mut model = ReducedModel::classify(src);
                b.iter(|| {
                    black_box(model.apply_edit(&typed, 0, 0, "x"));
                    black_box(model.apply_edit(src, 0, 1, ""));
                });
            },
        );
    }

    group.finish();
}

/// Open and close a block comment near the top, forcing a long re-scan.
fn bench_comment_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduced/comment_toggle");

    for num_functions in [100, 1000] {
        let source = generate_n_functions(num_functions);
        let mut opened = source.clone();
        opened.insert_str(0, "/*");

        group.bench_with_input(
            BenchmarkId::from_parameter(num_functions),
            &source,
            |b, src| {
                let mut model = ReducedModel::classify(src);
                b.iter(|| {
                    black_box(model.apply_edit(&opened, 0, 0, "/*"));
                    black_box(model.apply_edit(src, 0, 2, ""));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_keystroke,
    bench_keystroke_at_start,
    bench_comment_toggle
);
criterion_main!(benches);
