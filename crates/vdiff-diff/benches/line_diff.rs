use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vdiff_diff::{diff_lines_raw, diff_strings_raw, DiffOptions};

/// `lines` numbered lines, every `every`-th one edited on the `b` side.
fn generate_pair(lines: usize, every: usize) -> (String, String) {
    let a: Vec<String> = (0..lines).map(|i| format!("let value_{i} = {i};")).collect();
    let b: Vec<String> = (0..lines)
        .map(|i| {
            if i % every == 0 {
                format!("let value_{i} = {};", i * 2)
            } else {
                format!("let value_{i} = {i};")
            }
        })
        .collect();
    (a.join("\n"), b.join("\n"))
}

fn benchmark_line_diff(c: &mut Criterion) {
    let plain = DiffOptions::plain();
    let unhighlighted = DiffOptions {
        highlight_changes: false,
        ..DiffOptions::plain()
    };
    let mut group = c.benchmark_group("line_diff");

    for size in [100, 1000, 5000].iter() {
        let pair = generate_pair(*size, 10);
        group.bench_with_input(BenchmarkId::new("highlighted", size), &pair, |b, (x, y)| {
            b.iter(|| diff_lines_raw(black_box(x), black_box(y), &plain));
        });
        group.bench_with_input(BenchmarkId::new("lines_only", size), &pair, |b, (x, y)| {
            b.iter(|| diff_lines_raw(black_box(x), black_box(y), &unhighlighted));
        });
    }

    group.finish();
}

fn benchmark_char_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_diff");

    for size in [10, 100, 400].iter() {
        let (a, b) = generate_pair(*size, 3);
        group.bench_with_input(BenchmarkId::new("raw", size), &(a.clone(), b.clone()), |bench, (x, y)| {
            bench.iter(|| diff_strings_raw(black_box(x), black_box(y), false));
        });
        group.bench_with_input(BenchmarkId::new("cleaned", size), &(a, b), |bench, (x, y)| {
            bench.iter(|| diff_strings_raw(black_box(x), black_box(y), true));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_line_diff, benchmark_char_diff);
criterion_main!(benches);
