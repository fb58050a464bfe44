use buffer_core::Buffer;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn large_source(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 48);
    for i in 0..line_count {
        match i % 4 {
            0 => out.push_str(&format!("const value_{i} = {i} + 0x{i:x};\n")),
            1 => out.push_str(&format!("// benchmark comment line {i}\n")),
            2 => out.push_str(&format!("    print_{i}(\"line {i}\", {i}.5);\n")),
            _ => out.push_str("fn helper(a: usize) usize { return a; }\n"),
        }
    }
    out
}

fn bench_sync_internal_data(c: &mut Criterion) {
    let text = large_source(50_000);
    c.bench_function("sync_internal_data/50k_lines", |b| {
        b.iter_batched(
            || Buffer::from_text(&text),
            |mut buffer| {
                buffer.sync_internal_data();
                black_box(buffer.colors().len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_source(50_000);
    c.bench_function("typing_middle/100_inserts", |b| {
        b.iter_batched(
            || Buffer::from_text(&text),
            |mut buffer| {
                let mut pos = buffer.num_chars() / 2;
                for _ in 0..100 {
                    buffer.insert_slice(pos, &['x']);
                    pos += 1;
                }
                black_box(buffer.num_chars());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_random_edits_with_undo(c: &mut Criterion) {
    let text = large_source(10_000);
    c.bench_function("random_edits_undo/200_ops", |b| {
        b.iter_batched(
            || (Buffer::from_text(&text), StdRng::seed_from_u64(7)),
            |(mut buffer, mut rng)| {
                for _ in 0..200 {
                    let len = buffer.num_chars();
                    let pos = rng.gen_range(0..len);
                    if rng.gen_bool(0.7) {
                        buffer.insert_slice(pos, &['z']);
                    } else {
                        buffer.delete_range(pos, pos + 1);
                    }
                }
                for _ in 0..200 {
                    buffer.undo();
                }
                black_box(buffer.num_chars());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_line_lookup(c: &mut Criterion) {
    let text = large_source(50_000);
    let mut buffer = Buffer::from_text(&text);
    buffer.sync_internal_data();
    let num_chars = buffer.num_chars();

    c.bench_function("line_lookup/1k_queries", |b| {
        b.iter(|| {
            let mut acc = 0;
            for i in 0..1_000 {
                let pos = (i * 7919) % num_chars;
                acc += buffer.get_line_col_from_pos(pos).line;
            }
            black_box(acc);
        })
    });
}

criterion_group!(
    benches,
    bench_sync_internal_data,
    bench_typing_in_middle,
    bench_random_edits_with_undo,
    bench_line_lookup
);
criterion_main!(benches);
