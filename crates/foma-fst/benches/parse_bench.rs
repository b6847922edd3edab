// Criterion benchmarks for foma-fst.
//
// Parses synthetic nets of increasing size. Each net is a chain of states
// with a mix of full, short and abbreviated records so every decoder branch
// is exercised.
//
// Run:
//   cargo bench -p foma-fst

use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

fn synthetic_net(states: u32) -> String {
    let mut text = String::from("##foma-net 1.0##\n##props##\n2 0 0 0 1 1 0 0 1 0 1 1 bench\n##sigma##\n0 @_EPSILON_SYMBOL_@\n");
    for (i, ch) in ALPHABET.chars().enumerate() {
        let _ = writeln!(text, "{} {ch}", 97 + i);
    }
    let _ = writeln!(text, "200 +Noun\n201 @U.CASE.NOM@");

    text.push_str("##states##\n");
    for state in 0..states {
        let next = state + 1;
        let label = 97 + state % 26;
        let _ = writeln!(text, "{state} {label} {next} 0");
        let _ = writeln!(text, "{} {next}", 97 + (state + 7) % 26);
        let _ = writeln!(text, "200 0 {next}");
        if state % 5 == 0 {
            let _ = writeln!(text, "{state} 201 0 {next} 0");
        }
    }
    let _ = writeln!(text, "{states} -1 -1 1\n-1 -1 -1 -1 -1\n##end##");
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for states in [100u32, 1_000, 10_000] {
        let text = synthetic_net(states);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(states), &text, |b, text| {
            b.iter(|| foma_fst::parse(std::hint::black_box(text)).expect("synthetic net parses"));
        });
    }
    group.finish();
}

fn bench_arcs_from(c: &mut Criterion) {
    let fst = foma_fst::parse(&synthetic_net(10_000)).expect("synthetic net parses");
    c.bench_function("arcs_from (10k states)", |b| {
        b.iter(|| {
            let mut total = 0;
            for state in (0..10_000).step_by(97) {
                total += fst.arcs_from(std::hint::black_box(state)).len();
            }
            total
        });
    });
}

criterion_group!(benches, bench_parse, bench_arcs_from);
criterion_main!(benches);
