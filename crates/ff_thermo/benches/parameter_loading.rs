use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use std::hint::black_box;

use strum::IntoEnumIterator;

use ff_thermo::Nucleotide;
use ff_thermo::ParameterTable;

pub fn parameter_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("ParameterTable");

    group.bench_function("Load default parameters", |b| {
        b.iter(|| {
            let _ = black_box(ParameterTable::default_parameters());
        });
    });

    let table = ParameterTable::default_parameters()
        .expect("Built-in parameter directory must be valid");

    group.bench_function("Full quartet scan", |b| {
        b.iter(|| {
            let mut sum = 0i32;
            for i in Nucleotide::iter() {
                for j in Nucleotide::iter() {
                    for k in Nucleotide::iter() {
                        for l in Nucleotide::iter() {
                            sum += table.dh(i, j, k, l) as i32 + table.ds(i, j, k, l) as i32;
                        }
                    }
                }
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(benches, parameter_loading);
criterion_main!(benches);
