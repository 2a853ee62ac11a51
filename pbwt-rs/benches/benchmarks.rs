use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pbwt_rs::index::PbwtIndex;
use pbwt_rs::matrix::HaplotypeMatrix;
use pbwt_rs::report;

/// 带少量“祖先”模板的随机矩阵：每行复制某个模板并按低概率翻转，
/// 使得相邻单倍型之间存在较长的共享片段。
fn make_matrix(n_haps: usize, n_sites: usize) -> HaplotypeMatrix {
    let mut x: u32 = 42;
    let mut next = || {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        x >> 16
    };
    let founders: Vec<Vec<u8>> = (0..8)
        .map(|_| (0..n_sites).map(|_| (next() & 1) as u8).collect())
        .collect();
    let mut data = Vec::with_capacity(n_haps * n_sites);
    for _ in 0..n_haps {
        let f = &founders[next() as usize % founders.len()];
        for &a in f {
            let flip = next() % 50 == 0;
            data.push(if flip { a ^ 1 } else { a });
        }
    }
    HaplotypeMatrix::from_flat(n_haps, n_sites, data).unwrap()
}

fn bench_build(c: &mut Criterion) {
    let m = make_matrix(1_000, 1_000);
    c.bench_function("pbwt_build_1000x1000", |b| {
        b.iter(|| {
            black_box(PbwtIndex::build(black_box(&m)));
        })
    });
}

fn bench_report(c: &mut Criterion) {
    let m = make_matrix(1_000, 1_000);
    let idx = PbwtIndex::build(&m);

    c.bench_function("report_matches_l100", |b| {
        b.iter(|| {
            black_box(report::report_matches(black_box(&idx), 100).unwrap());
        })
    });

    c.bench_function("report_matches_par_l100", |b| {
        b.iter(|| {
            black_box(report::report_matches_par(black_box(&idx), 100).unwrap());
        })
    });
}

criterion_group!(benches, bench_build, bench_report);
criterion_main!(benches);
