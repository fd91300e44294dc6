use criterion::{criterion_group, criterion_main, Criterion};
use numat::Matrix;

// ---------------------------------------------------------------------------
// Helpers: well-conditioned inputs for each factorization
// ---------------------------------------------------------------------------

fn general(n: usize) -> Matrix {
    Matrix::from_fn(n, n, |i, j| {
        ((i * n + j + 1) as f64).sin() + if i == j { (n as f64) * 0.5 } else { 0.0 }
    })
}

fn spd(n: usize) -> Matrix {
    let a = Matrix::from_fn(n, n, |i, j| {
        ((i + 1) * (j + 1)) as f64 / (n as f64) + if i == j { 10.0 } else { 0.0 }
    });
    &a * &a.transpose()
}

fn tall(rows: usize, cols: usize) -> Matrix {
    Matrix::from_fn(rows, cols, |i, j| ((i + 2 * j + 1) as f64).cos())
}

// ---------------------------------------------------------------------------
// Matrix multiply
// ---------------------------------------------------------------------------

fn matmul(c: &mut Criterion) {
    let mut g = c.benchmark_group("matmul");
    for n in [8usize, 32] {
        let a = general(n);
        let b = general(n);
        g.bench_function(format!("{}x{}", n, n), |bench| {
            bench.iter(|| std::hint::black_box(&a) * std::hint::black_box(&b))
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Decompositions
// ---------------------------------------------------------------------------

fn lu(c: &mut Criterion) {
    let mut g = c.benchmark_group("lu");
    for n in [8usize, 32] {
        let a = general(n);
        g.bench_function(format!("{}x{}", n, n), |bench| {
            bench.iter(|| std::hint::black_box(&a).lu())
        });
    }
    g.finish();
}

fn qr(c: &mut Criterion) {
    let mut g = c.benchmark_group("qr");
    for n in [8usize, 32] {
        let a = general(n);
        g.bench_function(format!("{}x{}", n, n), |bench| {
            bench.iter(|| std::hint::black_box(&a).qr())
        });
    }
    let a = tall(64, 8);
    g.bench_function("64x8", |bench| {
        bench.iter(|| std::hint::black_box(&a).qr())
    });
    g.finish();
}

fn cholesky(c: &mut Criterion) {
    let mut g = c.benchmark_group("cholesky");
    for n in [8usize, 32] {
        let a = spd(n);
        g.bench_function(format!("{}x{}", n, n), |bench| {
            bench.iter(|| std::hint::black_box(&a).cholesky())
        });
    }
    g.finish();
}

fn svd(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd");
    for n in [8usize, 16] {
        let a = general(n);
        g.bench_function(format!("{}x{}", n, n), |bench| {
            bench.iter(|| std::hint::black_box(&a).svd())
        });
    }
    g.finish();
}

fn eigen(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigen");
    for n in [8usize, 16] {
        let a = spd(n);
        g.bench_function(format!("symmetric_{}x{}", n, n), |bench| {
            bench.iter(|| std::hint::black_box(&a).eig())
        });
        let b = general(n);
        g.bench_function(format!("general_{}x{}", n, n), |bench| {
            bench.iter(|| std::hint::black_box(&b).eig())
        });
    }
    g.finish();
}

fn solve(c: &mut Criterion) {
    let mut g = c.benchmark_group("solve");
    for n in [8usize, 32] {
        let a = general(n);
        let b = Matrix::from_fn(n, 1, |i, _| (i + 1) as f64);
        g.bench_function(format!("{}x{}", n, n), |bench| {
            bench.iter(|| std::hint::black_box(&a).solve(std::hint::black_box(&b)).unwrap())
        });
    }
    g.finish();
}

criterion_group!(benches, matmul, lu, qr, cholesky, svd, eigen, solve);
criterion_main!(benches);
