#[macro_use]
extern crate criterion;
extern crate orbitprobe;

use criterion::Criterion;
use orbitprobe::{classify_grid, evaluate, Complex, Counts, Extent, Grid};

fn single_orbit(c: &mut Criterion) {
    c.bench_function("evaluate inside the set, 1000 steps", |b| {
        b.iter(|| evaluate(Complex::new(0.0, 0.0), Complex::new(-0.1, 0.1), 1000))
    });
}

fn whole_grid(c: &mut Criterion) {
    let grid = Grid::new(Complex::new(-0.5, 0.0), Extent(1.5, 1.25), Counts(101, 101)).unwrap();
    c.bench_function("classify 101x101 grid, 250 steps", move |b| {
        b.iter(|| classify_grid(&grid, Complex::new(0.0, 0.0), 250))
    });
}

criterion_group!(benches, single_orbit, whole_grid);
criterion_main!(benches);
