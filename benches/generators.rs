use criterion::{criterion_group, criterion_main, Criterion};
use labyrinth::{
    cells::Cell,
    generators,
    grids::medium_maze_grid,
    units::{MazeSize, StepLimit},
};
use rand::{rngs::StdRng, SeedableRng};

fn bench_recursive_backtracker_maze_32_u16(c: &mut Criterion) {
    let mut g = medium_maze_grid(MazeSize(32)).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    c.bench_function("recursive_backtracker_maze_32_u16", move |b| {
        b.iter(|| {
            generators::recursive_backtracker(&mut g, Cell::new(1, 1), StepLimit(10_000), &mut rng)
        })
    });
}

criterion_group!(benches, bench_recursive_backtracker_maze_32_u16);
criterion_main!(benches);
