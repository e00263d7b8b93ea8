use flood_pipe::board_fixture;
use flood_pipe::compact_representation::Board;
use flood_pipe::settings::Settings;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::SmallRng, SeedableRng};

fn scrambled_board() -> Board {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut board = Board::generate(&Settings::new(15, 15, 10, false), &mut rng)
        .expect("the settings are valid");
    board.rotate_randomly(&mut rng);
    board
}

fn bench_distances(c: &mut Criterion) {
    let board = scrambled_board();
    c.bench_function("distance buckets 15x15", |b| {
        b.iter(|| black_box(&board).connected_with_distances())
    });
}

fn bench_unconnected(c: &mut Criterion) {
    let board = scrambled_board();
    c.bench_function("unconnected set 15x15", |b| {
        b.iter(|| black_box(&board).unconnected_set())
    });
}

fn bench_solved_fixture(c: &mut Criterion) {
    let board = board_fixture(include_str!("../fixtures/overflow_3x3.json"));
    c.bench_function("solved check overflow fixture", |b| {
        b.iter(|| black_box(&board).is_fully_solved())
    });
}

criterion_group!(benches, bench_distances, bench_unconnected, bench_solved_fixture);
criterion_main!(benches);
