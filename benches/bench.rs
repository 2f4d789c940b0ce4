use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use sudoku_solver::sudoku::board::Board;
use sudoku_solver::sudoku::engine::Solver;

const CLASSIC_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

fn classic_board() -> Board {
    let grid = CLASSIC_NINE.iter().map(|row| row.to_vec()).collect::<Vec<_>>();
    Board::from_grid(3, 3, &grid).unwrap()
}

fn bench_solve(c: &mut Criterion) {
    let classic = classic_board();

    c.bench_function("solve - classic 9x9", |b| {
        b.iter(|| {
            let mut solver = Solver::new(&classic);
            black_box(solver.solve());
        })
    });

    let empty_four = Board::new(2, 2).unwrap();

    c.bench_function("solve - empty 4x4", |b| {
        b.iter(|| {
            let mut solver = Solver::new(&empty_four);
            black_box(solver.solve());
        })
    });

    let empty_nine = Board::new(3, 3).unwrap();

    c.bench_function("solve - empty 9x9", |b| {
        b.iter(|| {
            let mut solver = Solver::new(&empty_nine);
            black_box(solver.solve());
        })
    });
}

fn bench_board(c: &mut Criterion) {
    let classic = classic_board();

    c.bench_function("candidates - every empty cell", |b| {
        b.iter(|| {
            for row in 1..=9 {
                for col in 1..=9 {
                    black_box(classic.possible_values(row, col).unwrap());
                }
            }
        })
    });

    c.bench_function("consistency check - 9x9", |b| {
        b.iter(|| black_box(classic.is_consistent()))
    });
}

criterion_group!(benches, bench_solve, bench_board);

criterion_main!(benches);
