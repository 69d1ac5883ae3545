use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lexilearn_core::model::{Location, Puzzle, Token};
use lexilearn_core::screening::builtin_questionnaire;
use lexilearn_core::tiles::{check, Move, TileState};

fn long_puzzle(len: usize) -> Puzzle {
    let target: Vec<Token> = (0..len).map(|i| Token::new(format!("t{i}"))).collect();
    let mut scramble = target.clone();
    scramble.reverse();
    Puzzle::new("bench", target, scramble).unwrap()
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("moves");

    for len in [3usize, 12, 64] {
        let puzzle = long_puzzle(len);
        group.bench_function(format!("fill_and_clear/{len}"), |b| {
            b.iter(|| {
                let mut state = TileState::new(black_box(&puzzle));
                for i in 0..len {
                    let _ = state.apply(Move::new(Location::tray(i), Location::board(len - 1 - i)));
                }
                for i in 0..len {
                    let _ = state.apply(Move::new(Location::board(i), Location::tray(len)));
                }
                state
            })
        });
    }

    group.bench_function("swap_chain/12", |b| {
        let puzzle = long_puzzle(12);
        b.iter(|| {
            let mut state = TileState::new(&puzzle);
            let _ = state.apply(Move::new(Location::tray(0), Location::board(0)));
            for i in 1..12 {
                let _ = state.apply(Move::new(Location::tray(i), Location::board(0)));
            }
            state
        })
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let puzzle = long_puzzle(64);
    let mut state = TileState::new(&puzzle);
    for i in 0..64 {
        let _ = state.apply(Move::new(Location::tray(i), Location::board(63 - i)));
    }
    group.bench_function("check/64", |b| {
        b.iter(|| check(black_box(state.board()), black_box(&puzzle.target)))
    });

    let questionnaire = builtin_questionnaire();
    let answers = questionnaire.answers_in_order(&[1; 12]);
    group.bench_function("screening_score", |b| {
        b.iter(|| questionnaire.score(black_box(&answers)))
    });

    group.finish();
}

criterion_group!(benches, bench_moves, bench_evaluate);
criterion_main!(benches);
