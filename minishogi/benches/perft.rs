/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use minishogi::*;

fn perft_benchmark(c: &mut Criterion) {
    let mut startpos = Game::default();
    c.bench_function("Startpos Perft 4", |b| {
        b.iter(|| {
            let depth = black_box(4);
            black_box(perft(&mut startpos, depth))
        });
    });

    // Drops and the drop-pawn-mate test dominate here
    let mut drops = Game::from_fen(FEN_DROP_PAWN_MATE).unwrap();
    c.bench_function("Drop-Pawn-Mate Perft 3", |b| {
        b.iter(|| {
            let depth = black_box(3);
            black_box(perft(&mut drops, depth))
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50).measurement_time(Duration::from_secs(30));
    targets = perft_benchmark
}
criterion_main!(benches);
