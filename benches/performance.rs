use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quizboard::engine::bars::{draw_board, BoardTheme};
use quizboard::engine::highlight::HighlightBoard;
use quizboard::engine::layout::BoardLayout;
use quizboard::engine::progress::ProgressMapper;
use quizboard::engine::scheduler::Engine;
use quizboard::engine::state::FontCache;
use quizboard::engine::testing::RecordingSurface;
use quizboard::fixtures::demo_snapshot;
use quizboard::snapshot::DerivedModel;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn benchmark_progress_mapper(c: &mut Criterion) {
    let snapshot = demo_snapshot();
    let derived = DerivedModel::new(&snapshot);
    let mapper = ProgressMapper::new(&derived, snapshot.duration(), snapshot.categories.len());
    let duration = snapshot.duration();

    c.bench_function("progress_full_run", |b| {
        b.iter(|| {
            // One sample per frame at 60 fps over the whole run.
            let mut elapsed = 0.0;
            let mut acc = 0.0;
            while elapsed < duration {
                acc += mapper.revealed(black_box(elapsed));
                elapsed += 16.0;
            }
            acc
        })
    });
}

fn benchmark_board_frame(c: &mut Criterion) {
    let snapshot = demo_snapshot();
    let derived = DerivedModel::new(&snapshot);
    let layout = BoardLayout::compute(
        200.0,
        100.0,
        snapshot.teams.len(),
        snapshot.categories.len(),
    );
    let mapper = ProgressMapper::new(&derived, snapshot.duration(), snapshot.categories.len());
    let mut fonts = FontCache::new(&snapshot);
    let probe = RecordingSurface::new(200.0, 100.0);
    fonts.refresh(&probe, &layout);
    let theme = BoardTheme::default();
    let elapsed = snapshot.duration() * 0.6;
    let revealed = mapper.revealed(elapsed);

    c.bench_function("board_mid_reveal_frame", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::new(200.0, 100.0);
            let mut highlights = HighlightBoard::new(snapshot.teams.len());
            draw_board(
                &mut surface,
                black_box(&snapshot),
                &derived,
                &layout,
                &fonts,
                &mut highlights,
                &theme,
                elapsed,
                revealed,
            );
            surface.ops.len()
        })
    });
}

fn benchmark_full_animation(c: &mut Criterion) {
    let snapshot = demo_snapshot();
    let duration = snapshot.duration();

    c.bench_function("engine_full_animation", |b| {
        b.iter(|| {
            let mut engine = Engine::new(
                snapshot.clone(),
                BoardTheme::default(),
                250.0,
                StdRng::seed_from_u64(1),
            )
            .unwrap();
            let mut surface = RecordingSurface::new(200.0, 100.0);
            engine.trigger_animation(0.0);
            let mut now = 0.0;
            while now < duration + 1_000.0 {
                engine.on_frame(&mut surface, black_box(now));
                now += 16.0;
            }
            surface.ops.len()
        })
    });
}

criterion_group!(
    benches,
    benchmark_progress_mapper,
    benchmark_board_frame,
    benchmark_full_animation
);
criterion_main!(benches);
