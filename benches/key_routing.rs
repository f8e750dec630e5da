use criterion::{Criterion, black_box, criterion_group, criterion_main};

use vkbd::engine::prediction::Predictor;
use vkbd::keyboard::grid::{GridSettings, KeyGrid};
use vkbd::session::keyboard::KeyboardWidget;

const SENTENCE: &[&str] = &[
    "Shift", "t", "h", "e", " ", "q", "u", "i", "c", "k", " ", "b", "r", "o", "w", "n", " ",
    "f", "o", "x", "Backspace", "x", "Enter",
];

fn bench_key_routing(c: &mut Criterion) {
    c.bench_function("handle_key_press (23 keys)", |b| {
        b.iter(|| {
            let mut kb = KeyboardWidget::new(
                KeyGrid::new(1200, GridSettings::default()),
                Predictor::with_words(Vec::new()),
                false,
            );
            for key in SENTENCE {
                kb.handle_key_press(black_box(key));
            }
            kb
        })
    });
}

fn bench_prediction(c: &mut Criterion) {
    let predictor = Predictor::load();

    c.bench_function("prediction candidates", |b| {
        b.iter(|| {
            for prefix in ["th", "wo", "pe", "abc", "in"] {
                black_box(predictor.candidates(black_box(prefix)));
            }
        })
    });
}

fn bench_grid(c: &mut Criterion) {
    let grid = KeyGrid::new(1200, GridSettings::default());
    let area = ratatui::layout::Rect::new(0, 0, 120, 15);

    c.bench_function("grid layout + hit test", |b| {
        b.iter(|| {
            let rects = grid.layout(black_box(area));
            black_box(grid.hit_test(area, 60, 7));
            rects
        })
    });
}

criterion_group!(benches, bench_key_routing, bench_prediction, bench_grid);
criterion_main!(benches);
