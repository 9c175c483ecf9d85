// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_carousel::Carousel;
use understory_carousel::adapters::headless::{BoxModel, HeadlessViewport};
use understory_carousel::config::{CarouselConfig, ManualClock};
use understory_carousel::geometry::{DragBounds, nearest_snap};
use understory_carousel::sampling::SampleWindow;
use understory_carousel::types::{GestureKind, PointerSample};

fn carousel(n: usize, clock: &ManualClock) -> Carousel<HeadlessViewport> {
    let host = HeadlessViewport::new(
        BoxModel::sized(400.0, 300.0),
        vec![BoxModel::sized(400.0, 300.0); n],
    );
    let (viewport, container, slides) = host.elements();
    let config = CarouselConfig::default().with_clock(clock.clone());
    let mut c = Carousel::new(host, viewport, container, slides, config);
    c.init(n / 2);
    c
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    for &n in &[10_usize, 100, 1_000] {
        let points: Vec<f64> = (0..n).map(|i| i as f64 * 400.0).collect();
        let bounds = DragBounds::new(n as f64 * 400.0, 400.0);
        group.bench_function(format!("nearest_snap_{n}"), |b| {
            b.iter(|| nearest_snap(black_box(&points), black_box(-(n as f64) * 173.0)));
        });
        group.bench_function(format!("elastic_{n}"), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for i in 0..64 {
                    acc += bounds.elastic(black_box(bounds.min - f64::from(i) * 7.5));
                }
                acc
            });
        });
    }
    group.finish();
}

fn bench_window(c: &mut Criterion) {
    c.bench_function("sample_window_push_120hz", |b| {
        b.iter(|| {
            let mut w = SampleWindow::new();
            for i in 0..240 {
                let t = f64::from(i) * 8.3;
                w.push(Point::new(400.0 - f64::from(i), 10.0), t);
            }
            black_box(w.velocity())
        });
    });
}

fn bench_swipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("swipe");
    for &n in &[10_usize, 100, 1_000] {
        group.bench_function(format!("drag_and_release_{n}"), |b| {
            let clock = ManualClock::new();
            b.iter_batched(
                || carousel(n, &clock),
                |mut car| {
                    car.handle_gesture(GestureKind::Start, PointerSample::at(300.0, 50.0));
                    for i in 1..=30 {
                        clock.advance(8.0);
                        car.handle_gesture(
                            GestureKind::Move,
                            PointerSample::at(300.0 - 5.0 * f64::from(i), 52.0),
                        );
                    }
                    car.handle_gesture(GestureKind::End, PointerSample::at(150.0, 52.0));
                    black_box(car.current())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geometry, bench_window, bench_swipe);
criterion_main!(benches);
