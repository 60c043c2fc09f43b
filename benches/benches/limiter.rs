// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use carto_view::{MinMax, Viewport, ViewportLimiter, ViewportLimiterKeepWithin};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};

/// Web-Mercator style pyramid: level 0 covers the world in one 256px tile.
fn pyramid(levels: u32) -> Vec<f64> {
    (0..levels)
        .map(|z| 156_543.033_928_041 / f64::from(1_u32 << z))
        .collect()
}

/// A pan/zoom gesture: small translations with an occasional zoom step.
fn gesture(steps: usize) -> Vec<Viewport> {
    let mut viewport = Viewport::new(Point::ZERO, 1_000.0, 1280.0, 800.0);
    (0..steps)
        .map(|i| {
            viewport = viewport.translated(Vec2::new(4_000.0, -2_500.0));
            if i % 16 == 0 {
                viewport = viewport.with_resolution(viewport.resolution() * 0.8);
            }
            viewport
        })
        .collect()
}

fn bench_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("carto_view/limiter");

    let world = Rect::new(-20_037_508.34, -20_037_508.34, 20_037_508.34, 20_037_508.34);
    let steps = gesture(1_024);

    for &levels in &[4_u32, 20] {
        let resolutions = pyramid(levels);
        let limiter = ViewportLimiterKeepWithin::new();
        group.bench_function(format!("keep_within(levels={levels})"), |b| {
            b.iter(|| {
                for viewport in &steps {
                    black_box(limiter.limit(viewport, &resolutions, Some(world)));
                }
            });
        });
    }

    let mut limiter = ViewportLimiterKeepWithin::new();
    limiter.set_zoom_limits(Some(MinMax::new(0.5, 50_000.0)));
    limiter.set_pan_limits(Some(Rect::new(-1.0e6, -1.0e6, 1.0e6, 1.0e6)));
    group.bench_function("keep_within(explicit limits)", |b| {
        b.iter(|| {
            for viewport in &steps {
                black_box(limiter.limit(viewport, &[], None));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_limiter);
criterion_main!(benches);
