// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use carto_render::{
    ImageSourceRegistry, LruSymbolCache, LruVectorCache, PassThroughVectorCache, RenderBackend,
    SymbolCache, VectorCache,
};
use carto_style::{Color, Geometry, Pen};
use carto_view::Viewport;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, BezPath, Point, Size};

/// Backend whose paths are real transformed `BezPath`s, so a miss costs
/// about what projecting a feature costs.
struct Bench;

impl RenderBackend for Bench {
    type Paint = [f32; 5];
    type Path = BezPath;
    type Rect = kurbo::Rect;
    type Symbol = Size;
    type Tile = Vec<u8>;
    type Label = String;
    type Sprite = Vec<u8>;
    type Error = std::io::Error;

    fn symbol_size(symbol: &Size) -> Size {
        *symbol
    }
}

fn polyline(seed: u64, points: usize) -> BezPath {
    let mut path = BezPath::new();
    let mut state = seed;
    for i in 0..points {
        // Numerical Recipes LCG parameters.
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let jitter = (state >> 40) as f64 / (1_u64 << 24) as f64;
        let p = Point::new(i as f64 * 10.0, jitter * 100.0);
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

fn project(geometry: &Geometry, viewport: &Viewport, _: f32) -> Result<BezPath, std::io::Error> {
    let transform: Affine = viewport.world_to_screen_transform();
    Ok(transform * geometry.path().clone())
}

fn stroke(pen: &Pen, opacity: f32) -> Result<[f32; 5], std::io::Error> {
    let [r, g, b, a] = pen.color.components;
    Ok([r, g, b, a * opacity, pen.width as f32])
}

fn caches() -> Vec<(&'static str, Box<dyn VectorCache<Bench>>)> {
    let symbols: Arc<dyn SymbolCache<Bench>> = Arc::new(LruSymbolCache::<Bench>::new(
        Arc::new(ImageSourceRegistry::new()),
        16,
    ));
    let lru: Box<dyn VectorCache<Bench>> =
        Box::new(LruVectorCache::<Bench>::new(Arc::clone(&symbols), 10_000));
    let pass_through: Box<dyn VectorCache<Bench>> =
        Box::new(PassThroughVectorCache::<Bench>::new(symbols));
    vec![("lru", lru), ("pass_through", pass_through)]
}

fn bench_vector_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("carto_render/vector_cache");
    group.sample_size(50);

    let viewport = Viewport::new(Point::new(500.0, 50.0), 2.0, 1024.0, 768.0);
    let pens: Vec<Pen> = (0..16)
        .map(|i| Pen::new(Color::from_rgba8(i * 16, 0, 0, 255), f64::from(i) + 1.0))
        .collect();

    for &(features, points) in &[(256_usize, 16_usize), (2_048, 64)] {
        let geometries: Vec<Geometry> = (0..features)
            .map(|i| Geometry::new(polyline(i as u64, points)))
            .collect();

        for (name, cache) in caches() {
            // Warm frame so the LRU case measures steady-state hits.
            for geometry in &geometries {
                let _ = cache.path_for_geometry(geometry, &viewport, 1.0, &project);
            }

            group.bench_function(format!("{name}/frame(f={features},p={points})"), |b| {
                b.iter(|| {
                    for (i, geometry) in geometries.iter().enumerate() {
                        let pen = &pens[i % pens.len()];
                        let paint = cache.paint_for_pen(pen, 1.0, &stroke);
                        let path = cache.path_for_geometry(geometry, &viewport, 1.0, &project);
                        black_box((paint, path));
                    }
                });
            });
            let _ = cache.dispose();
        }
    }

    group.finish();
}

criterion_group!(benches, bench_vector_cache);
criterion_main!(benches);
