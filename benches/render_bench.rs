//! Benchmarks for the three-pass frame.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ribbon_scene::{SceneConfig, SceneRenderer};

fn bench_render_resolutions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resolution Scaling");

    let resolutions = [
        (640, 360, "360p"),
        (1280, 720, "720p"),
        (1920, 1080, "1080p"),
    ];

    for (width, height, name) in resolutions {
        let config = SceneConfig {
            width,
            height,
            development: false,
            ..Default::default()
        };

        let renderer = match pollster::block_on(SceneRenderer::new(config)) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Skipping GPU benchmarks: {}", e);
                return;
            }
        };

        let mut time = 0.0f32;
        group.bench_function(name, |b| {
            b.iter(|| {
                time += 1.0 / 60.0;
                black_box(renderer.render_frame(time).ok());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_resolutions);
criterion_main!(benches);
