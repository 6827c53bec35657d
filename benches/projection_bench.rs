#![allow(missing_docs, unused_results)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glsurface::{
    assets::BundledAssets,
    drawable::{Drawable, Submission, Triangle},
    gl::MockGl,
    projection::{letterbox_viewport, model_view_projection, Extent, FitMode, SurfaceLayout},
};

fn letterbox_benchmark(c: &mut Criterion) {
    let image = Extent::new(1920, 1080);
    let surface = Extent::new(1080, 1920);
    c.bench_function("letterbox_viewport", |b| {
        b.iter(|| black_box(letterbox_viewport(black_box(image), black_box(surface))))
    });
}

fn mvp_benchmark(c: &mut Criterion) {
    let image = Extent::new(512, 512);
    let surface = Extent::new(1920, 1080);
    c.bench_function("model_view_projection", |b| {
        b.iter(|| black_box(model_view_projection(black_box(image), black_box(surface))))
    });
}

fn resize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_layout_resize");
    for mode in [FitMode::Viewport, FitMode::Orthographic] {
        let mut layout = SurfaceLayout::new(Extent::new(96, 64), mode);
        group.bench_function(format!("{mode:?}"), |b| {
            let mut width = 640;
            b.iter(|| {
                width = if width >= 2560 { 640 } else { width + 16 };
                black_box(layout.resize(width, 1080))
            })
        });
    }
    group.finish();
}

fn mock_draw_benchmark(c: &mut Criterion) {
    let gl = MockGl::new();
    let mut group = c.benchmark_group("triangle_draw_mock");
    for submission in [Submission::Immediate, Submission::VertexArray] {
        let mut triangle = Triangle::new(&gl, &BundledAssets, submission).unwrap();
        group.bench_function(submission.to_string(), |b| {
            b.iter(|| {
                triangle.draw(&gl);
                gl.clear_calls();
            })
        });
        triangle.release(&gl);
    }
    group.finish();
}

criterion_group!(
    benches,
    letterbox_benchmark,
    mvp_benchmark,
    resize_benchmark,
    mock_draw_benchmark
);
criterion_main!(benches);
