//! Benchmarks for the raster primitives and the full frame.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scanline_renderer::framebuffer::Framebuffer;
use scanline_renderer::renderer::{draw_bline, draw_line, draw_triangle};
use scanline_renderer::{mesh, Camera, Color4, Config, RenderMode, Vector2, Vector3, Vertex};

const RED: [u8; 4] = [0, 0, 255, 255];

fn bench_lines(c: &mut Criterion) {
    let mut fb = Framebuffer::new(512, 512).unwrap();
    let (p0, p1) = (Vector2::new(10., 10.), Vector2::new(500., 300.));

    c.bench_function("draw_bline", |b| {
        b.iter(|| draw_bline(&mut fb.as_band(), black_box(p0), black_box(p1), RED))
    });
    c.bench_function("draw_line_midpoint", |b| {
        b.iter(|| draw_line(&mut fb.as_band(), black_box(p0), black_box(p1), RED))
    });
}

fn bench_triangle(c: &mut Criterion) {
    let mut fb = Framebuffer::new(800, 600).unwrap();
    let normal = Vector3::new(0., 0., -1.);
    let v1 = Vertex::new(Vector3::new(0., 0., 0.5), normal);
    let v2 = Vertex::new(Vector3::new(50., 0., 0.5), normal);
    let v3 = Vertex::new(Vector3::new(25., 25., 0.5), normal);
    let light = Vector3::new(0., 0., -10.);

    c.bench_function("draw_triangle", |b| {
        b.iter(|| {
            draw_triangle(
                &mut fb.as_band(),
                black_box(v1),
                black_box(v2),
                black_box(v3),
                Color4::RED,
                light,
            )
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_scene");
    let camera = Camera::default();
    let meshes = [mesh::cube("cube")];

    for threads in [1, 4] {
        let config = Config {
            mode: RenderMode::Solid,
            threads,
            ..Config::default()
        };
        let mut ctx = scanline_renderer::init(config).unwrap();
        group.bench_with_input(BenchmarkId::new("solid_cube", threads), &meshes, |b, meshes| {
            b.iter(|| scanline_renderer::render_scene(&mut ctx, &camera, black_box(meshes)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lines, bench_triangle, bench_frame);
criterion_main!(benches);
