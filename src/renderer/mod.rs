//! Per-frame orchestration: matrices per mesh, then one of the three
//! render modes
mod project;
mod rasterizer;
mod wireframe;

pub use project::Viewport;
pub use rasterizer::{compute_ndotl, draw_triangle};
pub use wireframe::{draw_bline, draw_line, LineAlgorithm};

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::debug;

use crate::framebuffer::Framebuffer;
use crate::math::{Color4, Matrix, Vector3};
use crate::mesh::{Camera, Mesh, Vertex};

/// What a render call draws for each mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Every projected vertex as a single pixel.
    Points,
    /// The three edges of every face.
    Wireframe,
    /// Every face filled, depth tested and shaded.
    #[default]
    Solid,
}

/// View and projection shared by every mesh of a frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransforms {
    pub view: Matrix,
    pub projection: Matrix,
}

impl FrameTransforms {
    pub fn new(camera: &Camera, fov: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            view: Matrix::look_at_lh(camera.position, camera.target, Vector3::UNIT_Y),
            projection: Matrix::perspective_fov_lh(fov, aspect, znear, zfar),
        }
    }

    /// `(world, world * view * projection)` for a mesh's current pose.
    /// Rotation is applied before translation.
    pub fn mesh_transforms(&self, mesh: &Mesh) -> (Matrix, Matrix) {
        let world = world_matrix(mesh);
        (world, world * self.view * self.projection)
    }
}

pub fn world_matrix(mesh: &Mesh) -> Matrix {
    Matrix::rotation_yaw_pitch_roll(mesh.rotation.y, mesh.rotation.x, mesh.rotation.z)
        * Matrix::translation(mesh.position)
}

pub fn render_points(
    fb: &mut Framebuffer,
    frame: &FrameTransforms,
    meshes: &[Mesh],
    color: [u8; 4],
) {
    let viewport = Viewport::new(fb.width(), fb.height());
    let mut band = fb.as_band();

    for mesh in meshes {
        let (_, transform) = frame.mesh_transforms(mesh);
        debug!("points: mesh `{}`, {} vertices", mesh.name, mesh.vertices().len());
        for vertex in mesh.vertices() {
            let point = viewport.project_2d(vertex.coordinates, &transform);
            band.draw_point_2d(point, color);
        }
    }
}

pub fn render_wireframe(
    fb: &mut Framebuffer,
    frame: &FrameTransforms,
    meshes: &[Mesh],
    algorithm: LineAlgorithm,
    color: [u8; 4],
) {
    let viewport = Viewport::new(fb.width(), fb.height());
    let mut band = fb.as_band();

    for mesh in meshes {
        let (_, transform) = frame.mesh_transforms(mesh);
        debug!("wireframe: mesh `{}`, {} faces", mesh.name, mesh.faces().len());
        for face in mesh.faces() {
            let [a, b, c] = mesh
                .face_vertices(face)
                .map(|v| viewport.project_2d(v.coordinates, &transform));
            algorithm.draw(&mut band, a, b, color);
            algorithm.draw(&mut band, b, c, color);
            algorithm.draw(&mut band, c, a, color);
        }
    }
}

/// Fills every face of every mesh.
///
/// For each mesh the faces are projected in parallel, one task per face,
/// then the surface is split into bands of `band_height` rows and each band
/// rasterizes all of the mesh's triangles clipped to its own rows. Bands
/// are disjoint, so each pixel's depth test and colour write happen on one
/// thread only and the result does not depend on face order. Meshes are
/// processed one after another; each call returns once all bands are done.
pub fn render_triangles(
    fb: &mut Framebuffer,
    pool: &ThreadPool,
    frame: &FrameTransforms,
    meshes: &[Mesh],
    light_position: Vector3,
    color: Color4,
    band_height: usize,
) {
    let viewport = Viewport::new(fb.width(), fb.height());

    for mesh in meshes {
        let (world, transform) = frame.mesh_transforms(mesh);
        debug!("solid: mesh `{}`, {} faces", mesh.name, mesh.faces().len());

        let triangles: Vec<[Vertex; 3]> = pool.install(|| {
            mesh.faces()
                .par_iter()
                .map(|face| {
                    mesh.face_vertices(face)
                        .map(|v| viewport.project(v, &transform, &world))
                })
                .collect()
        });

        let bands = fb.bands_mut(band_height);
        pool.install(|| {
            bands.into_par_iter().for_each(|mut band| {
                for [a, b, c] in &triangles {
                    draw_triangle(&mut band, *a, *b, *c, color, light_position);
                }
            })
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{cube, Face};
    use rayon::ThreadPoolBuilder;

    const BG: [u8; 4] = [0, 0, 0, 255];

    fn frame(fb: &Framebuffer) -> FrameTransforms {
        let camera = Camera::new(Vector3::new(0., 0., -10.), Vector3::ZERO);
        FrameTransforms::new(
            &camera,
            0.78,
            fb.width() as f32 / fb.height() as f32,
            0.01,
            1.,
        )
    }

    fn framebuffer() -> Framebuffer {
        let mut fb = Framebuffer::new(64, 48).unwrap();
        fb.clear(BG);
        fb
    }

    fn drawn(fb: &Framebuffer) -> usize {
        fb.color_buffer().chunks_exact(4).filter(|px| *px != BG).count()
    }

    #[test]
    fn world_rotates_before_translating() {
        let mut mesh = cube("cube");
        mesh.position = Vector3::new(5., 0., 0.);
        mesh.rotation = Vector3::new(0., std::f32::consts::FRAC_PI_2, 0.);
        let p = world_matrix(&mesh).transform_coordinate(Vector3::UNIT_X);
        assert!((p.x - 5.).abs() < 1e-5 && (p.z + 1.).abs() < 1e-5);
    }

    #[test]
    fn points_land_inside_surface() {
        let mut fb = framebuffer();
        let f = frame(&fb);
        render_points(&mut fb, &f, &[cube("cube")], [0, 255, 255, 255]);
        let n = drawn(&fb);
        assert!(n > 0 && n <= 8, "{} points", n);
        // no depth writes on this path
        assert!(fb.depth_buffer().iter().all(|&d| d == f32::MAX));
    }

    #[test]
    fn wireframe_skips_depth_buffer() {
        let mut fb = framebuffer();
        let f = frame(&fb);
        render_wireframe(&mut fb, &f, &[cube("cube")], LineAlgorithm::Bresenham, [0, 255, 255, 255]);
        assert!(drawn(&fb) > 0);
        assert_eq!(fb.pixel(0, 0), BG);
        assert!(fb.depth_buffer().iter().all(|&d| d == f32::MAX));
    }

    #[test]
    fn solid_matches_sequential_fill() {
        let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let mut mesh = cube("cube");
        mesh.rotation = Vector3::new(0.4, 0.7, 0.);
        let meshes = [mesh];
        let light = Vector3::new(10., 10., -20.);

        let mut parallel = framebuffer();
        let f = frame(&parallel);
        render_triangles(&mut parallel, &pool, &f, &meshes, light, Color4::RED, 5);

        let mut sequential = framebuffer();
        let viewport = Viewport::new(sequential.width(), sequential.height());
        let (world, transform) = f.mesh_transforms(&meshes[0]);
        let mut band = sequential.as_band();
        for face in meshes[0].faces() {
            let [a, b, c] = meshes[0]
                .face_vertices(face)
                .map(|v| viewport.project(v, &transform, &world));
            draw_triangle(&mut band, a, b, c, Color4::RED, light);
        }

        assert!(drawn(&parallel) > 0);
        assert_eq!(parallel.color_buffer(), sequential.color_buffer());
        assert_eq!(parallel.depth_buffer(), sequential.depth_buffer());
    }

    #[test]
    fn solid_is_independent_of_face_order() {
        let pool = ThreadPoolBuilder::new().num_threads(3).build().unwrap();
        let base = cube("cube");
        let mut reversed_faces: Vec<Face> = base.faces().to_vec();
        reversed_faces.reverse();
        let mut reversed = Mesh::new("reversed", base.vertices().to_vec(), reversed_faces).unwrap();
        let mut forward = base;
        forward.rotation = Vector3::new(0.3, 0.9, 0.1);
        reversed.rotation = forward.rotation;

        let light = Vector3::new(10., 10., -20.);
        let mut a = framebuffer();
        let f = frame(&a);
        render_triangles(&mut a, &pool, &f, &[forward], light, Color4::WHITE, 7);
        let mut b = framebuffer();
        render_triangles(&mut b, &pool, &f, &[reversed], light, Color4::WHITE, 7);

        assert_eq!(a.depth_buffer(), b.depth_buffer());
    }
}
