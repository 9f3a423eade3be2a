//! This library provides a light weight software rasterizer pipeline
//!
//! It takes a list of meshes, a camera and a point light and fills up a
//! frame buffer: vertices are projected with a world/view/projection
//! matrix chain, triangles are scanline filled with a depth test and
//! Gouraud shading, and the result is a packed BGRA colour buffer ready to
//! be blitted or saved.
//!
//! Example
//!
//! ```no_run
//! use scanline_renderer::{mesh, Camera, Config, RendererContext};
//!
//! let mut ctx = RendererContext::new(Config::default())?;
//! let meshes = [mesh::cube("cube")];
//! scanline_renderer::render_scene(&mut ctx, &Camera::default(), &meshes);
//! ctx.framebuffer().save("output.png")?;
//! # Ok::<(), scanline_renderer::RenderError>(())
//! ```

pub mod error;
pub mod framebuffer;
pub mod math;
pub mod mesh;
pub mod renderer;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

pub use error::{RenderError, Result};
pub use framebuffer::Framebuffer;
pub use math::{Color4, Matrix, Quaternion, Vector2, Vector3, Vector4};
pub use mesh::{Camera, Face, Mesh, Vertex};
pub use renderer::{FrameTransforms, LineAlgorithm, RenderMode};

const WIDTH: usize = 800;
const HEIGHT: usize = 600;
const BLACK: [u8; 4] = [0, 0, 0, 255];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub mode: RenderMode,
    pub line_algorithm: LineAlgorithm,
    /// Point light, world space.
    pub light_position: Vector3,
    /// Colour every face is filled with before shading.
    pub base_color: Color4,
    /// Colour of the point and wireframe paths.
    pub debug_color: Color4,
    /// RGBA colour the frame is cleared to.
    pub background: [u8; 4],
    /// Vertical field of view, radians.
    pub fov: f32,
    pub znear: f32,
    /// The default far plane of 1.0 is narrow; scenes far from the camera
    /// get depths above 1 but are still drawn, there is no far clipping.
    pub zfar: f32,
    /// Worker threads for solid rendering, 0 lets rayon decide.
    pub threads: usize,
    /// Rows per parallel band.
    pub band_height: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            mode: RenderMode::Solid,
            line_algorithm: LineAlgorithm::Bresenham,
            light_position: Vector3::new(10., 10., 20.),
            base_color: Color4::RED,
            debug_color: Color4::YELLOW,
            background: BLACK,
            fov: 0.78,
            znear: 0.01,
            zfar: 1.0,
            threads: 0,
            band_height: 16,
        }
    }
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }
        let fov_ok = self.fov > 0. && self.fov < std::f32::consts::PI;
        let planes_ok = self.znear > 0. && self.zfar > self.znear && self.zfar.is_finite();
        if !(fov_ok && planes_ok) {
            return Err(RenderError::InvalidProjection {
                fov: self.fov,
                znear: self.znear,
                zfar: self.zfar,
            });
        }
        Ok(())
    }
}

/// Owns the framebuffer and worker pool for a fixed surface size.
pub struct RendererContext {
    config: Config,
    framebuffer: Framebuffer,
    pool: ThreadPool,
}

impl RendererContext {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let mut framebuffer = Framebuffer::new(config.width, config.height)?;
        framebuffer.clear(config.background);
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("raster-{}", i))
            .build()?;

        info!(
            "renderer ready: {}x{}, {} workers",
            config.width,
            config.height,
            pool.current_num_threads()
        );

        Ok(Self {
            config,
            framebuffer,
            pool,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Packed BGRA bytes, row-major, stride `width * 4`.
    pub fn color_buffer(&self) -> &[u8] {
        self.framebuffer.color_buffer()
    }

    /// Resets colour to `rgba` and depth to "infinitely far".
    pub fn clear(&mut self, rgba: [u8; 4]) {
        self.framebuffer.clear(rgba);
    }

    fn frame_transforms(&self, camera: &Camera) -> FrameTransforms {
        let aspect = self.config.width as f32 / self.config.height as f32;
        FrameTransforms::new(camera, self.config.fov, aspect, self.config.znear, self.config.zfar)
    }

    pub fn render_points(&mut self, camera: &Camera, meshes: &[Mesh]) {
        let frame = self.frame_transforms(camera);
        renderer::render_points(&mut self.framebuffer, &frame, meshes, self.config.debug_color.to_bgra());
    }

    pub fn render_wireframe(&mut self, camera: &Camera, meshes: &[Mesh]) {
        let frame = self.frame_transforms(camera);
        renderer::render_wireframe(
            &mut self.framebuffer,
            &frame,
            meshes,
            self.config.line_algorithm,
            self.config.debug_color.to_bgra(),
        );
    }

    pub fn render_triangles(&mut self, camera: &Camera, light_position: Vector3, meshes: &[Mesh]) {
        let frame = self.frame_transforms(camera);
        renderer::render_triangles(
            &mut self.framebuffer,
            &self.pool,
            &frame,
            meshes,
            light_position,
            self.config.base_color,
            self.config.band_height,
        );
    }
}

pub fn init(config: Config) -> Result<RendererContext> {
    RendererContext::new(config)
}

/// Clears the frame to the configured background and draws `meshes` in the
/// configured mode.
pub fn render_scene(rcontext: &mut RendererContext, camera: &Camera, meshes: &[Mesh]) {
    let config = rcontext.config;
    rcontext.clear(config.background);
    debug!("frame: {} meshes, {:?}", meshes.len(), config.mode);

    match config.mode {
        RenderMode::Points => rcontext.render_points(camera, meshes),
        RenderMode::Wireframe => rcontext.render_wireframe(camera, meshes),
        RenderMode::Solid => rcontext.render_triangles(camera, config.light_position, meshes),
    }
}
