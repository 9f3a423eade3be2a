use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use scanline_renderer::mesh::{self, wavefront};
use scanline_renderer::{Camera, Config, LineAlgorithm, Mesh, RenderMode, Result, Vector3};

/// Renders OBJ meshes (or a unit cube) to an image file.
#[derive(Parser)]
#[command(name = "scanline-renderer", version, about, long_about = None)]
struct Cli {
    /// Wavefront .obj files to draw; a cube is used when none are given
    #[arg(name = "OBJ")]
    inputs: Vec<PathBuf>,

    /// Output image, format picked from the extension
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 800)]
    width: usize,

    #[arg(long, default_value_t = 600)]
    height: usize,

    #[arg(short, long, value_enum, default_value_t = Mode::Solid)]
    mode: Mode,

    /// Line algorithm for wireframe mode
    #[arg(long, value_enum, default_value_t = Line::Bresenham)]
    line: Line,

    /// Frames to render; every frame spins the meshes a little
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Camera distance from the origin along +Z
    #[arg(long, default_value_t = 10.0)]
    distance: f32,

    /// Worker threads, 0 for one per core
    #[arg(long, default_value_t = 0)]
    threads: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Points,
    Wireframe,
    Solid,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Points => RenderMode::Points,
            Mode::Wireframe => RenderMode::Wireframe,
            Mode::Solid => RenderMode::Solid,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Line {
    Bresenham,
    Midpoint,
}

impl From<Line> for LineAlgorithm {
    fn from(line: Line) -> Self {
        match line {
            Line::Bresenham => LineAlgorithm::Bresenham,
            Line::Midpoint => LineAlgorithm::Midpoint,
        }
    }
}

const SPIN: Vector3 = Vector3 { x: 0.001, y: 0.001, z: 0. };

fn load_meshes(inputs: &[PathBuf]) -> Result<Vec<Mesh>> {
    if inputs.is_empty() {
        return Ok(vec![mesh::cube("cube")]);
    }
    let mut meshes = Vec::with_capacity(inputs.len());
    for path in inputs {
        let mut mesh = wavefront::load(path)?;
        mesh.normalize_vertices();
        meshes.push(mesh);
    }
    Ok(meshes)
}

fn run(cli: Cli) -> Result<()> {
    let config = Config {
        width: cli.width,
        height: cli.height,
        mode: cli.mode.into(),
        line_algorithm: cli.line.into(),
        threads: cli.threads,
        ..Config::default()
    };
    let mut rcontext = scanline_renderer::init(config)?;
    let mut meshes = load_meshes(&cli.inputs)?;
    info!("{} meshes, {} frames", meshes.len(), cli.frames.max(1));
    let camera = Camera::new(Vector3::new(0., 0., cli.distance), Vector3::ZERO);

    for _ in 0..cli.frames.max(1) {
        for mesh in meshes.iter_mut() {
            mesh.rotate(SPIN);
        }
        scanline_renderer::render_scene(&mut rcontext, &camera, &meshes);
    }

    rcontext.framebuffer().save(&cli.output)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
