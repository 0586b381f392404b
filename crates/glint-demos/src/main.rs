use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use glint_engine::device::ContextConfig;
use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

mod camera;
mod demos;
mod shaders;

#[derive(Parser)]
#[command(name = "glint-demos", about = "OpenGL rendering demos")]
struct Cli {
    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long, global = true, value_name = "FILTER")]
    log: Option<String>,

    /// Load `<name>.vert` / `<name>.frag` from this directory instead of the built-in shaders
    #[arg(long, global = true, value_name = "DIR")]
    shaders: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Vertex-colored triangle in clip space
    Triangle,
    /// Textured quad
    Quad {
        /// Image to map onto the quad (a checkerboard when omitted)
        #[arg(long)]
        texture: Option<PathBuf>,
    },
    /// Spinning lit primitive
    Mesh {
        #[arg(long, value_enum, default_value_t = demos::Shape::Sphere)]
        shape: demos::Shape,
        /// Diffuse texture (sRGB)
        #[arg(long)]
        texture: Option<PathBuf>,
    },
    /// Model viewer for glTF files
    Model {
        /// Path to a .gltf or .glb file
        path: PathBuf,
        /// Uniform scale applied to the model
        #[arg(long, default_value_t = 1.0)]
        scale: f32,
        /// Distance from the camera
        #[arg(long, default_value_t = 5.0)]
        distance: f32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(LoggingConfig::with_filter(cli.log));

    match run(cli.command, cli.shaders) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, shaders: Option<PathBuf>) -> Result<()> {
    let window = |title: &str| RuntimeConfig {
        title: title.to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };
    let context = ContextConfig::default();

    match command {
        Commands::Triangle => Runtime::run(
            window("glint: triangle"),
            // The triangle is specified in clip space with no winding guarantees.
            ContextConfig {
                cull_back_faces: false,
                ..context
            },
            demos::TriangleDemo::new(shaders),
        ),
        Commands::Quad { texture } => Runtime::run(
            window("glint: quad"),
            context,
            demos::QuadDemo::new(texture, shaders),
        ),
        Commands::Mesh { shape, texture } => Runtime::run(
            window("glint: mesh"),
            context,
            demos::MeshDemo::new(shape, texture, shaders),
        ),
        Commands::Model {
            path,
            scale,
            distance,
        } => Runtime::run(
            window("glint: model"),
            context,
            demos::ModelDemo::new(path, scale, distance, shaders),
        ),
    }
}
