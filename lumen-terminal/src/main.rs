/// Lumen Terminal Demo - Lit spinning solids
///
/// Controls:
///   - Arrow Keys: Pan the model
///   - Left mouse drag: Move the model under the cursor
///   - Mouse wheel: Zoom
///   - P: Toggle perspective/orthographic projection
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lumen_core::{Mesh, ProjectionMode, SceneConfig};
use lumen_terminal::TerminalApp;

#[derive(Parser, Debug)]
#[command(name = "lumen-terminal", about = "Render lit solids in the terminal")]
struct Cli {
    /// Initial projection mode
    #[arg(long, value_enum, default_value_t = Projection::Perspective)]
    projection: Projection,

    /// Solid to draw
    #[arg(long, value_enum, default_value_t = Shape::Sphere)]
    shape: Shape,

    /// Sphere subdivisions around the vertical axis
    #[arg(long, default_value_t = 16)]
    slices: u32,

    /// Sphere subdivisions from pole to pole
    #[arg(long, default_value_t = 8)]
    stacks: u32,

    /// Target frame rate
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Projection {
    Perspective,
    Orthographic,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shape {
    Sphere,
    Cube,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mesh = match cli.shape {
        Shape::Sphere => Mesh::sphere(cli.slices, cli.stacks),
        Shape::Cube => Mesh::cube(2.0),
    };
    let mode = match cli.projection {
        Projection::Perspective => ProjectionMode::Perspective,
        Projection::Orthographic => ProjectionMode::Orthographic,
    };
    log::info!(
        "starting with {:?} ({} triangles), {:?} projection, {} fps",
        cli.shape,
        mesh.triangle_count(),
        mode,
        cli.fps
    );

    let mut app = TerminalApp::new(mesh, SceneConfig::default(), mode)
        .context("failed to query terminal size")?
        .with_fps(cli.fps);
    app.run().context("terminal renderer failed")?;

    println!("Thank you for using Lumen!");
    Ok(())
}
