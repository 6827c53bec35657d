//! `glsurface-demo`: opens a window and renders one demo scene.
//!
//! ```text
//! glsurface-demo --scene triangle_vertex_array
//! glsurface-demo --options assets/presets/letterbox.toml --image photo.png
//! ```

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use glsurface::{FitMode, Options, Scene, Viewer};

/// Render a cleared surface, a flat triangle or a textured quad with
/// OpenGL ES 3.0.
#[derive(Debug, Parser)]
#[command(name = "glsurface-demo", version)]
struct Args {
    /// Options TOML to start from (defaults are used otherwise).
    #[arg(long, value_name = "TOML")]
    options: Option<PathBuf>,

    /// Scene to render: clear, triangle_immediate, triangle_vbo,
    /// triangle_indexed, triangle_vertex_array or texture.
    #[arg(long)]
    scene: Option<Scene>,

    /// How the texture keeps its aspect ratio: viewport or orthographic.
    #[arg(long)]
    fit: Option<FitMode>,

    /// Image to show in the texture scene.
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Directory to read the GLSL sources from instead of the bundled ones.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Write the effective options to this TOML file and exit.
    #[arg(long, value_name = "TOML")]
    save_options: Option<PathBuf>,
}

impl Args {
    fn into_options(self) -> Result<(Options, Option<PathBuf>), glsurface::GlsurfaceError> {
        let mut options = match &self.options {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        if let Some(scene) = self.scene {
            options.surface.scene = scene;
        }
        if let Some(fit) = self.fit {
            options.texture.fit = fit;
        }
        if self.image.is_some() {
            options.texture.image = self.image;
        }
        if self.assets.is_some() {
            options.assets.shader_dir = self.assets;
        }
        Ok((options, self.save_options))
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let (options, save_to) = match Args::parse().into_options() {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = save_to {
        return match options.save(&path) {
            Ok(()) => {
                log::info!("Options written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let title = format!("glsurface: {}", options.surface.scene);
    let result = Viewer::builder()
        .with_options(options)
        .with_title(title)
        .build()
        .run();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
