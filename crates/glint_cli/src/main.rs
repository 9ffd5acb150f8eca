use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::SceneDescription;
use glint_renderer::{render, render_parallel, CancelToken, ImageBuffer, RenderConfig, Scene};

/// Render a scene with the Glint ray tracer and write it as an image.
#[derive(Parser, Debug)]
#[command(name = "glint", version, about)]
struct Args {
    /// JSON scene file; the built-in checkerboard scene when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image, format taken from the extension
    #[arg(short, long, default_value = "raytrace.png")]
    output: PathBuf,

    /// Override the scene's image width
    #[arg(long)]
    width: Option<u32>,

    /// Override the scene's image height
    #[arg(long)]
    height: Option<u32>,

    /// Maximum reflection depth
    #[arg(long, default_value_t = 5)]
    max_depth: u32,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Render on the calling thread only
    #[arg(long)]
    sequential: bool,
}

fn load_scene(args: &Args) -> Result<Scene> {
    let description = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the built-in demo scene");
            SceneDescription::demo()
        }
    };

    let mut scene = Scene::from_description(&description).context("Failed to build scene")?;

    if args.width.is_some() || args.height.is_some() {
        let camera = scene.camera().clone();
        let width = args.width.unwrap_or(camera.width());
        let height = args.height.unwrap_or(camera.height());
        scene.set_camera(camera.with_resolution(width, height)?);
    }

    Ok(scene)
}

fn run(args: Args) -> Result<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let scene = load_scene(&args)?;
    let config = RenderConfig {
        max_depth: args.max_depth,
        ..Default::default()
    };

    let camera = scene.camera();
    let mut image = ImageBuffer::new(camera.width(), camera.height());

    if args.sequential {
        render(&scene, &config, &mut image);
    } else {
        render_parallel(&scene, &config, &mut image, &CancelToken::new())?;
    }

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    log::info!("Starting Glint: {:?}", args);

    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["glint"]);
        assert_eq!(args.output, PathBuf::from("raytrace.png"));
        assert_eq!(args.max_depth, 5);
        assert!(args.scene.is_none());
        assert!(!args.sequential);
    }

    #[test]
    fn test_resolution_override() {
        let args = Args::parse_from(["glint", "--width", "64", "--height", "48"]);
        let scene = load_scene(&args).unwrap();
        assert_eq!(scene.camera().width(), 64);
        assert_eq!(scene.camera().height(), 48);
    }

    #[test]
    fn test_missing_scene_file_is_an_error() {
        let args = Args::parse_from(["glint", "--scene", "/nonexistent/scene.json"]);
        assert!(load_scene(&args).is_err());
    }
}
