//! `ember` - render a sphere scene to a PNG or TGA file.

mod cli;
mod output;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::{render_image, render_image_parallel, SceneDescription};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::{Args, BuiltinScene};

fn load_scene(args: &Args, seed: u64) -> Result<SceneDescription> {
    let mut scene = match &args.scene_file {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => match args.scene {
            BuiltinScene::ThreeSpheres => scenes::three_spheres(),
            BuiltinScene::Cover => scenes::cover(seed),
        },
    };

    // Command-line overrides
    if let Some(width) = args.width {
        scene.camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        scene.camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        scene.camera.max_depth = max_depth;
    }

    Ok(scene)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Starting ember (seed {})", seed);

    let description = load_scene(&args, seed)?;
    if args.dump_scene {
        println!("{}", description.to_json()?);
        return Ok(());
    }

    // Validate the output path before spending time rendering
    output::output_format(&args.output)?;

    let scene = description.build().context("invalid scene")?;
    log::info!("Scene has {} objects", scene.world.len());

    let image = match args.threads {
        1 => {
            let mut rng = StdRng::seed_from_u64(seed);
            render_image(&scene.camera, &scene.world, &mut rng)
        }
        threads => {
            // 0 lets rayon pick the number of cores
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("failed to start render threads")?;
            pool.install(|| render_image_parallel(&scene.camera, &scene.world, seed))?
        }
    };

    output::save_image(image, &args.output)?;
    Ok(())
}
