//! Simple path tracer example.
//!
//! Renders the random-spheres scene at preview quality and saves it as PPM.

use std::fs::File;
use std::io::BufWriter;

use lux_core::{presets, PpmWriter};
use lux_renderer::{build_world, render_parallel, Camera, DEFAULT_BUCKET_SIZE};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let seed = 42;
    let mut scene = presets::final_scene(seed);
    scene.settings.image_width = 400;
    scene.settings.samples_per_pixel = 32;
    scene.settings.max_depth = 10;

    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let world = build_world(&scene, &mut rng)?;
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::from_settings(&scene.settings);
    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width,
        camera.image_height(),
        camera.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render_parallel(&camera, &world, DEFAULT_BUCKET_SIZE, seed);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    let mut writer = PpmWriter::new(BufWriter::new(File::create(filename)?));
    image.write_to(&mut writer)?;
    println!("Saved to {}", filename);

    Ok(())
}
