//! Built-in scenes.
//!
//! These are selectable by name from the command line, and double as
//! fixtures for the renderer's tests.

use lux_math::{Color, Point3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::loader::{SceneError, SceneResult};
use crate::scene::{MaterialDesc, SceneDescription};
use crate::settings::RenderSettings;

/// Names accepted by [`builtin_scene`].
pub const BUILTIN_SCENES: &[&str] = &["three-spheres", "materials", "final"];

/// Seed used to lay out the small spheres of the final scene.
const FINAL_SCENE_LAYOUT_SEED: u64 = 0x5eed_1a5e;

/// Look up a built-in scene by name.
pub fn builtin_scene(name: &str) -> SceneResult<SceneDescription> {
    match name {
        "three-spheres" => Ok(three_spheres()),
        "materials" => Ok(materials()),
        "final" => Ok(final_scene(FINAL_SCENE_LAYOUT_SEED)),
        _ => Err(SceneError::UnknownScene(name.to_string())),
    }
}

/// A large ground sphere with a diffuse and a metal unit sphere resting on it.
pub fn three_spheres() -> SceneDescription {
    let mut scene = SceneDescription::new(RenderSettings::default());

    scene.add_material("ground", MaterialDesc::Lambertian { albedo: Color::new(0.8, 0.8, 0.0) });
    scene.add_material("diffuse", MaterialDesc::Lambertian { albedo: Color::new(0.1, 0.2, 0.5) });
    scene.add_material(
        "metal",
        MaterialDesc::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
            fuzz: 0.1,
        },
    );

    scene.add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, "ground");
    scene.add_sphere(Point3::new(-1.1, 0.5, -5.0), 1.0, "diffuse");
    scene.add_sphere(Point3::new(1.1, 0.5, -5.0), 1.0, "metal");

    scene
}

/// Diffuse, hollow glass and fuzzy metal spheres side by side, seen through
/// a shallow depth of field.
pub fn materials() -> SceneDescription {
    let settings = RenderSettings {
        vfov: 20.0,
        look_from: Point3::new(-2.0, 2.0, 1.0),
        look_at: Point3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        defocus_angle: 10.0,
        focus_dist: 3.4,
        ..Default::default()
    };
    let mut scene = SceneDescription::new(settings);

    scene.add_material("ground", MaterialDesc::Lambertian { albedo: Color::new(0.8, 0.8, 0.0) });
    scene.add_material("center", MaterialDesc::Lambertian { albedo: Color::new(0.1, 0.2, 0.5) });
    scene.add_material("glass", MaterialDesc::Dielectric { refraction_index: 1.5 });
    scene.add_material("bubble", MaterialDesc::Dielectric { refraction_index: 1.0 / 1.5 });
    scene.add_material(
        "right",
        MaterialDesc::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
            fuzz: 1.0,
        },
    );

    scene.add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, "ground");
    scene.add_sphere(Point3::new(0.0, 0.0, -1.2), 0.5, "center");
    scene.add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, "glass");
    scene.add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.4, "bubble");
    scene.add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, "right");

    scene
}

/// The random-spheres field: hundreds of small diffuse (bouncing), metal and
/// glass spheres around three large ones.
pub fn final_scene(seed: u64) -> SceneDescription {
    let settings = RenderSettings {
        image_width: 1200,
        samples_per_pixel: 500,
        vfov: 20.0,
        look_from: Point3::new(13.0, 2.0, 3.0),
        look_at: Point3::ZERO,
        vup: Vec3::Y,
        defocus_angle: 0.6,
        focus_dist: 10.0,
        ..Default::default()
    };
    let mut scene = SceneDescription::new(settings);
    let mut rng = StdRng::seed_from_u64(seed);

    scene.add_material("ground", MaterialDesc::Lambertian { albedo: Color::splat(0.5) });
    scene.add_sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, "ground");

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f64 = rng.gen();
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let name = format!("small_{}_{}", a, b);
            if choose_mat < 0.8 {
                let albedo = random_color(&mut rng, 0.0, 1.0) * random_color(&mut rng, 0.0, 1.0);
                scene.add_material(name.clone(), MaterialDesc::Lambertian { albedo });
                let center_end = center + Vec3::new(0.0, rng.gen_range(0.0..0.5), 0.0);
                scene.add_moving_sphere(center, center_end, 0.2, name);
            } else if choose_mat < 0.95 {
                let albedo = random_color(&mut rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                scene.add_material(name.clone(), MaterialDesc::Metal { albedo, fuzz });
                scene.add_sphere(center, 0.2, name);
            } else {
                scene.add_material(name.clone(), MaterialDesc::Dielectric { refraction_index: 1.5 });
                scene.add_sphere(center, 0.2, name);
            }
        }
    }

    scene.add_material("glass", MaterialDesc::Dielectric { refraction_index: 1.5 });
    scene.add_sphere(Point3::new(0.0, 1.0, 0.0), 1.0, "glass");

    scene.add_material("brown", MaterialDesc::Lambertian { albedo: Color::new(0.4, 0.2, 0.1) });
    scene.add_sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, "brown");

    scene.add_material(
        "mirror",
        MaterialDesc::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    );
    scene.add_sphere(Point3::new(4.0, 1.0, 0.0), 1.0, "mirror");

    scene
}

fn random_color(rng: &mut StdRng, min: f64, max: f64) -> Color {
    Color::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}
