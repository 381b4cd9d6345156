//! Builtin scenes.

use ember_math::{gen_f32, gen_range};
use ember_renderer::{CameraConfig, Color, MaterialDesc, SceneDescription, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Ground with a diffuse sphere flanked by a hollow glass sphere and fuzzy gold.
pub fn three_spheres() -> SceneDescription {
    let mut scene = SceneDescription::new(CameraConfig::default());

    scene.add_material("ground", MaterialDesc::Lambertian { albedo: Color::new(0.8, 0.8, 0.0) });
    scene.add_material("center", MaterialDesc::Lambertian { albedo: Color::new(0.1, 0.2, 0.5) });
    scene.add_material("glass", MaterialDesc::Dielectric { ior: 1.5 });
    // Air bubble inside the glass
    scene.add_material("bubble", MaterialDesc::Dielectric { ior: 1.0 / 1.5 });
    scene.add_material(
        "gold",
        MaterialDesc::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
            fuzz: 1.0,
        },
    );

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "ground");
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.2), 0.5, "center");
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, "glass");
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.4, "bubble");
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, "gold");

    scene
}

/// Three large spheres over a grid of small random ones.
///
/// The layout is drawn from its own generator so a seed always gives the same scene.
pub fn cover(seed: u64) -> SceneDescription {
    let camera = CameraConfig::default()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);
    let mut scene = SceneDescription::new(camera);
    let mut rng = StdRng::seed_from_u64(seed);

    scene.add_material("ground", MaterialDesc::Lambertian { albedo: Color::splat(0.5) });
    scene.add_material("glass", MaterialDesc::Dielectric { ior: 1.5 });
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, "ground");

    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * gen_f32(&mut rng),
            );

            // Keep clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat = gen_f32(&mut rng);
            let name = format!("small_{}_{}", a + 11, b + 11);
            if choose_mat < 0.8 {
                let albedo = Color::new(
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                );
                scene.add_material(name.clone(), MaterialDesc::Lambertian { albedo });
                scene.add_sphere(center, 0.2, name);
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    gen_range(&mut rng, 0.5, 1.0),
                    gen_range(&mut rng, 0.5, 1.0),
                    gen_range(&mut rng, 0.5, 1.0),
                );
                let fuzz = gen_range(&mut rng, 0.0, 0.5);
                scene.add_material(name.clone(), MaterialDesc::Metal { albedo, fuzz });
                scene.add_sphere(center, 0.2, name);
            } else {
                // Glass is shared between every small glass sphere
                scene.add_sphere(center, 0.2, "glass");
            }
        }
    }

    scene.add_material("brown", MaterialDesc::Lambertian { albedo: Color::new(0.4, 0.2, 0.1) });
    scene.add_material(
        "mirror",
        MaterialDesc::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    );
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, "glass");
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, "brown");
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, "mirror");

    scene
}
