//! Render the classic Cornell box with two rotated boxes.
//!
//! Usage: `cargo run --release --example cornell_box [config.json] [out.png]`
//!
//! The optional JSON file holds a `RenderConfig`; missing fields keep their
//! defaults.

use anyhow::{Context, Result};
use ember_renderer::{
    AxisAlignedRect, BvhNode, CameraSettings, Color, Cuboid, DiffuseLight, FlipFace, Hittable,
    HittableList, Lambertian, Material, Plane, Point3, Rect, RenderConfig, RotateY, Scene,
    Translate, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn light_region() -> Rect {
    Rect::new(Plane::Xz, (213.0, 343.0), (227.0, 332.0), 554.0)
}

fn rotated_box(
    size: Point3,
    degrees: f64,
    offset: Vec3,
    material: Arc<dyn Material>,
) -> Arc<dyn Hittable> {
    let cuboid: Arc<dyn Hittable> = Arc::new(Cuboid::new(Point3::ZERO, size, material));
    let rotated: Arc<dyn Hittable> = Arc::new(RotateY::new(cuboid, degrees));
    Arc::new(Translate::new(rotated, offset))
}

fn cornell_box() -> HittableList {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    let mut objects = HittableList::new();
    objects.add(Arc::new(AxisAlignedRect::yz((0.0, 555.0), (0.0, 555.0), 555.0, green)));
    objects.add(Arc::new(AxisAlignedRect::yz((0.0, 555.0), (0.0, 555.0), 0.0, red)));
    objects.add(Arc::new(FlipFace::new(Arc::new(AxisAlignedRect::new(
        light_region(),
        light,
    )))));
    objects.add(Arc::new(AxisAlignedRect::xz((0.0, 555.0), (0.0, 555.0), 0.0, white.clone())));
    objects.add(Arc::new(AxisAlignedRect::xz((0.0, 555.0), (0.0, 555.0), 555.0, white.clone())));
    objects.add(Arc::new(AxisAlignedRect::xy((0.0, 555.0), (0.0, 555.0), 555.0, white.clone())));

    objects.add(rotated_box(
        Point3::new(165.0, 330.0, 165.0),
        15.0,
        Vec3::new(265.0, 0.0, 295.0),
        white.clone(),
    ));
    objects.add(rotated_box(
        Point3::new(165.0, 165.0, 165.0),
        -18.0,
        Vec3::new(130.0, 0.0, 65.0),
        white,
    ));

    objects
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading render config {path}"))?;
            serde_json::from_str::<RenderConfig>(&text)
                .with_context(|| format!("parsing render config {path}"))?
        }
        None => RenderConfig::default(),
    };
    let output = args.next().unwrap_or_else(|| "cornell_box.png".to_string());

    let camera = CameraSettings::default()
        .with_aspect_ratio(config.aspect_ratio())
        .with_shutter(0.0, 1.0)
        .build();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let world = BvhNode::from_list(&cornell_box(), 0.0, 1.0, &mut rng)?;
    let scene = Scene::new(Arc::new(world), Color::ZERO).with_light(light_region());

    let framebuffer = ember_renderer::render(&camera, &scene, &config)?;
    framebuffer
        .to_image()
        .save(&output)
        .with_context(|| format!("writing {output}"))?;

    log::info!("Wrote {output}");
    Ok(())
}
