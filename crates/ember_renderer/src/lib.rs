//! Ember renderer - CPU path tracing core
//!
//! A Monte Carlo path tracer with explicit light sampling, a BVH over a
//! shared scene graph, and a row-band parallel scheduler.
//!
//! Scene placement and image serialization are left to callers; see the
//! `cornell_box` example for both.

mod band;
mod bvh;
mod camera;
mod cuboid;
mod error;
mod framebuffer;
mod hittable;
mod instance;
mod material;
mod rect;
mod renderer;
pub mod sampling;
mod sphere;
mod texture;

pub use band::{generate_bands, render_band, BandRemainder, RowBand};
pub use bvh::BvhNode;
pub use camera::{Camera, CameraSettings};
pub use cuboid::Cuboid;
pub use error::{BuildError, BuildResult, RenderError, RenderResult};
pub use framebuffer::{linear_to_gamma, resolve_color, Framebuffer};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{FlipFace, RotateY, Translate};
pub use material::{DiffuseLight, Lambertian, Material, ScatterRecord};
pub use rect::{AxisAlignedRect, Plane, Rect};
pub use renderer::{ray_color, render, RenderConfig, Scene, T_MIN};
pub use sphere::{MovingSphere, Sphere};
pub use texture::{CheckerTexture, SolidColor, Texture};

/// Re-export math types from ember_math
pub use ember_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
