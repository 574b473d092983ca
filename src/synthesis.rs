//! Random labeled-point synthesis over the field.
//!
//! Points are drawn from a three-zone mixture: behind either goal line,
//! along the far touchline, and a truncated gaussian blob over the central
//! area. Each point is bundled with its mount-relative ray and a random
//! unit descriptor.

use anyhow::Result;
use nalgebra::{DVector, Matrix3, Vector3};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::{FEATURE_DIM, FIELD_LENGTH, FIELD_WIDTH};
use crate::transform;

/// One synthesized training sample: a world point, its mount-relative ray
/// (pan/tilt, degrees) and a descriptor.
#[derive(Debug, Clone)]
pub struct SynthPoint {
    pub pos: Vector3<f64>,
    pub ray: (f64, f64),
    pub feature: Vec<f64>,
}

/// Draw `count` world points from the three-zone mixture.
pub fn generate_points<R: Rng>(rng: &mut R, count: usize) -> Result<Vec<Vector3<f64>>> {
    let goal_near = Normal::new(0.0, 5.0)?;
    let goal_far = Normal::new(FIELD_LENGTH, 5.0)?;
    let touchline = Normal::new(FIELD_WIDTH, 2.0)?;
    let central_x = Normal::new(FIELD_LENGTH / 2.0, 20.0)?;
    let central_y = Normal::new(32.0, 20.0)?;

    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let choice = rng.gen_range(0..5);
        let point = if choice < 2 {
            // Behind either goal line, spread past the touchlines.
            let x = if rng.gen_range(0..2) == 0 {
                goal_near.sample(rng)
            } else {
                goal_far.sample(rng)
            };
            Vector3::new(x, rng.gen_range(0.0..70.0), rng.gen_range(0.0..10.0))
        } else if choice < 4 {
            // Along the far touchline.
            Vector3::new(
                rng.gen_range(0.0..FIELD_LENGTH),
                touchline.sample(rng),
                rng.gen_range(0.0..10.0),
            )
        } else {
            // Central area, resampled into the field.
            let mut x = central_x.sample(rng);
            while !(0.0..=FIELD_LENGTH).contains(&x) {
                x = central_x.sample(rng);
            }
            let mut y = central_y.sample(rng);
            while !(0.0..=FIELD_WIDTH).contains(&y) {
                y = central_y.sample(rng);
            }
            Vector3::new(x, y, rng.gen_range(0.0..1.0))
        };
        points.push(point);
    }
    Ok(points)
}

/// Random descriptor on the unit sphere.
pub fn generate_feature<R: Rng>(rng: &mut R) -> Vec<f64> {
    let raw = DVector::from_fn(FEATURE_DIM, |_, _| rng.gen::<f64>());
    raw.normalize().as_slice().to_vec()
}

/// Generate `count` points and label each with its ray from `proj_center`
/// under the mount orientation `base_r`.
pub fn synthesize<R: Rng>(
    rng: &mut R,
    count: usize,
    proj_center: &Vector3<f64>,
    base_r: &Matrix3<f64>,
) -> Result<Vec<SynthPoint>> {
    let mut samples = Vec::with_capacity(count);
    for pos in generate_points(rng, count)? {
        let ray = transform::compute_ray(proj_center, &pos, base_r)?;
        let feature = generate_feature(rng);
        samples.push(SynthPoint { pos, ray, feature });
    }
    Ok(samples)
}
