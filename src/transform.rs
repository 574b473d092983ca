//! Coordinate transforms between 3d field points, pan/tilt rays and image
//! pixels for a broadcast PTZ camera.
//!
//! All angles crossing these interfaces are in degrees; radians are used
//! internally. The current pan/tilt is applied on top of the fixed mount
//! orientation: `R = R_tilt * R_pan * base_r`.
//!
//! The functions are pure and never clamp: a point on the focal plane or a
//! ray near 90 degrees off boresight produces non-finite output, and callers
//! are expected to validate coordinates before use.

use anyhow::{ensure, Result};
use nalgebra::{Matrix3, Vector3};

/// Orthonormality tolerance for rotation matrix validation.
const ROTATION_TOL: f64 = 1e-6;

fn ensure_rotation(m: &Matrix3<f64>) -> Result<()> {
    let residual = (m.transpose() * m - Matrix3::identity()).norm();
    ensure!(
        residual < ROTATION_TOL,
        "rotation matrix is not orthonormal, residual = {:.3e}",
        residual
    );
    ensure!(m.determinant() > 0.0, "rotation matrix must be right-handed");
    Ok(())
}

fn ensure_focal(f: f64) -> Result<()> {
    ensure!(
        f.is_finite() && f > 0.0,
        "focal length must be positive, got {}",
        f
    );
    Ok(())
}

fn intrinsic_matrix(u: f64, v: f64, f: f64) -> Matrix3<f64> {
    Matrix3::new(
        f, 0.0, u, //
        0.0, f, v, //
        0.0, 0.0, 1.0,
    )
}

/// Rotation for the current pan/tilt: tilt about the camera x axis composed
/// after pan about the y axis. The sign placement matches the sequence
/// annotations and is a fixed contract, not an implementation detail.
fn pan_tilt_rotation(pan: f64, tilt: f64) -> Matrix3<f64> {
    let (sp, cp) = pan.sin_cos();
    let (st, ct) = tilt.sin_cos();
    let tilt_m = Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, ct, st, //
        0.0, -st, ct,
    );
    let pan_m = Matrix3::new(
        cp, 0.0, -sp, //
        0.0, 1.0, 0.0, //
        sp, 0.0, cp,
    );
    tilt_m * pan_m
}

/// Project a 3d world point into the image of a camera at pan/tilt (degrees)
/// over the mount orientation `base_r`, centered at `center`.
///
/// Computes `q = K * R_tilt * R_pan * base_r * (pos - center)` and returns
/// `(q.x / q.z, q.y / q.z)`. A point with zero depth (`q.z == 0`) yields
/// non-finite coordinates.
pub fn project(
    u: f64,
    v: f64,
    f: f64,
    pan_deg: f64,
    tilt_deg: f64,
    center: &Vector3<f64>,
    base_r: &Matrix3<f64>,
    pos: &Vector3<f64>,
) -> Result<(f64, f64)> {
    ensure_focal(f)?;
    ensure_rotation(base_r)?;

    let rotation = pan_tilt_rotation(pan_deg.to_radians(), tilt_deg.to_radians()) * base_r;
    let q = intrinsic_matrix(u, v, f) * (rotation * (pos - center));
    Ok((q.x / q.z, q.y / q.z))
}

/// Map a mount-relative ray (pan/tilt, degrees) to image pixels for a camera
/// currently pointed at `camera_pan_deg`/`camera_tilt_deg`, without going
/// through the 3d point that produced the ray.
///
/// The relative pan/tilt is recovered with two-argument arctangents; the
/// legacy derivation used single-argument `atan`, which agrees inside the
/// +/-90 degree operating range but loses the quadrant beyond it. Rays close
/// to 90 degrees off the pan axis hit the tangent singularity and come back
/// non-finite.
pub fn ray_to_pixel(
    u: f64,
    v: f64,
    f: f64,
    camera_pan_deg: f64,
    camera_tilt_deg: f64,
    pan_deg: f64,
    tilt_deg: f64,
) -> Result<(f64, f64)> {
    ensure_focal(f)?;

    let pan = pan_deg.to_radians();
    let tilt = tilt_deg.to_radians();
    let (scp, ccp) = camera_pan_deg.to_radians().sin_cos();
    let (sct, cct) = camera_tilt_deg.to_radians().sin_cos();

    let tp = pan.tan();
    let tt = tilt.tan();
    // sec(pan), always positive
    let sec = (tp * tp + 1.0).sqrt();

    let east = tp * ccp - scp;
    let depth = tp * scp * cct + tt * sec * sct + cct * ccp;
    let height = tp * sct * scp - tt * sec * cct + sct * ccp;

    let relative_pan = east.atan2(depth);
    let relative_tilt = (-height).atan2(east.hypot(depth));

    let dx = f * relative_pan.tan();
    let x = dx + u;
    let y = -f.hypot(dx) * relative_tilt.tan() + v;
    Ok((x, y))
}

/// Pan/tilt of the ray from `proj_center` toward `pos`, relative to the
/// mount orientation `base_r` (independent of any current camera pan/tilt).
/// Both angles are returned in degrees.
///
/// A point in the mount's horizontal plane (`z == 0` after rotation) sits on
/// the +/-90 degree edge of the pan parametrization; the ray of a point
/// behind the mount cannot be projected back through [`ray_to_pixel`].
pub fn compute_ray(
    proj_center: &Vector3<f64>,
    pos: &Vector3<f64>,
    base_r: &Matrix3<f64>,
) -> Result<(f64, f64)> {
    ensure_rotation(base_r)?;

    let relative = base_r * (pos - proj_center);
    let pan = relative.x.atan2(relative.z);
    let tilt = (-relative.y).atan2(relative.x.hypot(relative.z));
    Ok((pan.to_degrees(), tilt.to_degrees()))
}
