//! Virtual frame rendering: field lines and synthesized points drawn onto a
//! blank broadcast image.

use anyhow::Result;
use opencv::core::{Mat, Point2i, Scalar, CV_8UC3};
use opencv::imgproc::{self, LINE_8};

use crate::config::{IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::dataset::{FieldModel, FrameAnnotation, SequenceMeta};
use crate::synthesis::SynthPoint;
use crate::transform;

fn in_image(x: f64, y: f64) -> bool {
    0.0 < x && x < f64::from(IMAGE_WIDTH) && 0.0 < y && y < f64::from(IMAGE_HEIGHT)
}

/// Render one annotated frame: field segments under the frame's own
/// rotation, then every synthesized point projected through both paths.
///
/// The direct projection places the circles; the ray conversion result is
/// logged next to it for the points that land inside the image, which is
/// the empirical check that the two paths describe the same geometry.
pub fn render_frame(
    field: &FieldModel,
    meta: &SequenceMeta,
    frame: &FrameAnnotation,
    samples: &[SynthPoint],
) -> Result<Mat> {
    let mut img = Mat::new_rows_cols_with_default(
        IMAGE_HEIGHT,
        IMAGE_WIDTH,
        CV_8UC3,
        Scalar::from((255, 255, 255)),
    )?;

    let cam = &frame.camera;
    let frame_r = cam.rotation_matrix();
    let cam_center = cam.center_vec();

    // Field points under the frame's estimated rotation, no extra pan/tilt.
    let mut image_points = Vec::with_capacity(field.points.len());
    for i in 0..field.points.len() {
        image_points.push(transform::project(
            cam.u,
            cam.v,
            cam.focal,
            0.0,
            0.0,
            &cam_center,
            &frame_r,
            &field.point3(i),
        )?);
    }
    for segment in &field.line_segments {
        let (x0, y0) = image_points[segment[0]];
        let (x1, y1) = image_points[segment[1]];
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            continue;
        }
        imgproc::line(
            &mut img,
            Point2i::new(x0 as i32, y0 as i32),
            Point2i::new(x1 as i32, y1 as i32),
            Scalar::from((0, 0, 255)),
            5,
            LINE_8,
            0,
        )?;
    }

    let base_r = meta.base_rotation_matrix();
    let proj_center = meta.projection_center();
    for (i, sample) in samples.iter().enumerate() {
        let (px, py) = transform::project(
            cam.u,
            cam.v,
            cam.focal,
            frame.pan(),
            frame.tilt(),
            &proj_center,
            &base_r,
            &sample.pos,
        )?;
        let (rx, ry) = transform::ray_to_pixel(
            cam.u,
            cam.v,
            cam.focal,
            frame.pan(),
            frame.tilt(),
            sample.ray.0,
            sample.ray.1,
        )?;
        if !(px.is_finite() && py.is_finite()) {
            continue;
        }
        if in_image(px, py) {
            log::info!(
                "pt {}: ray = ({:.3}, {:.3}) deg, project = ({:.2}, {:.2}), ray_to_pixel = ({:.2}, {:.2})",
                i,
                sample.ray.0,
                sample.ray.1,
                px,
                py,
                rx,
                ry
            );
        }
        imgproc::circle(
            &mut img,
            Point2i::new(px as i32, py as i32),
            8,
            Scalar::from((0, 0, 0)),
            2,
            LINE_8,
            0,
        )?;
    }

    Ok(img)
}
