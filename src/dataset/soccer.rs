use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use super::DatasetTrait;

/// Planar field model: reference points on the ground plane and the line
/// segments between them, both used only for drawing.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FieldModel {
    /// Field points in field units, z = 0 implied.
    pub points: Vec<[f64; 2]>,
    /// Pairs of indices into `points`.
    pub line_segments: Vec<[usize; 2]>,
}

impl FieldModel {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let model: FieldModel = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse {}", path.display()))?;
        for segment in &model.line_segments {
            ensure!(
                segment[0] < model.points.len() && segment[1] < model.points.len(),
                "line segment {:?} out of range, model has {} points",
                segment,
                model.points.len()
            );
        }
        Ok(model)
    }

    /// Field point lifted onto the ground plane.
    pub fn point3(&self, index: usize) -> Vector3<f64> {
        let [x, y] = self.points[index];
        Vector3::new(x, y, 0.0)
    }
}

/// Shared mount data of a sequence: Rodrigues vector of the base rotation
/// and the projection center.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SequenceMeta {
    pub base_rotation: [f64; 3],
    pub cc: [f64; 3],
}

impl SequenceMeta {
    pub fn base_rotation_matrix(&self) -> Matrix3<f64> {
        Rotation3::new(Vector3::from(self.base_rotation)).into_inner()
    }

    pub fn projection_center(&self) -> Vector3<f64> {
        Vector3::from(self.cc)
    }
}

/// Per-frame camera record: principal point, focal length, a Rodrigues
/// rotation and the projection center.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FrameCamera {
    pub u: f64,
    pub v: f64,
    pub focal: f64,
    pub rotation: [f64; 3],
    pub center: [f64; 3],
}

impl FrameCamera {
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        Rotation3::new(Vector3::from(self.rotation)).into_inner()
    }

    pub fn center_vec(&self) -> Vector3<f64> {
        Vector3::from(self.center)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FrameAnnotation {
    pub camera: FrameCamera,
    /// Pan and tilt of the frame, degrees.
    pub ptz: [f64; 2],
}

impl FrameAnnotation {
    pub fn pan(&self) -> f64 {
        self.ptz[0]
    }

    pub fn tilt(&self) -> f64 {
        self.ptz[1]
    }
}

#[derive(Debug, Default, Deserialize)]
struct SequenceFile {
    meta: SequenceMeta,
    annotations: Vec<FrameAnnotation>,
}

#[derive(Debug, Default)]
pub struct SoccerDataset {
    pub field_model: FieldModel,
    pub meta: SequenceMeta,
    pub annotations: Vec<FrameAnnotation>,
}

impl SoccerDataset {
    const FIELD_MODEL_FILE: &'static str = "soccer_field_model.json";
    const SEQ_ANNOTATION_FILE: &'static str = "seq3_annotation.json";

    pub fn new(dir: &Path) -> Result<Self> {
        let field_model = FieldModel::load(&dir.join(Self::FIELD_MODEL_FILE))?;

        let path = dir.join(Self::SEQ_ANNOTATION_FILE);
        let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        let sequence: SequenceFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse {}", path.display()))?;
        for (i, frame) in sequence.annotations.iter().enumerate() {
            ensure!(
                frame.camera.focal.is_finite() && frame.camera.focal > 0.0,
                "frame {}: focal length must be positive, got {}",
                i,
                frame.camera.focal
            );
        }

        Ok(Self {
            field_model,
            meta: sequence.meta,
            annotations: sequence.annotations,
        })
    }
}

impl DatasetTrait for SoccerDataset {
    fn frames(&self) -> &[FrameAnnotation] {
        &self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetTrait as _;

    #[test]
    fn test_load_field_model() {
        let model = FieldModel::load(Path::new("data/soccer_field_model.json")).unwrap();
        assert!(!model.points.is_empty());
        assert!(!model.line_segments.is_empty());
        let p = model.point3(0);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_load_dataset() {
        let dataset = SoccerDataset::new(Path::new("data")).unwrap();
        assert!(!dataset.frames().is_empty());

        let base = dataset.meta.base_rotation_matrix();
        let residual = (base.transpose() * base - Matrix3::identity()).norm();
        assert!(residual < 1e-9);
        assert!((base.determinant() - 1.0).abs() < 1e-9);

        for frame in dataset.frames() {
            assert!(frame.camera.focal > 0.0);
            let r = frame.camera.rotation_matrix();
            assert!((r.determinant() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rejects_out_of_range_segment() {
        let dir = std::env::temp_dir().join("ptz_synth_bad_model");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("model.json");
        std::fs::write(&path, r#"{"points": [[0.0, 0.0]], "line_segments": [[0, 3]]}"#).unwrap();
        assert!(FieldModel::load(&path).is_err());
    }
}
