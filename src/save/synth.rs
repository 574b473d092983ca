use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::synthesis::SynthPoint;

/// Synthesized dataset payload: one descriptor, world point and ray per
/// sample, kept in parallel arrays.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SynthDataSave {
    pub features: Vec<Vec<f64>>,
    pub pts: Vec<[f64; 3]>,
    /// Pan/tilt, degrees.
    pub rays: Vec<[f64; 2]>,
}

impl From<&[SynthPoint]> for SynthDataSave {
    fn from(samples: &[SynthPoint]) -> Self {
        let mut save = Self::default();
        for sample in samples {
            save.features.push(sample.feature.clone());
            save.pts.push([sample.pos.x, sample.pos.y, sample.pos.z]);
            save.rays.push([sample.ray.0, sample.ray.1]);
        }
        save
    }
}

/// Flat row of the csv export.
#[derive(Debug, Serialize, Deserialize)]
pub struct RayRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub pan: f64,
    pub tilt: f64,
}

impl SynthDataSave {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn write_rays_csv(&self, path: &Path) -> Result<()> {
        let mut writer =
            csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
        for (pt, ray) in self.pts.iter().zip(&self.rays) {
            writer.serialize(RayRecord {
                x: pt[0],
                y: pt[1],
                z: pt[2],
                pan: ray[0],
                tilt: ray[1],
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn samples() -> Vec<SynthPoint> {
        vec![
            SynthPoint {
                pos: Vector3::new(10.0, 20.0, 1.0),
                ray: (-5.5, 12.25),
                feature: vec![1.0, 0.0, 0.0],
            },
            SynthPoint {
                pos: Vector3::new(54.0, 31.5, 0.0),
                ray: (0.0, 15.0),
                feature: vec![0.0, 1.0, 0.0],
            },
        ]
    }

    #[test]
    fn test_json_round_trip() {
        let dir = std::env::temp_dir().join("ptz_synth_save_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("synthesize_data.json");

        let samples = samples();
        let save = SynthDataSave::from(&samples[..]);
        save.write_json(&path).unwrap();

        let loaded: SynthDataSave =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(loaded.pts.len(), 2);
        assert_eq!(loaded.rays.len(), 2);
        assert_eq!(loaded.features.len(), 2);
        assert_eq!(loaded.pts[0], [10.0, 20.0, 1.0]);
        assert_eq!(loaded.rays[0], [-5.5, 12.25]);
    }

    #[test]
    fn test_csv_export() {
        let dir = std::env::temp_dir().join("ptz_synth_save_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("synthesize_rays.csv");

        let samples = samples();
        let save = SynthDataSave::from(&samples[..]);
        save.write_rays_csv(&path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<RayRecord> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].pan, 0.0);
        assert_eq!(records[1].tilt, 15.0);
    }
}
