//! Synthesize labeled point / ray / pixel correspondences over a soccer
//! field model and render the annotated broadcast frames.
//!
//! nalgebra
//! https://docs.rs/nalgebra/latest/nalgebra/
//!
//! opencv
//! https://docs.rs/opencv/latest/opencv/all.html

mod config;
mod dataset;
mod render;
mod save;
mod synthesis;
mod transform;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use opencv::highgui;
use opencv::imgcodecs;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dataset::{DatasetTrait, DefaultDataset};
use crate::save::SynthDataSave;

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_nanos()
        .init();

    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    log::info!("dataset dir: {:?}", data_dir);
    let dataset = DefaultDataset::new(Path::new(&data_dir))?;

    let base_r = dataset.meta.base_rotation_matrix();
    let proj_center = dataset.meta.projection_center();

    let mut rng = StdRng::from_entropy();
    let samples = synthesis::synthesize(&mut rng, config::POINT_COUNT, &proj_center, &base_r)?;
    log::info!("synthesized {} points", samples.len());

    let out_dir = PathBuf::from(config::OUTPUT_DIR);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create {}", out_dir.display()))?;

    for (i, frame) in dataset.frames().iter().enumerate() {
        let img = render::render_frame(&dataset.field_model, &dataset.meta, frame, &samples)?;

        let path = out_dir.join(format!("frame_{:03}.png", i));
        let flags = opencv::core::Vector::<i32>::new();
        imgcodecs::imwrite(path.to_str().context("output path is not utf-8")?, &img, &flags)?;

        if config::SHOW_IMAGES {
            highgui::imshow("synthesized image", &img)?;
            highgui::wait_key(0)?;
        }
    }

    let saved = SynthDataSave::from(&samples[..]);
    saved.write_json(&out_dir.join("synthesize_data.json"))?;
    saved.write_rays_csv(&out_dir.join("synthesize_rays.csv"))?;
    log::info!("wrote synthesized data to {}", out_dir.display());
    Ok(())
}
