//! Persistence of synthesized correspondences.
mod synth;

pub use synth::{RayRecord, SynthDataSave};
