//! Field model and PTZ sequence annotations.
//!
//! A dataset directory holds the planar field model (reference points and
//! line-segment topology) and one annotated broadcast sequence (per-frame
//! camera records plus the shared mount data).
mod soccer;

pub use soccer::{FieldModel, FrameAnnotation, FrameCamera, SequenceMeta, SoccerDataset};

pub type DefaultDataset = soccer::SoccerDataset;

pub trait DatasetTrait {
    /// Per-frame camera annotations, in sequence order.
    fn frames(&self) -> &[FrameAnnotation];
}
