pub mod format;
pub mod recorder;

pub use format::{BlockSample, PathSample, RecordingDocument};
pub use recorder::{
    DEFAULT_OUTPUT_DIR, MAX_RADIUS, MIN_RADIUS, RecordedSample, Recorder, ViewerPose, WorldSource,
};
