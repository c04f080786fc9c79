pub mod camera;
pub mod frames;

pub use camera::{CameraKind, CameraPath, CameraState, Keyframe};
pub use frames::{Frame, FrameObject, FrameTimeline};
