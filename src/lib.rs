//! Cinereel drives timed, scriptable playback of authored cutscenes — camera
//! motion plus positioned scene objects — per viewer, and records live
//! sessions back into the same authoring format.
//!
//! The host integrates through four seams:
//!
//! - Load and register a [`Cutscene`] (via [`CutsceneLoader`] or by hand)
//! - Drive a [`SessionRegistry`] from the simulation step (`tick()`), playing
//!   and stopping per-viewer sessions
//! - Read each session's published camera/frame snapshots from the renderer
//! - Capture live sessions with a [`Recorder`] into replayable recordings
#![forbid(unsafe_code)]

mod foundation;

pub mod cutscene;
pub mod loader;
pub mod record;
pub mod scene;
pub mod session;
pub mod timeline;

pub use crate::foundation::core::{
    BlockPos, DEFAULT_NAMESPACE, ResourceId, TICK_SECONDS, TICKS_PER_SECOND, Vec3, ViewerId,
};
pub use crate::foundation::error::{CinereelError, CinereelResult};

pub use crate::cutscene::Cutscene;
pub use crate::loader::{AssetSource, CutsceneLoader, DirSource};
pub use crate::record::{
    BlockSample, PathSample, Recorder, RecordingDocument, ViewerPose, WorldSource,
};
pub use crate::scene::{OverlayConfig, SceneObject, SceneObjectKind, SkinMapping, SkinZone, UvRect};
pub use crate::session::{
    PauseControl, PlaybackSession, PlaybackState, SessionRegistry, SimulationPause,
};
pub use crate::timeline::{
    CameraKind, CameraPath, CameraState, Frame, FrameObject, FrameTimeline, Keyframe,
};
