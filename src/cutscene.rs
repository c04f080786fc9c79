use crate::{
    foundation::{
        core::ResourceId,
        error::{CinereelError, CinereelResult},
    },
    scene::{OverlayConfig, SceneObject, SkinMapping},
    timeline::{CameraPath, CameraState, Frame, FrameTimeline},
};

/// A complete authored cutscene: camera motion, scene composition, frame
/// timeline, and presentation configuration.
///
/// Built by the loader (or by hand through the public fields) and immutable
/// once registered — sessions share it behind an `Arc` and only query it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Cutscene {
    pub id: ResourceId,
    pub name: String,
    /// Playback length in seconds. A non-positive duration is degenerate but
    /// allowed; it only affects progress reporting.
    pub duration: f32,
    /// Ask the host to pause the simulation while this cutscene plays.
    pub pause_on_play: bool,
    /// Inline camera path. Mutually exclusive with `external_camera`.
    pub camera: Option<CameraPath>,
    /// Reference to a standalone camera config resolved by the host.
    pub external_camera: Option<ResourceId>,
    pub composition: Vec<SceneObject>,
    pub frames: FrameTimeline,
    pub overlay: OverlayConfig,
    pub skin_mapping: Option<SkinMapping>,
    /// Path of the recording this cutscene was built from, if any.
    pub recording: Option<String>,
}

impl Cutscene {
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            name: String::new(),
            duration: 0.0,
            pause_on_play: true,
            camera: None,
            external_camera: None,
            composition: Vec::new(),
            frames: FrameTimeline::new(),
            overlay: OverlayConfig::default(),
            skin_mapping: None,
            recording: None,
        }
    }

    pub fn is_from_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// Camera pose at `time`, or the zero state when no inline camera path
    /// is present (including the external-ref-only case, which the host
    /// resolves outside playback).
    pub fn camera_state_at(&self, time: f32) -> CameraState {
        match &self.camera {
            Some(path) => path.state_at(time),
            None => CameraState::ZERO,
        }
    }

    pub fn frame_at(&self, time: f32) -> Option<&Frame> {
        self.frames.frame_at(time)
    }

    /// Advisory structural checks used by the loader and the CLI.
    ///
    /// Deliberately does NOT reject a non-positive duration: degenerate
    /// cutscenes construct and play, they just report full progress.
    pub fn validate(&self) -> CinereelResult<()> {
        if self.camera.is_some() && self.external_camera.is_some() {
            return Err(CinereelError::validation(format!(
                "cutscene '{}' has both an inline camera and an external camera ref",
                self.id
            )));
        }

        if let Some(path) = &self.camera {
            for keyframe in &path.keyframes {
                if !keyframe.time.is_finite() || keyframe.time < 0.0 {
                    return Err(CinereelError::validation(format!(
                        "cutscene '{}' has a camera keyframe at invalid time {}",
                        self.id, keyframe.time
                    )));
                }
            }
        }

        for frame in &self.frames.frames {
            if !frame.time.is_finite() || frame.time < 0.0 {
                return Err(CinereelError::validation(format!(
                    "cutscene '{}' has a frame at invalid time {}",
                    self.id, frame.time
                )));
            }
        }

        self.overlay.validate()?;

        for object in &self.composition {
            object.validate()?;
        }

        Ok(())
    }
}
