use crate::foundation::core::Vec3;

/// One positioned object inside a [`Frame`].
///
/// `id` names the same object across frames so transforms could one day be
/// matched up and interpolated per object; nothing looks objects up by it
/// yet.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameObject {
    pub id: String,
    pub model: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub uses_viewer_skin: bool,
}

impl FrameObject {
    pub fn new(id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            uses_viewer_skin: false,
        }
    }
}

/// A timestamped snapshot of scene-object transforms.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub time: f32,
    pub entities: Vec<FrameObject>,
}

impl Frame {
    pub fn new(time: f32) -> Self {
        Self {
            time,
            entities: Vec::new(),
        }
    }
}

/// Ordered frame list of one cutscene, queried by time.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct FrameTimeline {
    pub frames: Vec<Frame>,
}

impl FrameTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Frame at `time` seconds, or `None` for an empty timeline.
    ///
    /// Brackets with the same single-pass scan as
    /// [`CameraPath::state_at`](crate::timeline::CameraPath::state_at): last
    /// entry with `time <= t` before, first entry with `time >= t` after,
    /// clamping to the list head/tail out of range. Frames hold discrete
    /// state, so the query returns the bracketing `before` frame verbatim.
    // TODO: interpolate entity transforms between consecutive frames, matching
    // entities by id. Until then the earlier frame is held as-is.
    pub fn frame_at(&self, time: f32) -> Option<&Frame> {
        if self.frames.is_empty() {
            return None;
        }

        let mut before: Option<&Frame> = None;
        let mut after: Option<&Frame> = None;
        for frame in &self.frames {
            if frame.time <= time {
                before = Some(frame);
            }
            if frame.time >= time && after.is_none() {
                after = Some(frame);
            }
        }

        let Some(before) = before else {
            return Some(&self.frames[0]);
        };
        if after.is_none() {
            return Some(&self.frames[self.frames.len() - 1]);
        }

        Some(before)
    }
}
