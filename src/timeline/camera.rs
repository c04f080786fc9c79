use crate::foundation::{
    core::Vec3,
    error::{CinereelError, CinereelResult},
};

/// How the camera moves while a cutscene plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraKind {
    /// Camera follows the keyframed path.
    Path,
    /// Camera holds one position.
    Fixed,
    /// Camera follows an entity.
    Follow,
}

impl CameraKind {
    /// Parse an authoring-file type string, case-insensitively.
    pub fn parse(s: &str) -> CinereelResult<Self> {
        if s.eq_ignore_ascii_case("path") {
            Ok(Self::Path)
        } else if s.eq_ignore_ascii_case("fixed") {
            Ok(Self::Fixed)
        } else if s.eq_ignore_ascii_case("follow") {
            Ok(Self::Follow)
        } else {
            Err(CinereelError::validation(format!(
                "unknown camera type '{s}'"
            )))
        }
    }
}

/// A timestamped camera pose. Rotation is (pitch, yaw, roll) in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Keyframe {
    pub fn new(time: f32, position: Vec3, rotation: Vec3) -> Self {
        Self {
            time,
            position,
            rotation,
        }
    }
}

/// Camera pose published to the renderer for one playback step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraState {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl CameraState {
    pub const ZERO: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };
}

/// The camera movement path of one cutscene: a kind plus keyframes in
/// authoring order.
///
/// Keyframe times are not required to be sorted; [`CameraPath::state_at`]
/// brackets by scanning the whole list, so insertion order only decides
/// ties.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CameraPath {
    pub kind: CameraKind,
    pub keyframes: Vec<Keyframe>,
}

impl Default for CameraPath {
    fn default() -> Self {
        Self::new(CameraKind::Path)
    }
}

impl CameraPath {
    pub fn new(kind: CameraKind) -> Self {
        Self {
            kind,
            keyframes: Vec::new(),
        }
    }

    pub fn push(&mut self, keyframe: Keyframe) {
        self.keyframes.push(keyframe);
    }

    /// Camera pose at `time` seconds.
    ///
    /// Brackets with one pass over the list: `before` is the LAST entry with
    /// `time <= t`, `after` is the FIRST entry with `time >= t`. Out of range
    /// clamps to the first/last list entry; an exact hit returns that
    /// keyframe verbatim; otherwise position and rotation interpolate
    /// linearly. The scan is deliberately not a binary search: the list may
    /// be unsorted or carry duplicate times, and the tie-breaks above are
    /// part of the contract.
    pub fn state_at(&self, time: f32) -> CameraState {
        if self.keyframes.is_empty() {
            return CameraState::ZERO;
        }

        let mut before: Option<&Keyframe> = None;
        let mut after: Option<&Keyframe> = None;
        for keyframe in &self.keyframes {
            if keyframe.time <= time {
                before = Some(keyframe);
            }
            if keyframe.time >= time && after.is_none() {
                after = Some(keyframe);
            }
        }

        // Before the first bracketing entry: clamp to the list head.
        let Some(before) = before else {
            let first = &self.keyframes[0];
            return CameraState {
                position: first.position,
                rotation: first.rotation,
            };
        };

        // Past the last bracketing entry: clamp to the list tail.
        let Some(after) = after else {
            let last = &self.keyframes[self.keyframes.len() - 1];
            return CameraState {
                position: last.position,
                rotation: last.rotation,
            };
        };

        // Exact hit or singleton list.
        if std::ptr::eq(before, after) {
            return CameraState {
                position: before.position,
                rotation: before.rotation,
            };
        }

        let frac = (time - before.time) / (after.time - before.time);
        CameraState {
            position: before.position.lerp(after.position, frac),
            rotation: before.rotation.lerp(after.rotation, frac),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kf(time: f32, pos: [f32; 3], rot: [f32; 3]) -> Keyframe {
        Keyframe::new(time, pos.into(), rot.into())
    }

    fn two_key_path() -> CameraPath {
        CameraPath {
            kind: CameraKind::Path,
            keyframes: vec![
                kf(0.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
                kf(10.0, [10.0, 0.0, 0.0], [0.0, 90.0, 0.0]),
            ],
        }
    }

    #[test]
    fn empty_path_yields_zero_state() {
        let path = CameraPath::new(CameraKind::Path);
        assert_eq!(path.state_at(3.0), CameraState::ZERO);
    }

    #[test]
    fn exact_keyframe_times_return_keyframe_values() {
        let path = two_key_path();
        let s0 = path.state_at(0.0);
        assert_eq!(s0.position, Vec3::ZERO);
        let s1 = path.state_at(10.0);
        assert_eq!(s1.position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(s1.rotation, Vec3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn midpoint_interpolates_position_and_rotation() {
        let path = two_key_path();
        let s = path.state_at(5.0);
        assert_eq!(s.position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(s.rotation, Vec3::new(0.0, 45.0, 0.0));
    }

    #[test]
    fn out_of_range_clamps_not_extrapolates() {
        let path = two_key_path();
        let before = path.state_at(-1.0);
        assert_eq!(before.position, Vec3::ZERO);
        assert_eq!(before.rotation, Vec3::ZERO);

        let after = path.state_at(20.0);
        assert_eq!(after.position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(after.rotation, Vec3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn unsorted_keyframes_still_bracket_by_time() {
        let path = CameraPath {
            kind: CameraKind::Path,
            keyframes: vec![
                kf(10.0, [10.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
                kf(0.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            ],
        };
        let s = path.state_at(5.0);
        assert_eq!(s.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn clamp_uses_list_order_not_time_order() {
        // With an unsorted list, "before the first" means the first LIST
        // entry, not the earliest time.
        let path = CameraPath {
            kind: CameraKind::Path,
            keyframes: vec![
                kf(10.0, [10.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
                kf(5.0, [5.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            ],
        };
        let s = path.state_at(1.0);
        assert_eq!(s.position, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn duplicate_times_tie_break_last_before_first_after() {
        let path = CameraPath {
            kind: CameraKind::Path,
            keyframes: vec![
                kf(0.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
                kf(10.0, [10.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
                kf(10.0, [20.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
                kf(20.0, [30.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            ],
        };
        // Between the duplicates and the tail: before is the LAST t=10 entry.
        let s = path.state_at(15.0);
        assert_eq!(s.position, Vec3::new(25.0, 0.0, 0.0));
        // Between the head and the duplicates: after is the FIRST t=10 entry.
        let s = path.state_at(5.0);
        assert_eq!(s.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn singleton_path_is_constant() {
        let path = CameraPath {
            kind: CameraKind::Fixed,
            keyframes: vec![kf(2.0, [1.0, 2.0, 3.0], [0.0, 45.0, 0.0])],
        };
        for t in [-1.0, 2.0, 100.0] {
            let s = path.state_at(t);
            assert_eq!(s.position, Vec3::new(1.0, 2.0, 3.0));
            assert_eq!(s.rotation, Vec3::new(0.0, 45.0, 0.0));
        }
    }

    #[test]
    fn camera_kind_parses_case_insensitively() {
        assert_eq!(CameraKind::parse("PATH").unwrap(), CameraKind::Path);
        assert_eq!(CameraKind::parse("fixed").unwrap(), CameraKind::Fixed);
        assert_eq!(CameraKind::parse("Follow").unwrap(), CameraKind::Follow);
        assert!(CameraKind::parse("orbit").is_err());
    }
}
