use std::{collections::BTreeMap, path::PathBuf};

use crate::foundation::{
    core::{BlockPos, TICKS_PER_SECOND, Vec3},
    error::{CinereelError, CinereelResult},
};

use super::format::{BlockSample, PathSample, RecordingDocument};

/// Default recordings directory, relative to the process working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "cutscenes/recordings";

/// Smallest allowed world-snapshot radius.
pub const MIN_RADIUS: i32 = 1;
/// Largest allowed world-snapshot radius. The snapshot is cubic, so captures
/// cost `O(radius^3)` reads.
pub const MAX_RADIUS: i32 = 50;

/// Viewer pose handed to the recorder once per simulation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// Read access to static world state, provided by the host.
pub trait WorldSource {
    /// Descriptor of the block state at `pos` (e.g. `"minecraft:stone"`).
    fn block_at(&self, pos: BlockPos) -> String;
}

/// One buffered sample. Poses are stored raw; offsets from the recording
/// origin are applied at serialization time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedSample {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub world_tick: i64,
}

/// Captures a live viewer's path plus a bounded world snapshot into the
/// persisted recording format.
///
/// At most one recording is active at a time, process-wide. Buffers from the
/// previous recording stay readable after [`Recorder::stop`] and are cleared
/// by the next [`Recorder::start`].
pub struct Recorder {
    output_dir: PathBuf,
    recording: bool,
    name: String,
    radius: i32,
    start_origin: BlockPos,
    samples: Vec<RecordedSample>,
    world_snapshot: BTreeMap<BlockPos, String>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl Recorder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            recording: false,
            name: String::new(),
            radius: 0,
            start_origin: BlockPos::new(0, 0, 0),
            samples: Vec::new(),
            world_snapshot: BTreeMap::new(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Radius of the current (or last) recording's world snapshot.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Samples buffered so far (or by the last stopped recording).
    pub fn samples(&self) -> &[RecordedSample] {
        &self.samples
    }

    /// Begin a recording named `name`, snapshotting every block state within
    /// `radius` of the viewer on all three axes.
    ///
    /// The snapshot is taken eagerly here, once; it is not refreshed while
    /// recording. Fails if a recording is already running, without touching
    /// its buffers.
    pub fn start(
        &mut self,
        pose: &ViewerPose,
        world: &dyn WorldSource,
        name: &str,
        radius: i32,
    ) -> CinereelResult<()> {
        if self.recording {
            return Err(CinereelError::recording(format!(
                "already recording '{}'",
                self.name
            )));
        }
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&radius) {
            return Err(CinereelError::recording(format!(
                "radius {radius} outside [{MIN_RADIUS}, {MAX_RADIUS}]"
            )));
        }
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(CinereelError::recording(format!(
                "recording name '{name}' is not a plain file name"
            )));
        }

        self.recording = true;
        self.name = name.to_string();
        self.radius = radius;
        self.samples.clear();
        self.world_snapshot.clear();
        self.start_origin = pose.position.block_pos();

        for dx in -radius..=radius {
            for dy in -radius..=radius {
                for dz in -radius..=radius {
                    let pos = self.start_origin.offset(dx, dy, dz);
                    self.world_snapshot.insert(pos, world.block_at(pos));
                }
            }
        }

        tracing::info!(name = %self.name, radius, origin = ?self.start_origin, "recording started");
        Ok(())
    }

    /// Append one pose sample. Ignored unless a recording is running.
    pub fn capture(&mut self, pose: &ViewerPose, world_tick: i64) {
        if !self.recording {
            return;
        }
        self.samples.push(RecordedSample {
            position: pose.position,
            yaw: pose.yaw,
            pitch: pose.pitch,
            world_tick,
        });
    }

    /// Serialize the buffered recording, write it to
    /// `<output_dir>/<name>.json`, and return to idle.
    ///
    /// Returns `None` when no recording is running. Write failures are
    /// logged and the document is still returned.
    pub fn stop(&mut self) -> Option<RecordingDocument> {
        if !self.recording {
            return None;
        }
        self.recording = false;

        let doc = self.serialize();
        if let Err(err) = self.write(&doc) {
            tracing::error!(name = %self.name, %err, "failed to write recording");
        } else {
            tracing::info!(
                name = %self.name,
                samples = doc.player_path.len(),
                "recording saved"
            );
        }
        Some(doc)
    }

    fn serialize(&self) -> RecordingDocument {
        let origin = self.start_origin;

        let player_path = self
            .samples
            .iter()
            .map(|sample| PathSample {
                x: sample.position.x - origin.x as f32,
                y: sample.position.y - origin.y as f32,
                z: sample.position.z - origin.z as f32,
                y_rot: sample.yaw,
                x_rot: sample.pitch,
            })
            .collect();

        let world_snapshot = self
            .world_snapshot
            .iter()
            .map(|(pos, block)| BlockSample {
                x: pos.x - origin.x,
                y: pos.y - origin.y,
                z: pos.z - origin.z,
                block: block.clone(),
            })
            .collect();

        RecordingDocument {
            name: self.name.clone(),
            duration: self.samples.len() as f32 / TICKS_PER_SECOND as f32,
            player_path,
            world_snapshot,
        }
    }

    fn write(&self, doc: &RecordingDocument) -> CinereelResult<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|err| {
            CinereelError::recording(format!(
                "create '{}': {err}",
                self.output_dir.display()
            ))
        })?;
        let path = self.output_dir.join(format!("{}.json", self.name));
        let json = serde_json::to_string_pretty(doc)
            .map_err(|err| CinereelError::serde(err.to_string()))?;
        std::fs::write(&path, json)
            .map_err(|err| CinereelError::recording(format!("write '{}': {err}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatWorld;

    impl WorldSource for FlatWorld {
        fn block_at(&self, pos: BlockPos) -> String {
            if pos.y < 0 {
                "minecraft:stone".to_string()
            } else {
                "minecraft:air".to_string()
            }
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "cinereel_{name}_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    fn pose(x: f32, y: f32, z: f32) -> ViewerPose {
        ViewerPose {
            position: Vec3::new(x, y, z),
            yaw: 90.0,
            pitch: -5.0,
        }
    }

    #[test]
    fn start_captures_cubic_snapshot() {
        let mut recorder = Recorder::new(temp_dir("snapshot"));
        recorder
            .start(&pose(10.2, 0.0, -3.7), &FlatWorld, "ruins", 2)
            .unwrap();
        let doc = recorder.stop().unwrap();
        assert_eq!(doc.world_snapshot.len(), 5 * 5 * 5);
        // Relative coordinates span [-radius, radius] on every axis.
        assert!(
            doc.world_snapshot
                .iter()
                .all(|b| (-2..=2).contains(&b.x) && (-2..=2).contains(&b.y) && (-2..=2).contains(&b.z))
        );
    }

    #[test]
    fn double_start_is_rejected_and_buffers_survive() {
        let mut recorder = Recorder::new(temp_dir("double_start"));
        recorder
            .start(&pose(0.0, 0.0, 0.0), &FlatWorld, "first", 1)
            .unwrap();
        recorder.capture(&pose(0.5, 0.0, 0.0), 1);

        let err = recorder.start(&pose(9.0, 9.0, 9.0), &FlatWorld, "second", 1);
        assert!(err.is_err());
        assert_eq!(recorder.samples().len(), 1);

        let doc = recorder.stop().unwrap();
        assert_eq!(doc.name, "first");
        assert_eq!(doc.player_path.len(), 1);
    }

    #[test]
    fn radius_is_bounded() {
        let mut recorder = Recorder::new(temp_dir("radius"));
        assert!(
            recorder
                .start(&pose(0.0, 0.0, 0.0), &FlatWorld, "r0", 0)
                .is_err()
        );
        assert!(
            recorder
                .start(&pose(0.0, 0.0, 0.0), &FlatWorld, "r51", 51)
                .is_err()
        );
        assert!(!recorder.is_recording());
    }

    #[test]
    fn stop_when_idle_is_a_noop() {
        let mut recorder = Recorder::new(temp_dir("idle_stop"));
        assert!(recorder.stop().is_none());
    }

    #[test]
    fn capture_before_start_is_ignored() {
        let mut recorder = Recorder::new(temp_dir("early_capture"));
        recorder.capture(&pose(1.0, 2.0, 3.0), 7);
        assert!(recorder.samples().is_empty());
    }

    #[test]
    fn path_is_relative_to_start_origin() {
        let dir = temp_dir("relative_path");
        let mut recorder = Recorder::new(dir.clone());
        recorder
            .start(&pose(10.4, 64.0, -3.2), &FlatWorld, "walk", 1)
            .unwrap();
        // Origin floors to (10, 64, -4).
        recorder.capture(&pose(10.4, 64.0, -3.2), 100);
        recorder.capture(&pose(11.4, 64.5, -3.2), 101);

        let doc = recorder.stop().unwrap();
        assert_eq!(doc.duration, 2.0 / 20.0);
        assert_eq!(doc.player_path.len(), 2);
        assert!((doc.player_path[0].x - 0.4).abs() < 1e-5);
        assert!((doc.player_path[0].z - 0.8).abs() < 1e-5);
        assert!((doc.player_path[1].x - 1.4).abs() < 1e-5);
        assert_eq!(doc.player_path[1].y_rot, 90.0);
        assert_eq!(doc.player_path[1].x_rot, -5.0);

        // The file landed next to the name.
        let written = std::fs::read_to_string(dir.join("walk.json")).unwrap();
        let parsed: RecordingDocument = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn buffers_clear_on_next_start_not_on_stop() {
        let mut recorder = Recorder::new(temp_dir("buffer_lifetime"));
        recorder
            .start(&pose(0.0, 0.0, 0.0), &FlatWorld, "first", 1)
            .unwrap();
        recorder.capture(&pose(0.0, 0.0, 0.0), 1);
        recorder.stop().unwrap();
        assert_eq!(recorder.samples().len(), 1);

        recorder
            .start(&pose(0.0, 0.0, 0.0), &FlatWorld, "second", 1)
            .unwrap();
        assert!(recorder.samples().is_empty());
    }
}
