//! The persisted recording file, as written by the recorder and read back by
//! the loader.
//!
//! Field spellings (`yRot`, `xRot`, `player_path`, `world_snapshot`) are the
//! on-disk contract; coordinates are relative to the origin captured when the
//! recording started.

/// One sampled viewer pose, relative to the recording origin.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(rename = "yRot")]
    pub y_rot: f32,
    #[serde(rename = "xRot")]
    pub x_rot: f32,
}

/// One captured block state, relative to the recording origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub block: String,
}

/// A complete serialized recording.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordingDocument {
    pub name: String,
    /// Seconds; sample count over the fixed simulation rate.
    pub duration: f32,
    pub player_path: Vec<PathSample>,
    pub world_snapshot: Vec<BlockSample>,
}
