//! Authoring-file loading: a narrow "read bytes for path" seam plus the JSON
//! schema parser.
//!
//! Load failures never escape this boundary — every error is logged and
//! reported as an absent value, so one bad file cannot poison the catalog or
//! the host process.

mod schema;

use std::path::PathBuf;

use crate::{
    cutscene::Cutscene,
    foundation::{
        core::{ResourceId, TICK_SECONDS, Vec3},
        error::{CinereelError, CinereelResult},
    },
    record::RecordingDocument,
    timeline::{CameraKind, CameraPath, Keyframe},
};

use schema::{CameraDoc, CutsceneDoc};

/// Read access to authoring assets, keyed by slash-separated relative path.
pub trait AssetSource {
    fn read(&self, path: &str) -> CinereelResult<Vec<u8>>;
}

/// Filesystem-backed [`AssetSource`] rooted at a directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirSource {
    fn read(&self, path: &str) -> CinereelResult<Vec<u8>> {
        let rel = normalize_rel_path(path)?;
        let full = self.root.join(rel);
        std::fs::read(&full)
            .map_err(|err| CinereelError::load(format!("read '{}': {err}", full.display())))
    }
}

/// Normalize and validate a source-relative asset path.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
fn normalize_rel_path(source: &str) -> CinereelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(CinereelError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(CinereelError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CinereelError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CinereelError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Parses authoring files into [`Cutscene`] values.
pub struct CutsceneLoader {
    source: Box<dyn AssetSource>,
}

impl CutsceneLoader {
    pub fn new(source: Box<dyn AssetSource>) -> Self {
        Self { source }
    }

    /// Source-relative location of a cutscene's authoring file:
    /// `<namespace>/cutscenes/<path>/cutscene.json`.
    pub fn cutscene_path(id: &ResourceId) -> String {
        format!("{}/cutscenes/{}/cutscene.json", id.namespace(), id.path())
    }

    /// Load and validate the cutscene registered under `id`.
    ///
    /// Missing resources and malformed content are logged and reported as
    /// `None`.
    #[tracing::instrument(skip(self))]
    pub fn load(&self, id: &ResourceId) -> Option<Cutscene> {
        match self.try_load(id) {
            Ok(cutscene) => {
                tracing::info!(%id, "loaded cutscene");
                Some(cutscene)
            }
            Err(err) => {
                tracing::error!(%id, %err, "failed to load cutscene");
                None
            }
        }
    }

    fn try_load(&self, id: &ResourceId) -> CinereelResult<Cutscene> {
        let bytes = self.source.read(&Self::cutscene_path(id))?;
        Self::parse(&bytes, id.clone())
    }

    /// Parse authoring JSON bytes into a validated cutscene.
    pub fn parse(bytes: &[u8], id: ResourceId) -> CinereelResult<Cutscene> {
        let doc: CutsceneDoc = serde_json::from_slice(bytes)
            .map_err(|err| CinereelError::serde(format!("cutscene '{id}': {err}")))?;
        let cutscene = doc.into_cutscene(id)?;
        cutscene.validate()?;
        Ok(cutscene)
    }

    /// Load a standalone camera config (the `cameraConfig` target), treating
    /// the id's path as source-relative under its namespace.
    pub fn load_camera_config(&self, id: &ResourceId) -> Option<CameraPath> {
        match self.try_camera_config(id) {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::error!(%id, %err, "failed to load camera config");
                None
            }
        }
    }

    fn try_camera_config(&self, id: &ResourceId) -> CinereelResult<CameraPath> {
        let bytes = self
            .source
            .read(&format!("{}/{}", id.namespace(), id.path()))?;
        let doc: CameraDoc = serde_json::from_slice(&bytes)
            .map_err(|err| CinereelError::serde(format!("camera config '{id}': {err}")))?;
        doc.into_camera_path()
    }

    /// Turn a persisted recording back into a playable cutscene: one camera
    /// keyframe per sample at the fixed step, rotation (pitch, yaw, 0).
    pub fn cutscene_from_recording(doc: &RecordingDocument, id: ResourceId) -> Cutscene {
        let mut path = CameraPath::new(CameraKind::Path);
        for (index, sample) in doc.player_path.iter().enumerate() {
            path.push(Keyframe::new(
                index as f32 * TICK_SECONDS,
                Vec3::new(sample.x, sample.y, sample.z),
                Vec3::new(sample.x_rot, sample.y_rot, 0.0),
            ));
        }

        let mut cutscene = Cutscene::new(id);
        cutscene.name = doc.name.clone();
        cutscene.duration = doc.duration;
        cutscene.camera = Some(path);
        cutscene.recording = Some(format!("{}.json", doc.name));
        cutscene
    }
}
