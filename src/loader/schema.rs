//! Raw serde mirror of the authoring JSON, converted into the domain model
//! after parsing.
//!
//! Absent fields take the documented defaults; malformed required sub-fields
//! fail the conversion (and therefore that one cutscene, never the process).

use crate::{
    cutscene::Cutscene,
    foundation::{
        core::{ResourceId, Vec3},
        error::CinereelResult,
    },
    scene::{DEFAULT_SKIN_SLOT, OverlayConfig, SceneObject, SceneObjectKind, SkinMapping, SkinZone, UvRect},
    timeline::{CameraKind, CameraPath, Frame, FrameObject, FrameTimeline, Keyframe},
};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CutsceneDoc {
    name: Option<String>,
    duration: Option<f32>,
    #[serde(default = "default_true")]
    pause_game: bool,
    overlay: Option<OverlayDoc>,
    recording: Option<String>,
    camera_config: Option<String>,
    camera: Option<CameraDoc>,
    #[serde(default)]
    models: Vec<ModelDoc>,
    #[serde(default)]
    frames: Vec<FrameDoc>,
    skin_mapping: Option<SkinMappingDoc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, serde::Deserialize)]
struct OverlayDoc {
    color: Option<String>,
    opacity: Option<f32>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct CameraDoc {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    keyframes: Vec<KeyframeDoc>,
}

#[derive(Debug, serde::Deserialize)]
struct KeyframeDoc {
    time: f32,
    position: Vec3,
    rotation: Vec3,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelDoc {
    id: String,
    model: String,
    texture: Option<String>,
    #[serde(default)]
    use_player_skin: bool,
    skin_texture: Option<String>,
    position: Option<Vec3>,
    rotation: Option<Vec3>,
    scale: Option<ScaleDoc>,
    /// Reference to an animation set; its presence makes the object rigged.
    animations: Option<String>,
    animation: Option<String>,
}

/// Authoring scale: `[x, y, z]` or a single uniform number.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum ScaleDoc {
    Uniform(f32),
    Vector(Vec3),
}

impl ScaleDoc {
    fn to_vec3(&self) -> Vec3 {
        match self {
            Self::Uniform(v) => Vec3::splat(*v),
            Self::Vector(v) => *v,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct FrameDoc {
    time: f32,
    #[serde(default)]
    entities: Vec<FrameObjectDoc>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrameObjectDoc {
    id: Option<String>,
    model: Option<String>,
    position: Option<Vec3>,
    rotation: Option<Vec3>,
    scale: Option<ScaleDoc>,
    #[serde(default)]
    use_player_skin: bool,
}

#[derive(Debug, serde::Deserialize)]
struct SkinMappingDoc {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    zones: Vec<SkinZoneDoc>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkinZoneDoc {
    name: Option<String>,
    entity_id: Option<String>,
    #[serde(rename = "skinUV")]
    skin_uv: Option<[f32; 4]>,
    #[serde(rename = "modelUV")]
    model_uv: Option<[f32; 4]>,
}

impl CutsceneDoc {
    pub(crate) fn into_cutscene(self, id: ResourceId) -> CinereelResult<Cutscene> {
        let mut cutscene = Cutscene::new(id);
        cutscene.name = self.name.unwrap_or_default();
        cutscene.duration = self.duration.unwrap_or(0.0);
        cutscene.pause_on_play = self.pause_game;
        cutscene.recording = self.recording;

        if let Some(overlay) = self.overlay {
            cutscene.overlay = overlay.into_config()?;
        }

        // An external camera config takes precedence over an inline path.
        if let Some(config) = self.camera_config {
            cutscene.external_camera = Some(ResourceId::parse(&config)?);
        } else if let Some(camera) = self.camera {
            cutscene.camera = Some(camera.into_camera_path()?);
        }

        for model in self.models {
            cutscene.composition.push(model.into_scene_object()?);
        }

        let mut timeline = FrameTimeline::new();
        for frame in self.frames {
            timeline.push(frame.into_frame());
        }
        cutscene.frames = timeline;

        if let Some(mapping) = self.skin_mapping {
            cutscene.skin_mapping = Some(mapping.into_mapping());
        }

        Ok(cutscene)
    }
}

impl OverlayDoc {
    fn into_config(self) -> CinereelResult<OverlayConfig> {
        let mut config = OverlayConfig {
            enabled: true,
            ..OverlayConfig::default()
        };
        if let Some(color) = self.color {
            config.color = OverlayConfig::parse_color(&color)?;
        }
        if let Some(opacity) = self.opacity {
            config.opacity = opacity;
        }
        Ok(config)
    }
}

impl CameraDoc {
    pub(crate) fn into_camera_path(self) -> CinereelResult<CameraPath> {
        let kind = match self.kind {
            Some(s) => CameraKind::parse(&s)?,
            None => CameraKind::Path,
        };
        let mut path = CameraPath::new(kind);
        for keyframe in self.keyframes {
            path.push(Keyframe::new(keyframe.time, keyframe.position, keyframe.rotation));
        }
        Ok(path)
    }
}

impl ModelDoc {
    fn into_scene_object(self) -> CinereelResult<SceneObject> {
        let mut object = SceneObject::new(self.id, ResourceId::parse(&self.model)?);
        object.texture = match self.texture {
            Some(t) => Some(ResourceId::parse(&t)?),
            None => None,
        };
        object.uses_viewer_skin = self.use_player_skin;
        object.skin_texture_slot = self
            .skin_texture
            .unwrap_or_else(|| DEFAULT_SKIN_SLOT.to_string());
        object.position = self.position.unwrap_or(Vec3::ZERO);
        object.rotation = self.rotation.unwrap_or(Vec3::ZERO);
        object.scale = self.scale.map(|s| s.to_vec3()).unwrap_or(Vec3::ONE);
        object.kind = match self.animations {
            Some(set) => SceneObjectKind::Animated {
                animation_set: ResourceId::parse(&set)?,
                current_animation: self.animation,
            },
            None => SceneObjectKind::Static,
        };
        Ok(object)
    }
}

impl FrameDoc {
    fn into_frame(self) -> Frame {
        let mut frame = Frame::new(self.time);
        for entity in self.entities {
            frame.entities.push(FrameObject {
                id: entity.id.unwrap_or_default(),
                model: entity.model.unwrap_or_default(),
                position: entity.position.unwrap_or(Vec3::ZERO),
                rotation: entity.rotation.unwrap_or(Vec3::ZERO),
                scale: entity.scale.map(|s| s.to_vec3()).unwrap_or(Vec3::ONE),
                uses_viewer_skin: entity.use_player_skin,
            });
        }
        frame
    }
}

impl SkinMappingDoc {
    fn into_mapping(self) -> SkinMapping {
        let zones = self
            .zones
            .into_iter()
            .map(|zone| SkinZone {
                name: zone.name.unwrap_or_default(),
                target_object: zone.entity_id.unwrap_or_default(),
                skin_rect: uv_rect(zone.skin_uv),
                model_rect: uv_rect(zone.model_uv),
            })
            .collect();
        SkinMapping {
            enabled: self.enabled,
            zones,
        }
    }
}

fn uv_rect(uv: Option<[f32; 4]>) -> UvRect {
    let [u0, v0, u1, v1] = uv.unwrap_or([0.0; 4]);
    UvRect::new(u0, v0, u1, v1)
}
