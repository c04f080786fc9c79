use crate::foundation::{
    core::{ResourceId, Vec3},
    error::{CinereelError, CinereelResult},
};

/// Texture slot name substituted with the viewer's skin when no explicit
/// slot is configured.
pub const DEFAULT_SKIN_SLOT: &str = "player_skin";

/// What drives a scene object's appearance over time.
///
/// The renderer collaborator switches on the tag; playback itself treats both
/// variants as opaque composition data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SceneObjectKind {
    /// A plain model with no rig.
    Static,
    /// A rigged model driven by a named animation from an animation set.
    Animated {
        animation_set: ResourceId,
        current_animation: Option<String>,
    },
}

/// One model placed in a cutscene's scene composition.
///
/// Built by the loader from authoring data and read-only during playback;
/// per-object animation is the renderer's concern.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneObject {
    pub id: String,
    pub model: ResourceId,
    pub texture: Option<ResourceId>,
    pub uses_viewer_skin: bool,
    pub skin_texture_slot: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub kind: SceneObjectKind,
}

impl SceneObject {
    pub fn new(id: impl Into<String>, model: ResourceId) -> Self {
        Self {
            id: id.into(),
            model,
            texture: None,
            uses_viewer_skin: false,
            skin_texture_slot: DEFAULT_SKIN_SLOT.to_string(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            kind: SceneObjectKind::Static,
        }
    }

    pub fn validate(&self) -> CinereelResult<()> {
        if self.id.trim().is_empty() {
            return Err(CinereelError::validation("scene object id must be non-empty"));
        }
        if !self.position.is_finite() || !self.rotation.is_finite() || !self.scale.is_finite() {
            return Err(CinereelError::validation(format!(
                "scene object '{}' has a non-finite transform",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_object_defaults() {
        let obj = SceneObject::new("statue", ResourceId::parse("mymod:statue").unwrap());
        assert_eq!(obj.scale, Vec3::ONE);
        assert_eq!(obj.skin_texture_slot, DEFAULT_SKIN_SLOT);
        assert_eq!(obj.kind, SceneObjectKind::Static);
        obj.validate().unwrap();
    }

    #[test]
    fn validate_rejects_non_finite_transform() {
        let mut obj = SceneObject::new("statue", ResourceId::parse("mymod:statue").unwrap());
        obj.position = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(obj.validate().is_err());
    }

    #[test]
    fn kind_tag_round_trips() {
        let kind = SceneObjectKind::Animated {
            animation_set: ResourceId::parse("mymod:statue_anims").unwrap(),
            current_animation: Some("wave".to_string()),
        };
        let s = serde_json::to_string(&kind).unwrap();
        assert!(s.contains("\"kind\":\"animated\""));
        let back: SceneObjectKind = serde_json::from_str(&s).unwrap();
        assert_eq!(back, kind);
    }
}
