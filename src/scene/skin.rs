/// Axis-aligned rectangle in normalized texture space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    pub fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self { u0, v0, u1, v1 }
    }
}

/// One region of the viewer's skin projected onto a region of a scene
/// object's model texture.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SkinZone {
    pub name: String,
    /// Id of the scene/frame object the zone applies to.
    pub target_object: String,
    /// Source rectangle in skin-texture space.
    pub skin_rect: UvRect,
    /// Destination rectangle in model-texture space.
    pub model_rect: UvRect,
}

/// Configuration for personalizing a cutscene with the viewer's own skin.
///
/// Purely descriptive; the renderer collaborator applies the zones.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SkinMapping {
    pub enabled: bool,
    pub zones: Vec<SkinZone>,
}

impl SkinMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, zone: SkinZone) {
        self.zones.push(zone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_is_disabled_and_empty() {
        let mapping = SkinMapping::new();
        assert!(!mapping.enabled);
        assert!(mapping.zones.is_empty());
    }

    #[test]
    fn json_round_trip() {
        let mut mapping = SkinMapping {
            enabled: true,
            zones: Vec::new(),
        };
        mapping.push(SkinZone {
            name: "face".to_string(),
            target_object: "hero".to_string(),
            skin_rect: UvRect::new(0.0, 0.0, 0.25, 0.25),
            model_rect: UvRect::new(0.5, 0.5, 0.75, 0.75),
        });
        let s = serde_json::to_string(&mapping).unwrap();
        let back: SkinMapping = serde_json::from_str(&s).unwrap();
        assert_eq!(back, mapping);
    }
}
