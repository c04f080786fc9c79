use crate::foundation::error::{CinereelError, CinereelResult};

/// Fixed simulation rate all playback and recording is driven at.
pub const TICKS_PER_SECOND: u32 = 20;

/// Duration of one simulation step in seconds.
pub const TICK_SECONDS: f32 = 1.0 / TICKS_PER_SECOND as f32;

/// A point or direction in world space. Rotations store (pitch, yaw, roll)
/// in degrees.
///
/// Serializes in the authoring shape `[x, y, z]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same value on all three axes (uniform scale).
    pub fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Component-wise linear interpolation toward `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Containing block coordinate (floor on every axis).
    pub fn block_pos(self) -> BlockPos {
        BlockPos {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
            z: self.z.floor() as i32,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// Integer world coordinate. `Ord` so coordinate-keyed maps iterate (and
/// serialize) in a stable order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

/// Namespace used when parsing an id string that carries no `namespace:`
/// prefix.
pub const DEFAULT_NAMESPACE: &str = "cinereel";

/// Namespaced identifier in `namespace:path` form.
///
/// Identifies cutscenes in the catalog and references external resources
/// (models, textures, camera configs, advancement and item keys). Both parts
/// are restricted to lowercase alphanumerics plus `_ - . /`.
///
/// Serializes as the joined string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId {
    namespace: String,
    path: String,
}

impl ResourceId {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> CinereelResult<Self> {
        let namespace = namespace.into();
        let path = path.into();
        validate_part("namespace", &namespace)?;
        validate_part("path", &path)?;
        Ok(Self { namespace, path })
    }

    /// Parse `"ns:path"`, or `"path"` using [`DEFAULT_NAMESPACE`].
    pub fn parse(s: &str) -> CinereelResult<Self> {
        match s.split_once(':') {
            Some((ns, path)) => Self::new(ns, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn validate_part(label: &str, part: &str) -> CinereelResult<()> {
    if part.is_empty() {
        return Err(CinereelError::validation(format!(
            "resource id {label} must be non-empty"
        )));
    }
    let ok = part
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.' | '/'));
    if !ok {
        return Err(CinereelError::validation(format!(
            "resource id {label} '{part}' has characters outside [a-z0-9_-./]"
        )));
    }
    Ok(())
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = CinereelError;

    fn try_from(s: String) -> CinereelResult<Self> {
        Self::parse(&s)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.to_string()
    }
}

/// Identity of the entity a cutscene plays for. One live playback session per
/// viewer at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ViewerId(pub uuid::Uuid);

impl ViewerId {
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for ViewerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
