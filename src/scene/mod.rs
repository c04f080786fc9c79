pub mod model;
pub mod overlay;
pub mod skin;

pub use model::{DEFAULT_SKIN_SLOT, SceneObject, SceneObjectKind};
pub use overlay::OverlayConfig;
pub use skin::{SkinMapping, SkinZone, UvRect};
