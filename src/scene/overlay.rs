use crate::foundation::error::{CinereelError, CinereelResult};

/// Full-screen tint drawn over the world while a cutscene plays.
///
/// Descriptive only; compositing happens in the renderer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayConfig {
    pub enabled: bool,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color: 0x000000,
            opacity: 1.0,
        }
    }
}

impl OverlayConfig {
    pub fn validate(&self) -> CinereelResult<()> {
        if self.color > 0xFF_FF_FF {
            return Err(CinereelError::validation(
                "overlay color must fit in 24 bits (0xRRGGBB)",
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(CinereelError::validation(
                "overlay opacity must be in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Parse an authoring `"#RRGGBB"` color string.
    pub fn parse_color(s: &str) -> CinereelResult<u32> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return Err(CinereelError::validation(format!(
                "overlay color '{s}' is not #RRGGBB"
            )));
        }
        u32::from_str_radix(hex, 16)
            .map_err(|_| CinereelError::validation(format!("overlay color '{s}' is not #RRGGBB")))
    }
}
