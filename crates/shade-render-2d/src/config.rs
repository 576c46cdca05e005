//! Renderer configuration.

use shade_core::{Color, ConfigError};

use crate::blending::Blending;

/// Largest render target side accepted, matching the default wgpu texture limit.
pub const MAX_DIMENSION: u32 = 8192;

/// Encoding of the color attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorTarget {
    /// The attachment re-encodes the linear fragment output to sRGB on store.
    #[default]
    Srgb,
    /// The attachment stores the linear fragment output unchanged.
    Unorm,
}

#[cfg(feature = "gpu")]
impl From<ColorTarget> for wgpu::TextureFormat {
    fn from(target: ColorTarget) -> Self {
        match target {
            ColorTarget::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            ColorTarget::Unorm => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// Settings for an offscreen renderer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RendererConfig {
    pub width: u32,
    pub height: u32,
    /// MSAA samples per pixel; 1 disables multisampling.
    pub sample_count: u32,
    pub target: ColorTarget,
    /// Linear color the target is cleared to before the first draw.
    pub clear_color: Color,
    pub blending: Blending,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            sample_count: 1,
            target: ColorTarget::Srgb,
            clear_color: Color::TRANSPARENT,
            blending: Blending::default(),
        }
    }
}

impl RendererConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_target(mut self, target: ColorTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_clear_color(mut self, clear_color: Color) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_blending(mut self, blending: Blending) -> Self {
        self.blending = blending;
        self
    }

    /// Check dimensions and sample count before any GPU resource is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.width, self.height)?;
        if !matches!(self.sample_count, 1 | 4) {
            return Err(ConfigError::InvalidSampleCount {
                count: self.sample_count,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<(), ConfigError> {
    let valid = 1..=MAX_DIMENSION;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimensions {
            width,
            height,
            max: MAX_DIMENSION,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RendererConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_size() {
        let err = RendererConfig::new(0, 10).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDimensions {
                width: 0,
                height: 10,
                max: MAX_DIMENSION
            }
        );
    }

    #[test]
    fn test_rejects_oversized() {
        assert!(RendererConfig::new(64, MAX_DIMENSION + 1).validate().is_err());
    }

    #[test]
    fn test_sample_count() {
        assert!(RendererConfig::new(64, 64).with_sample_count(4).validate().is_ok());
        assert_eq!(
            RendererConfig::new(64, 64).with_sample_count(2).validate(),
            Err(ConfigError::InvalidSampleCount { count: 2 })
        );
    }
}
