//! Records flowing through the vertex and fragment stages.

use glam::{Mat4, Vec4};

use crate::transform::screen_projection;

/// RGBA color with f32 channels.
///
/// RGB is gamma-encoded (sRGB) when used as a vertex color; alpha is linear.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create from hex string (e.g., "#FF5733" or "FF573380").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?)),
            8 => {
                let mut color = Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?);
                color.a = channel(6)? as f32 / 255.0;
                Some(color)
            }
            _ => None,
        }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    // Common colors
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// A tessellated vertex: shape-local position and sRGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], color: impl Into<[f32; 4]>) -> Self {
        Self {
            position,
            color: color.into(),
        }
    }
}

/// Projection and model matrices shared by every vertex of a draw call.
///
/// Both are column-major. Their contents are not validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// View volume to normalized device coordinates.
    pub projection: Mat4,
    /// Shape-local to view space.
    pub model: Mat4,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
        }
    }
}

impl TransformState {
    pub fn new(projection: Mat4, model: Mat4) -> Self {
        Self { projection, model }
    }

    /// Pixel-space projection with a top-left origin and an identity model.
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(screen_projection(width, height), Mat4::IDENTITY)
    }

    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model = model;
        self
    }
}

/// Output of the vertex stage, consumed by rasterization and interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    /// Homogeneous clip-space position.
    pub clip_position: Vec4,
    /// Linear RGB with pass-through alpha.
    pub color: [f32; 4],
}
