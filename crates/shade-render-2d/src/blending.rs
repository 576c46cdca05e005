//! Blend state applied by the pipeline to fragment output.

/// Source/destination blend equation, applied identically to color and alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blending {
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub operation: BlendOp,
}

impl Blending {
    pub fn new(src_factor: BlendFactor, dst_factor: BlendFactor, operation: BlendOp) -> Self {
        Self {
            src_factor,
            dst_factor,
            operation,
        }
    }

    /// Overwrite the destination with the fragment color.
    pub fn constant() -> Self {
        Self::new(BlendFactor::One, BlendFactor::Zero, BlendOp::Add)
    }

    /// Blend a linear color over a linear destination on the CPU.
    ///
    /// Mirrors what the GPU blender does with this state for a single pixel.
    pub fn apply(&self, src: [f32; 4], dst: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for i in 0..4 {
            let s = src[i] * self.src_factor.weight(src[3]);
            let d = dst[i] * self.dst_factor.weight(src[3]);
            out[i] = match self.operation {
                BlendOp::Add => s + d,
            };
        }
        out
    }
}

impl Default for Blending {
    fn default() -> Self {
        Self::new(
            BlendFactor::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha,
            BlendOp::Add,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendFactor {
    One,
    Zero,
    SrcAlpha,
    OneMinusSrcAlpha,
}

impl BlendFactor {
    fn weight(self, src_alpha: f32) -> f32 {
        match self {
            BlendFactor::One => 1.0,
            BlendFactor::Zero => 0.0,
            BlendFactor::SrcAlpha => src_alpha,
            BlendFactor::OneMinusSrcAlpha => 1.0 - src_alpha,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendOp {
    Add,
}

#[cfg(feature = "gpu")]
mod wgpu_conv {
    use super::*;

    impl From<BlendFactor> for wgpu::BlendFactor {
        fn from(factor: BlendFactor) -> Self {
            match factor {
                BlendFactor::One => wgpu::BlendFactor::One,
                BlendFactor::Zero => wgpu::BlendFactor::Zero,
                BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
                BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
            }
        }
    }

    impl From<BlendOp> for wgpu::BlendOperation {
        fn from(op: BlendOp) -> Self {
            match op {
                BlendOp::Add => wgpu::BlendOperation::Add,
            }
        }
    }

    impl From<Blending> for wgpu::BlendState {
        fn from(blending: Blending) -> Self {
            let component = wgpu::BlendComponent {
                src_factor: blending.src_factor.into(),
                dst_factor: blending.dst_factor.into(),
                operation: blending.operation.into(),
            };
            wgpu::BlendState {
                color: component,
                alpha: component,
            }
        }
    }
}
