//! sRGB transfer functions.
//!
//! Vertex colors are authored gamma-encoded and converted to linear light
//! before interpolation and blending. Alpha is a compositing weight and is
//! never run through the transfer curve.

use glam::Vec3;

/// Encoded values strictly below this take the linear segment.
pub const SRGB_CUTOFF: f32 = 0.04045;
/// Slope of the linear segment.
pub const SRGB_LINEAR_SLOPE: f32 = 12.92;
/// Offset of the power segment.
pub const SRGB_OFFSET: f32 = 0.055;
/// Scale of the power segment.
pub const SRGB_SCALE: f32 = 1.055;
/// Exponent of the power segment.
pub const SRGB_GAMMA: f32 = 2.4;

/// Linear values at or below this take the linear segment when encoding.
pub const LINEAR_CUTOFF: f32 = 0.003_130_8;

/// Convert sRGB-encoded channels to linear light.
///
/// Each channel selects its own segment, so `(0.01, 0.5, 1.0)` mixes both
/// formulas in one call. Inputs are not clamped; values outside `[0, 1]`
/// pass through the same curve and non-finite values propagate.
pub fn linearize(srgb: Vec3) -> Vec3 {
    let below = srgb.cmplt(Vec3::splat(SRGB_CUTOFF));
    let lower = srgb / SRGB_LINEAR_SLOPE;
    let higher = ((srgb + Vec3::splat(SRGB_OFFSET)) / SRGB_SCALE).powf(SRGB_GAMMA);
    Vec3::select(below, lower, higher)
}

/// Scalar form of [`linearize`] for a single channel.
pub fn linearize_channel(c: f32) -> f32 {
    if c < SRGB_CUTOFF {
        c / SRGB_LINEAR_SLOPE
    } else {
        ((c + SRGB_OFFSET) / SRGB_SCALE).powf(SRGB_GAMMA)
    }
}

/// Linearize the RGB channels of an RGBA color, keeping alpha as-is.
pub fn linearize_color(color: [f32; 4]) -> [f32; 4] {
    let rgb = linearize(Vec3::new(color[0], color[1], color[2]));
    [rgb.x, rgb.y, rgb.z, color[3]]
}

/// Inverse of [`linearize_channel`].
///
/// Used to predict what an sRGB render target stores for a linear value.
pub fn delinearize_channel(c: f32) -> f32 {
    if c <= LINEAR_CUTOFF {
        c * SRGB_LINEAR_SLOPE
    } else {
        SRGB_SCALE * c.powf(1.0 / SRGB_GAMMA) - SRGB_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(linearize_channel(0.0), 0.0);
        assert!((linearize_channel(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(linearize(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_mid_grey() {
        let out = linearize(Vec3::splat(0.5));
        for c in out.to_array() {
            assert!((c - 0.2140).abs() < 1e-3, "got {c}");
        }
    }

    #[test]
    fn test_continuous_at_cutoff() {
        let linear_side = SRGB_CUTOFF / SRGB_LINEAR_SLOPE;
        let power_side = linearize_channel(SRGB_CUTOFF);
        assert!((linear_side - power_side).abs() < 1e-6);
    }

    #[test]
    fn test_cutoff_takes_power_segment() {
        let expected = ((SRGB_CUTOFF + SRGB_OFFSET) / SRGB_SCALE).powf(SRGB_GAMMA);
        assert_eq!(linearize_channel(SRGB_CUTOFF), expected);
    }

    #[test]
    fn test_channels_select_independently() {
        let out = linearize(Vec3::new(0.02, 0.5, 0.04));
        assert_eq!(out.x, 0.02 / SRGB_LINEAR_SLOPE);
        assert_eq!(out.y, ((0.5 + SRGB_OFFSET) / SRGB_SCALE).powf(SRGB_GAMMA));
        assert_eq!(out.z, 0.04 / SRGB_LINEAR_SLOPE);
    }

    #[test]
    fn test_alpha_untouched() {
        let out = linearize_color([1.0, 1.0, 1.0, 0.5]);
        assert_eq!(out[3], 0.5);
        let out = linearize_color([0.0, 0.0, 0.0, 1.0]);
        assert_eq!(out, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_out_of_range_not_clamped() {
        assert!(linearize_channel(1.5) > 1.0);
        assert!(linearize_channel(-0.5) < 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(linearize_channel(f32::NAN).is_nan());
        assert!(linearize(Vec3::new(f32::NAN, 0.5, 0.5)).x.is_nan());
    }

    #[test]
    fn test_delinearize_inverts() {
        for c in [0.0, 0.02, 0.2, 0.5, 0.9, 1.0] {
            let back = delinearize_channel(linearize_channel(c));
            assert!((back - c).abs() < 1e-5, "{c} -> {back}");
        }
    }

    proptest! {
        #[test]
        fn prop_vector_matches_scalar(r in 0.0f32..=1.0, g in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let out = linearize(Vec3::new(r, g, b));
            prop_assert_eq!(out.x, linearize_channel(r));
            prop_assert_eq!(out.y, linearize_channel(g));
            prop_assert_eq!(out.z, linearize_channel(b));
        }

        #[test]
        fn prop_stays_in_unit_range(c in 0.0f32..=1.0) {
            let out = linearize_channel(c);
            prop_assert!((0.0..=1.0 + 1e-6).contains(&out), "{} -> {}", c, out);
        }

        #[test]
        fn prop_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(linearize_channel(lo) <= linearize_channel(hi) + 1e-7);
        }
    }
}
