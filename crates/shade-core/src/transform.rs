//! Projection helpers for the host side of the transform state.

use glam::Mat4;

/// Orthographic projection in OpenGL conventions (z mapped to `[-1, 1]`).
///
/// Arguments follow screen order: passing `top < bottom` flips Y so that
/// `(left, top)` lands on the top-left corner of clip space.
pub fn ortho(left: f32, top: f32, right: f32, bottom: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(left, right, bottom, top, near, far)
}

/// Maps pixel coordinates `(0,0)-(width,height)` to NDC with a top-left origin.
pub fn screen_projection(width: f32, height: f32) -> Mat4 {
    ortho(0.0, 0.0, width, height, -1.0, 1.0)
}

/// Column-major layout of a matrix, as uploaded to a uniform buffer.
pub fn to_columns(m: &Mat4) -> [[f32; 4]; 4] {
    m.to_cols_array_2d()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_screen_projection_corners() {
        let proj = screen_projection(800.0, 600.0);

        let top_left = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((top_left - Vec4::new(-1.0, 1.0, 0.0, 1.0)).abs().max_element() < 1e-6);

        let bottom_right = proj * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert!((bottom_right - Vec4::new(1.0, -1.0, 0.0, 1.0)).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_screen_projection_scale() {
        let cols = to_columns(&screen_projection(800.0, 600.0));

        assert!((cols[0][0] - 2.0 / 800.0).abs() < 0.0001);
        assert!((cols[1][1] - (-2.0 / 600.0)).abs() < 0.0001);
        assert!((cols[3][0] - (-1.0)).abs() < 0.0001);
        assert!((cols[3][1] - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_columns_are_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(3.0, 4.0, 5.0));
        let cols = to_columns(&m);
        assert_eq!(cols[3], [3.0, 4.0, 5.0, 1.0]);
    }
}
