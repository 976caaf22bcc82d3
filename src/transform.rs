//! A continuous 2D affine transform, for grabs that smithay's discrete
//! 8-way [`smithay::utils::Transform`] can't express: arbitrary rotation
//! (the rotate grab, §4.8) and non-90°-aligned scaling (fullscreen's
//! `scale` method, §4.5).

use cgmath::{Matrix3, Rad, SquareMatrix, Vector3};

/// An affine transform in surface-local space, backed by a 3x3 matrix in
/// homogeneous coordinates. Composable via [`Transform2D::then`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D(Matrix3<f64>);

impl Transform2D {
    /// The identity transform.
    pub fn identity() -> Self {
        Transform2D(Matrix3::identity())
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        #[rustfmt::skip]
        let m = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            dx,  dy,  1.0,
        );
        Transform2D(m)
    }

    /// A uniform scale about the origin.
    pub fn scale(factor: f64) -> Self {
        #[rustfmt::skip]
        let m = Matrix3::new(
            factor, 0.0,    0.0,
            0.0,    factor, 0.0,
            0.0,    0.0,    1.0,
        );
        Transform2D(m)
    }

    /// A rotation by `angle` radians about the origin, counter-clockwise.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = Rad(angle).0.sin_cos();
        #[rustfmt::skip]
        let m = Matrix3::new(
            c,   s,   0.0,
            -s,  c,   0.0,
            0.0, 0.0, 1.0,
        );
        Transform2D(m)
    }

    /// Build the delta rotation used by the rotate grab directly from the
    /// pointer offset `(dx, dy)` from the rotation centre, without going
    /// through an angle: this is what the grab actually computes (two
    /// unit column vectors derived from the offset), and it is numerically
    /// identical to [`Transform2D::rotation`] for the implied angle.
    pub fn rotation_from_offset(dx: f64, dy: f64, r: f64) -> Self {
        debug_assert!(r > 0.0);
        let (cx, sx) = (dx / r, dy / r);
        #[rustfmt::skip]
        let m = Matrix3::new(
            cx,  sx,  0.0,
            -sx, cx,  0.0,
            0.0, 0.0, 1.0,
        );
        Transform2D(m)
    }

    /// Compose `self` followed by `other`: `self.then(other)` applied to a
    /// point is `other.apply(self.apply(point))`.
    pub fn then(&self, other: &Transform2D) -> Transform2D {
        Transform2D(self.0 * other.0)
    }

    /// `translate(-c) . self . translate(c)`: apply `self` as if it were
    /// centred on `c` rather than the origin. Used by the rotate grab to
    /// rotate about the surface's centre instead of its top-left corner.
    pub fn about(&self, cx: f64, cy: f64) -> Transform2D {
        Transform2D::translation(-cx, -cy)
            .then(self)
            .then(&Transform2D::translation(cx, cy))
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let v = self.0 * Vector3::new(x, y, 1.0);
        (v.x, v.y)
    }

    pub fn as_matrix(&self) -> Matrix3<f64> {
        self.0
    }

    pub fn is_identity(&self) -> bool {
        self.0 == Matrix3::identity()
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Transform2D::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn identity_is_noop() {
        let (x, y) = Transform2D::identity().apply(3.0, -4.0);
        approx(x, 3.0);
        approx(y, -4.0);
    }

    #[test]
    fn translation_moves_point() {
        let (x, y) = Transform2D::translation(5.0, -2.0).apply(1.0, 1.0);
        approx(x, 6.0);
        approx(y, -1.0);
    }

    #[test]
    fn scale_is_uniform() {
        let (x, y) = Transform2D::scale(2.0).apply(3.0, -3.0);
        approx(x, 6.0);
        approx(y, -6.0);
    }

    #[test]
    fn rotation_about_centre_fixes_centre() {
        let t = Transform2D::rotation(std::f64::consts::FRAC_PI_2).about(10.0, 10.0);
        let (x, y) = t.apply(10.0, 10.0);
        approx(x, 10.0);
        approx(y, 10.0);
    }

    #[test]
    fn rotation_from_offset_matches_angle_rotation() {
        let dx = 1.0;
        let dy = 1.0;
        let r = (dx * dx + dy * dy as f64).sqrt();
        let by_offset = Transform2D::rotation_from_offset(dx, dy, r);
        let by_angle = Transform2D::rotation(dy.atan2(dx));
        let (x1, y1) = by_offset.apply(5.0, 0.0);
        let (x2, y2) = by_angle.apply(5.0, 0.0);
        approx(x1, x2);
        approx(y1, y2);
    }

    #[test]
    fn composition_order() {
        let t = Transform2D::translation(1.0, 0.0).then(&Transform2D::scale(2.0));
        let (x, _y) = t.apply(0.0, 0.0);
        // translate first, then scale: (0,0) -> (1,0) -> (2,0)
        approx(x, 2.0);
    }
}
