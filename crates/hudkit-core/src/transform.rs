//! 2D affine transforms.
//!
//! Containers describe how a child's local space sits inside their own space
//! with a [`Transform2D`]. Mapping a point out of a child is a forward
//! transform; mapping into a child uses the inverse.
//!
//! ```
//! use hudkit_core::{Point, Transform2D};
//!
//! // Child placed at (100, 50) and drawn at half size.
//! let child = Transform2D::translate(100.0, 50.0).then(&Transform2D::scale(0.5));
//!
//! let in_parent = child.transform_point(Point::new(20.0, 20.0));
//! assert_eq!(in_parent, Point::new(110.0, 60.0));
//!
//! let back = child.inverse().unwrap().transform_point(in_parent);
//! assert!(back.approx_eq(Point::new(20.0, 20.0), 0.001));
//! ```

use glam::{Affine2, Mat2, Vec2};

use crate::geometry::{Point, Rect};

/// Linear parts with a smaller determinant than this have no inverse.
const SINGULAR_EPSILON: f32 = 1e-10;

/// An affine map between two 2D spaces.
///
/// A thin wrapper over [`glam::Affine2`]: a 2x2 linear part applied first,
/// then an offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    affine: Affine2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        affine: Affine2::IDENTITY,
    };

    /// Build from column-major elements; the last pair is the offset.
    #[inline]
    pub const fn from_matrix(m00: f32, m01: f32, m10: f32, m11: f32, m20: f32, m21: f32) -> Self {
        Self::from_parts(
            Mat2::from_cols(Vec2::new(m00, m01), Vec2::new(m10, m11)),
            Vec2::new(m20, m21),
        )
    }

    #[inline]
    const fn from_parts(matrix2: Mat2, translation: Vec2) -> Self {
        Self {
            affine: Affine2 {
                matrix2,
                translation,
            },
        }
    }

    /// Pure offset.
    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self::from_parts(Mat2::IDENTITY, Vec2::new(tx, ty))
    }

    /// Scale both axes by `s`.
    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    /// Scale each axis independently.
    #[inline]
    pub const fn scale_xy(sx: f32, sy: f32) -> Self {
        Self::from_parts(Mat2::from_diagonal(Vec2::new(sx, sy)), Vec2::ZERO)
    }

    /// Counter-clockwise rotation by `angle` radians.
    #[inline]
    pub fn rotate(angle: f32) -> Self {
        Self {
            affine: Affine2::from_angle(angle),
        }
    }

    /// Compose two maps (`self * other`).
    ///
    /// `other` runs first, then `self`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            affine: self.affine * other.affine,
        }
    }

    /// Transform a point.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        self.affine.transform_point2(p.to_vec2()).into()
    }

    /// The map undoing this one, or `None` when it collapses an axis.
    pub fn inverse(&self) -> Option<Self> {
        if self.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(Self {
            affine: self.affine.inverse(),
        })
    }

    /// The offset applied after the linear part.
    #[inline]
    pub fn translation(&self) -> Point {
        self.affine.translation.into()
    }

    /// Area scale factor of the linear part; negative when it mirrors.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.affine.matrix2.determinant()
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The underlying glam affine.
    #[inline]
    pub fn as_affine(&self) -> &Affine2 {
        &self.affine
    }

    /// Widen to a column-major 4x4 matrix acting on the z = 0 plane.
    #[inline]
    pub fn to_mat4(&self) -> glam::Mat4 {
        let m = self.affine.matrix2;
        let t = self.affine.translation;
        glam::Mat4::from_cols(
            m.x_axis.extend(0.0).extend(0.0),
            m.y_axis.extend(0.0).extend(0.0),
            glam::Vec4::Z,
            t.extend(0.0).extend(1.0),
        )
    }

    /// Transform a rectangle's axis-aligned bounding box.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let corners = rect.corners().map(|c| self.transform_point(c));

        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_then_applies_right_first() {
        let t = Transform2D::translate(10.0, 0.0).then(&Transform2D::scale(2.0));
        assert_eq!(t.transform_point(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));

        let t = Transform2D::scale(2.0).then(&Transform2D::translate(10.0, 0.0));
        assert_eq!(t.transform_point(Point::new(1.0, 1.0)), Point::new(22.0, 2.0));
    }

    #[test]
    fn test_inverse() {
        let t = Transform2D::translate(5.0, -3.0)
            .then(&Transform2D::rotate(0.7))
            .then(&Transform2D::scale_xy(1.5, 0.25));
        let inv = t.inverse().expect("invertible");
        let p = Point::new(12.0, -7.5);
        assert!(inv.transform_point(t.transform_point(p)).approx_eq(p, 1e-4));
    }

    #[test]
    fn test_singular_has_no_inverse() {
        assert!(Transform2D::scale(0.0).inverse().is_none());
    }

    #[test]
    fn test_transform_rect_bounds() {
        let t = Transform2D::translate(1.0, 2.0).then(&Transform2D::scale(2.0));
        let r = t.transform_rect(&Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(r, Rect::new(1.0, 2.0, 20.0, 10.0));
    }

    #[test]
    fn test_rotation_composes_through_affine() {
        let t = Transform2D::translate(2.0, 0.0).then(&Transform2D::rotate(std::f32::consts::FRAC_PI_2));
        assert!(t.transform_point(Point::new(1.0, 0.0)).approx_eq(Point::new(2.0, 1.0), 1e-5));
        let v = t.as_affine().transform_point2(glam::Vec2::new(0.0, 1.0));
        assert!(Point::from(v).approx_eq(Point::new(1.0, 0.0), 1e-5));
        assert_eq!(t.translation(), Point::new(2.0, 0.0));
        assert!((t.determinant() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_to_mat4_matches_point_transform() {
        let t = Transform2D::translate(3.0, 4.0).then(&Transform2D::scale(2.0));
        let v = t.to_mat4().transform_point3(glam::Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(Point::new(v.x, v.y), t.transform_point(Point::new(1.0, 1.0)));
    }
}
