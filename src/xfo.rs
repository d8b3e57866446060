//! Similarity transform: orientation, translation and scale.
//!
//! Composition and inversion only make sense while the scale stays uniform;
//! anything else would need shearing, which an `Xfo` cannot represent. Those
//! two operations therefore check their operands and fail with
//! [`GmathError::NonUniformScale`] instead of returning a wrong transform.

use crate::axis::{Axis, CartesianPlane, RotationOrder};
use crate::errors::GmathError;
use crate::euler::Euler;
use crate::float_types::{EPSILON, Real};
use crate::matrix3::Matrix3;
use crate::matrix4::Matrix4;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;
use core::ops::{Mul, MulAssign};
use std::fmt::Display;

#[derive(Debug, Clone, Copy)]
pub struct Xfo {
    pub ori: Quaternion,
    pub tr: Vector3,
    pub sc: Vector3,
}

crate::traits::impl_tolerant_eq!(Xfo, to_array);

impl Default for Xfo {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Xfo {
    pub const IDENTITY: Xfo = Xfo {
        ori: Quaternion::IDENTITY,
        tr: Vector3::ZERO,
        sc: Vector3::new(1.0, 1.0, 1.0),
    };

    #[inline]
    pub const fn new(ori: Quaternion, tr: Vector3, sc: Vector3) -> Self {
        Self { ori, tr, sc }
    }

    pub const fn from_translation(tr: Vector3) -> Self {
        Self::new(Quaternion::IDENTITY, tr, Vector3::new(1.0, 1.0, 1.0))
    }

    pub const fn from_orientation(ori: Quaternion) -> Self {
        Self::new(ori, Vector3::ZERO, Vector3::new(1.0, 1.0, 1.0))
    }

    pub const fn from_translation_orientation(tr: Vector3, ori: Quaternion) -> Self {
        Self::new(ori, tr, Vector3::new(1.0, 1.0, 1.0))
    }

    /// Decompose an affine matrix: row lengths give the scale, the normalized
    /// rows the orientation and row 3 the translation. Shear is lost.
    ///
    /// A reflection (negative determinant) is carried by the scale: every
    /// component turns negative so the orientation stays a proper rotation.
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let sign: Real = if m.to_matrix3().determinant() < 0.0 { -1.0 } else { 1.0 };
        let rotation = Matrix3::from_rows(
            m.axis_x().normalize() * sign,
            m.axis_y().normalize() * sign,
            m.axis_z().normalize() * sign,
        );
        Self::new(Quaternion::from_matrix3(&rotation), m.position(), m.scale() * sign)
    }

    pub fn from_euler_parts(euler: &Euler, order: RotationOrder, tr: Vector3, sc: Vector3) -> Self {
        Self::new(Quaternion::from_euler(euler, order), tr, sc)
    }

    /// Orientation (x, y, z, w), translation and scale, flattened.
    pub const fn to_array(&self) -> [Real; 10] {
        [
            self.ori.x, self.ori.y, self.ori.z, self.ori.w,
            self.tr.x, self.tr.y, self.tr.z,
            self.sc.x, self.sc.y, self.sc.z,
        ]
    }

    pub fn set_to_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// `true` when all three scale components match within `|sc.x| * EPSILON * 10`.
    pub fn has_uniform_scale(&self) -> bool {
        let limit = self.sc.x.abs() * EPSILON * 10.0;
        (self.sc.x - self.sc.y).abs() <= limit && (self.sc.x - self.sc.z).abs() <= limit
    }

    fn require_uniform_scale(&self, operation: &'static str) -> Result<(), GmathError> {
        if self.has_uniform_scale() {
            return Ok(());
        }
        log::warn!("{}: rejected scale {}", operation, self.sc);
        Err(GmathError::NonUniformScale { operation })
    }

    /// Checked composition: `self * other` applies `other` first, then `self`.
    ///
    /// ```text
    /// tr  = tr_a + ori_a.rotate(sc_a * tr_b)
    /// ori = normalize(ori_a * ori_b)
    /// sc  = sc_a * sc_b
    /// ```
    pub fn try_mul(&self, other: &Xfo) -> Result<Xfo, GmathError> {
        self.require_uniform_scale("Xfo::mul")?;
        other.require_uniform_scale("Xfo::mul")?;
        Ok(Xfo::new(
            (self.ori * other.ori).normalize(),
            self.tr + self.ori.rotate_vector(&(self.sc * other.tr)),
            self.sc * other.sc,
        ))
    }

    /// The transform undoing `self`.
    ///
    /// ```text
    /// ori' = ori⁻¹
    /// sc'  = 1 / sc
    /// tr'  = ori⁻¹.rotate(-tr * sc')
    /// ```
    pub fn inverse(&self) -> Result<Xfo, GmathError> {
        self.require_uniform_scale("Xfo::inverse")?;
        let ori = self.ori.inverse();
        let sc = self.sc.inverse();
        let tr = ori.rotate_vector(&(-self.tr * sc));
        Ok(Xfo::new(ori, tr, sc))
    }

    pub fn inverse_in_place(&mut self) -> Result<(), GmathError> {
        *self = self.inverse()?;
        Ok(())
    }

    pub fn to_matrix4(&self) -> Matrix4 {
        let rotation = self.ori.to_matrix3();
        let mut m = Matrix4::IDENTITY;
        m.set_axis_x(&(rotation.axis_x() * self.sc.x));
        m.set_axis_y(&(rotation.axis_y() * self.sc.y));
        m.set_axis_z(&(rotation.axis_z() * self.sc.z));
        m.set_position(&self.tr);
        m
    }

    /// Scale, rotate, then translate `v`. Works for any scale.
    pub fn transform_vector(&self, v: &Vector3) -> Vector3 {
        self.ori.rotate_vector(&(*v * self.sc)) + self.tr
    }

    pub fn inverse_transform_vector(&self, v: &Vector3) -> Result<Vector3, GmathError> {
        Ok(self.inverse()?.transform_vector(v))
    }

    /// Quaternion slerp along the shortest arc, linear blend of `tr` and `sc`.
    pub fn slerp(&self, other: &Xfo, t: Real) -> Xfo {
        Xfo::new(
            self.ori.slerp(&other.ori, t, true),
            self.tr.linear_interpolate(&other.tr, t),
            self.sc.linear_interpolate(&other.sc, t),
        )
    }

    pub fn slerp_in_place(&mut self, other: &Xfo, t: Real) {
        *self = self.slerp(other, t);
    }

    /// Distance between the two translations.
    pub fn distance_to(&self, other: &Xfo) -> Real {
        self.tr.distance(&other.tr)
    }

    /// Mirror through the plane with `normal` passing through `center`. The
    /// scale is kept as is.
    pub fn mirror(&self, center: &Vector3, normal: &Vector3, primary: Axis, secondary: Axis) -> Result<Xfo, GmathError> {
        Ok(Xfo::new(
            self.ori.mirror(normal, primary, secondary)?,
            (self.tr - *center).mirror(normal) + *center,
            self.sc,
        ))
    }

    pub fn mirror_in_place(&mut self, center: &Vector3, normal: &Vector3, primary: Axis, secondary: Axis) -> Result<(), GmathError> {
        *self = self.mirror(center, normal, primary, secondary)?;
        Ok(())
    }

    /// Mirror through one of the cartesian planes at the origin.
    pub fn mirror_plane(&self, plane: CartesianPlane) -> Xfo {
        Xfo::new(self.ori.mirror_plane(plane), self.tr.mirror_plane(plane), self.sc)
    }

    pub fn mirror_plane_in_place(&mut self, plane: CartesianPlane) {
        *self = self.mirror_plane(plane);
    }
}

impl From<Matrix4> for Xfo {
    fn from(m: Matrix4) -> Self {
        Self::from_matrix4(&m)
    }
}

impl From<Xfo> for Matrix4 {
    fn from(xfo: Xfo) -> Self {
        xfo.to_matrix4()
    }
}

/// Panicking form of [`Xfo::try_mul`].
impl Mul for Xfo {
    type Output = Xfo;
    fn mul(self, other: Xfo) -> Xfo {
        match self.try_mul(&other) {
            Ok(xfo) => xfo,
            Err(e) => panic!("{}", e),
        }
    }
}

impl MulAssign for Xfo { fn mul_assign(&mut self, other: Xfo) { *self = *self * other; } }

impl Display for Xfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Xfo(ori: {}, tr: {}, sc: {})", self.ori, self.tr, self.sc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::HALF_PI;

    fn sample(scale: Real) -> Xfo {
        Xfo::from_euler_parts(
            &Euler::degrees(10.0, 45.0, -30.0),
            RotationOrder::XYZ,
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::splat(scale),
        )
    }

    #[test]
    fn composition_matches_matrices() {
        let a = sample(2.0);
        let b = Xfo::from_euler_parts(
            &Euler::degrees(-70.0, 5.0, 90.0),
            RotationOrder::ZYX,
            Vector3::new(-4.0, 0.5, 0.0),
            Vector3::splat(0.5),
        );
        let ab = a.try_mul(&b).unwrap();
        assert_eq!(ab.to_matrix4(), b.to_matrix4() * a.to_matrix4());

        let v = Vector3::new(0.3, -1.0, 2.0);
        assert_eq!(ab.transform_vector(&v), a.transform_vector(&b.transform_vector(&v)));
        assert_eq!(v * ab.to_matrix4(), ab.transform_vector(&v));
    }

    #[test]
    fn non_uniform_scale_is_rejected_on_either_side() {
        let uniform = sample(1.0);
        let mut stretched = sample(1.0);
        stretched.sc = Vector3::new(1.0, 2.0, 1.0);

        let expected = Err(GmathError::NonUniformScale { operation: "Xfo::mul" });
        assert_eq!(uniform.try_mul(&stretched), expected);
        assert_eq!(stretched.try_mul(&uniform), expected);
        assert!(stretched.inverse().is_err());
        // transforming a single vector is still fine
        assert_eq!(stretched.transform_vector(&Vector3::YAXIS), stretched.ori.rotate_vector(&Vector3::new(0.0, 2.0, 0.0)) + stretched.tr);
    }

    #[test]
    #[should_panic(expected = "non-uniform scale would cause shearing")]
    fn operator_panics_on_non_uniform_scale() {
        let mut stretched = Xfo::IDENTITY;
        stretched.sc = Vector3::new(1.0, 2.0, 1.0);
        let _ = Xfo::IDENTITY * stretched;
    }

    #[test]
    fn inverse_undoes_transform() {
        let xfo = sample(3.0);
        let inv = xfo.inverse().unwrap();
        assert_eq!(xfo.try_mul(&inv).unwrap(), Xfo::IDENTITY);
        assert_eq!(inv.try_mul(&xfo).unwrap(), Xfo::IDENTITY);

        let p = Vector3::new(5.0, -2.0, 0.25);
        assert_eq!(xfo.inverse_transform_vector(&xfo.transform_vector(&p)).unwrap(), p);
        assert_eq!(inv.to_matrix4(), xfo.to_matrix4().inverse());
    }

    #[test]
    fn matrix_round_trip() {
        let xfo = sample(1.5);
        let back = Xfo::from_matrix4(&xfo.to_matrix4());
        assert!(back.ori == xfo.ori || back.ori == -xfo.ori);
        assert_eq!(back.tr, xfo.tr);
        assert_eq!(back.sc, xfo.sc);
    }

    #[test]
    fn negative_scale_survives_matrix_round_trip() {
        let xfo = Xfo::new(Quaternion::from_axis_angle(&Vector3::ZAXIS, 0.3), Vector3::new(0.0, 0.0, 3.0), Vector3::splat(-2.0));
        let back = Xfo::from_matrix4(&xfo.to_matrix4());
        assert!(back.ori == xfo.ori || back.ori == -xfo.ori);
        assert_eq!(back.sc, Vector3::splat(-2.0));

        let p = Vector3::new(1.0, 0.5, 0.2);
        assert_eq!(back.transform_vector(&p), xfo.transform_vector(&p));
        assert_eq!(back.to_matrix4(), xfo.to_matrix4());
    }

    #[test]
    fn mirrored_matrix_decomposes_to_an_equivalent_xfo() {
        // one flipped axis: the orientation must still be a proper rotation
        let mut m = sample(1.0).to_matrix4();
        m.set_axis_x(&(m.axis_x() * -1.0));
        let xfo = Xfo::from_matrix4(&m);
        assert!(xfo.ori.to_matrix3().determinant() > 0.0);
        assert!(xfo.sc.x < 0.0 && xfo.sc.y < 0.0 && xfo.sc.z < 0.0);
        assert_eq!(xfo.to_matrix4(), m);
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = Xfo::from_translation(Vector3::ZERO);
        let b = Xfo::new(Quaternion::from_axis_angle(&Vector3::ZAXIS, HALF_PI), Vector3::new(2.0, 0.0, 0.0), Vector3::splat(3.0));
        assert_eq!(a.slerp(&b, 0.0), a);
        assert_eq!(a.slerp(&b, 1.0), b);
        let mid = a.slerp(&b, 0.5);
        assert_eq!(mid.ori, Quaternion::from_axis_angle(&Vector3::ZAXIS, HALF_PI / 2.0));
        assert_eq!(mid.tr, Vector3::XAXIS);
        assert_eq!(mid.sc, Vector3::splat(2.0));
        assert_eq!(a.distance_to(&b), 2.0);
    }

    #[test]
    fn mirror_about_center() {
        let xfo = Xfo::from_translation(Vector3::new(3.0, 1.0, 0.0));
        let m = xfo.mirror(&Vector3::new(1.0, 0.0, 0.0), &Vector3::XAXIS, Axis::PosY, Axis::PosZ).unwrap();
        assert_eq!(m.tr, Vector3::new(-1.0, 1.0, 0.0));
        assert_eq!(m.sc, xfo.sc);
        assert_eq!(xfo.mirror_plane(CartesianPlane::YZ).tr, Vector3::new(-3.0, 1.0, 0.0));
        assert!(xfo.mirror(&Vector3::ZERO, &Vector3::XAXIS, Axis::PosY, Axis::NegY).is_err());
    }

    #[test]
    fn identity_and_display() {
        let mut xfo = sample(2.0);
        xfo.set_to_identity();
        assert_eq!(xfo, Xfo::default());
        assert_eq!(xfo.to_matrix4(), Matrix4::IDENTITY);
        assert!(xfo.to_string().starts_with("Xfo(ori: Quaternion("));
    }
}
