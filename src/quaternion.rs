//! Unit quaternion rotations.
//!
//! Products follow Hamilton's convention, so `q1 * q2` rotates by `q2` first:
//! `(q1 * q2) * v == q1 * (q2 * v)`. Rotation operations assume a unit
//! quaternion and never normalize on their own; call
//! [`Quaternion::normalize_in_place`] after editing the fields by hand.

use crate::axis::{Axis, CartesianPlane, RotationOrder};
use crate::errors::{GmathError, check_index, check_len};
use crate::euler::Euler;
use crate::float_types::{EPSILON, Real};
use crate::matrix3::Matrix3;
use crate::matrix4::Matrix4;
use crate::scalar::{self, sinx_over_x};
use crate::vector3::Vector3;
use crate::vector4::Vector4;
use core::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use std::fmt::Display;

#[derive(Debug, Clone, Copy)]
pub struct Quaternion {
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub w: Real,
}

crate::traits::impl_tolerant_eq!(Quaternion, to_array);

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn to_array(&self) -> [Real; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// The imaginary part.
    #[inline]
    pub const fn vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn set(&mut self, x: Real, y: Real, z: Real, w: Real) {
        *self = Self::new(x, y, z, w);
    }

    pub fn set_to_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn get(&self, index: usize) -> Result<Real, GmathError> {
        check_index("Quaternion", index, 4).map(|i| self.to_array()[i])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Real, GmathError> {
        match check_index("Quaternion", index, 4)? {
            0 => Ok(&mut self.x),
            1 => Ok(&mut self.y),
            2 => Ok(&mut self.z),
            _ => Ok(&mut self.w),
        }
    }

    /* -------- construction -------- */

    /// `q = (axis·sin(θ/2), cos(θ/2))`. The axis is normalized first; a zero
    /// axis gives the identity.
    pub fn from_axis_angle(axis: &Vector3, angle: Real) -> Self {
        if axis.squared_length() < EPSILON * EPSILON {
            return Self::IDENTITY;
        }
        let half = angle * 0.5;
        let (sin, cos) = half.sin_cos();
        let v = axis.normalize() * sin;
        Self::new(v.x, v.y, v.z, cos)
    }

    /// Axis and angle (radians) of this unit quaternion.
    ///
    /// A near-identity quaternion has no meaningful axis: angle 0 about +X is
    /// returned.
    pub fn to_axis_angle(&self) -> (Vector3, Real) {
        let length2 = self.vector().squared_length();
        if length2 <= EPSILON {
            return (Vector3::XAXIS, 0.0);
        }
        let angle = 2.0 * scalar::acos(self.w);
        (self.vector() * (1.0 / length2.sqrt()), angle)
    }

    /// Rotation from Euler angles, in any unit, composed in `order`.
    pub fn from_euler(euler: &Euler, order: RotationOrder) -> Self {
        let e = euler.to_radians();
        Self::from_euler_angles(e.x, e.y, e.z, order)
    }

    /// Rotation from angles in radians, matching [`Matrix3::from_euler_angles`].
    ///
    /// The matrix for `XYZ` is `X * Y * Z` (X applied first), which as a
    /// quaternion product reads `qz * qy * qx`.
    pub fn from_euler_angles(x: Real, y: Real, z: Real, order: RotationOrder) -> Self {
        let angles = [x, y, z];
        let axes = [Vector3::XAXIS, Vector3::YAXIS, Vector3::ZAXIS];
        let [a, b, c] = order.axes();
        let qa = Self::from_axis_angle(&axes[a], angles[a]);
        let qb = Self::from_axis_angle(&axes[b], angles[b]);
        let qc = Self::from_axis_angle(&axes[c], angles[c]);
        qc * (qb * qa)
    }

    pub fn to_euler(&self, order: RotationOrder) -> Euler {
        self.to_matrix3().to_euler(order)
    }

    /// See [`Matrix3::to_euler_checked`].
    pub fn to_euler_checked(&self, order: RotationOrder) -> (Euler, bool) {
        self.to_matrix3().to_euler_checked(order)
    }

    /// **Shoemake's trace method**
    ///
    /// With a positive trace, `w` is the largest component and is computed
    /// first. Otherwise the largest diagonal entry picks which imaginary
    /// component to compute first, which avoids cancellation near 180°.
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let d = m.data();
        let at = |r: usize, c: usize| d[r * 3 + c];
        let trace = at(0, 0) + at(1, 1) + at(2, 2);

        if trace > 0.0 {
            let root = (trace + 1.0).sqrt();
            let w = 0.5 * root;
            let root = 0.5 / root;
            return Self::new(
                (at(1, 2) - at(2, 1)) * root,
                (at(2, 0) - at(0, 2)) * root,
                (at(0, 1) - at(1, 0)) * root,
                w,
            );
        }

        const NEXT: [usize; 3] = [1, 2, 0];
        let mut i = 0;
        if at(1, 1) > at(0, 0) {
            i = 1;
        }
        if at(2, 2) > at(i, i) {
            i = 2;
        }
        let j = NEXT[i];
        let k = NEXT[j];

        let root = (at(i, i) - at(j, j) - at(k, k) + 1.0).sqrt();
        let mut v = [0.0; 3];
        v[i] = 0.5 * root;
        let root = 0.5 / root;
        v[j] = (at(i, j) + at(j, i)) * root;
        v[k] = (at(i, k) + at(k, i)) * root;
        let w = (at(j, k) - at(k, j)) * root;
        Self::new(v[0], v[1], v[2], w)
    }

    /// Rotation part of an affine matrix, scale removed.
    pub fn from_matrix4(m: &Matrix4) -> Self {
        m.to_quaternion()
    }

    /// **Mathematical Foundation: rotation matrix of a unit quaternion**
    ///
    /// Row form (rows are the rotated axes):
    /// ```text
    /// | 1 − 2(y² + z²)   2(xy + zw)       2(xz − yw)     |
    /// | 2(xy − zw)       1 − 2(x² + z²)   2(yz + xw)     |
    /// | 2(xz + yw)       2(yz − xw)       1 − 2(x² + y²) |
    /// ```
    /// The quaternion is used as is; a non-unit input gives a non-rotation.
    pub fn to_matrix3(&self) -> Matrix3 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, yy, zz) = (x * x2, y * y2, z * z2);
        let (xy, xz, yz) = (x * y2, x * z2, y * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);

        Matrix3::from_array([
            1.0 - (yy + zz), xy + wz,         xz - wy,
            xy - wz,         1.0 - (xx + zz), yz + wx,
            xz + wy,         yz - wx,         1.0 - (xx + yy),
        ])
    }

    pub fn to_matrix4(&self) -> Matrix4 {
        Matrix4::from_matrix3(&self.to_matrix3())
    }

    /// The rotated X axis.
    pub fn axis_x(&self) -> Vector3 {
        self.rotate_vector(&Vector3::XAXIS)
    }

    pub fn axis_y(&self) -> Vector3 {
        self.rotate_vector(&Vector3::YAXIS)
    }

    pub fn axis_z(&self) -> Vector3 {
        self.rotate_vector(&Vector3::ZAXIS)
    }

    /* -------- algebra -------- */

    #[inline]
    pub fn dot(&self, other: &Quaternion) -> Real {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn squared_length(&self) -> Real {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> Real {
        self.squared_length().sqrt()
    }

    /// Unit quaternion. A length at or below `EPSILON` yields all zeros.
    pub fn normalize(&self) -> Quaternion {
        let length = self.length();
        if length <= EPSILON {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }
        *self * (1.0 / length)
    }

    pub fn normalize_in_place(&mut self) {
        *self = self.normalize();
    }

    #[inline]
    pub fn conjugate(&self) -> Quaternion {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn conjugate_in_place(&mut self) {
        *self = self.conjugate();
    }

    /// `conj(q) / |q|²`, or the zero quaternion when `|q|² = 0`.
    pub fn inverse(&self) -> Quaternion {
        let norm = self.squared_length();
        if norm == 0.0 {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }
        self.conjugate() * (1.0 / norm)
    }

    pub fn inverse_in_place(&mut self) {
        *self = self.inverse();
    }

    /// Exponential of a pure quaternion `A·(x, y, z)`:
    /// `exp(q) = (sin(A)·(x, y, z), cos(A))`. The scalar part of `self` is ignored.
    pub fn exp(&self) -> Quaternion {
        let angle = self.vector().length();
        let v = self.vector() * sinx_over_x(angle);
        Self::new(v.x, v.y, v.z, angle.cos())
    }

    /// Logarithm of a unit quaternion `(sin(A)·(x, y, z), cos(A))`: the pure
    /// quaternion `A·(x, y, z)`.
    pub fn log(&self) -> Quaternion {
        let mut coeff = 1.0;
        if self.w.abs() < 1.0 {
            let angle = scalar::acos(self.w);
            let sin = angle.sin();
            if sin.abs() >= EPSILON {
                coeff = angle / sin;
            }
        }
        let v = self.vector() * coeff;
        Self::new(v.x, v.y, v.z, 0.0)
    }

    /// Negate `self` when it lies in the opposite hemisphere of `other`, so both
    /// describe their rotation with the shortest arc between them.
    pub fn match_hemisphere(&mut self, other: &Quaternion) {
        if self.dot(other) < 0.0 {
            *self = -*self;
        }
    }

    /// **Mathematical Foundation: stable spherical interpolation**
    ///
    /// ```text
    /// a = 2·atan2(|q1 − q2|, |q1 + q2|)       (angle between q1 and q2)
    /// slerp = q1·s·sinc(s·a)/sinc(a) + q2·t·sinc(t·a)/sinc(a),   s = 1 − t
    /// ```
    /// Written with `sinc` this never divides by `sin(a)`, so nearly identical
    /// rotations interpolate linearly instead of producing NaN. When
    /// `shortest_path` is set and the quaternions lie in opposite hemispheres,
    /// `other` is negated before the angle is measured.
    pub fn slerp(&self, other: &Quaternion, t: Real, shortest_path: bool) -> Quaternion {
        let mut q2 = *other;
        if shortest_path && self.dot(&q2) < 0.0 {
            q2 = -q2;
        }

        let length_d = (*self - q2).length();
        let length_s = (*self + q2).length();
        let a = 2.0 * length_d.atan2(length_s);
        let s = 1.0 - t;
        let sinc_a = sinx_over_x(a);

        *self * (sinx_over_x(s * a) / sinc_a * s) + q2 * (sinx_over_x(t * a) / sinc_a * t)
    }

    pub fn slerp_in_place(&mut self, other: &Quaternion, t: Real, shortest_path: bool) {
        *self = self.slerp(other, t, shortest_path);
    }

    /// **Mathematical Foundation: fast rotation**
    ///
    /// Expansion of `q·(v, 0)·conj(q)` with two cross products:
    /// ```text
    /// t = 2·(u × v)          u = (x, y, z)
    /// v' = v + w·t + u × t
    /// ```
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        let u = self.vector();
        let t = u.cross(v) * 2.0;
        *v + t * self.w + u.cross(&t)
    }

    /// Mirror the orientation through the plane with `normal`; see
    /// [`Matrix3::mirror`].
    pub fn mirror(&self, normal: &Vector3, primary: Axis, secondary: Axis) -> Result<Quaternion, GmathError> {
        Ok(self.to_matrix3().mirror(normal, primary, secondary)?.to_quaternion())
    }

    pub fn mirror_plane(&self, plane: CartesianPlane) -> Quaternion {
        self.to_matrix3().mirror_plane(plane).to_quaternion()
    }
}

impl From<Vector4> for Quaternion {
    fn from(v: Vector4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Quaternion> for Vector4 {
    fn from(q: Quaternion) -> Self {
        Vector4::new(q.x, q.y, q.z, q.w)
    }
}

impl TryFrom<&[Real]> for Quaternion {
    type Error = GmathError;

    fn try_from(values: &[Real]) -> Result<Self, Self::Error> {
        check_len("Quaternion", 4, values.len())?;
        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

impl Index<usize> for Quaternion {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("{}", GmathError::IndexOutOfRange { type_name: "Quaternion", index, len: 4 }),
        }
    }
}

impl IndexMut<usize> for Quaternion {
    fn index_mut(&mut self, index: usize) -> &mut Real {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("{}", GmathError::IndexOutOfRange { type_name: "Quaternion", index, len: 4 }),
        }
    }
}

impl Display for Quaternion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Quaternion({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

/* ------------------------------ arithmetic ------------------------------ */

impl Add for Quaternion { type Output = Self; fn add(self, r: Self) -> Self { Self::new(self.x + r.x, self.y + r.y, self.z + r.z, self.w + r.w) } }
impl Sub for Quaternion { type Output = Self; fn sub(self, r: Self) -> Self { Self::new(self.x - r.x, self.y - r.y, self.z - r.z, self.w - r.w) } }
impl Neg for Quaternion { type Output = Self; fn neg(self) -> Self { Self::new(-self.x, -self.y, -self.z, -self.w) } }
impl Mul<Real> for Quaternion { type Output = Self; fn mul(self, s: Real) -> Self { Self::new(self.x * s, self.y * s, self.z * s, self.w * s) } }
impl AddAssign for Quaternion { fn add_assign(&mut self, r: Self) { *self = *self + r; } }
impl SubAssign for Quaternion { fn sub_assign(&mut self, r: Self) { *self = *self - r; } }
impl MulAssign<Real> for Quaternion { fn mul_assign(&mut self, s: Real) { *self = *self * s; } }

/// Division by exactly zero yields NaN in every field.
impl Div<Real> for Quaternion {
    type Output = Self;
    fn div(self, s: Real) -> Self {
        if s == 0.0 {
            return Self::new(Real::NAN, Real::NAN, Real::NAN, Real::NAN);
        }
        Self::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl DivAssign<Real> for Quaternion { fn div_assign(&mut self, s: Real) { *self = *self / s; } }

/// Hamilton product.
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, r: Self) -> Self {
        Self::new(
            self.w * r.x + self.x * r.w + self.y * r.z - self.z * r.y,
            self.w * r.y + self.y * r.w + self.z * r.x - self.x * r.z,
            self.w * r.z + self.z * r.w + self.x * r.y - self.y * r.x,
            self.w * r.w - self.x * r.x - self.y * r.y - self.z * r.z,
        )
    }
}

impl MulAssign for Quaternion { fn mul_assign(&mut self, r: Self) { *self = *self * r; } }

/// Rotates the vector.
impl Mul<Vector3> for Quaternion {
    type Output = Vector3;
    fn mul(self, v: Vector3) -> Vector3 {
        self.rotate_vector(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::{HALF_PI, PI};

    #[test]
    fn identity_and_default() {
        assert_eq!(Quaternion::default(), Quaternion::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Quaternion::IDENTITY.to_matrix3(), Matrix3::IDENTITY);
        let v = Vector3::new(1.0, -2.0, 3.0);
        assert_eq!(Quaternion::IDENTITY * v, v);
    }

    #[test]
    fn rotate_vector_agrees_with_sandwich_and_matrix() {
        let q = Quaternion::from_axis_angle(&Vector3::new(1.0, 2.0, -0.5), 1.3);
        let v = Vector3::new(0.3, -1.0, 2.0);

        let pure = Quaternion::new(v.x, v.y, v.z, 0.0);
        let sandwich = (q * pure * q.conjugate()).vector();
        assert_eq!(q.rotate_vector(&v), sandwich);
        assert_eq!(q.rotate_vector(&v), v * q.to_matrix3());
    }

    #[test]
    fn hamilton_product_composes_rotations() {
        let a = Quaternion::from_axis_angle(&Vector3::ZAXIS, HALF_PI);
        let b = Quaternion::from_axis_angle(&Vector3::XAXIS, HALF_PI);
        let v = Vector3::YAXIS;
        assert_eq!((a * b) * v, a * (b * v));
        // b first: Y -> Z, then a leaves Z alone
        assert_eq!((a * b) * v, Vector3::ZAXIS);
        assert_eq!((a * b).to_matrix3(), b.to_matrix3() * a.to_matrix3());
    }

    #[test]
    fn from_euler_matches_matrix_for_every_order() {
        let euler = Euler::degrees(30.0, -60.0, 110.0);
        for order in RotationOrder::ALL {
            let q = Quaternion::from_euler(&euler, order);
            assert_eq!(q.to_matrix3(), Matrix3::from_euler(&euler, order), "{}", order);
        }
    }

    #[test]
    fn axis_angle_round_trip() {
        let q = Quaternion::from_axis_angle(&Vector3::new(0.0, 2.0, 0.0), 0.75);
        let (axis, angle) = q.to_axis_angle();
        assert_eq!(axis, Vector3::YAXIS);
        assert!((angle - 0.75).abs() < 1e-12);

        let (axis, angle) = Quaternion::IDENTITY.to_axis_angle();
        assert_eq!(axis, Vector3::XAXIS);
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn matrix_round_trip_covers_all_shoemake_branches() {
        let axes = [
            Vector3::XAXIS,
            Vector3::YAXIS,
            Vector3::ZAXIS,
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(-0.3, 0.2, 0.9),
        ];
        for axis in axes {
            for angle in [0.1, 1.0, 2.5, PI - 1e-4, PI] {
                let m = Matrix3::from_axis_angle(&axis, angle);
                let q = Quaternion::from_matrix3(&m);
                assert!((q.length() - 1.0).abs() < 1e-9);
                assert_eq!(q.to_matrix3(), m, "axis {} angle {}", axis, angle);
            }
        }
    }

    #[test]
    fn normalize_and_inverse() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert!((q.normalize().length() - 1.0).abs() < 1e-12);
        assert_eq!(q * q.inverse(), Quaternion::IDENTITY);
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize(), Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).inverse(), Quaternion::new(0.0, 0.0, 0.0, 0.0));
        let n = q / 0.0;
        assert!(n.to_array().iter().all(|c| c.is_nan()));
    }

    #[test]
    fn exp_log_are_inverse() {
        let q = Quaternion::from_axis_angle(&Vector3::new(0.2, -0.4, 1.0), 1.2);
        assert_eq!(q.log().exp(), q);
        assert_eq!(q.log().w, 0.0);
        // near zero the vector part passes through unchanged
        let tiny = Quaternion::new(1e-10, 0.0, 0.0, 0.0);
        assert_eq!(tiny.exp().x, 1e-10);
        // a half turn of the exponent lands on -1 and stays unit length
        let half_turn = Quaternion::new(PI, 0.0, 0.0, 0.0).exp();
        assert_eq!(half_turn, Quaternion::new(0.0, 0.0, 0.0, -1.0));
        assert!((half_turn.length() - 1.0).abs() < 1e-12);
        assert_eq!(Quaternion::IDENTITY.log(), Quaternion::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(&Vector3::ZAXIS, HALF_PI);
        assert_eq!(a.slerp(&b, 0.0, true), a);
        assert_eq!(a.slerp(&b, 1.0, true), b);
        assert_eq!(a.slerp(&b, 0.5, true), Quaternion::from_axis_angle(&Vector3::ZAXIS, HALF_PI * 0.5));
        // identical inputs take the sinc limit
        assert_eq!(b.slerp(&b, 0.3, true), b);
    }

    #[test]
    fn slerp_shortest_path() {
        let a = Quaternion::IDENTITY;
        let b = -Quaternion::from_axis_angle(&Vector3::XAXIS, 0.4);
        let short = a.slerp(&b, 0.5, true);
        assert_eq!(short, Quaternion::from_axis_angle(&Vector3::XAXIS, 0.2));
        let long = a.slerp(&b, 0.5, false);
        assert!((long.length() - 1.0).abs() < 1e-9);
        assert!(short.dot(&long).abs() < 1.0 - 1e-3);
    }

    #[test]
    fn hemisphere() {
        let mut q = -Quaternion::from_axis_angle(&Vector3::XAXIS, 0.4);
        q.match_hemisphere(&Quaternion::IDENTITY);
        assert!(q.w > 0.0);
    }

    #[test]
    fn checked_access() {
        let mut q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.get(3), Ok(4.0));
        assert!(q.get(4).is_err());
        q[0] = 7.0;
        assert_eq!(q.x, 7.0);
        let values: &[Real] = &[0.0, 0.0, 0.0];
        assert!(Quaternion::try_from(values).is_err());
    }
}
