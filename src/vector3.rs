//! Three component vector used for points, directions and scales.

use crate::axis::{Axis, CartesianPlane};
use crate::errors::{GmathError, check_index, check_len};
use crate::float_types::{EPSILON, Real};
use crate::scalar;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default)]
pub struct Vector3 {
    pub x: Real,
    pub y: Real,
    pub z: Real,
}

crate::traits::impl_tolerant_eq!(Vector3, to_array);

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const XAXIS: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const YAXIS: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const ZAXIS: Vector3 = Vector3::new(0.0, 0.0, 1.0);
    pub const NEG_XAXIS: Vector3 = Vector3::new(-1.0, 0.0, 0.0);
    pub const NEG_YAXIS: Vector3 = Vector3::new(0.0, -1.0, 0.0);
    pub const NEG_ZAXIS: Vector3 = Vector3::new(0.0, 0.0, -1.0);

    #[inline]
    pub const fn new(x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `value`.
    #[inline]
    pub const fn splat(value: Real) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub const fn to_array(&self) -> [Real; 3] {
        [self.x, self.y, self.z]
    }

    pub fn set(&mut self, x: Real, y: Real, z: Real) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Checked element access.
    pub fn get(&self, index: usize) -> Result<Real, GmathError> {
        check_index("Vector3", index, 3).map(|i| self.to_array()[i])
    }

    /// Checked mutable element access.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Real, GmathError> {
        match check_index("Vector3", index, 3)? {
            0 => Ok(&mut self.x),
            1 => Ok(&mut self.y),
            _ => Ok(&mut self.z),
        }
    }

    #[inline]
    pub fn dot(&self, other: &Vector3) -> Real {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn cross_in_place(&mut self, other: &Vector3) {
        *self = self.cross(other);
    }

    /// Cross product followed by normalization.
    #[inline]
    pub fn cross_normalize(&self, other: &Vector3) -> Vector3 {
        self.cross(other).normalize()
    }

    pub fn cross_normalize_in_place(&mut self, other: &Vector3) {
        *self = self.cross_normalize(other);
    }

    #[inline]
    pub fn squared_length(&self) -> Real {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> Real {
        self.squared_length().sqrt()
    }

    #[inline]
    pub fn squared_distance(&self, other: &Vector3) -> Real {
        (*other - *self).squared_length()
    }

    #[inline]
    pub fn distance(&self, other: &Vector3) -> Real {
        self.squared_distance(other).sqrt()
    }

    /// Unit vector in the same direction. Vectors shorter than `EPSILON` come
    /// back unchanged instead of blowing up.
    pub fn normalize(&self) -> Vector3 {
        let length = self.length();
        if length < EPSILON {
            *self
        } else {
            *self * (1.0 / length)
        }
    }

    pub fn normalize_in_place(&mut self) {
        *self = self.normalize();
    }

    /// Component-wise reciprocal. Zero components become infinite.
    pub fn inverse(&self) -> Vector3 {
        Vector3::new(1.0 / self.x, 1.0 / self.y, 1.0 / self.z)
    }

    pub fn inverse_in_place(&mut self) {
        *self = self.inverse();
    }

    #[inline]
    pub fn negate(&self) -> Vector3 {
        -*self
    }

    pub fn negate_in_place(&mut self) {
        *self = -*self;
    }

    /// Unsigned angle in radians between two vectors of any length.
    pub fn angle(&self, other: &Vector3) -> Real {
        scalar::acos(self.normalize().dot(&other.normalize()))
    }

    /// **Mathematical Foundation: reflection about a direction**
    ///
    /// ```text
    /// r = n · 2(v·n) − v
    /// ```
    /// `normal` is expected to be unit length. The result is `v` rotated
    /// half a turn about `normal`.
    pub fn reflect(&self, normal: &Vector3) -> Vector3 {
        *normal * (2.0 * self.dot(normal)) - *self
    }

    pub fn reflect_in_place(&mut self, normal: &Vector3) {
        *self = self.reflect(normal);
    }

    /// **Mathematical Foundation: refraction**
    ///
    /// ```text
    /// d = v·n
    /// k = 1 − η²(1 − d²)
    /// r = v·η − n·(η·d + √k)     if k ≥ EPSILON
    /// r = 0                      otherwise (total internal reflection)
    /// ```
    pub fn refract(&self, normal: &Vector3, eta: Real) -> Vector3 {
        let d = self.dot(normal);
        let k = 1.0 - eta * eta * (1.0 - d * d);
        if k < EPSILON {
            Vector3::ZERO
        } else {
            *self * eta - *normal * (eta * d + k.sqrt())
        }
    }

    pub fn refract_in_place(&mut self, normal: &Vector3, eta: Real) {
        *self = self.refract(normal, eta);
    }

    /// Mirror through the plane (passing by the origin) with the given normal.
    pub fn mirror(&self, normal: &Vector3) -> Vector3 {
        let n = normal.normalize();
        *self - n * (2.0 * self.dot(&n))
    }

    pub fn mirror_in_place(&mut self, normal: &Vector3) {
        *self = self.mirror(normal);
    }

    /// Mirror through one of the cartesian planes.
    pub fn mirror_plane(&self, plane: CartesianPlane) -> Vector3 {
        self.mirror(&plane.normal())
    }

    pub fn mirror_plane_in_place(&mut self, plane: CartesianPlane) {
        *self = self.mirror_plane(plane);
    }

    /// `self + (other − self)·weight`
    pub fn linear_interpolate(&self, other: &Vector3, weight: Real) -> Vector3 {
        Vector3::new(
            (other.x - self.x) * weight + self.x,
            (other.y - self.y) * weight + self.y,
            (other.z - self.z) * weight + self.z,
        )
    }

    pub fn linear_interpolate_in_place(&mut self, other: &Vector3, weight: Real) {
        *self = self.linear_interpolate(other, weight);
    }
}

impl From<[Real; 3]> for Vector3 {
    fn from(values: [Real; 3]) -> Self {
        Vector3::new(values[0], values[1], values[2])
    }
}

impl From<Vector3> for [Real; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl TryFrom<&[Real]> for Vector3 {
    type Error = GmathError;

    fn try_from(values: &[Real]) -> Result<Self, Self::Error> {
        check_len("Vector3", 3, values.len())?;
        Ok(Vector3::new(values[0], values[1], values[2]))
    }
}

impl From<Axis> for Vector3 {
    fn from(axis: Axis) -> Self {
        axis.to_vector3()
    }
}

impl Index<usize> for Vector3 {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("{}", GmathError::IndexOutOfRange { type_name: "Vector3", index, len: 3 }),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut Real {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("{}", GmathError::IndexOutOfRange { type_name: "Vector3", index, len: 3 }),
        }
    }
}

impl Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x, self.y, self.z)
    }
}

/* ------------------------------ arithmetic ------------------------------ */

impl Add for Vector3 { type Output = Self; fn add(self, r: Self) -> Self { Self::new(self.x + r.x, self.y + r.y, self.z + r.z) } }
impl Sub for Vector3 { type Output = Self; fn sub(self, r: Self) -> Self { Self::new(self.x - r.x, self.y - r.y, self.z - r.z) } }
impl Neg for Vector3 { type Output = Self; fn neg(self) -> Self { Self::new(-self.x, -self.y, -self.z) } }
impl Mul<Real> for Vector3 { type Output = Self; fn mul(self, s: Real) -> Self { Self::new(self.x * s, self.y * s, self.z * s) } }
impl Mul<Vector3> for Real { type Output = Vector3; fn mul(self, v: Vector3) -> Vector3 { v * self } }
impl AddAssign for Vector3 { fn add_assign(&mut self, r: Self) { *self = *self + r; } }
impl SubAssign for Vector3 { fn sub_assign(&mut self, r: Self) { *self = *self - r; } }
impl MulAssign<Real> for Vector3 { fn mul_assign(&mut self, s: Real) { *self = *self * s; } }

/// Component-wise product, used to apply scales.
impl Mul for Vector3 {
    type Output = Self;
    fn mul(self, r: Self) -> Self {
        Self::new(self.x * r.x, self.y * r.y, self.z * r.z)
    }
}

impl MulAssign for Vector3 { fn mul_assign(&mut self, r: Self) { *self = *self * r; } }

/// Division by exactly zero yields NaN in every field instead of ±inf.
impl Div<Real> for Vector3 {
    type Output = Self;
    fn div(self, s: Real) -> Self {
        if s == 0.0 {
            return Self::splat(Real::NAN);
        }
        Self::new(self.x / s, self.y / s, self.z / s)
    }
}

/// Component-wise division; each zero divisor turns its field into NaN.
impl Div for Vector3 {
    type Output = Self;
    fn div(self, r: Self) -> Self {
        let div = |a: Real, b: Real| if b == 0.0 { Real::NAN } else { a / b };
        Self::new(div(self.x, r.x), div(self.y, r.y), div(self.z, r.z))
    }
}

impl DivAssign<Real> for Vector3 { fn div_assign(&mut self, s: Real) { *self = *self / s; } }
impl DivAssign for Vector3 { fn div_assign(&mut self, r: Self) { *self = *self / r; } }
