//! Four component vector, mostly used for homogeneous matrix rows.

use crate::errors::{GmathError, check_index, check_len};
use crate::float_types::{EPSILON, Real};
use crate::vector3::Vector3;
use core::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default)]
pub struct Vector4 {
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub w: Real,
}

crate::traits::impl_tolerant_eq!(Vector4, to_array);

impl Vector4 {
    #[inline]
    pub const fn new(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self { x, y, z, w }
    }

    /// Point in homogeneous coordinates (`w = 1`).
    #[inline]
    pub const fn from_point(p: Vector3) -> Self {
        Self::new(p.x, p.y, p.z, 1.0)
    }

    #[inline]
    pub const fn to_array(&self) -> [Real; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Drops `w`.
    #[inline]
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn set(&mut self, x: Real, y: Real, z: Real, w: Real) {
        *self = Self::new(x, y, z, w);
    }

    pub fn get(&self, index: usize) -> Result<Real, GmathError> {
        check_index("Vector4", index, 4).map(|i| self.to_array()[i])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Real, GmathError> {
        match check_index("Vector4", index, 4)? {
            0 => Ok(&mut self.x),
            1 => Ok(&mut self.y),
            2 => Ok(&mut self.z),
            _ => Ok(&mut self.w),
        }
    }

    #[inline]
    pub fn dot(&self, other: &Vector4) -> Real {
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

    /// Same policy as [`Vector3::normalize`]: too-short vectors are returned as is.
    pub fn normalize(&self) -> Vector4 {
        let length = self.length();
        if length < EPSILON { *self } else { *self * (1.0 / length) }
    }

    pub fn normalize_in_place(&mut self) {
        *self = self.normalize();
    }
}

/// Direction in homogeneous coordinates (`w = 0`).
impl From<Vector3> for Vector4 {
    fn from(v: Vector3) -> Self {
        Vector4::new(v.x, v.y, v.z, 0.0)
    }
}

impl From<[Real; 4]> for Vector4 {
    fn from(values: [Real; 4]) -> Self {
        Vector4::new(values[0], values[1], values[2], values[3])
    }
}

impl TryFrom<&[Real]> for Vector4 {
    type Error = GmathError;

    fn try_from(values: &[Real]) -> Result<Self, Self::Error> {
        check_len("Vector4", 4, values.len())?;
        Ok(Vector4::new(values[0], values[1], values[2], values[3]))
    }
}

impl Index<usize> for Vector4 {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("{}", GmathError::IndexOutOfRange { type_name: "Vector4", index, len: 4 }),
        }
    }
}

impl IndexMut<usize> for Vector4 {
    fn index_mut(&mut self, index: usize) -> &mut Real {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("{}", GmathError::IndexOutOfRange { type_name: "Vector4", index, len: 4 }),
        }
    }
}

impl Display for Vector4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vector4({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl Add for Vector4 { type Output = Self; fn add(self, r: Self) -> Self { Self::new(self.x + r.x, self.y + r.y, self.z + r.z, self.w + r.w) } }
impl Sub for Vector4 { type Output = Self; fn sub(self, r: Self) -> Self { Self::new(self.x - r.x, self.y - r.y, self.z - r.z, self.w - r.w) } }
impl Neg for Vector4 { type Output = Self; fn neg(self) -> Self { Self::new(-self.x, -self.y, -self.z, -self.w) } }
impl Mul<Real> for Vector4 { type Output = Self; fn mul(self, s: Real) -> Self { Self::new(self.x * s, self.y * s, self.z * s, self.w * s) } }
impl AddAssign for Vector4 { fn add_assign(&mut self, r: Self) { *self = *self + r; } }
impl SubAssign for Vector4 { fn sub_assign(&mut self, r: Self) { *self = *self - r; } }
impl MulAssign<Real> for Vector4 { fn mul_assign(&mut self, s: Real) { *self = *self * s; } }

impl Div<Real> for Vector4 {
    type Output = Self;
    fn div(self, s: Real) -> Self {
        if s == 0.0 {
            return Self::new(Real::NAN, Real::NAN, Real::NAN, Real::NAN);
        }
        Self::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl DivAssign<Real> for Vector4 { fn div_assign(&mut self, s: Real) { *self = *self / s; } }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_normalize() {
        let v = Vector4::new(1.0, 2.0, 2.0, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-12);
        assert!((v.normalize().length() - 1.0).abs() < 1e-12);
        assert_eq!(Vector4::default().normalize(), Vector4::default());
    }

    #[test]
    fn homogeneous_conversions() {
        let p = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Vector4::from(p).w, 0.0);
        assert_eq!(Vector4::from_point(p).w, 1.0);
        assert_eq!(Vector4::from_point(p).xyz(), p);
    }

    #[test]
    fn zero_vector_normalizes_to_itself() {
        let mut zero = Vector4::new(0.0, 0.0, 0.0, 0.0);
        zero.normalize_in_place();
        assert!(zero.to_array().iter().all(|c| *c == 0.0));

        let direction = Vector4::from(Vector3::new(0.0, -3.0, 4.0));
        assert_eq!(direction.w, 0.0);
        assert_eq!(direction.normalize(), Vector4::new(0.0, -0.6, 0.8, 0.0));
    }

    #[test]
    fn bounds_and_nan() {
        let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.get(3), Ok(4.0));
        assert!(v.get(4).is_err());
        let n = v / 0.0;
        assert!(n.to_array().iter().all(|c| c.is_nan()));
    }
}
