//! Row-major 4x4 affine matrix.
//!
//! Same conventions as [`Matrix3`]: row vectors, `data[row * 4 + col]`. The
//! upper-left 3x3 block holds rotation and scale (rows are the scaled axes),
//! row 3 holds the translation. Column 3 is `(0, 0, 0, 1)` by convention,
//! nothing enforces it.

use crate::axis::{Axis, RotationOrder};
use crate::errors::{GmathError, check_index, check_len};
use crate::euler::Euler;
use crate::float_types::{EPSILON, Real};
use crate::matrix3::Matrix3;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;
use crate::vector4::Vector4;
use core::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};
use std::fmt::Display;

#[derive(Debug, Clone, Copy)]
pub struct Matrix4 {
    data: [Real; 16],
}

crate::traits::impl_tolerant_eq!(Matrix4, to_array);

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    pub const IDENTITY: Matrix4 = Matrix4::from_array([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    #[inline]
    pub const fn from_array(data: [Real; 16]) -> Self {
        Self { data }
    }

    pub const fn from_rows(x: Vector4, y: Vector4, z: Vector4, w: Vector4) -> Self {
        Self::from_array([
            x.x, x.y, x.z, x.w,
            y.x, y.y, y.z, y.w,
            z.x, z.y, z.z, z.w,
            w.x, w.y, w.z, w.w,
        ])
    }

    #[inline]
    pub const fn to_array(&self) -> [Real; 16] {
        self.data
    }

    #[inline]
    pub const fn data(&self) -> &[Real; 16] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [Real; 16] {
        &mut self.data
    }

    pub fn set_to_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn get(&self, index: usize) -> Result<Real, GmathError> {
        check_index("Matrix4", index, 16).map(|i| self.data[i])
    }

    pub fn get_rc(&self, row: usize, col: usize) -> Result<Real, GmathError> {
        let row = check_index("Matrix4 row", row, 4)?;
        let col = check_index("Matrix4 column", col, 4)?;
        Ok(self.data[row * 4 + col])
    }

    pub fn set_rc(&mut self, row: usize, col: usize, value: Real) -> Result<(), GmathError> {
        let row = check_index("Matrix4 row", row, 4)?;
        let col = check_index("Matrix4 column", col, 4)?;
        self.data[row * 4 + col] = value;
        Ok(())
    }

    /// First three components of row `i`.
    pub fn row(&self, i: usize) -> Result<Vector3, GmathError> {
        let i = check_index("Matrix4 row", i, 4)?;
        Ok(self.row3_unchecked(i))
    }

    pub fn row4(&self, i: usize) -> Result<Vector4, GmathError> {
        let i = check_index("Matrix4 row", i, 4)?;
        let d = &self.data;
        Ok(Vector4::new(d[i * 4], d[i * 4 + 1], d[i * 4 + 2], d[i * 4 + 3]))
    }

    /// Overwrite the first three components of row `i`, keeping its fourth.
    pub fn set_row(&mut self, i: usize, v: &Vector3) -> Result<(), GmathError> {
        let i = check_index("Matrix4 row", i, 4)?;
        self.set_row3_unchecked(i, v);
        Ok(())
    }

    pub fn set_row4(&mut self, i: usize, v: &Vector4) -> Result<(), GmathError> {
        let i = check_index("Matrix4 row", i, 4)?;
        self.data[i * 4..i * 4 + 4].copy_from_slice(&v.to_array());
        Ok(())
    }

    #[inline]
    fn row3_unchecked(&self, i: usize) -> Vector3 {
        Vector3::new(self.data[i * 4], self.data[i * 4 + 1], self.data[i * 4 + 2])
    }

    #[inline]
    fn set_row3_unchecked(&mut self, i: usize, v: &Vector3) {
        self.data[i * 4] = v.x;
        self.data[i * 4 + 1] = v.y;
        self.data[i * 4 + 2] = v.z;
    }

    pub fn axis_x(&self) -> Vector3 {
        self.row3_unchecked(0)
    }

    pub fn axis_y(&self) -> Vector3 {
        self.row3_unchecked(1)
    }

    pub fn axis_z(&self) -> Vector3 {
        self.row3_unchecked(2)
    }

    pub fn set_axis_x(&mut self, v: &Vector3) {
        self.set_row3_unchecked(0, v);
    }

    pub fn set_axis_y(&mut self, v: &Vector3) {
        self.set_row3_unchecked(1, v);
    }

    pub fn set_axis_z(&mut self, v: &Vector3) {
        self.set_row3_unchecked(2, v);
    }

    /// Row for `axis`, negated for the negative axes.
    pub fn axis(&self, axis: Axis) -> Vector3 {
        let row = self.row3_unchecked(axis.index());
        if axis.is_negative() { -row } else { row }
    }

    /* -------- translation -------- */

    pub fn position(&self) -> Vector3 {
        self.row3_unchecked(3)
    }

    pub fn set_position(&mut self, p: &Vector3) {
        self.set_row3_unchecked(3, p);
    }

    /// Move by `delta` expressed in world space.
    pub fn add_position(&mut self, delta: &Vector3) {
        let p = self.position() + *delta;
        self.set_position(&p);
    }

    /// Move by `delta` expressed along the matrix's own (scaled) axes.
    pub fn translate(&mut self, delta: &Vector3) {
        let p = self.position() + self.rotate_vector(delta);
        self.set_position(&p);
    }

    /* -------- construction -------- */

    /// Upper 3x3 from `m`, no translation.
    pub fn from_matrix3(m: &Matrix3) -> Self {
        Self::from_matrix3_position(m, &Vector3::ZERO)
    }

    pub fn from_matrix3_position(m: &Matrix3, position: &Vector3) -> Self {
        let mut out = Self::IDENTITY;
        out.set_rotation_matrix3(m);
        out.set_position(position);
        out
    }

    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::from_matrix3(&q.to_matrix3())
    }

    pub fn from_quaternion_position(q: &Quaternion, position: &Vector3) -> Self {
        Self::from_matrix3_position(&q.to_matrix3(), position)
    }

    pub fn from_euler(euler: &Euler, order: RotationOrder) -> Self {
        Self::from_matrix3(&Matrix3::from_euler(euler, order))
    }

    pub fn from_axis_angle(axis: &Vector3, angle: Real) -> Self {
        Self::from_matrix3(&Matrix3::from_axis_angle(axis, angle))
    }

    pub fn from_vector_to_vector(from: &Vector3, to: &Vector3) -> Self {
        Self::from_matrix3(&Matrix3::from_vector_to_vector(from, to))
    }

    /// Frame placed at `pos` whose `primary` axis points at the point
    /// `point_at`. `normal` is an up *direction*, not a point; see
    /// [`Matrix3::look_at`].
    pub fn look_at(
        pos: &Vector3,
        point_at: &Vector3,
        normal: &Vector3,
        primary: Axis,
        secondary: Axis,
    ) -> Result<Self, GmathError> {
        let rotation = Matrix3::look_at(&(*point_at - *pos), normal, primary, secondary)?;
        Ok(Self::from_matrix3_position(&rotation, pos))
    }

    /* -------- rotation -------- */

    /// Replace the upper 3x3 block; translation is untouched.
    pub fn set_rotation_matrix3(&mut self, m: &Matrix3) {
        self.set_axis_x(&m.axis_x());
        self.set_axis_y(&m.axis_y());
        self.set_axis_z(&m.axis_z());
    }

    pub fn set_rotation_quaternion(&mut self, q: &Quaternion) {
        self.set_rotation_matrix3(&q.to_matrix3());
    }

    pub fn set_rotation_euler(&mut self, euler: &Euler, order: RotationOrder) {
        self.set_rotation_matrix3(&Matrix3::from_euler(euler, order));
    }

    /// Upper 3x3 block as is, scale included.
    pub fn to_matrix3(&self) -> Matrix3 {
        Matrix3::from_rows(self.axis_x(), self.axis_y(), self.axis_z())
    }

    /// Upper 3x3 block with each row normalized.
    fn rotation(&self) -> Matrix3 {
        Matrix3::from_rows(
            self.axis_x().normalize(),
            self.axis_y().normalize(),
            self.axis_z().normalize(),
        )
    }

    /// Orientation with the scale removed.
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_matrix3(&self.rotation())
    }

    pub fn to_euler(&self, order: RotationOrder) -> Euler {
        self.rotation().to_euler(order)
    }

    pub fn to_euler_checked(&self, order: RotationOrder) -> (Euler, bool) {
        self.rotation().to_euler_checked(order)
    }

    pub fn scale(&self) -> Vector3 {
        self.to_matrix3().scale()
    }

    pub fn set_scale(&mut self, scale: &Vector3) {
        let mut m = self.to_matrix3();
        m.set_scale(scale);
        self.set_rotation_matrix3(&m);
    }

    pub fn add_scale(&mut self, delta: &Vector3) {
        let scale = self.scale() + *delta;
        self.set_scale(&scale);
    }

    /* -------- linear algebra -------- */

    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[c * 4 + r] = self.data[r * 4 + c];
            }
        }
        Self::from_array(out)
    }

    pub fn transpose_in_place(&mut self) {
        *self = self.transpose();
    }

    /// 2x2 minors of the top two and bottom two rows.
    fn minors(&self) -> ([Real; 6], [Real; 6]) {
        let m = &self.data;
        let a = [
            m[0] * m[5] - m[1] * m[4],
            m[0] * m[6] - m[2] * m[4],
            m[0] * m[7] - m[3] * m[4],
            m[1] * m[6] - m[2] * m[5],
            m[1] * m[7] - m[3] * m[5],
            m[2] * m[7] - m[3] * m[6],
        ];
        let b = [
            m[8] * m[13] - m[9] * m[12],
            m[8] * m[14] - m[10] * m[12],
            m[8] * m[15] - m[11] * m[12],
            m[9] * m[14] - m[10] * m[13],
            m[9] * m[15] - m[11] * m[13],
            m[10] * m[15] - m[11] * m[14],
        ];
        (a, b)
    }

    /// Laplace expansion along the 2x2 minors.
    pub fn determinant(&self) -> Real {
        let (a, b) = self.minors();
        a[0] * b[5] - a[1] * b[4] + a[2] * b[3] + a[3] * b[2] - a[4] * b[1] + a[5] * b[0]
    }

    /// Full inverse; same degenerate policy as [`Matrix3::inverse`]
    /// (`|det| < EPSILON` returns the identity).
    pub fn inverse(&self) -> Self {
        let (a, b) = self.minors();
        let det = a[0] * b[5] - a[1] * b[4] + a[2] * b[3] + a[3] * b[2] - a[4] * b[1] + a[5] * b[0];
        if det.abs() < EPSILON {
            log::debug!("Matrix4::inverse: determinant {} is degenerate, returning identity", det);
            return Self::IDENTITY;
        }

        let m = &self.data;
        let adj = [
            m[5] * b[5] - m[6] * b[4] + m[7] * b[3],
            -m[1] * b[5] + m[2] * b[4] - m[3] * b[3],
            m[13] * a[5] - m[14] * a[4] + m[15] * a[3],
            -m[9] * a[5] + m[10] * a[4] - m[11] * a[3],
            -m[4] * b[5] + m[6] * b[2] - m[7] * b[1],
            m[0] * b[5] - m[2] * b[2] + m[3] * b[1],
            -m[12] * a[5] + m[14] * a[2] - m[15] * a[1],
            m[8] * a[5] - m[10] * a[2] + m[11] * a[1],
            m[4] * b[4] - m[5] * b[2] + m[7] * b[0],
            -m[0] * b[4] + m[1] * b[2] - m[3] * b[0],
            m[12] * a[4] - m[13] * a[2] + m[15] * a[0],
            -m[8] * a[4] + m[9] * a[2] - m[11] * a[0],
            -m[4] * b[3] + m[5] * b[1] - m[6] * b[0],
            m[0] * b[3] - m[1] * b[1] + m[2] * b[0],
            -m[12] * a[3] + m[13] * a[1] - m[14] * a[0],
            m[8] * a[3] - m[9] * a[1] + m[10] * a[0],
        ];
        let inv_det = 1.0 / det;
        Self::from_array(adj.map(|v| v * inv_det))
    }

    pub fn inverse_in_place(&mut self) {
        *self = self.inverse();
    }

    /// Gram-Schmidt on the upper 3x3 rows; translation is kept.
    pub fn orthogonal(&self) -> Self {
        let mut out = *self;
        out.set_rotation_matrix3(&self.to_matrix3().orthogonal());
        out
    }

    pub fn orthogonal_in_place(&mut self) {
        *self = self.orthogonal();
    }

    /// Apply the upper 3x3 block only (directions).
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        *v * self.to_matrix3()
    }

    /// Apply the full transform to a point, with homogeneous division when the
    /// resulting `w` is neither 1 nor 0.
    pub fn transform_point(&self, p: &Vector3) -> Vector3 {
        let h = Vector4::from_point(*p) * *self;
        if h.w == 1.0 || h.w == 0.0 {
            h.xyz()
        } else {
            h.xyz() * (1.0 / h.w)
        }
    }
}

impl TryFrom<&[Real]> for Matrix4 {
    type Error = GmathError;

    fn try_from(values: &[Real]) -> Result<Self, Self::Error> {
        check_len("Matrix4", 16, values.len())?;
        let mut data = [0.0; 16];
        data.copy_from_slice(values);
        Ok(Self::from_array(data))
    }
}

impl From<[Real; 16]> for Matrix4 {
    fn from(data: [Real; 16]) -> Self {
        Self::from_array(data)
    }
}

impl From<Matrix3> for Matrix4 {
    fn from(m: Matrix3) -> Self {
        Self::from_matrix3(&m)
    }
}

impl Index<usize> for Matrix4 {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        match check_index("Matrix4", index, 16) {
            Ok(i) => &self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<usize> for Matrix4 {
    fn index_mut(&mut self, index: usize) -> &mut Real {
        match check_index("Matrix4", index, 16) {
            Ok(i) => &mut self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = Real;

    fn index(&self, (row, col): (usize, usize)) -> &Real {
        match check_index("Matrix4 row", row, 4).and_then(|_| check_index("Matrix4 column", col, 4)) {
            Ok(_) => &self.data[row * 4 + col],
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Real {
        match check_index("Matrix4 row", row, 4).and_then(|_| check_index("Matrix4 column", col, 4)) {
            Ok(_) => &mut self.data[row * 4 + col],
            Err(e) => panic!("{}", e),
        }
    }
}

impl Display for Matrix4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = &self.data;
        write!(
            f,
            "Matrix4([{}, {}, {}, {}], [{}, {}, {}, {}], [{}, {}, {}, {}], [{}, {}, {}, {}])",
            m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7],
            m[8], m[9], m[10], m[11], m[12], m[13], m[14], m[15]
        )
    }
}

/* ------------------------------ arithmetic ------------------------------ */

impl Matrix4 {
    #[inline]
    fn map(self, f: impl Fn(Real) -> Real) -> Self {
        Self::from_array(self.data.map(f))
    }

    #[inline]
    fn zip(self, other: Self, f: impl Fn(Real, Real) -> Real) -> Self {
        let mut data = self.data;
        for (a, b) in data.iter_mut().zip(other.data.iter()) {
            *a = f(*a, *b);
        }
        Self::from_array(data)
    }
}

impl Add for Matrix4 { type Output = Self; fn add(self, r: Self) -> Self { self.zip(r, |a, b| a + b) } }
impl Sub for Matrix4 { type Output = Self; fn sub(self, r: Self) -> Self { self.zip(r, |a, b| a - b) } }
impl Add<Real> for Matrix4 { type Output = Self; fn add(self, s: Real) -> Self { self.map(|a| a + s) } }
impl Sub<Real> for Matrix4 { type Output = Self; fn sub(self, s: Real) -> Self { self.map(|a| a - s) } }
impl Mul<Real> for Matrix4 { type Output = Self; fn mul(self, s: Real) -> Self { self.map(|a| a * s) } }
impl AddAssign for Matrix4 { fn add_assign(&mut self, r: Self) { *self = *self + r; } }
impl SubAssign for Matrix4 { fn sub_assign(&mut self, r: Self) { *self = *self - r; } }
impl AddAssign<Real> for Matrix4 { fn add_assign(&mut self, s: Real) { *self = *self + s; } }
impl SubAssign<Real> for Matrix4 { fn sub_assign(&mut self, s: Real) { *self = *self - s; } }
impl MulAssign<Real> for Matrix4 { fn mul_assign(&mut self, s: Real) { *self = *self * s; } }

/// Division by exactly zero fills the matrix with NaN.
impl Div<Real> for Matrix4 {
    type Output = Self;
    fn div(self, s: Real) -> Self {
        if s == 0.0 {
            return self.map(|_| Real::NAN);
        }
        self.map(|a| a / s)
    }
}

impl DivAssign<Real> for Matrix4 { fn div_assign(&mut self, s: Real) { *self = *self / s; } }

impl Mul for Matrix4 {
    type Output = Self;
    fn mul(self, r: Self) -> Self {
        let (a, b) = (&self.data, &r.data);
        let mut out = [0.0; 16];
        for i in 0..4 {
            for j in 0..4 {
                out[i * 4 + j] = a[i * 4] * b[j]
                    + a[i * 4 + 1] * b[4 + j]
                    + a[i * 4 + 2] * b[8 + j]
                    + a[i * 4 + 3] * b[12 + j];
            }
        }
        Self::from_array(out)
    }
}

impl MulAssign for Matrix4 { fn mul_assign(&mut self, r: Self) { *self = *self * r; } }

impl Mul<Matrix4> for Vector4 {
    type Output = Vector4;
    fn mul(self, m: Matrix4) -> Vector4 {
        let d = &m.data;
        let v = self.to_array();
        let col = |c: usize| v[0] * d[c] + v[1] * d[4 + c] + v[2] * d[8 + c] + v[3] * d[12 + c];
        Vector4::new(col(0), col(1), col(2), col(3))
    }
}

/// Point transform, see [`Matrix4::transform_point`].
impl Mul<Matrix4> for Vector3 {
    type Output = Vector3;
    fn mul(self, m: Matrix4) -> Vector3 {
        m.transform_point(&self)
    }
}

impl MulAssign<Matrix4> for Vector3 { fn mul_assign(&mut self, m: Matrix4) { *self = *self * m; } }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::HALF_PI;

    fn sample() -> Matrix4 {
        let mut m = Matrix4::from_euler(&Euler::degrees(20.0, -35.0, 70.0), RotationOrder::ZXY);
        m.set_scale(&Vector3::splat(2.0));
        m.set_position(&Vector3::new(1.0, -2.0, 3.0));
        m
    }

    #[test]
    fn translation_lives_in_row_three() {
        let mut m = Matrix4::IDENTITY;
        m.set_position(&Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m[12], 1.0);
        assert_eq!(m[(3, 2)], 3.0);
        assert_eq!(Vector3::ZERO * m, Vector3::new(1.0, 2.0, 3.0));
        m.add_position(&Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(m.position(), Vector3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn translate_moves_along_local_axes() {
        let mut m = Matrix4::from_axis_angle(&Vector3::ZAXIS, HALF_PI);
        m.translate(&Vector3::new(1.0, 0.0, 0.0));
        // local X is world Y after a quarter turn about Z
        assert_eq!(m.position(), Vector3::YAXIS);
    }

    #[test]
    fn inverse_and_determinant() {
        let m = sample();
        assert!((m.determinant() - 8.0).abs() < 1e-9);
        assert_eq!(m * m.inverse(), Matrix4::IDENTITY);
        let p = Vector3::new(0.5, 7.0, -1.0);
        assert_eq!((p * m) * m.inverse(), p);

        let mut flat = Matrix4::IDENTITY;
        flat.set_scale(&Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(flat.inverse(), Matrix4::IDENTITY);
    }

    #[test]
    fn products_apply_left_first() {
        let a = Matrix4::from_axis_angle(&Vector3::ZAXIS, HALF_PI);
        let mut b = Matrix4::IDENTITY;
        b.set_position(&Vector3::new(10.0, 0.0, 0.0));
        // rotate X onto Y, then translate
        assert_eq!(Vector3::XAXIS * (a * b), Vector3::new(10.0, 1.0, 0.0));
    }

    #[test]
    fn rotation_accessors_remove_scale() {
        let m = sample();
        let expected = Quaternion::from_euler(&Euler::degrees(20.0, -35.0, 70.0), RotationOrder::ZXY);
        let q = m.to_quaternion();
        assert!(q == expected || q == -expected);
        assert_eq!(m.scale(), Vector3::splat(2.0));
        assert_eq!(
            m.to_euler(RotationOrder::ZXY).to_degrees(),
            Euler::degrees(20.0, -35.0, 70.0)
        );
        assert_eq!(Quaternion::from_matrix4(&m), q);
    }

    #[test]
    fn set_rotation_keeps_translation() {
        let mut m = sample();
        m.set_rotation_quaternion(&Quaternion::IDENTITY);
        assert_eq!(m.to_matrix3(), Matrix3::IDENTITY);
        assert_eq!(m.position(), Vector3::new(1.0, -2.0, 3.0));
        m.set_rotation_euler(&Euler::radians(0.0, 0.0, HALF_PI), RotationOrder::XYZ);
        assert_eq!(m.axis_x(), Vector3::YAXIS);
    }

    #[test]
    fn look_at_from_position() {
        let pos = Vector3::new(1.0, 1.0, 1.0);
        let m = Matrix4::look_at(&pos, &Vector3::new(1.0, 1.0, 5.0), &Vector3::YAXIS, Axis::PosZ, Axis::PosY).unwrap();
        assert_eq!(m.to_matrix3(), Matrix3::IDENTITY);
        assert_eq!(m.position(), pos);
        assert!(Matrix4::look_at(&pos, &Vector3::ZERO, &Vector3::YAXIS, Axis::PosZ, Axis::NegZ).is_err());
    }

    #[test]
    fn orthogonal_keeps_position() {
        let mut m = sample();
        m[1] += 0.05;
        let o = m.orthogonal();
        assert_eq!(o.position(), m.position());
        assert!((o.to_matrix3().determinant() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rows_and_bounds() {
        let mut m = Matrix4::IDENTITY;
        m.set_row4(3, &Vector4::new(1.0, 2.0, 3.0, 1.0)).unwrap();
        assert_eq!(m.row(3), Ok(Vector3::new(1.0, 2.0, 3.0)));
        assert!(m.row(4).is_err());
        assert!(m.get(16).is_err());
        assert!(m.get_rc(0, 4).is_err());
        assert_eq!(m.transpose()[(2, 3)], 3.0);
        assert!((m / 0.0).to_array().iter().all(|v| v.is_nan()));
        let values: &[Real] = &[0.0; 15];
        assert!(Matrix4::try_from(values).is_err());
    }
}
