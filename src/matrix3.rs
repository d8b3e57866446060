//! Row-major 3x3 matrix and the rotation conversion core.
//!
//! Vectors are rows multiplied on the left (`v * M`), so the rows of a rotation
//! matrix are the rotated X, Y and Z axes and `A * B` applies `A` first.
//! Storage is `data[row * 3 + col]`.

use crate::axis::{Axis, CartesianPlane, RotationOrder};
use crate::errors::{GmathError, check_index, check_len};
use crate::euler::Euler;
use crate::float_types::{EPSILON, Real};
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;
use core::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};
use std::fmt::Display;

#[derive(Debug, Clone, Copy)]
pub struct Matrix3 {
    data: [Real; 9],
}

crate::traits::impl_tolerant_eq!(Matrix3, to_array);

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3::from_array([
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
    ]);

    /// Build from nine values in row-major order.
    #[inline]
    pub const fn from_array(data: [Real; 9]) -> Self {
        Self { data }
    }

    #[inline]
    pub const fn from_rows(x: Vector3, y: Vector3, z: Vector3) -> Self {
        Self::from_array([x.x, x.y, x.z, y.x, y.y, y.z, z.x, z.y, z.z])
    }

    #[inline]
    pub const fn to_array(&self) -> [Real; 9] {
        self.data
    }

    #[inline]
    pub const fn data(&self) -> &[Real; 9] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [Real; 9] {
        &mut self.data
    }

    pub fn set_to_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Checked access by flat row-major index.
    pub fn get(&self, index: usize) -> Result<Real, GmathError> {
        check_index("Matrix3", index, 9).map(|i| self.data[i])
    }

    /// Checked access by row and column.
    pub fn get_rc(&self, row: usize, col: usize) -> Result<Real, GmathError> {
        let row = check_index("Matrix3 row", row, 3)?;
        let col = check_index("Matrix3 column", col, 3)?;
        Ok(self.data[row * 3 + col])
    }

    pub fn set_rc(&mut self, row: usize, col: usize, value: Real) -> Result<(), GmathError> {
        let row = check_index("Matrix3 row", row, 3)?;
        let col = check_index("Matrix3 column", col, 3)?;
        self.data[row * 3 + col] = value;
        Ok(())
    }

    pub fn row(&self, i: usize) -> Result<Vector3, GmathError> {
        let i = check_index("Matrix3 row", i, 3)?;
        Ok(self.row_unchecked(i))
    }

    pub fn set_row(&mut self, i: usize, v: &Vector3) -> Result<(), GmathError> {
        let i = check_index("Matrix3 row", i, 3)?;
        self.set_row_unchecked(i, v);
        Ok(())
    }

    #[inline]
    fn row_unchecked(&self, i: usize) -> Vector3 {
        Vector3::new(self.data[i * 3], self.data[i * 3 + 1], self.data[i * 3 + 2])
    }

    #[inline]
    fn set_row_unchecked(&mut self, i: usize, v: &Vector3) {
        self.data[i * 3] = v.x;
        self.data[i * 3 + 1] = v.y;
        self.data[i * 3 + 2] = v.z;
    }

    #[inline]
    pub fn axis_x(&self) -> Vector3 {
        self.row_unchecked(0)
    }

    #[inline]
    pub fn axis_y(&self) -> Vector3 {
        self.row_unchecked(1)
    }

    #[inline]
    pub fn axis_z(&self) -> Vector3 {
        self.row_unchecked(2)
    }

    pub fn set_axis_x(&mut self, v: &Vector3) {
        self.set_row_unchecked(0, v);
    }

    pub fn set_axis_y(&mut self, v: &Vector3) {
        self.set_row_unchecked(1, v);
    }

    pub fn set_axis_z(&mut self, v: &Vector3) {
        self.set_row_unchecked(2, v);
    }

    /// The row matching `axis`, negated for the negative axes.
    pub fn axis(&self, axis: Axis) -> Vector3 {
        let row = self.row_unchecked(axis.index());
        if axis.is_negative() { -row } else { row }
    }

    /* -------- elementary rotations (radians) -------- */

    pub fn rotation_x(angle: Real) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_array([
            1.0, 0.0, 0.0,
            0.0,   c,   s,
            0.0,  -s,   c,
        ])
    }

    pub fn rotation_y(angle: Real) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_array([
              c, 0.0,  -s,
            0.0, 1.0, 0.0,
              s, 0.0,   c,
        ])
    }

    pub fn rotation_z(angle: Real) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_array([
              c,   s, 0.0,
             -s,   c, 0.0,
            0.0, 0.0, 1.0,
        ])
    }

    fn rotation_about(axis_index: usize, angle: Real) -> Self {
        match axis_index {
            0 => Self::rotation_x(angle),
            1 => Self::rotation_y(angle),
            _ => Self::rotation_z(angle),
        }
    }

    /* -------- rotation conversion core -------- */

    /// Rotation from Euler angles, in any unit, composed in `order`.
    pub fn from_euler(euler: &Euler, order: RotationOrder) -> Self {
        let e = euler.to_radians();
        Self::from_euler_angles(e.x, e.y, e.z, order)
    }

    /// Rotation from angles in radians about X, Y and Z.
    ///
    /// `XYZ` builds `X * (Y * Z)`: the X rotation is applied first.
    pub fn from_euler_angles(x: Real, y: Real, z: Real, order: RotationOrder) -> Self {
        let angles = [x, y, z];
        let [a, b, c] = order.axes();
        Self::rotation_about(a, angles[a])
            * (Self::rotation_about(b, angles[b]) * Self::rotation_about(c, angles[c]))
    }

    /// Decompose into Euler angles (radians) for `order`.
    /// See [`Matrix3::to_euler_checked`] for the gimbal lock policy.
    pub fn to_euler(&self, order: RotationOrder) -> Euler {
        self.to_euler_checked(order).0
    }

    /// **Mathematical Foundation: closed-form Euler extraction**
    ///
    /// For an order applying axes `i`, `j`, `k` (in that order) with parity
    /// `s = +1` for the cyclic orders and `-1` otherwise:
    /// ```text
    /// θj = atan2(−s·m[i][k], hypot(m[i][i], m[i][j]))
    /// θi = atan2(s·m[j][k], m[k][k])
    /// θk = atan2(s·m[i][j], m[i][i])
    /// ```
    /// When `cos θj` drops below `EPSILON` the first and last rotations
    /// share an axis (gimbal lock) and only their combination is known. The
    /// last angle is then fixed to 0, the first is read from the remaining
    /// 2x2 block, and the returned flag is `false`. The flag is `true` for a
    /// regular, unique decomposition.
    pub fn to_euler_checked(&self, order: RotationOrder) -> (Euler, bool) {
        let [i, j, k] = order.axes();
        let s: Real = if order.is_even() { 1.0 } else { -1.0 };
        let m = |r: usize, c: usize| self.data[r * 3 + c];

        let mut angles = [0.0; 3];
        let sin_middle = -s * m(i, k);
        // |cos θj|, read from the first row so it stays accurate near ±90°
        let cos_middle = m(i, i).hypot(m(i, j));
        angles[j] = sin_middle.atan2(cos_middle);

        let regular = cos_middle >= EPSILON;
        if regular {
            angles[i] = (s * m(j, k)).atan2(m(k, k));
            angles[k] = (s * m(i, j)).atan2(m(i, i));
        } else {
            log::debug!("Matrix3::to_euler: gimbal lock for order {}, last angle fixed to 0", order);
            angles[k] = 0.0;
            angles[i] = (sin_middle.signum() * m(j, i)).atan2(m(j, j));
        }

        (Euler::radians(angles[0], angles[1], angles[2]), regular)
    }

    /// Delegates to [`Quaternion::to_matrix3`]; `q` must be unit length.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        q.to_matrix3()
    }

    /// Delegates to [`Quaternion::from_matrix3`].
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_matrix3(self)
    }

    /// **Mathematical Foundation: Rodrigues' rotation formula**
    ///
    /// With `axis = (a, b, c)` of any non-zero length `l`:
    /// ```text
    /// k2 = cos θ,  k1 = (1 − k2) / l²,  k3 = sin θ / l
    /// M = | k1·a² + k2     k1·ab + k3·c   k1·ac − k3·b |
    ///     | k1·ab − k3·c   k1·b² + k2     k1·bc + k3·a |
    ///     | k1·ac + k3·b   k1·bc − k3·a   k1·c² + k2   |
    /// ```
    /// A zero-length axis yields the identity.
    pub fn from_axis_angle(axis: &Vector3, angle: Real) -> Self {
        let length2 = axis.squared_length();
        if length2 < EPSILON * EPSILON {
            return Self::IDENTITY;
        }
        let (a, b, c) = (axis.x, axis.y, axis.z);
        let (sin, k2) = angle.sin_cos();
        let k1 = (1.0 - k2) / length2;
        let k3 = sin / length2.sqrt();

        Self::from_array([
            k1 * a * a + k2,     k1 * a * b + k3 * c, k1 * a * c - k3 * b,
            k1 * a * b - k3 * c, k1 * b * b + k2,     k1 * b * c + k3 * a,
            k1 * a * c + k3 * b, k1 * b * c - k3 * a, k1 * c * c + k2,
        ])
    }

    /// Minimal rotation taking the direction of `from` onto the direction of `to`,
    /// i.e. `from.normalize() * M == to.normalize()`.
    ///
    /// Möller & Hughes, "Efficiently Building a Matrix to Rotate One Vector to
    /// Another". Nearly parallel or opposite inputs go through two Householder
    /// reflections, the general case through the closed form. A zero-length
    /// input has no direction and yields the identity.
    pub fn from_vector_to_vector(from: &Vector3, to: &Vector3) -> Self {
        if from.squared_length() < EPSILON * EPSILON || to.squared_length() < EPSILON * EPSILON {
            return Self::IDENTITY;
        }
        let f = from.normalize();
        let t = to.normalize();
        let e = f.dot(&t);

        if e.abs() > 1.0 - EPSILON {
            // reflect about the coordinate axis least aligned with `from`
            let abs = Vector3::new(f.x.abs(), f.y.abs(), f.z.abs());
            let x = if abs.x < abs.y {
                if abs.x < abs.z { Vector3::XAXIS } else { Vector3::ZAXIS }
            } else if abs.y < abs.z {
                Vector3::YAXIS
            } else {
                Vector3::ZAXIS
            };

            let u = x - f;
            let v = x - t;
            let c1 = 2.0 / u.dot(&u);
            let c2 = 2.0 / v.dot(&v);
            let c3 = c1 * c2 * u.dot(&v);

            let (u, v) = (u.to_array(), v.to_array());
            let mut data = [0.0; 9];
            for i in 0..3 {
                for j in 0..3 {
                    data[i * 3 + j] = -c1 * u[i] * u[j] - c2 * v[i] * v[j] + c3 * u[i] * v[j];
                }
                data[i * 3 + i] += 1.0;
            }
            return Self::from_array(data);
        }

        let v = f.cross(&t);
        let h = 1.0 / (1.0 + e);
        let hvx = h * v.x;
        let hvz = h * v.z;
        let hvxy = hvx * v.y;
        let hvxz = hvx * v.z;
        let hvyz = hvz * v.y;

        Self::from_array([
            e + hvx * v.x, hvxy + v.z,    hvxz - v.y,
            hvxy - v.z,    e + h * v.y * v.y, hvyz + v.x,
            hvxz + v.y,    hvyz - v.x,    e + hvz * v.z,
        ])
    }

    /// Orientation whose `primary` axis points along `point_at` and whose
    /// `secondary` axis lies in the plane of `point_at` and `normal`, on the
    /// side of `normal`.
    ///
    /// The result is orthonormal and right-handed for every valid pair. `primary`
    /// and `secondary` must name different base axes, otherwise
    /// [`GmathError::InvalidAxisPair`] is returned.
    ///
    /// # Example
    /// ```rust
    /// # use gmath::{Axis, Matrix3, Vector3};
    /// let m = Matrix3::look_at(&Vector3::new(0.0, 0.0, 5.0), &Vector3::YAXIS, Axis::PosZ, Axis::PosY).unwrap();
    /// assert_eq!(m, Matrix3::IDENTITY);
    /// assert!(Matrix3::look_at(&Vector3::XAXIS, &Vector3::YAXIS, Axis::PosX, Axis::NegX).is_err());
    /// ```
    pub fn look_at(point_at: &Vector3, normal: &Vector3, primary: Axis, secondary: Axis) -> Result<Self, GmathError> {
        if primary.index() == secondary.index() {
            return Err(GmathError::InvalidAxisPair { primary, secondary });
        }
        Ok(Self::look_at_unchecked(point_at, normal, primary, secondary))
    }

    /// `look_at` for an axis pair already known to be valid.
    pub(crate) fn look_at_unchecked(point_at: &Vector3, normal: &Vector3, primary: Axis, secondary: Axis) -> Self {
        let mut p = point_at.normalize();
        let mut t = normal.cross_normalize(&p);
        if t.squared_length() < EPSILON {
            log::warn!("Matrix3::look_at: aim and up vectors are parallel, the frame is degenerate");
        }
        let mut s = p.cross_normalize(&t);

        match (primary.is_negative(), secondary.is_negative()) {
            (true, false) => {
                p = -p;
                t = -t;
            },
            (false, true) => {
                s = -s;
                t = -t;
            },
            (true, true) => {
                p = -p;
                s = -s;
            },
            (false, false) => {},
        }

        match (primary.index(), secondary.index()) {
            (0, 1) => Self::from_rows(p, s, -t),
            (0, _) => Self::from_rows(p, t, s),
            (1, 0) => Self::from_rows(s, p, t),
            (1, _) => Self::from_rows(-t, p, s),
            (_, 0) => Self::from_rows(s, -t, p),
            _ => Self::from_rows(t, s, p),
        }
    }

    /// Mirror this orientation through the plane with `normal` (through the origin).
    ///
    /// The `primary` and `secondary` axes are reflected exactly; the remaining
    /// axis is rebuilt so the frame stays right-handed. Scale is dropped.
    pub fn mirror(&self, normal: &Vector3, primary: Axis, secondary: Axis) -> Result<Self, GmathError> {
        let p = self.axis(primary).mirror(normal);
        let s = self.axis(secondary).mirror(normal);
        Self::look_at(&p, &s, primary, secondary)
    }

    pub fn mirror_plane(&self, plane: CartesianPlane) -> Self {
        let (primary, secondary) = plane.mirror_axes();
        let normal = plane.normal();
        let p = self.axis(primary).mirror(&normal);
        let s = self.axis(secondary).mirror(&normal);
        Self::look_at_unchecked(&p, &s, primary, secondary)
    }

    /* -------- linear algebra -------- */

    pub fn transpose(&self) -> Self {
        let m = &self.data;
        Self::from_array([
            m[0], m[3], m[6],
            m[1], m[4], m[7],
            m[2], m[5], m[8],
        ])
    }

    pub fn transpose_in_place(&mut self) {
        *self = self.transpose();
    }

    pub fn determinant(&self) -> Real {
        let m = &self.data;
        m[0] * (m[4] * m[8] - m[5] * m[7])
            - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Inverse by cofactors.
    ///
    /// A matrix with `|det| < EPSILON` has no usable inverse; the identity is
    /// returned instead so a pipeline keeps running.
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det.abs() < EPSILON {
            log::debug!("Matrix3::inverse: determinant {} is degenerate, returning identity", det);
            return Self::IDENTITY;
        }
        let m = &self.data;
        let c00 = m[4] * m[8] - m[5] * m[7];
        let c01 = -(m[3] * m[8] - m[5] * m[6]);
        let c02 = m[3] * m[7] - m[4] * m[6];

        let c10 = -(m[1] * m[8] - m[2] * m[7]);
        let c11 = m[0] * m[8] - m[2] * m[6];
        let c12 = -(m[0] * m[7] - m[1] * m[6]);

        let c20 = m[1] * m[5] - m[2] * m[4];
        let c21 = -(m[0] * m[5] - m[2] * m[3]);
        let c22 = m[0] * m[4] - m[1] * m[3];

        let inv_det = 1.0 / det;
        // adjugate = transposed cofactors
        Self::from_array([
            c00 * inv_det, c10 * inv_det, c20 * inv_det,
            c01 * inv_det, c11 * inv_det, c21 * inv_det,
            c02 * inv_det, c12 * inv_det, c22 * inv_det,
        ])
    }

    pub fn inverse_in_place(&mut self) {
        *self = self.inverse();
    }

    /// Gram-Schmidt on the rows: row 0 is normalized, row 1 loses its
    /// component along row 0, row 2 its components along both.
    /// Undefined when row 0 is (nearly) zero.
    pub fn orthogonal(&self) -> Self {
        let x = self.axis_x().normalize();
        let y = self.axis_y();
        let y = (y - x * x.dot(&y)).normalize();
        let z = self.axis_z();
        let z = (z - x * x.dot(&z) - y * y.dot(&z)).normalize();
        Self::from_rows(x, y, z)
    }

    pub fn orthogonal_in_place(&mut self) {
        *self = self.orthogonal();
    }

    /// Lengths of the three rows.
    pub fn scale(&self) -> Vector3 {
        Vector3::new(self.axis_x().length(), self.axis_y().length(), self.axis_z().length())
    }

    /// Rescale the rows to the given lengths, keeping their directions.
    pub fn set_scale(&mut self, scale: &Vector3) {
        let x = self.axis_x().normalize() * scale.x;
        let y = self.axis_y().normalize() * scale.y;
        let z = self.axis_z().normalize() * scale.z;
        *self = Self::from_rows(x, y, z);
    }

    /// Grow each row length by the matching component of `delta`.
    pub fn add_scale(&mut self, delta: &Vector3) {
        let scale = self.scale() + *delta;
        self.set_scale(&scale);
    }
}

impl TryFrom<&[Real]> for Matrix3 {
    type Error = GmathError;

    fn try_from(values: &[Real]) -> Result<Self, Self::Error> {
        check_len("Matrix3", 9, values.len())?;
        let mut data = [0.0; 9];
        data.copy_from_slice(values);
        Ok(Self::from_array(data))
    }
}

impl From<[Real; 9]> for Matrix3 {
    fn from(data: [Real; 9]) -> Self {
        Self::from_array(data)
    }
}

impl Index<usize> for Matrix3 {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        match check_index("Matrix3", index, 9) {
            Ok(i) => &self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<usize> for Matrix3 {
    fn index_mut(&mut self, index: usize) -> &mut Real {
        match check_index("Matrix3", index, 9) {
            Ok(i) => &mut self.data[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl Index<(usize, usize)> for Matrix3 {
    type Output = Real;

    fn index(&self, (row, col): (usize, usize)) -> &Real {
        match check_index("Matrix3 row", row, 3).and_then(|_| check_index("Matrix3 column", col, 3)) {
            Ok(_) => &self.data[row * 3 + col],
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix3 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Real {
        match check_index("Matrix3 row", row, 3).and_then(|_| check_index("Matrix3 column", col, 3)) {
            Ok(_) => &mut self.data[row * 3 + col],
            Err(e) => panic!("{}", e),
        }
    }
}

impl Display for Matrix3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = &self.data;
        write!(
            f,
            "Matrix3([{}, {}, {}], [{}, {}, {}], [{}, {}, {}])",
            m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8]
        )
    }
}

/* ------------------------------ arithmetic ------------------------------ */

impl Matrix3 {
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

impl Add for Matrix3 { type Output = Self; fn add(self, r: Self) -> Self { self.zip(r, |a, b| a + b) } }
impl Sub for Matrix3 { type Output = Self; fn sub(self, r: Self) -> Self { self.zip(r, |a, b| a - b) } }
impl Add<Real> for Matrix3 { type Output = Self; fn add(self, s: Real) -> Self { self.map(|a| a + s) } }
impl Sub<Real> for Matrix3 { type Output = Self; fn sub(self, s: Real) -> Self { self.map(|a| a - s) } }
impl Mul<Real> for Matrix3 { type Output = Self; fn mul(self, s: Real) -> Self { self.map(|a| a * s) } }
impl AddAssign for Matrix3 { fn add_assign(&mut self, r: Self) { *self = *self + r; } }
impl SubAssign for Matrix3 { fn sub_assign(&mut self, r: Self) { *self = *self - r; } }
impl AddAssign<Real> for Matrix3 { fn add_assign(&mut self, s: Real) { *self = *self + s; } }
impl SubAssign<Real> for Matrix3 { fn sub_assign(&mut self, s: Real) { *self = *self - s; } }
impl MulAssign<Real> for Matrix3 { fn mul_assign(&mut self, s: Real) { *self = *self * s; } }

/// Division by exactly zero fills the matrix with NaN.
impl Div<Real> for Matrix3 {
    type Output = Self;
    fn div(self, s: Real) -> Self {
        if s == 0.0 {
            return self.map(|_| Real::NAN);
        }
        self.map(|a| a / s)
    }
}

impl DivAssign<Real> for Matrix3 { fn div_assign(&mut self, s: Real) { *self = *self / s; } }

impl Mul for Matrix3 {
    type Output = Self;
    fn mul(self, r: Self) -> Self {
        let (a, b) = (&self.data, &r.data);
        let mut out = [0.0; 9];
        for i in 0..3 {
            for j in 0..3 {
                out[i * 3 + j] = a[i * 3] * b[j] + a[i * 3 + 1] * b[3 + j] + a[i * 3 + 2] * b[6 + j];
            }
        }
        Self::from_array(out)
    }
}

impl MulAssign for Matrix3 { fn mul_assign(&mut self, r: Self) { *self = *self * r; } }

/// Row vector times matrix.
impl Mul<Matrix3> for Vector3 {
    type Output = Vector3;
    fn mul(self, m: Matrix3) -> Vector3 {
        let d = &m.data;
        Vector3::new(
            self.x * d[0] + self.y * d[3] + self.z * d[6],
            self.x * d[1] + self.y * d[4] + self.z * d[7],
            self.x * d[2] + self.y * d[5] + self.z * d[8],
        )
    }
}

impl MulAssign<Matrix3> for Vector3 { fn mul_assign(&mut self, m: Matrix3) { *self = *self * m; } }
