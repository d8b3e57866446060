//! Conversions to and from [`nalgebra`] types.
//!
//! nalgebra multiplies column vectors (`M * v`) while this crate multiplies
//! row vectors (`v * M`), so every matrix conversion transposes. Quaternions
//! need no such care: both sides use Hamilton products and rotate with
//! `q·v·q*`.

use crate::float_types::Real;
use crate::matrix3::Matrix3;
use crate::matrix4::Matrix4;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;
use crate::vector4::Vector4;

impl From<nalgebra::Vector3<Real>> for Vector3 {
    fn from(v: nalgebra::Vector3<Real>) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<Real> {
    fn from(v: Vector3) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Point3<Real>> for Vector3 {
    fn from(p: nalgebra::Point3<Real>) -> Self {
        Vector3::new(p.x, p.y, p.z)
    }
}

impl From<Vector3> for nalgebra::Point3<Real> {
    fn from(v: Vector3) -> Self {
        nalgebra::Point3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector4<Real>> for Vector4 {
    fn from(v: nalgebra::Vector4<Real>) -> Self {
        Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for nalgebra::Vector4<Real> {
    fn from(v: Vector4) -> Self {
        nalgebra::Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<nalgebra::UnitQuaternion<Real>> for Quaternion {
    fn from(q: nalgebra::UnitQuaternion<Real>) -> Self {
        // coords are stored as (i, j, k, w)
        let c = &q.quaternion().coords;
        Quaternion::new(c[0], c[1], c[2], c[3])
    }
}

/// Normalizes on the way in, nalgebra's unit quaternion demands it.
impl From<Quaternion> for nalgebra::UnitQuaternion<Real> {
    fn from(q: Quaternion) -> Self {
        nalgebra::UnitQuaternion::new_normalize(nalgebra::Quaternion::new(q.w, q.x, q.y, q.z))
    }
}

impl From<nalgebra::Matrix3<Real>> for Matrix3 {
    fn from(m: nalgebra::Matrix3<Real>) -> Self {
        // column-major storage of the transpose is our row-major layout
        let mut data = [0.0; 9];
        data.copy_from_slice(m.as_slice());
        Matrix3::from_array(data)
    }
}

impl From<Matrix3> for nalgebra::Matrix3<Real> {
    fn from(m: Matrix3) -> Self {
        nalgebra::Matrix3::from_column_slice(m.data())
    }
}

impl From<nalgebra::Matrix4<Real>> for Matrix4 {
    fn from(m: nalgebra::Matrix4<Real>) -> Self {
        let mut data = [0.0; 16];
        data.copy_from_slice(m.as_slice());
        Matrix4::from_array(data)
    }
}

impl From<Matrix4> for nalgebra::Matrix4<Real> {
    fn from(m: Matrix4) -> Self {
        nalgebra::Matrix4::from_column_slice(m.data())
    }
}
