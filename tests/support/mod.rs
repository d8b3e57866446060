//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use gmath::{Euler, Matrix3, Quaternion, Real, RotationOrder, Vector3, float_types::PI};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Deterministic generator so failures reproduce.
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x6d61_7468)
}

/// Euler angles in radians, each within `(-limit, limit)`.
pub fn random_euler(rng: &mut StdRng, limit: Real) -> Euler {
    Euler::radians(
        rng.gen_range(-limit..limit),
        rng.gen_range(-limit..limit),
        rng.gen_range(-limit..limit),
    )
}

/// Euler angles whose middle rotation stays clear of ±90°, so decomposing the
/// resulting matrix in `order` is unambiguous.
pub fn random_non_gimbal_euler(rng: &mut StdRng, order: RotationOrder) -> Euler {
    let mut angles = [
        rng.gen_range(-PI * 0.95..PI * 0.95),
        rng.gen_range(-PI * 0.95..PI * 0.95),
        rng.gen_range(-PI * 0.95..PI * 0.95),
    ];
    angles[order.axes()[1]] = rng.gen_range(-1.4..1.4);
    Euler::radians(angles[0], angles[1], angles[2])
}

pub fn random_unit_vector(rng: &mut StdRng) -> Vector3 {
    loop {
        let v = Vector3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        let length = v.length();
        if length > 0.1 && length <= 1.0 {
            return v * (1.0 / length);
        }
    }
}

pub fn random_quaternion(rng: &mut StdRng) -> Quaternion {
    Quaternion::from_axis_angle(&random_unit_vector(rng), rng.gen_range(-PI..PI))
}

/// `true` when the rows are unit length, mutually orthogonal and right-handed.
pub fn is_rotation(m: &Matrix3) -> bool {
    let (x, y, z) = (m.axis_x(), m.axis_y(), m.axis_z());
    approx_eq(x.length(), 1.0, 1e-9)
        && approx_eq(y.length(), 1.0, 1e-9)
        && approx_eq(z.length(), 1.0, 1e-9)
        && approx_eq(x.dot(&y), 0.0, 1e-9)
        && approx_eq(y.dot(&z), 0.0, 1e-9)
        && approx_eq(z.dot(&x), 0.0, 1e-9)
        && approx_eq(m.determinant(), 1.0, 1e-9)
}

/// Quaternions `q` and `-q` describe the same rotation.
pub fn same_rotation(a: &Quaternion, b: &Quaternion) -> bool {
    a == b || *a == -*b
}
