mod support;

use gmath::{
    AlmostEqual, Axis, Euler, Matrix3, Matrix4, Quaternion, RotationOrder, Vector3,
    float_types::{HALF_PI, PI},
};
use support::{approx_eq, is_rotation, random_non_gimbal_euler, random_quaternion, rng, same_rotation};

#[test]
fn forty_five_degrees_about_y() {
    let m = Matrix3::from_euler(&Euler::degrees(0.0, 45.0, 0.0), RotationOrder::XYZ);
    let expected = Matrix3::from_array([
        0.707107, 0.0, -0.707107,
        0.0, 1.0, 0.0,
        0.707107, 0.0, 0.707107,
    ]);
    assert!(m.almost_equal_with(&expected, 1e-6));
    approx::assert_relative_eq!(m, Matrix3::rotation_y(PI / 4.0));
}

#[test]
fn euler_round_trip_for_every_order() {
    let mut rng = rng();
    for order in RotationOrder::ALL {
        for _ in 0..200 {
            let e = random_non_gimbal_euler(&mut rng, order);
            let m = Matrix3::from_euler(&e, order);
            let (back, regular) = m.to_euler_checked(order);
            assert!(regular, "{} {}", order, e);
            assert_eq!(back, e, "order {}", order);

            let q = Quaternion::from_euler(&e, order);
            assert_eq!(q.to_euler(order), e, "order {}", order);
        }
    }
}

#[test]
fn degrees_and_radians_build_the_same_rotation() {
    for order in RotationOrder::ALL {
        let deg = Matrix3::from_euler(&Euler::degrees(30.0, -60.0, 120.0), order);
        let rad = Matrix3::from_euler(&Euler::degrees(30.0, -60.0, 120.0).to_radians(), order);
        assert_eq!(deg, rad);
        // conversions always hand back radians
        assert_eq!(deg.to_euler(order).unit(), gmath::AngleUnit::Radians);
    }
}

#[test]
fn quaternion_and_matrix_euler_construction_agree() {
    let mut rng = rng();
    for order in RotationOrder::ALL {
        for _ in 0..50 {
            let e = support::random_euler(&mut rng, PI);
            let from_matrix = Matrix3::from_euler(&e, order);
            let from_quaternion = Quaternion::from_euler(&e, order).to_matrix3();
            assert_eq!(from_matrix, from_quaternion, "order {}", order);
        }
    }
}

#[test]
fn euler_order_composition() {
    let (x, y, z) = (0.4, -0.7, 1.3);
    let (mx, my, mz) = (Matrix3::rotation_x(x), Matrix3::rotation_y(y), Matrix3::rotation_z(z));
    assert_eq!(Matrix3::from_euler_angles(x, y, z, RotationOrder::XYZ), mx * my * mz);
    assert_eq!(Matrix3::from_euler_angles(x, y, z, RotationOrder::ZYX), mz * my * mx);
    assert_eq!(Matrix3::from_euler_angles(x, y, z, RotationOrder::YZX), my * mz * mx);
    // XYZ applies X first: a vector rotated by the matrix equals three sequential rotations
    let v = Vector3::new(1.0, 2.0, 3.0);
    assert_eq!(v * Matrix3::from_euler_angles(x, y, z, RotationOrder::XYZ), ((v * mx) * my) * mz);
}

#[test]
fn gimbal_lock_is_flagged_and_still_reconstructs() {
    for order in RotationOrder::ALL {
        let mut angles = [0.3, 0.5, -0.8];
        angles[order.axes()[1]] = HALF_PI;
        let e = Euler::radians(angles[0], angles[1], angles[2]);
        let m = Matrix3::from_euler(&e, order);

        let (locked, regular) = m.to_euler_checked(order);
        assert!(!regular, "order {}", order);
        assert_eq!(locked[order.axes()[2]], 0.0);
        assert!(approx_eq(locked[order.axes()[1]], HALF_PI, 1e-6));
        assert!(Matrix3::from_euler(&locked, order).almost_equal_with(&m, 1e-6), "order {}", order);
    }
}

#[test]
fn quaternion_matrix_round_trip() {
    let mut rng = rng();
    for _ in 0..300 {
        let q = random_quaternion(&mut rng);
        let m = q.to_matrix3();
        assert!(is_rotation(&m));
        assert_eq!(Quaternion::from_matrix3(&m).to_matrix3(), m);
        assert!(same_rotation(&Quaternion::from_matrix3(&m), &q));
    }

    // half turns land on the non-trace branches
    for axis in [Vector3::XAXIS, Vector3::YAXIS, Vector3::ZAXIS, Vector3::new(1.0, 1.0, 0.0)] {
        let m = Matrix3::from_axis_angle(&axis, PI);
        assert_eq!(Quaternion::from_matrix3(&m).to_matrix3(), m);
    }
}

#[test]
fn rotate_vector_matches_sandwich_and_matrix() {
    let mut rng = rng();
    for _ in 0..100 {
        let q = random_quaternion(&mut rng);
        let v = support::random_unit_vector(&mut rng) * 3.0;

        let pure = Quaternion::new(v.x, v.y, v.z, 0.0);
        let sandwich = (q * pure * q.conjugate()).vector();
        assert_eq!(q.rotate_vector(&v), sandwich);
        assert_eq!(q * v, v * q.to_matrix3());
    }
}

#[test]
fn hamilton_product_matches_matrix_order() {
    let a = Quaternion::from_axis_angle(&Vector3::XAXIS, 0.6);
    let b = Quaternion::from_axis_angle(&Vector3::new(0.0, 1.0, 1.0), -1.2);
    // rotate(a * b, v) = rotate(a, rotate(b, v))
    assert_eq!((a * b).to_matrix3(), b.to_matrix3() * a.to_matrix3());
}

#[test]
fn axis_angle_round_trip() {
    let axis = Vector3::new(1.0, -2.0, 0.5).normalize();
    let q = Quaternion::from_axis_angle(&axis, 1.1);
    let (back_axis, angle) = q.to_axis_angle();
    assert_eq!(back_axis, axis);
    assert!(approx_eq(angle, 1.1, 1e-9));
    assert_eq!(Matrix3::from_axis_angle(&axis, 1.1), q.to_matrix3());
    assert_eq!(Quaternion::IDENTITY.to_axis_angle(), (Vector3::XAXIS, 0.0));
}

#[test]
fn slerp_stays_unit_length() {
    let mut rng = rng();
    for _ in 0..100 {
        let a = random_quaternion(&mut rng);
        let b = random_quaternion(&mut rng);
        for step in 0..=10 {
            let t = step as gmath::Real / 10.0;
            assert!(approx_eq(a.slerp(&b, t, true).length(), 1.0, 1e-9));
            assert!(approx_eq(a.slerp(&b, t, false).length(), 1.0, 1e-9));
        }
    }
}

#[test]
fn slerp_takes_the_short_arc() {
    let a = Quaternion::IDENTITY;
    let b = -Quaternion::from_axis_angle(&Vector3::ZAXIS, 0.5);
    let mid = a.slerp(&b, 0.5, true);
    assert!(same_rotation(&mid, &Quaternion::from_axis_angle(&Vector3::ZAXIS, 0.25)));
    // the long way round passes through the other side
    let long = a.slerp(&b, 0.5, false);
    assert!(!same_rotation(&long, &mid));
}

#[test]
fn vector_to_vector() {
    let mut rng = rng();
    for _ in 0..100 {
        let from = support::random_unit_vector(&mut rng);
        let to = support::random_unit_vector(&mut rng);
        let m = Matrix3::from_vector_to_vector(&from, &to);
        assert!(is_rotation(&m));
        assert_eq!(from * m, to);
    }
    let flip = Matrix3::from_vector_to_vector(&Vector3::XAXIS, &Vector3::NEG_XAXIS);
    assert_eq!(Vector3::XAXIS * flip, Vector3::NEG_XAXIS);
    assert!(is_rotation(&flip));
}

#[test]
fn look_at_every_axis_pair() {
    let target = Vector3::new(1.0, 2.0, -3.0);
    let up = Vector3::new(0.0, 1.0, 0.0);
    let axes = [Axis::PosX, Axis::PosY, Axis::PosZ, Axis::NegX, Axis::NegY, Axis::NegZ];

    for primary in axes {
        for secondary in axes {
            let result = Matrix3::look_at(&target, &up, primary, secondary);
            if primary.index() == secondary.index() {
                assert!(result.is_err());
                continue;
            }
            let m = result.unwrap();
            assert!(is_rotation(&m), "{} {}", primary, secondary);
            assert_eq!(m.axis(primary), target.normalize(), "{} {}", primary, secondary);
            // secondary stays in the aim/up plane, on the side of up
            let s = m.axis(secondary);
            assert!(approx_eq(s.dot(&target.cross(&up).normalize()), 0.0, 1e-9));
            assert!(s.dot(&up) > 0.0);
        }
    }
}

#[test]
fn orthogonal_repairs_drifted_matrices() {
    let mut rng = rng();
    for _ in 0..50 {
        let mut m = random_quaternion(&mut rng).to_matrix3();
        for value in m.data_mut().iter_mut() {
            *value += 0.01;
        }
        assert!(!is_rotation(&m));
        assert!(is_rotation(&m.orthogonal()));
    }
}

#[test]
fn inverses() {
    let mut rng = rng();
    for _ in 0..50 {
        let q = random_quaternion(&mut rng);
        let mut m = Matrix4::from_quaternion_position(&q, &Vector3::new(1.0, -4.0, 2.5));
        m.set_scale(&Vector3::new(0.5, 2.0, 3.0));
        assert_eq!(m * m.inverse(), Matrix4::IDENTITY);
        assert_eq!(m.inverse() * m, Matrix4::IDENTITY);

        let r = m.to_matrix3();
        assert_eq!(r * r.inverse(), Matrix3::IDENTITY);
        assert_eq!(q * q.inverse(), Quaternion::IDENTITY);
    }

    // degenerate matrices fall back to the identity
    assert_eq!(Matrix3::from_array([1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0]).inverse(), Matrix3::IDENTITY);
    assert_eq!((Matrix4::IDENTITY * 0.0).inverse(), Matrix4::IDENTITY);
}

#[test]
fn matrix4_rotation_ignores_scale() {
    let e = Euler::degrees(15.0, 25.0, 35.0);
    let mut m = Matrix4::from_euler(&e, RotationOrder::YXZ);
    m.set_scale(&Vector3::new(2.0, 3.0, 4.0));
    m.set_position(&Vector3::new(9.0, 9.0, 9.0));
    assert_eq!(m.to_euler(RotationOrder::YXZ), e.to_radians());
    assert!(same_rotation(&m.to_quaternion(), &Quaternion::from_euler(&e, RotationOrder::YXZ)));
    assert_eq!(m.scale(), Vector3::new(2.0, 3.0, 4.0));
}
