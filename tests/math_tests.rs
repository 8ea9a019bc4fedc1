use approx::assert_relative_eq;
use std::f32::consts::PI;
use tricast::math::{Matrix4, Quaternion, Vector2, Vector3, Vector4};

#[test]
fn test_vector3_operations() {
    let v1 = Vector3::new(1.0, 2.0, 3.0);
    let v2 = Vector3::new(4.0, 5.0, 6.0);

    // Addition
    let sum = v1 + v2;
    assert_eq!(sum.x, 5.0);
    assert_eq!(sum.y, 7.0);
    assert_eq!(sum.z, 9.0);

    // Subtraction
    let diff = v2 - v1;
    assert_eq!(diff.x, 3.0);
    assert_eq!(diff.y, 3.0);
    assert_eq!(diff.z, 3.0);

    // Scalar multiplication
    let scaled = v1 * 2.0;
    assert_eq!(scaled.x, 2.0);
    assert_eq!(scaled.y, 4.0);
    assert_eq!(scaled.z, 6.0);

    // Dot product
    let dot = v1.dot(&v2);
    assert_eq!(dot, 1.0 * 4.0 + 2.0 * 5.0 + 3.0 * 6.0);

    // Cross product
    let cross = v1.cross(&v2);
    assert_eq!(cross.x, v1.y * v2.z - v1.z * v2.y);
    assert_eq!(cross.y, v1.z * v2.x - v1.x * v2.z);
    assert_eq!(cross.z, v1.x * v2.y - v1.y * v2.x);

    // Length
    let length = v1.length();
    assert_relative_eq!(length, (1.0f32.powi(2) + 2.0f32.powi(2) + 3.0f32.powi(2)).sqrt());

    // Normalize
    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);
    assert_relative_eq!(normalized.x, v1.x / length);
    assert_relative_eq!(normalized.y, v1.y / length);
    assert_relative_eq!(normalized.z, v1.z / length);
}

#[test]
fn test_vector3_cross_of_parallel_is_zero() {
    let v = Vector3::new(2.0, -1.0, 4.0);
    assert_eq!(v.cross(&v), Vector3::zero());
    assert_eq!(v.cross(&(v * 3.0)), Vector3::zero());
    assert_eq!(v.cross(&Vector3::zero()), Vector3::zero());
}

#[test]
fn test_vector3_normalize_of_zero_is_guarded() {
    // A zero vector has no direction; normalizing must not produce NaN
    let normalized = Vector3::zero().normalize();
    assert_eq!(normalized, Vector3::zero());

    let mut v = Vector3::zero();
    v.normalize_mut();
    assert_eq!(v, Vector3::zero());
    assert!(v.is_zero());
}

#[test]
fn test_vector3_min_max_lerp() {
    let v1 = Vector3::new(1.0, 5.0, -3.0);
    let v2 = Vector3::new(2.0, -4.0, 6.0);

    assert_eq!(v1.min(&v2), Vector3::new(1.0, -4.0, -3.0));
    assert_eq!(v1.max(&v2), Vector3::new(2.0, 5.0, 6.0));

    let mid = v1.lerp(&v2, 0.5);
    assert_relative_eq!(mid, Vector3::new(1.5, 0.5, 1.5));
}

#[test]
fn test_vector3_projection() {
    let v = Vector3::new(3.0, 4.0, 0.0);
    let onto = Vector3::unit_x();

    let projected = v.project(&onto);
    assert_relative_eq!(projected, Vector3::new(3.0, 0.0, 0.0));

    let rejected = v.reject(&onto);
    assert_relative_eq!(rejected, Vector3::new(0.0, 4.0, 0.0));

    assert_relative_eq!(Vector3::unit_x().angle_between(&Vector3::unit_y()), PI / 2.0);
}

#[test]
fn test_vector2_operations() {
    let v1 = Vector2::new(3.0, 4.0);
    let v2 = Vector2::new(-4.0, 3.0);

    assert_eq!(v1.length(), 5.0);
    assert_eq!(v1.dot(&v2), 0.0);
    assert_eq!(v1.cross(&v2), 3.0 * 3.0 - 4.0 * (-4.0));

    // perpendicular() rotates a quarter turn counter-clockwise
    assert_eq!(v1.perpendicular(), v2);
    assert_relative_eq!(Vector2::unit_y().angle(), PI / 2.0);

    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);
}

#[test]
fn test_vector4_operations() {
    let v = Vector4::new(1.0, 2.0, 3.0, 4.0);

    assert_eq!(v.dot(&v), 30.0);
    assert_eq!(v.xyz(), Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(Vector4::from_vector3(Vector3::new(1.0, 2.0, 3.0), 4.0), v);

    let normalized = v.normalize();
    assert_relative_eq!(normalized.length(), 1.0, epsilon = 1e-6);

    let sum = v + Vector4::one();
    assert_eq!(sum, Vector4::new(2.0, 3.0, 4.0, 5.0));
}

#[test]
fn test_quaternion_operations() {
    // Create a quaternion from axis-angle
    let axis = Vector3::new(0.0, 1.0, 0.0);
    let angle = PI / 2.0; // 90 degrees
    let q = Quaternion::from_axis_angle(axis, angle);

    // Normalize
    let q_norm = q.normalize();
    assert_relative_eq!(q_norm.length(), 1.0);

    // Rotate a vector
    let v = Vector3::new(1.0, 0.0, 0.0);
    let rotated = q.rotate_vector(v);

    // v should be rotated 90 degrees around Y-axis to (0, 0, -1)
    assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(rotated.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(rotated.z, -1.0, epsilon = 1e-5);

    // Conjugate
    let q_conj = q.conjugate();
    assert_eq!(q_conj.w, q.w);
    assert_eq!(q_conj.x, -q.x);
    assert_eq!(q_conj.y, -q.y);
    assert_eq!(q_conj.z, -q.z);

    // Inverse (same as conjugate for unit quaternions)
    let q_inv = q_norm.inverse();
    assert_relative_eq!(q_inv.w, q_norm.w);
    assert_relative_eq!(q_inv.x, -q_norm.x);
    assert_relative_eq!(q_inv.y, -q_norm.y);
    assert_relative_eq!(q_inv.z, -q_norm.z);

    // Multiplication (composition of rotations)
    let q1 = Quaternion::from_axis_angle(Vector3::new(1.0, 0.0, 0.0), PI / 4.0);
    let q2 = Quaternion::from_axis_angle(Vector3::new(0.0, 1.0, 0.0), PI / 4.0);
    let q3 = q2 * q1; // Apply q1 then q2

    let v2 = Vector3::new(0.0, 0.0, 1.0);
    let rotated_by_q3 = q3.rotate_vector(v2);
    let rotated_by_q1_then_q2 = q2.rotate_vector(q1.rotate_vector(v2));

    assert_relative_eq!(rotated_by_q3, rotated_by_q1_then_q2, epsilon = 1e-5);
}

#[test]
fn test_quaternion_slerp() {
    let q1 = Quaternion::identity();
    let q2 = Quaternion::from_axis_angle(Vector3::unit_y(), PI / 2.0);

    // Endpoints
    assert_relative_eq!(q1.slerp(&q2, 0.0), q1, epsilon = 1e-5);
    assert_relative_eq!(q1.slerp(&q2, 1.0), q2, epsilon = 1e-5);

    // Halfway is a 45 degree rotation
    let halfway = q1.slerp(&q2, 0.5);
    let rotated = halfway.rotate_vector(Vector3::unit_x());
    let expected = (PI / 4.0).cos();
    assert_relative_eq!(rotated.x, expected, epsilon = 1e-5);
    assert_relative_eq!(rotated.z, -expected, epsilon = 1e-5);

    // Lerp endpoints agree with slerp endpoints
    assert_relative_eq!(q1.lerp(&q2, 0.0), q1, epsilon = 1e-5);
    assert_relative_eq!(q1.lerp(&q2, 1.0), q2, epsilon = 1e-5);
}

#[test]
fn test_quaternion_from_to_rotation() {
    let q = Quaternion::from_to_rotation(Vector3::unit_x(), Vector3::unit_y());
    let rotated = q.rotate_vector(Vector3::unit_x());
    assert_relative_eq!(rotated, Vector3::unit_y(), epsilon = 1e-5);

    // Same direction is the identity
    let q = Quaternion::from_to_rotation(Vector3::unit_z(), Vector3::unit_z() * 5.0);
    assert_relative_eq!(q, Quaternion::identity(), epsilon = 1e-5);

    // Opposite directions still produce a valid half-turn
    let q = Quaternion::from_to_rotation(Vector3::unit_x(), -Vector3::unit_x());
    let rotated = q.rotate_vector(Vector3::unit_x());
    assert_relative_eq!(rotated, -Vector3::unit_x(), epsilon = 1e-5);
}

#[test]
fn test_quaternion_euler_round_trip() {
    let angles = Vector3::new(0.3, -0.4, 0.5);
    let q = Quaternion::from_euler(angles.x, angles.y, angles.z);
    assert_relative_eq!(q.length(), 1.0, epsilon = 1e-6);

    let extracted = q.euler_angles();
    assert_relative_eq!(extracted, angles, epsilon = 1e-5);
}

#[test]
fn test_quaternion_matrix_round_trip() {
    let q = Quaternion::from_axis_angle(Vector3::new(1.0, 2.0, 2.0), 1.0);
    let m = q.to_rotation_matrix();

    // The matrix rotates vectors the same way the quaternion does
    let v = Vector3::new(0.5, -1.0, 2.0);
    assert_relative_eq!(m.multiply_direction(v), q.rotate_vector(v), epsilon = 1e-5);

    let recovered = Quaternion::from_rotation_matrix(&m);
    assert_relative_eq!(recovered, q, epsilon = 1e-5);
}

#[test]
fn test_matrix4_identity_and_determinant() {
    let identity = Matrix4::identity();

    assert_eq!(identity.determinant(), 1.0);
    assert_eq!(identity.multiply_point(Vector3::new(1.0, 2.0, 3.0)), Vector3::new(1.0, 2.0, 3.0));

    let m = Matrix4::from_translation(Vector3::new(4.0, 5.0, 6.0));
    assert_eq!(m.multiply_matrix(&identity), m);
    assert_eq!(identity.multiply_matrix(&m), m);

    // Scaling multiplies the determinant
    let scale = Matrix4::from_scale(Vector3::new(2.0, 2.0, 2.0));
    assert_relative_eq!(scale.determinant(), 8.0);
}

#[test]
fn test_matrix4_transform_composition() {
    let translate = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
    let scale = Matrix4::from_scale(Vector3::new(2.0, 2.0, 2.0));

    // With column vectors, the right-hand factor applies first
    let combined = translate * scale;
    let p = combined.multiply_point(Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(p, Vector3::new(3.0, 2.0, 3.0));

    // Directions ignore the translation
    let d = combined.multiply_direction(Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(d, Vector3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_matrix4_inverse() {
    let rotation = Quaternion::from_axis_angle(Vector3::unit_y(), PI / 3.0).to_rotation_matrix();
    let m = Matrix4::from_translation(Vector3::new(1.0, -2.0, 3.0)) * rotation;

    let inverse = m.inverse().expect("matrix should be invertible");
    assert_relative_eq!(m * inverse, Matrix4::identity(), epsilon = 1e-5);
    assert_relative_eq!(inverse * m, Matrix4::identity(), epsilon = 1e-5);

    // A collapsed axis is not invertible, and the failed call changes nothing
    let singular = Matrix4::from_scale(Vector3::new(0.0, 1.0, 1.0));
    assert!(singular.inverse().is_none());
    assert_eq!(singular, Matrix4::from_scale(Vector3::new(0.0, 1.0, 1.0)));
}

#[test]
fn test_matrix4_transpose() {
    let m = Matrix4::from_cols(
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(4.0, 5.0, 6.0),
        Vector3::new(7.0, 8.0, 9.0),
        Vector3::new(10.0, 11.0, 12.0),
    );

    let t = m.transpose();
    for row in 0..4 {
        for col in 0..4 {
            assert_eq!(t.get(row, col), m.get(col, row));
        }
    }
    assert_eq!(t.transpose(), m);
}

#[test]
fn test_matrix4_accessors() {
    let m = Matrix4::from_cols(
        Vector3::unit_x(),
        Vector3::unit_y(),
        Vector3::unit_z(),
        Vector3::new(7.0, 8.0, 9.0),
    );

    assert_eq!(m.axis_x(), Vector3::unit_x());
    assert_eq!(m.axis_y(), Vector3::unit_y());
    assert_eq!(m.axis_z(), Vector3::unit_z());
    assert_eq!(m.translation(), Vector3::new(7.0, 8.0, 9.0));

    let mut m = m;
    m.set_translation(Vector3::zero());
    assert_eq!(m, Matrix4::identity());

    // Raw column-major element access
    let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(m[12], 1.0);
    assert_eq!(m[13], 2.0);
    assert_eq!(m[14], 3.0);
    assert_eq!(m.as_slice().len(), 16);
}

#[test]
fn test_matrix4_from_slice() {
    let elements: Vec<f32> = (0..16).map(|i| i as f32).collect();
    let m = Matrix4::from_slice(&elements).unwrap();
    assert_eq!(m.as_slice(), &elements[..]);

    let err = Matrix4::from_slice(&elements[..7]).unwrap_err();
    assert_eq!(
        err,
        tricast::error::MathError::InvalidSliceLength { expected: 16, actual: 7 }
    );
}

#[test]
fn test_matrix4_look_at() {
    let view = Matrix4::look_at(
        Vector3::new(0.0, 0.0, 5.0),
        Vector3::zero(),
        Vector3::unit_y(),
    );

    // The target ends up straight ahead on the negative z axis
    assert_relative_eq!(view.multiply_point(Vector3::zero()), Vector3::new(0.0, 0.0, -5.0), epsilon = 1e-5);

    // The eye maps to the origin
    assert_relative_eq!(view.multiply_point(Vector3::new(0.0, 0.0, 5.0)), Vector3::zero(), epsilon = 1e-5);
}

#[test]
fn test_matrix4_perspective() {
    let proj = Matrix4::perspective(PI / 2.0, 1.0, 1.0, 10.0);

    // Near and far planes map to -1 and 1 in NDC
    let near = proj.multiply_point(Vector3::new(0.0, 0.0, -1.0));
    assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);

    let far = proj.multiply_point(Vector3::new(0.0, 0.0, -10.0));
    assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
}

#[test]
fn test_matrix4_orthographic() {
    let proj = Matrix4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.1, 10.0);

    let corner = proj.multiply_point(Vector3::new(2.0, 1.0, -10.0));
    assert_relative_eq!(corner, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-5);

    let center = proj.multiply_point(Vector3::new(0.0, 0.0, -0.1));
    assert_relative_eq!(center, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-4);
}

#[test]
fn test_nalgebra_round_trips() {
    let v = Vector3::new(1.0, 2.0, 3.0);
    assert_eq!(Vector3::from_nalgebra(&v.to_nalgebra()), v);

    let v = Vector2::new(1.0, 2.0);
    assert_eq!(Vector2::from_nalgebra(&v.to_nalgebra()), v);

    let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(Vector4::from_nalgebra(&v.to_nalgebra()), v);

    let q = Quaternion::from_axis_angle(Vector3::unit_z(), 0.7);
    assert_eq!(Quaternion::from_nalgebra(&q.to_nalgebra()), q);

    let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(Matrix4::from_nalgebra(&m.to_nalgebra()), m);
}
