// Pure math helpers shared by the builders and the codec.
//
// Cal3D stores every rotation as the negated inverse of the host quaternion.
// `export_rotation` is the single place that convention lives; builders and
// codecs must not negate or invert on their own.

use nalgebra_glm as glm;

/// Convert a quaternion to a 3x3 rotation matrix.
pub fn quat_to_rotation_matrix(q: &glm::Quat) -> glm::Mat3 {
    let q = glm::quat_normalize(q);

    let x2 = q.i + q.i;
    let y2 = q.j + q.j;
    let z2 = q.k + q.k;

    let xx = q.i * x2;
    let xy = q.i * y2;
    let xz = q.i * z2;
    let yy = q.j * y2;
    let yz = q.j * z2;
    let zz = q.k * z2;
    let wx = q.w * x2;
    let wy = q.w * y2;
    let wz = q.w * z2;

    glm::mat3(
        1.0 - (yy + zz),
        xy - wz,
        xz + wy,
        xy + wz,
        1.0 - (xx + zz),
        yz - wx,
        xz - wy,
        yz + wx,
        1.0 - (xx + yy),
    )
}

/// Convert a pure rotation matrix back to a unit quaternion.
pub fn rotation_matrix_to_quat(m: &glm::Mat3) -> glm::Quat {
    glm::quat_normalize(&glm::mat3_to_quat(m))
}

/// The serialized form of a rotation: invert, then negate all four
/// components. Applied identically to bone rotations, bone local rotations
/// and animation keyframes.
pub fn export_rotation(q: &glm::Quat) -> [f32; 4] {
    let inv = glm::quat_inverse(q);
    [-inv.i, -inv.j, -inv.k, -inv.w]
}

/// Euler XYZ angles (radians) to a quaternion, applying X, then Y, then Z.
pub fn euler_xyz_to_quat(angles: &[f32; 3]) -> glm::Quat {
    let qx = glm::quat_angle_axis(angles[0], &glm::vec3(1.0, 0.0, 0.0));
    let qy = glm::quat_angle_axis(angles[1], &glm::vec3(0.0, 1.0, 0.0));
    let qz = glm::quat_angle_axis(angles[2], &glm::vec3(0.0, 0.0, 1.0));
    glm::quat_normalize(&(qz * qy * qx))
}

/// Rotation + translation composed into a bone-local 4x4 matrix.
pub fn compose_matrix(rotation: &glm::Quat, translation: &glm::Vec3) -> glm::Mat4 {
    let mut m = glm::mat3_to_mat4(&quat_to_rotation_matrix(rotation));
    m[(0, 3)] = translation.x;
    m[(1, 3)] = translation.y;
    m[(2, 3)] = translation.z;
    m
}

/// Split a 4x4 transform into translation, rotation and per-axis scale.
pub fn decompose_transform(m: &glm::Mat4) -> (glm::Vec3, glm::Quat, glm::Vec3) {
    let translation = glm::vec3(m[(0, 3)], m[(1, 3)], m[(2, 3)]);

    let c0 = glm::vec3(m[(0, 0)], m[(1, 0)], m[(2, 0)]);
    let c1 = glm::vec3(m[(0, 1)], m[(1, 1)], m[(2, 1)]);
    let c2 = glm::vec3(m[(0, 2)], m[(1, 2)], m[(2, 2)]);
    let scale = glm::vec3(c0.norm(), c1.norm(), c2.norm());

    let rot = glm::mat3(
        c0.x / scale.x,
        c1.x / scale.y,
        c2.x / scale.z,
        c0.y / scale.x,
        c1.y / scale.y,
        c2.y / scale.z,
        c0.z / scale.x,
        c1.z / scale.y,
        c2.z / scale.z,
    );

    (translation, rotation_matrix_to_quat(&rot), scale)
}

pub fn transform_point(m: &glm::Mat4, p: &glm::Vec3) -> glm::Vec3 {
    (m * glm::vec4(p.x, p.y, p.z, 1.0)).xyz()
}

pub fn transform_direction(m: &glm::Mat4, d: &glm::Vec3) -> glm::Vec3 {
    (m * glm::vec4(d.x, d.y, d.z, 0.0)).xyz()
}

/// Position into export space: offset by the base translation, apply the
/// base scale, then the base rotation.
pub fn export_position(
    p: &glm::Vec3,
    base_translation: &glm::Vec3,
    base_scale: f32,
    base_rotation: &glm::Quat,
) -> glm::Vec3 {
    let v = (p + base_translation) * base_scale;
    glm::quat_rotate_vec3(base_rotation, &v)
}

/// Normal into export space: scaled, rotated, renormalized.
pub fn export_normal(n: &glm::Vec3, base_scale: f32, base_rotation: &glm::Quat) -> glm::Vec3 {
    let v = glm::quat_rotate_vec3(base_rotation, &(n * base_scale));
    glm::normalize(&v)
}

/// Scale per-axis, rotate, then translate, in that fixed order. This is the
/// keyframe composition: a sampled pose delta re-expressed on top of the
/// bone's rest transform.
pub fn scale_rotate_translate(
    v: &glm::Vec3,
    scale: &glm::Vec3,
    rotation: &glm::Quat,
    translation: &glm::Vec3,
) -> glm::Vec3 {
    let scaled = glm::vec3(v.x * scale.x, v.y * scale.y, v.z * scale.z);
    glm::quat_rotate_vec3(rotation, &scaled) + translation
}

pub fn vec3_to_array(v: &glm::Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

pub fn array_to_vec3(a: &[f32; 3]) -> glm::Vec3 {
    glm::vec3(a[0], a[1], a[2])
}

/// Quaternion component array in `(x, y, z, w)` order.
pub fn quat_to_array(q: &glm::Quat) -> [f32; 4] {
    [q.i, q.j, q.k, q.w]
}

pub fn array_to_quat(a: &[f32; 4]) -> glm::Quat {
    glm::quat(a[0], a[1], a[2], a[3])
}
