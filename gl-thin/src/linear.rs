// column-major 4x4 matrices, laid out the way glUniformMatrix4fv wants them
// (transpose = GL_FALSE)

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix4x4f {
    m: [f32; 16],
}

#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct Vector3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3f {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, rhs: &Vector3f) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(&self, rhs: &Vector3f) -> Vector3f {
        Vector3f {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    pub fn normalized(&self) -> Vector3f {
        let len = self.dot(self).sqrt();
        Vector3f {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }
}

impl std::ops::Sub for Vector3f {
    type Output = Vector3f;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3f {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl std::ops::Neg for Vector3f {
    type Output = Vector3f;

    fn neg(self) -> Self::Output {
        Vector3f {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

//

impl Matrix4x4f {
    pub fn new(m: [f32; 16]) -> Self {
        Matrix4x4f { m }
    }

    pub fn slice(&self) -> &[f32; 16] {
        &self.m
    }
}

impl From<[f32; 16]> for Matrix4x4f {
    fn from(value: [f32; 16]) -> Self {
        Matrix4x4f::new(value)
    }
}

impl<'a, 'b> std::ops::Mul<&'a Matrix4x4f> for &'b Matrix4x4f {
    type Output = Matrix4x4f;

    fn mul(self, rhs: &Matrix4x4f) -> Self::Output {
        matrix4x4f_multiply(self, rhs)
    }
}
impl std::ops::Mul<Matrix4x4f> for Matrix4x4f {
    type Output = Matrix4x4f;

    fn mul(self, rhs: Matrix4x4f) -> Self::Output {
        matrix4x4f_multiply(&self, &rhs)
    }
}

#[rustfmt::skip]
pub fn matrix4x4f_identity() -> Matrix4x4f {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ].into()
}

/// Symmetric perspective projection for a [-1,1] Z clip space, the
/// equivalent of `glm::perspective`.
pub fn matrix4x4f_create_perspective(
    fov_y_radians: f32,
    aspect: f32,
    near_z: f32,
    far_z: f32,
) -> Matrix4x4f {
    let tan_half = (fov_y_radians * 0.5).tan();
    matrix4x4f_create_projection(
        -aspect * tan_half,
        aspect * tan_half,
        tan_half,
        -tan_half,
        near_z,
        far_z,
    )
}

pub fn matrix4x4f_create_projection(
    tan_angle_left: f32,
    tan_angle_right: f32,
    tan_angle_up: f32,
    tan_angle_down: f32,
    near_z: f32,
    far_z: f32,
) -> Matrix4x4f {
    let tan_angle_width = tan_angle_right - tan_angle_left;
    // positive Y up
    let tan_angle_height = tan_angle_up - tan_angle_down;
    // [-1,1] Z clip space
    let offset_z = near_z;

    let m0 = 2.0 / tan_angle_width;
    let m4 = 0.0;
    let m8 = (tan_angle_right + tan_angle_left) / tan_angle_width;
    let m12 = 0.0;

    let m1 = 0.0;
    let m5 = 2.0 / tan_angle_height;
    let m9 = (tan_angle_up + tan_angle_down) / tan_angle_height;
    let m13 = 0.0;

    let m3 = 0.0;
    let m7 = 0.0;
    let m11 = -1.0;
    let m15 = 0.0;

    let m2 = 0.0;
    let m6 = 0.0;
    let (m10, m14) = if far_z <= near_z {
        // place the far plane at infinity
        (-1.0, -(near_z + offset_z))
    } else {
        (
            -(far_z + offset_z) / (far_z - near_z),
            -(far_z * (near_z + offset_z)) / (far_z - near_z),
        )
    };
    [
        m0, m1, m2, m3, m4, m5, m6, m7, m8, m9, m10, m11, m12, m13, m14, m15,
    ]
    .into()
}

/// Right-handed view matrix looking from `eye` at `center`, like `glm::lookAt`.
pub fn matrix4x4f_create_look_at(eye: &Vector3f, center: &Vector3f, up: &Vector3f) -> Matrix4x4f {
    let f = (*center - *eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(&f);

    [
        s.x,
        u.x,
        -f.x,
        0.0,
        s.y,
        u.y,
        -f.y,
        0.0,
        s.z,
        u.z,
        -f.z,
        0.0,
        -s.dot(eye),
        -u.dot(eye),
        f.dot(eye),
        1.0,
    ]
    .into()
}

pub fn matrix4x4f_create_translation(dx: f32, dy: f32, dz: f32) -> Matrix4x4f {
    [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, dx, dy, dz, 1.0,
    ]
    .into()
}

#[rustfmt::skip]
pub fn matrix4x4f_rotation_about_x(theta: f32) -> Matrix4x4f {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, theta.cos(), theta.sin(), 0.0,
        0.0, -theta.sin(), theta.cos(), 0.0,
        0.0, 0.0, 0.0, 1.0f32,
    ].into()
}

#[rustfmt::skip]
pub fn matrix4x4f_rotation_about_y(theta: f32) -> Matrix4x4f {
    [
        theta.cos(), 0.0, -theta.sin(), 0.0,
        0.0, 1.0, 0.0, 0.0,
        theta.sin(), 0.0, theta.cos(), 0.0,
        0.0, 0.0, 0.0, 1.0f32,
    ].into()
}

#[rustfmt::skip]
pub fn matrix4x4f_rotation_about_z(theta: f32) -> Matrix4x4f {
    [
        theta.cos(), theta.sin(), 0.0, 0.0,
        -theta.sin(), theta.cos(), 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0f32,
    ].into()
}

pub fn matrix4x4f_multiply(a: &Matrix4x4f, b: &Matrix4x4f) -> Matrix4x4f {
    let mut rval = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            rval[col * 4 + row] = a.m[row] * b.m[col * 4]
                + a.m[4 + row] * b.m[col * 4 + 1]
                + a.m[8 + row] * b.m[col * 4 + 2]
                + a.m[12 + row] * b.m[col * 4 + 3];
        }
    }
    rval.into()
}

pub fn matrix4x4f_transform_vector3f(m: &Matrix4x4f, v: &Vector3f) -> Vector3f {
    let w = m.m[3] * v.x + m.m[7] * v.y + m.m[11] * v.z + m.m[15];
    let rcp_w = 1.0 / w;
    let x = (m.m[0] * v.x + m.m[4] * v.y + m.m[8] * v.z + m.m[12]) * rcp_w;
    let y = (m.m[1] * v.x + m.m[5] * v.y + m.m[9] * v.z + m.m[13]) * rcp_w;
    let z = (m.m[2] * v.x + m.m[6] * v.y + m.m[10] * v.z + m.m[14]) * rcp_w;
    Vector3f { x, y, z }
}
