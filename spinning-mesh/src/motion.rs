use gl_thin::linear::{
    matrix4x4f_create_look_at, matrix4x4f_create_perspective, matrix4x4f_create_translation,
    matrix4x4f_rotation_about_x, matrix4x4f_rotation_about_y, matrix4x4f_rotation_about_z,
    Matrix4x4f, Vector3f,
};

/// step = STEP_RATE * elapsed seconds
pub const STEP_RATE: f32 = 0.24;
/// base angular rate; X turns at -2n, Y at -6n, Z at -n radians per step
pub const SPIN_RATE: f32 = 2.633_333_3;
pub const MODEL_DEPTH: f32 = -149.0;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const NEAR_Z: f32 = 0.1;
pub const FAR_Z: f32 = 600.0;
pub const EYE: Vector3f = Vector3f::new(0.0, 0.0, -350.0);

pub fn spin_step(elapsed_seconds: f32) -> f32 {
    STEP_RATE * elapsed_seconds
}

pub struct Rotations {
    pub x: Matrix4x4f,
    pub y: Matrix4x4f,
    pub z: Matrix4x4f,
}

pub fn rotations_at(elapsed_seconds: f32) -> Rotations {
    let step = spin_step(elapsed_seconds);
    let n = SPIN_RATE;
    Rotations {
        x: matrix4x4f_rotation_about_x(-2.0 * n * step),
        y: matrix4x4f_rotation_about_y(-6.0 * n * step),
        z: matrix4x4f_rotation_about_z(-n * step),
    }
}

/// `Rz * Ry * Rx * translate(0, 0, MODEL_DEPTH)`
pub fn model_matrix(elapsed_seconds: f32) -> Matrix4x4f {
    let Rotations { x, y, z } = rotations_at(elapsed_seconds);
    let translate = matrix4x4f_create_translation(0.0, 0.0, MODEL_DEPTH);
    z * y * x * translate
}

/// `model` shifted sideways in world space
pub fn offset_model(model: &Matrix4x4f, offset_x: f32) -> Matrix4x4f {
    &matrix4x4f_create_translation(offset_x, 0.0, 0.0) * model
}

//

pub struct Camera {
    pub projection: Matrix4x4f,
    pub view: Matrix4x4f,
}

impl Camera {
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let aspect = width as f32 / height.max(1) as f32;
        Self {
            projection: matrix4x4f_create_perspective(
                FOV_Y_DEGREES.to_radians(),
                aspect,
                NEAR_Z,
                FAR_Z,
            ),
            view: matrix4x4f_create_look_at(
                &EYE,
                &Vector3f::default(),
                &Vector3f::new(0.0, 1.0, 0.0),
            ),
        }
    }
}
