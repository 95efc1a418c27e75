use crate::GeometryBuffer;
use gl::types::{GLfloat, GLint, GLuint};
use gl_thin::errors::ProgramBuildError;
use gl_thin::gl_fancy::GPUState;
use gl_thin::gl_helper::{GLBufferType, GLErrorWrapper, Program};
use gl_thin::linear::Matrix4x4f;

/// `layout(location = 0) in vec3 in_position`
pub const POSITION_LOCATION: GLuint = 0;
/// `layout(location = 1) in vec3 in_color`
pub const COLOR_LOCATION: GLuint = 1;

/// Pass-through shader: `projection * view * model * position`, with the
/// per-vertex color carried to the fragment stage untouched.
pub struct VertexColorShader {
    pub program: Program,
    pub sul_projection: GLint,
    pub sul_view: GLint,
    pub sul_model: GLint,
}

impl VertexColorShader {
    pub fn new() -> Result<Self, ProgramBuildError> {
        let program = Program::compile(shader_v_src(), shader_f_src())?;

        let sul_projection = program.get_uniform_location("projection")?;
        let sul_view = program.get_uniform_location("view")?;
        let sul_model = program.get_uniform_location("model")?;

        log::debug!(
            "uniform locations projection={} view={} model={}",
            sul_projection,
            sul_view,
            sul_model,
        );

        Ok(Self {
            program,
            sul_projection,
            sul_view,
            sul_model,
        })
    }

    /// the camera never moves, so this happens once
    pub fn set_camera(
        &self,
        projection: &Matrix4x4f,
        view: &Matrix4x4f,
    ) -> Result<(), GLErrorWrapper> {
        self.program.use_()?;
        self.program.set_mat4u(self.sul_projection, projection.slice())?;
        self.program.set_mat4u(self.sul_view, view.slice())
    }

    pub fn set_model(&self, model: &Matrix4x4f) -> Result<(), GLErrorWrapper> {
        self.program.set_mat4u(self.sul_model, model.slice())
    }

    pub fn draw<IT: GLBufferType>(
        &self,
        model: &Matrix4x4f,
        buffers: &dyn GeometryBuffer<GLfloat, IT>,
        gpu_state: &mut GPUState,
    ) -> Result<(), GLErrorWrapper> {
        self.program.use_()?;
        self.set_model(model)?;

        let bindings = buffers.activate(gpu_state)?;
        bindings.draw_all(buffers.primitive())
    }
}

pub fn shader_v_src() -> &'static str {
    "#version 330 core

layout(location = 0) in vec3 in_position;
layout(location = 1) in vec3 in_color;

uniform mat4 projection;
uniform mat4 view;
uniform mat4 model;

out vec3 v_color;

void main()
{
    gl_Position = projection * view * model * vec4(in_position, 1.0);
    v_color = in_color;
}
"
}

pub fn shader_f_src() -> &'static str {
    "#version 330 core

in vec3 v_color;
out vec4 out_color;

void main()
{
    out_color = vec4(v_color, 1.0);
}
"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_locations_match_the_layout_qualifiers() {
        let src = shader_v_src();
        assert!(src.contains(&format!(
            "layout(location = {}) in vec3 in_position",
            POSITION_LOCATION
        )));
        assert!(src.contains(&format!(
            "layout(location = {}) in vec3 in_color",
            COLOR_LOCATION
        )));
    }

    #[test]
    fn every_uniform_is_declared() {
        for name in ["projection", "view", "model"] {
            assert!(shader_v_src().contains(&format!("uniform mat4 {};", name)));
        }
    }

    #[test]
    fn varyings_line_up() {
        assert!(shader_v_src().contains("out vec3 v_color;"));
        assert!(shader_f_src().contains("in vec3 v_color;"));
    }
}
