use crate::gl_helper::{explode_if_gl_error, GLErrorWrapper};
use gl::types::{GLchar, GLenum, GLint, GLuint};
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

//

/// The handful of GL entry points the shader/program build path needs.
///
/// [crate::gl_helper::Shader] and [crate::gl_helper::Program] are generic over
/// this so the compile/link bookkeeping can be exercised without a GL context.
pub trait ShaderApi: Clone {
    fn create_shader(&self, stage: ShaderStage) -> Result<GLuint, GLErrorWrapper>;
    fn compile_source(&self, shader: GLuint, source: &str) -> Result<(), GLErrorWrapper>;
    fn compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> Result<GLuint, GLErrorWrapper>;
    fn attach_shader(&self, program: GLuint, shader: GLuint) -> Result<(), GLErrorWrapper>;
    fn detach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint) -> Result<(), GLErrorWrapper>;
    fn link_status(&self, program: GLuint) -> bool;
    fn validate_program(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);
}

/// The real thing, straight to the loaded `gl` function pointers.
#[derive(Copy, Clone, Debug, Default)]
pub struct NativeGl;

impl ShaderApi for NativeGl {
    fn create_shader(&self, stage: ShaderStage) -> Result<GLuint, GLErrorWrapper> {
        let rval = unsafe { gl::CreateShader(stage.gl_enum()) };
        explode_if_gl_error()?;
        if rval == 0 {
            return Err(GLErrorWrapper::with_message(format!(
                "glCreateShader returned 0 for the {} stage",
                stage
            )));
        }
        Ok(rval)
    }

    fn compile_source(&self, shader: GLuint, source: &str) -> Result<(), GLErrorWrapper> {
        let bytes = source.as_bytes();
        let strings = [bytes.as_ptr() as *const GLchar];
        let lengths = [bytes.len() as GLint];
        unsafe { gl::ShaderSource(shader, 1, strings.as_ptr(), lengths.as_ptr()) };
        explode_if_gl_error()?;
        unsafe { gl::CompileShader(shader) };
        explode_if_gl_error()
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        let mut is_compiled = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut is_compiled) };
        is_compiled != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut max_length = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut max_length) };
        let mut error_log: Vec<u8> = vec![0; max_length.max(0) as usize];
        let mut written = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                max_length,
                &mut written,
                error_log.as_mut_ptr() as *mut GLchar,
            );
        }
        info_log_to_string(error_log, written)
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> Result<GLuint, GLErrorWrapper> {
        let rval = unsafe { gl::CreateProgram() };
        explode_if_gl_error()?;
        if rval == 0 {
            return Err(GLErrorWrapper::with_message("glCreateProgram returned 0"));
        }
        Ok(rval)
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) -> Result<(), GLErrorWrapper> {
        unsafe { gl::AttachShader(program, shader) };
        explode_if_gl_error()
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn link_program(&self, program: GLuint) -> Result<(), GLErrorWrapper> {
        unsafe { gl::LinkProgram(program) };
        explode_if_gl_error()
    }

    fn link_status(&self, program: GLuint) -> bool {
        let mut link_status = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut link_status) };
        link_status != 0
    }

    fn validate_program(&self, program: GLuint) -> bool {
        let mut status = 0;
        unsafe {
            gl::ValidateProgram(program);
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut status);
        }
        status != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut max_length = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut max_length) };
        let mut error_log: Vec<u8> = vec![0; max_length.max(0) as usize];
        let mut written = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                max_length,
                &mut written,
                error_log.as_mut_ptr() as *mut GLchar,
            );
        }
        info_log_to_string(error_log, written)
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }
}

fn info_log_to_string(mut raw: Vec<u8>, written: GLint) -> String {
    raw.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&raw).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_written_length() {
        let raw = b"0:3(1): error: syntax error\n\0\0\0".to_vec();
        assert_eq!(info_log_to_string(raw, 28), "0:3(1): error: syntax error");
    }

    #[test]
    fn stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }
}
