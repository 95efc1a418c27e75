use crate::gl_helper::GLErrorWrapper;
use crate::shader_api::ShaderStage;
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, Debug)]
pub struct ShaderCompileError {
    pub stage: ShaderStage,
    pub diagnostic: String,
}

impl Display for ShaderCompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to compile {} shader: {}", self.stage, self.diagnostic)
    }
}

impl std::error::Error for ShaderCompileError {}

//

#[derive(Clone, Debug)]
pub struct ShaderLinkError {
    pub diagnostic: String,
}

impl Display for ShaderLinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to link shader program: {}", self.diagnostic)
    }
}

impl std::error::Error for ShaderLinkError {}

//

/// Everything that can go wrong between two source strings and a linked program
#[derive(Clone)]
pub enum ProgramBuildError {
    Compile(ShaderCompileError),
    Link(ShaderLinkError),
    Gl(GLErrorWrapper),
}

impl Debug for ProgramBuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramBuildError::Compile(e) => write!(f, "{}", e),
            ProgramBuildError::Link(e) => write!(f, "{}", e),
            ProgramBuildError::Gl(e) => write!(f, "GL error {:?}", e),
        }
    }
}

impl Display for ProgramBuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <Self as Debug>::fmt(self, f)
    }
}

impl std::error::Error for ProgramBuildError {}

impl From<ShaderCompileError> for ProgramBuildError {
    fn from(value: ShaderCompileError) -> Self {
        ProgramBuildError::Compile(value)
    }
}

impl From<ShaderLinkError> for ProgramBuildError {
    fn from(value: ShaderLinkError) -> Self {
        ProgramBuildError::Link(value)
    }
}

impl From<GLErrorWrapper> for ProgramBuildError {
    fn from(value: GLErrorWrapper) -> Self {
        ProgramBuildError::Gl(value)
    }
}
