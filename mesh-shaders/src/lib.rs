use gl::types::GLenum;
use gl_thin::gl_fancy::{BoundBuffers, GPUState};
use gl_thin::gl_helper::GLErrorWrapper;

pub mod vertex_color_shader;

/// Something with its vertex attributes already rigged, that knows which
/// primitive its indices describe.
pub trait GeometryBuffer<AT, IT> {
    fn activate<'a>(
        &'a self,
        gpu_state: &'a mut GPUState,
    ) -> Result<BoundBuffers<'a, AT, IT>, GLErrorWrapper>;

    /// `gl::TRIANGLES`, `gl::LINES`, ...
    fn primitive(&self) -> GLenum;
}
