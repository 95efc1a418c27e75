use crate::errors::DemoError;
use crate::geometry::MeshGeometry;
use crate::motion::{model_matrix, offset_model, Camera};
use gl::types::{GLenum, GLfloat, GLuint};
use gl_thin::gl_fancy::{BoundBuffers, GPUState, VertexBufferBundle};
use gl_thin::gl_helper::{explode_if_gl_error, set_polygon_mode, GLErrorWrapper};
use mesh_shaders::vertex_color_shader::{VertexColorShader, COLOR_LOCATION, POSITION_LOCATION};
use mesh_shaders::GeometryBuffer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshKind {
    /// the closed triangulated surface
    Solid,
    /// the original segment list
    Wire,
}

impl MeshKind {
    pub fn pick<'a, T: ?Sized>(self, solid: &'a T, wire: &'a T) -> &'a T {
        match self {
            MeshKind::Solid => solid,
            MeshKind::Wire => wire,
        }
    }
}

/// one draw call per frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawPass {
    pub mesh: MeshKind,
    pub polygon_mode: GLenum,
    pub offset_x: f32,
}

pub const DRAW_PASSES: [DrawPass; 3] = [
    DrawPass {
        mesh: MeshKind::Solid,
        polygon_mode: gl::FILL,
        offset_x: 0.0,
    },
    DrawPass {
        mesh: MeshKind::Solid,
        polygon_mode: gl::LINE,
        offset_x: 140.0,
    },
    DrawPass {
        mesh: MeshKind::Wire,
        polygon_mode: gl::LINE,
        offset_x: -140.0,
    },
];

//

pub struct MeshBuffers {
    buffers: VertexBufferBundle<GLfloat, GLuint>,
    primitive: GLenum,
}

impl MeshBuffers {
    pub fn upload(
        gpu_state: &mut GPUState,
        positions: &[GLfloat],
        colors: &[GLfloat],
        indices: &[GLuint],
        primitive: GLenum,
    ) -> Result<Self, GLErrorWrapper> {
        let buffers = VertexBufferBundle::upload(
            gpu_state,
            positions,
            POSITION_LOCATION,
            colors,
            COLOR_LOCATION,
            indices,
        )?;
        Ok(Self { buffers, primitive })
    }
}

impl GeometryBuffer<GLfloat, GLuint> for MeshBuffers {
    fn activate<'a>(
        &'a self,
        gpu_state: &'a mut GPUState,
    ) -> Result<BoundBuffers<'a, GLfloat, GLuint>, GLErrorWrapper> {
        self.buffers.bind(gpu_state)
    }

    fn primitive(&self) -> GLenum {
        self.primitive
    }
}

//

/// Owns every GL object the demo draws with.  Must be dropped while the
/// context is still current.
pub struct RenderContext {
    pub shader: VertexColorShader,
    pub solid: MeshBuffers,
    pub wire: MeshBuffers,
    pub gpu_state: GPUState,
}

impl RenderContext {
    pub fn new(
        geometry: &MeshGeometry,
        colors: &[GLfloat],
        camera: &Camera,
    ) -> Result<Self, DemoError> {
        let mut gpu_state = GPUState::new();

        let solid = MeshBuffers::upload(
            &mut gpu_state,
            &geometry.positions,
            colors,
            &geometry.solid_indices,
            gl::TRIANGLES,
        )?;
        let wire = MeshBuffers::upload(
            &mut gpu_state,
            &geometry.positions,
            colors,
            &geometry.wire_indices,
            gl::LINES,
        )?;

        let shader = VertexColorShader::new()?;
        shader.set_camera(&camera.projection, &camera.view)?;

        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
        }
        explode_if_gl_error()?;

        Ok(Self {
            shader,
            solid,
            wire,
            gpu_state,
        })
    }

    pub fn draw(&mut self, elapsed_seconds: f32) -> Result<(), GLErrorWrapper> {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT) };
        explode_if_gl_error()?;

        let model = model_matrix(elapsed_seconds);
        let RenderContext {
            shader,
            solid,
            wire,
            gpu_state,
        } = self;

        for pass in &DRAW_PASSES {
            set_polygon_mode(pass.polygon_mode)?;
            let pass_model = offset_model(&model, pass.offset_x);
            shader.draw::<GLuint>(&pass_model, pass.mesh.pick(solid, wire), gpu_state)?;
        }
        Ok(())
    }

    pub fn index_count(&self, kind: MeshKind) -> usize {
        kind.pick(&self.solid, &self.wire).buffers.index_count() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_mesh_drawn_three_ways() {
        assert_eq!(DRAW_PASSES[0].mesh, MeshKind::Solid);
        assert_eq!(DRAW_PASSES[0].polygon_mode, gl::FILL);
        assert_eq!(DRAW_PASSES[0].offset_x, 0.0);

        assert_eq!(DRAW_PASSES[1].mesh, MeshKind::Solid);
        assert_eq!(DRAW_PASSES[1].polygon_mode, gl::LINE);
        assert_eq!(DRAW_PASSES[1].offset_x, 140.0);

        assert_eq!(DRAW_PASSES[2].mesh, MeshKind::Wire);
        assert_eq!(DRAW_PASSES[2].offset_x, -140.0);
    }

    #[test]
    fn pick_maps_kind_to_mesh() {
        let (solid, wire) = ("solid", "wire");
        assert_eq!(*MeshKind::Solid.pick(&solid, &wire), "solid");
        assert_eq!(*MeshKind::Wire.pick(&solid, &wire), "wire");
    }
}
