use crate::gl_helper::{
    self, explode_if_gl_error, gl_offset_for, ArrayBufferType, Buffer, ElementArrayBufferType,
    GLBufferType, GLErrorWrapper, VertexArray,
};
use gl::types::{GLenum, GLint, GLsizei, GLuint};
use std::mem::size_of;

/// Binding token.  Anything that changes the vertex array / buffer bindings
/// borrows this mutably, so two bindings can't be live at once.
#[derive(Default)]
pub struct GPUState {}

impl GPUState {
    pub fn new() -> Self {
        Self {}
    }
}

//

/// A vertex array bound for configuration.  Unbinds on drop; the vertex array
/// is unbound first so the element buffer stays recorded in it.
pub struct BoundVertexArray<'a, 'g> {
    pub gpu_state: &'g mut GPUState,
    pub vertex_array: &'a VertexArray,
}

impl<'a, 'g> BoundVertexArray<'a, 'g> {
    pub fn new(
        vertex_array: &'a VertexArray,
        gpu_state: &'g mut GPUState,
    ) -> Result<Self, GLErrorWrapper> {
        vertex_array.bind()?;
        Ok(Self {
            gpu_state,
            vertex_array,
        })
    }

    /// Upload `values` into `buffer` and point attribute `location` at it.
    ///
    /// # Arguments
    /// * `location` - the attribute location, either from `layout(location = N)` or gl::GetAttribLocation
    /// * `attribute_array_width` - would be 3 for a vec3 or 2 for a vec2
    /// * `stride` - how many values are in a row; 0 (or the width) when the buffer holds only this attribute
    /// * `offset` - how many values are between the beginning of the "row" and this attribute's data
    pub fn rig_attribute_buffer<AT: GLBufferType>(
        &self,
        buffer: &mut Buffer<ArrayBufferType, AT>,
        values: &[AT],
        location: GLuint,
        attribute_array_width: GLint,
        stride: GLsizei,
        offset: GLsizei,
    ) -> Result<(), GLErrorWrapper> {
        buffer.load(values)?;
        unsafe {
            gl::VertexAttribPointer(
                location,
                attribute_array_width,
                AT::TYPE_CODE,
                gl::FALSE,
                stride * size_of::<AT>() as GLsizei,
                gl_helper::gl_offset_for::<AT>(offset),
            );
        }
        explode_if_gl_error()?;

        unsafe { gl::EnableVertexAttribArray(location) };
        explode_if_gl_error()
    }

    pub fn load_indices<IT>(
        &self,
        buffer: &mut Buffer<ElementArrayBufferType, IT>,
        indices: &[IT],
    ) -> Result<(), GLErrorWrapper> {
        buffer.load(indices)
    }
}

impl<'a, 'g> Drop for BoundVertexArray<'a, 'g> {
    fn drop(&mut self) {
        unsafe {
            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
        }
    }
}

//

/// A vertex array ready to draw from
pub struct BoundBuffers<'a, AT, IT> {
    pub gpu_state: &'a mut GPUState,
    pub bundle: &'a VertexBufferBundle<AT, IT>,
}

impl<'a, AT, IT: GLBufferType> BoundBuffers<'a, AT, IT> {
    pub fn draw_elements(
        &self,
        mode: GLenum,
        n_indices: GLsizei,
        offset: GLsizei,
    ) -> Result<(), GLErrorWrapper> {
        let offset = unsafe { gl_offset_for::<IT>(offset) };
        unsafe {
            gl::DrawElements(mode, n_indices, IT::TYPE_CODE, offset);
        }
        explode_if_gl_error()
    }

    /// every index in the bundle
    pub fn draw_all(&self, mode: GLenum) -> Result<(), GLErrorWrapper> {
        self.draw_elements(mode, self.bundle.index_count(), 0)
    }
}

impl<'a, AT, IT> Drop for BoundBuffers<'a, AT, IT> {
    fn drop(&mut self) {
        unsafe {
            gl::BindVertexArray(0);
        }
    }
}

//

/// Positions and colors each live in their own tightly packed buffer, with
/// one element buffer; the vertex array records all three.
pub struct VertexBufferBundle<AT, IT> {
    pub vertex_array: VertexArray,
    pub position_buffer: Buffer<ArrayBufferType, AT>,
    pub color_buffer: Buffer<ArrayBufferType, AT>,
    pub index_buffer: Buffer<ElementArrayBufferType, IT>,
}

impl<AT: GLBufferType, IT> VertexBufferBundle<AT, IT> {
    pub fn new() -> Result<Self, GLErrorWrapper> {
        Ok(Self {
            vertex_array: VertexArray::new()?,
            position_buffer: Buffer::new()?,
            color_buffer: Buffer::new()?,
            index_buffer: Buffer::new()?,
        })
    }

    /// create the GL objects and upload xyz positions, rgb colors and indices
    pub fn upload(
        gpu_state: &mut GPUState,
        positions: &[AT],
        position_location: GLuint,
        colors: &[AT],
        color_location: GLuint,
        indices: &[IT],
    ) -> Result<Self, GLErrorWrapper> {
        let mut rval = Self::new()?;
        {
            let binding = rval.vertex_array.bound(gpu_state)?;
            binding.rig_attribute_buffer(
                &mut rval.position_buffer,
                positions,
                position_location,
                3,
                0,
                0,
            )?;
            binding.rig_attribute_buffer(
                &mut rval.color_buffer,
                colors,
                color_location,
                3,
                0,
                0,
            )?;
            binding.load_indices(&mut rval.index_buffer, indices)?;
        }
        log::debug!(
            "uploaded vertex array {}: {} position values, {} color values, {} indices",
            rval.vertex_array.borrow_raw(),
            positions.len(),
            colors.len(),
            indices.len()
        );
        Ok(rval)
    }
}

impl<AT, IT> VertexBufferBundle<AT, IT> {
    pub fn bind<'a>(
        &'a self,
        gpu_state: &'a mut GPUState,
    ) -> Result<BoundBuffers<'a, AT, IT>, GLErrorWrapper> {
        self.vertex_array.bind()?;
        Ok(BoundBuffers {
            gpu_state,
            bundle: self,
        })
    }

    pub fn index_count(&self) -> GLsizei {
        self.index_buffer.len() as GLsizei
    }
}
