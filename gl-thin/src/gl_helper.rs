use crate::errors::{ProgramBuildError, ShaderCompileError, ShaderLinkError};
use crate::gl_fancy::{BoundVertexArray, GPUState};
use crate::shader_api::{NativeGl, ShaderApi, ShaderStage};
use gl::types::{GLchar, GLenum, GLfloat, GLint, GLsizei, GLsizeiptr, GLuint, GLushort};
use std::ffi::{c_void, CStr, CString};
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::mem::{size_of, MaybeUninit};

/// Load the GL function pointers through whatever the windowing layer offers
/// (`glutin`'s `GlDisplay::get_proc_address`, usually).
pub fn initialize_gl_with(mut loader: impl FnMut(&CStr) -> *const c_void) {
    gl::load_with(|name| match CString::new(name) {
        Ok(name) => loader(&name),
        Err(_) => std::ptr::null(),
    });
}

pub fn explode_if_gl_error() -> Result<(), GLErrorWrapper> {
    let mut last_err = None;
    loop {
        let err = unsafe { gl::GetError() };
        if err == gl::NO_ERROR {
            break;
        } else {
            last_err = Some(err);
        }
    }

    match last_err {
        Some(e) => Err(GLErrorWrapper::new(e)),
        None => Ok(()),
    }
}

/// `glGetString`, for the version banner and friends
pub fn gl_string(name: GLenum) -> Option<String> {
    let raw = unsafe { gl::GetString(name) };
    if raw.is_null() {
        None
    } else {
        let text = unsafe { CStr::from_ptr(raw as *const std::ffi::c_char) };
        Some(text.to_string_lossy().into_owned())
    }
}

/// `mode` is `gl::FILL` or `gl::LINE`
pub fn set_polygon_mode(mode: GLenum) -> Result<(), GLErrorWrapper> {
    unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode) };
    explode_if_gl_error()
}

//

#[derive(Clone)]
pub struct GLErrorWrapper {
    pub code: GLenum,
    pub message: Option<String>,
}

impl GLErrorWrapper {
    pub fn with_message(msg: impl Into<String>) -> Self {
        Self {
            code: 0,
            message: Some(msg.into()),
        }
    }

    pub fn new(code: GLenum) -> Self {
        Self {
            code,
            message: None,
        }
    }
}

impl Debug for GLErrorWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{:?}", msg),
            None => write!(f, "0x{:x}", self.code),
        }
    }
}

impl Display for GLErrorWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <Self as Debug>::fmt(self, f)
    }
}

impl std::error::Error for GLErrorWrapper {}

//

pub trait BufferTarget {
    const TARGET: GLenum;
}

pub struct ArrayBufferType {}
impl BufferTarget for ArrayBufferType {
    const TARGET: GLenum = gl::ARRAY_BUFFER;
}

pub struct ElementArrayBufferType {}
impl BufferTarget for ElementArrayBufferType {
    const TARGET: GLenum = gl::ELEMENT_ARRAY_BUFFER;
}

//

pub struct VertexArray(GLuint);

impl VertexArray {
    pub fn new() -> Result<Self, GLErrorWrapper> {
        let mut rval = MaybeUninit::uninit();
        unsafe { gl::GenVertexArrays(1, rval.as_mut_ptr()) };
        explode_if_gl_error()?;
        Ok(Self(unsafe { rval.assume_init() }))
    }

    pub fn bind(&self) -> Result<(), GLErrorWrapper> {
        unsafe { gl::BindVertexArray(self.0) }
        explode_if_gl_error()
    }

    pub fn bound<'a, 'g>(
        &'a self,
        gpu_state: &'g mut GPUState,
    ) -> Result<BoundVertexArray<'a, 'g>, GLErrorWrapper> {
        BoundVertexArray::new(self, gpu_state)
    }

    pub fn borrow_raw(&self) -> GLuint {
        self.0
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.0) }
    }
}

//

/// A GL buffer object.  The data is copied into GL with `STATIC_DRAW`, so only
/// the element count is remembered.
pub struct Buffer<B, T> {
    handle: GLuint,
    len: usize,
    phantom_data: PhantomData<(B, T)>,
}

impl<B, T> Buffer<B, T> {
    pub fn new() -> Result<Self, GLErrorWrapper> {
        let mut rval = MaybeUninit::uninit();
        unsafe { gl::GenBuffers(1, rval.as_mut_ptr()) };
        explode_if_gl_error()?;

        Ok(Buffer {
            handle: unsafe { rval.assume_init() },
            len: 0,
            phantom_data: Default::default(),
        })
    }

    /// number of elements uploaded by the last [Buffer::load]
    pub fn len(&self) -> usize {
        self.len
    }
}

impl<B, T> Drop for Buffer<B, T> {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.handle) }
    }
}

impl<B: BufferTarget, T> Buffer<B, T> {
    /// binds the buffer to its target and uploads `values`
    pub fn load(&mut self, values: &[T]) -> Result<(), GLErrorWrapper> {
        self.bind()?;
        let byte_count: GLsizeiptr = std::mem::size_of_val(values) as GLsizeiptr;
        unsafe {
            gl::BufferData(
                B::TARGET,
                byte_count,
                values.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            )
        }
        self.len = values.len();
        explode_if_gl_error()
    }

    pub fn bind(&self) -> Result<(), GLErrorWrapper> {
        unsafe { gl::BindBuffer(B::TARGET, self.handle) };
        explode_if_gl_error()
    }

    pub fn borrow_raw(&self) -> GLuint {
        self.handle
    }
}

//

pub trait ShaderFlavor {
    const STAGE: ShaderStage;
}

pub struct VertexShader {}
impl ShaderFlavor for VertexShader {
    const STAGE: ShaderStage = ShaderStage::Vertex;
}

pub struct FragmentShader {}
impl ShaderFlavor for FragmentShader {
    const STAGE: ShaderStage = ShaderStage::Fragment;
}

//

/// A compiled shader stage.  The GL object is deleted when this drops, so a
/// stage that fails to compile never outlives [Shader::compile_with].
pub struct Shader<F, A: ShaderApi = NativeGl> {
    handle: Option<GLuint>,
    api: A,
    phantom_data: PhantomData<F>,
}

impl<F: ShaderFlavor> Shader<F> {
    pub fn compile(source: impl AsRef<str>) -> Result<Self, ProgramBuildError> {
        Self::compile_with(NativeGl, source)
    }
}

impl<F: ShaderFlavor, A: ShaderApi> Shader<F, A> {
    pub fn compile_with(api: A, source: impl AsRef<str>) -> Result<Self, ProgramBuildError> {
        let handle = api.create_shader(F::STAGE)?;
        let rval = Self {
            handle: Some(handle),
            api,
            phantom_data: Default::default(),
        };

        rval.api.compile_source(handle, source.as_ref())?;

        if !rval.api.compile_status(handle) {
            let diagnostic = rval.api.shader_info_log(handle);
            log::debug!("failed to compile {} shader:\n{}", F::STAGE, diagnostic);
            return Err(ShaderCompileError {
                stage: F::STAGE,
                diagnostic,
            }
            .into());
        }

        Ok(rval)
    }
}

impl<F, A: ShaderApi> Shader<F, A> {
    /// get access to the GL handle in case you need to call some low-level stuff
    pub fn borrow(&self) -> GLuint {
        self.handle.unwrap_or(0)
    }
}

impl<F, A: ShaderApi> Drop for Shader<F, A> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.api.delete_shader(handle)
        }
    }
}

//

pub struct Program<A: ShaderApi = NativeGl> {
    handle: GLuint,
    api: A,
}

impl Program {
    pub fn compile(
        vertex_shader: impl AsRef<str>,
        fragment_shader: impl AsRef<str>,
    ) -> Result<Self, ProgramBuildError> {
        Self::compile_with(NativeGl, vertex_shader, fragment_shader)
    }
}

impl<A: ShaderApi> Program<A> {
    /// Compile both stages, then link.  A stage that fails to compile stops the
    /// build before any program object exists.
    pub fn compile_with(
        api: A,
        vertex_shader: impl AsRef<str>,
        fragment_shader: impl AsRef<str>,
    ) -> Result<Self, ProgramBuildError> {
        let vertex_shader = Shader::<VertexShader, A>::compile_with(api.clone(), vertex_shader)?;
        let fragment_shader =
            Shader::<FragmentShader, A>::compile_with(api.clone(), fragment_shader)?;

        let handle = api.create_program()?;
        let rval = Self { handle, api };
        rval.attach(&vertex_shader)?;
        rval.attach(&fragment_shader)?;

        let linked = rval.api.link_program(handle);

        rval.detach(&vertex_shader);
        rval.detach(&fragment_shader);

        linked?;
        if !rval.api.link_status(handle) {
            let diagnostic = rval.api.program_info_log(handle);
            log::debug!("failed to link shader program:\n{}", diagnostic);
            return Err(ShaderLinkError { diagnostic }.into());
        }

        if !rval.api.validate_program(handle) {
            log::warn!(
                "shader program did not validate: {}",
                rval.api.program_info_log(handle)
            );
        }

        Ok(rval)
    }

    pub fn borrow(&self) -> GLuint {
        self.handle
    }

    fn attach<T>(&self, shader: &Shader<T, A>) -> Result<(), GLErrorWrapper> {
        self.api.attach_shader(self.handle, shader.borrow())
    }

    fn detach<T>(&self, shader: &Shader<T, A>) {
        self.api.detach_shader(self.handle, shader.borrow())
    }
}

impl Program {
    pub fn use_(&self) -> Result<(), GLErrorWrapper> {
        unsafe { gl::UseProgram(self.handle) }
        explode_if_gl_error()
    }

    pub fn get_uniform_location(&self, name: &str) -> Result<GLint, GLErrorWrapper> {
        let c_name = CString::new(name)
            .map_err(|_| GLErrorWrapper::with_message(format!("bad uniform name {:?}", name)))?;
        let rval = unsafe { gl::GetUniformLocation(self.handle, c_name.as_ptr() as *const GLchar) };
        explode_if_gl_error()?;
        if rval < 0 {
            return Err(GLErrorWrapper::with_message(format!(
                "no uniform named {}",
                name
            )));
        }
        Ok(rval)
    }

    pub fn set_mat4u(&self, location: GLint, val: &[f32; 16]) -> Result<(), GLErrorWrapper> {
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, val.as_ptr()) }
        explode_if_gl_error()
    }
}

impl<A: ShaderApi> Drop for Program<A> {
    fn drop(&mut self) {
        self.api.delete_program(self.handle)
    }
}

//

pub trait GLBufferType {
    const TYPE_CODE: GLenum;
}

impl GLBufferType for GLfloat {
    const TYPE_CODE: GLenum = gl::FLOAT;
}

impl GLBufferType for u8 {
    const TYPE_CODE: GLenum = gl::UNSIGNED_BYTE;
}

impl GLBufferType for GLushort {
    const TYPE_CODE: GLenum = gl::UNSIGNED_SHORT;
}

impl GLBufferType for GLuint {
    const TYPE_CODE: GLenum = gl::UNSIGNED_INT;
}

/// # Safety
/// The "pointer" returned by this function is really just a byte offset (delta).
/// The OpenGL API is dumb like that.
/// Do not try to dereference it.
/// It is only good for calls to functions like gl::VertexAttribPointer and gl::DrawElements
pub const unsafe fn gl_offset_for<T>(count: GLsizei) -> *const c_void {
    (count as usize * size_of::<T>()) as *const c_void
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;

    /// Records what the build path does instead of talking to a driver.
    /// A source containing "syntax error" fails to compile.
    #[derive(Default)]
    struct FakeState {
        next_handle: GLuint,
        sources: HashMap<GLuint, String>,
        live_shaders: HashSet<GLuint>,
        live_programs: HashSet<GLuint>,
        attached: HashMap<GLuint, HashSet<GLuint>>,
        compiled: Vec<ShaderStage>,
        stages: HashMap<GLuint, ShaderStage>,
        programs_created: usize,
        links: usize,
        fail_link: bool,
    }

    #[derive(Clone, Default)]
    struct FakeGl(Rc<RefCell<FakeState>>);

    impl FakeGl {
        fn failing_link() -> Self {
            let rval = Self::default();
            rval.0.borrow_mut().fail_link = true;
            rval
        }
    }

    impl ShaderApi for FakeGl {
        fn create_shader(&self, stage: ShaderStage) -> Result<GLuint, GLErrorWrapper> {
            let mut state = self.0.borrow_mut();
            state.next_handle += 1;
            let handle = state.next_handle;
            state.live_shaders.insert(handle);
            state.stages.insert(handle, stage);
            Ok(handle)
        }

        fn compile_source(&self, shader: GLuint, source: &str) -> Result<(), GLErrorWrapper> {
            let mut state = self.0.borrow_mut();
            let stage = state.stages[&shader];
            state.compiled.push(stage);
            state.sources.insert(shader, source.to_string());
            Ok(())
        }

        fn compile_status(&self, shader: GLuint) -> bool {
            !self.0.borrow().sources[&shader].contains("syntax error")
        }

        fn shader_info_log(&self, _shader: GLuint) -> String {
            "0:2(1): error: syntax error, unexpected IDENTIFIER".to_string()
        }

        fn delete_shader(&self, shader: GLuint) {
            self.0.borrow_mut().live_shaders.remove(&shader);
        }

        fn create_program(&self) -> Result<GLuint, GLErrorWrapper> {
            let mut state = self.0.borrow_mut();
            state.next_handle += 1;
            let handle = state.next_handle;
            state.live_programs.insert(handle);
            state.programs_created += 1;
            Ok(handle)
        }

        fn attach_shader(&self, program: GLuint, shader: GLuint) -> Result<(), GLErrorWrapper> {
            let mut state = self.0.borrow_mut();
            assert!(state.live_shaders.contains(&shader));
            state.attached.entry(program).or_default().insert(shader);
            Ok(())
        }

        fn detach_shader(&self, program: GLuint, shader: GLuint) {
            if let Some(set) = self.0.borrow_mut().attached.get_mut(&program) {
                set.remove(&shader);
            }
        }

        fn link_program(&self, program: GLuint) -> Result<(), GLErrorWrapper> {
            let mut state = self.0.borrow_mut();
            assert_eq!(state.attached[&program].len(), 2, "linked with a stage missing");
            state.links += 1;
            Ok(())
        }

        fn link_status(&self, _program: GLuint) -> bool {
            !self.0.borrow().fail_link
        }

        fn validate_program(&self, _program: GLuint) -> bool {
            true
        }

        fn program_info_log(&self, _program: GLuint) -> String {
            "error: vertex shader output `v_color' not read".to_string()
        }

        fn delete_program(&self, program: GLuint) {
            self.0.borrow_mut().live_programs.remove(&program);
        }
    }

    const GOOD_VERTEX: &str = "void main() { gl_Position = vec4(0.0); }";
    const GOOD_FRAGMENT: &str = "out vec4 c; void main() { c = vec4(1.0); }";
    const BROKEN: &str = "void main() { syntax error }";

    #[test]
    fn valid_sources_link() {
        let api = FakeGl::default();
        let program = Program::compile_with(api.clone(), GOOD_VERTEX, GOOD_FRAGMENT).unwrap();
        assert_ne!(program.borrow(), 0);
        {
            let state = api.0.borrow();
            assert_eq!(state.links, 1);
            assert!(state.live_programs.contains(&program.borrow()));
            // stage objects are released once the program is linked
            assert!(state.live_shaders.is_empty());
            assert!(state.attached[&program.borrow()].is_empty());
        }
        drop(program);
        assert!(api.0.borrow().live_programs.is_empty());
    }

    #[test]
    fn vertex_syntax_error_stops_before_fragment() {
        let api = FakeGl::default();
        let err = Program::compile_with(api.clone(), BROKEN, GOOD_FRAGMENT)
            .err()
            .unwrap();
        match err {
            ProgramBuildError::Compile(e) => {
                assert_eq!(e.stage, ShaderStage::Vertex);
                assert!(e.diagnostic.contains("syntax error"));
            }
            other => panic!("expected a compile error, got {:?}", other),
        }
        let state = api.0.borrow();
        assert_eq!(state.compiled, vec![ShaderStage::Vertex]);
        assert_eq!(state.programs_created, 0);
        assert_eq!(state.links, 0);
        assert!(state.live_shaders.is_empty());
    }

    #[test]
    fn fragment_syntax_error_releases_vertex_stage() {
        let api = FakeGl::default();
        let err = Program::compile_with(api.clone(), GOOD_VERTEX, BROKEN)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ProgramBuildError::Compile(ShaderCompileError {
                stage: ShaderStage::Fragment,
                ..
            })
        ));
        let state = api.0.borrow();
        assert_eq!(state.programs_created, 0);
        assert!(state.live_shaders.is_empty());
    }

    #[test]
    fn failed_link_is_reported_and_cleaned_up() {
        let api = FakeGl::failing_link();
        let err = Program::compile_with(api.clone(), GOOD_VERTEX, GOOD_FRAGMENT)
            .err()
            .unwrap();
        match err {
            ProgramBuildError::Link(e) => assert!(e.diagnostic.contains("v_color")),
            other => panic!("expected a link error, got {:?}", other),
        }
        let state = api.0.borrow();
        assert_eq!(state.links, 1);
        assert!(state.live_programs.is_empty());
        assert!(state.live_shaders.is_empty());
    }

    #[test]
    fn failed_shader_is_never_handed_out() {
        let api = FakeGl::default();
        let rval = Shader::<VertexShader, FakeGl>::compile_with(api.clone(), BROKEN);
        assert!(rval.is_err());
        assert!(api.0.borrow().live_shaders.is_empty());
    }

    #[test]
    fn offsets_are_byte_counts() {
        assert_eq!(unsafe { gl_offset_for::<GLuint>(3) } as usize, 12);
        assert_eq!(unsafe { gl_offset_for::<u8>(5) } as usize, 5);
    }
}
