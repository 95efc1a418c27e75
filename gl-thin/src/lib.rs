pub mod errors;
pub mod gl_fancy;
pub mod gl_helper;
pub mod linear;
pub mod shader_api;
