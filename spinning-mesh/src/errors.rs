use gl_thin::errors::{ProgramBuildError, ShaderCompileError, ShaderLinkError};
use gl_thin::gl_helper::GLErrorWrapper;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

/// Window, display, surface or context creation went wrong
pub struct WindowInitError {
    pub detail: String,
    pub cause: Option<String>,
}

impl WindowInitError {
    pub fn simple(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            cause: None,
        }
    }

    pub fn new(detail: impl Into<String>, cause: impl Display) -> Self {
        Self {
            detail: detail.into(),
            cause: Some(cause.to_string()),
        }
    }
}

impl Debug for WindowInitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(cause) = self.cause.as_ref() {
            write!(f, "{}: {}", self.detail, cause)
        } else {
            f.write_str(&self.detail)
        }
    }
}

impl Display for WindowInitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <Self as Debug>::fmt(self, f)
    }
}

impl std::error::Error for WindowInitError {}

/// This only exists so I can chain a call onto a Result to convert it
pub trait Annotate<T> {
    fn annotate_if_err(self, msg: &str) -> Result<T, WindowInitError>;
}

impl<T, E: Display> Annotate<T> for Result<T, E> {
    fn annotate_if_err(self, msg: &str) -> Result<T, WindowInitError> {
        self.map_err(|e| WindowInitError::new(msg, e))
    }
}

//

#[derive(Debug)]
pub enum GeometryLoadReason {
    NotFound(PathBuf),
    /// the file ended before `section` was fully read
    Truncated {
        section: &'static str,
        offset: u64,
        wanted: usize,
    },
    Io(std::io::Error),
    IndexOutOfRange {
        position: usize,
        value: u32,
        vertex_count: usize,
    },
    OverlappingRanges,
    /// an offset beyond the largest blob we are willing to handle
    LayoutTooLarge { offset: u64, limit: u64 },
}

#[derive(Debug)]
pub struct GeometryLoadError {
    pub reason: GeometryLoadReason,
}

impl GeometryLoadError {
    pub fn new(reason: GeometryLoadReason) -> Self {
        Self { reason }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.reason, GeometryLoadReason::Truncated { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.reason, GeometryLoadReason::NotFound(_))
    }
}

impl Display for GeometryLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            GeometryLoadReason::NotFound(path) => {
                write!(f, "geometry file {} not found", path.display())
            }
            GeometryLoadReason::Truncated {
                section,
                offset,
                wanted,
            } => write!(
                f,
                "geometry file truncated: {} needs {} bytes at offset {}",
                section, wanted, offset
            ),
            GeometryLoadReason::Io(e) => write!(f, "geometry file unreadable: {}", e),
            GeometryLoadReason::IndexOutOfRange {
                position,
                value,
                vertex_count,
            } => write!(
                f,
                "index {} at position {} is out of range for {} vertices",
                value, position, vertex_count
            ),
            GeometryLoadReason::OverlappingRanges => {
                f.write_str("vertex and index byte ranges overlap")
            }
            GeometryLoadReason::LayoutTooLarge { offset, limit } => write!(
                f,
                "blob offset {} is past the {} byte limit",
                offset, limit
            ),
        }
    }
}

impl std::error::Error for GeometryLoadError {}

impl From<GeometryLoadReason> for GeometryLoadError {
    fn from(reason: GeometryLoadReason) -> Self {
        Self { reason }
    }
}

//

/// Anything that stops the demo.  All of these are fatal at startup.
pub enum DemoError {
    WindowInit(WindowInitError),
    ShaderCompile(ShaderCompileError),
    ShaderLink(ShaderLinkError),
    GeometryLoad(GeometryLoadError),
    Gl(GLErrorWrapper),
}

impl Debug for DemoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoError::WindowInit(e) => write!(f, "window init failed: {}", e),
            DemoError::ShaderCompile(e) => write!(f, "{}", e),
            DemoError::ShaderLink(e) => write!(f, "{}", e),
            DemoError::GeometryLoad(e) => write!(f, "{}", e),
            DemoError::Gl(e) => write!(f, "GL error {:?}", e),
        }
    }
}

impl Display for DemoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <Self as Debug>::fmt(self, f)
    }
}

impl std::error::Error for DemoError {}

impl From<WindowInitError> for DemoError {
    fn from(value: WindowInitError) -> Self {
        DemoError::WindowInit(value)
    }
}

impl From<GeometryLoadError> for DemoError {
    fn from(value: GeometryLoadError) -> Self {
        DemoError::GeometryLoad(value)
    }
}

impl From<GLErrorWrapper> for DemoError {
    fn from(value: GLErrorWrapper) -> Self {
        DemoError::Gl(value)
    }
}

impl From<ProgramBuildError> for DemoError {
    fn from(value: ProgramBuildError) -> Self {
        match value {
            ProgramBuildError::Compile(e) => DemoError::ShaderCompile(e),
            ProgramBuildError::Link(e) => DemoError::ShaderLink(e),
            ProgramBuildError::Gl(e) => DemoError::Gl(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gl_thin::shader_api::ShaderStage;

    #[test]
    fn program_errors_keep_their_kind() {
        let compile = ProgramBuildError::Compile(ShaderCompileError {
            stage: ShaderStage::Fragment,
            diagnostic: "oops".into(),
        });
        match DemoError::from(compile) {
            DemoError::ShaderCompile(e) => assert_eq!(e.stage, ShaderStage::Fragment),
            other => panic!("wrong kind {:?}", other),
        }

        let link = ProgramBuildError::Link(ShaderLinkError {
            diagnostic: "nope".into(),
        });
        assert!(matches!(DemoError::from(link), DemoError::ShaderLink(_)));
    }

    #[test]
    fn annotate_keeps_the_cause() {
        let rval: Result<(), String> = Err("no EGL".to_string());
        let err = rval.annotate_if_err("building display").unwrap_err();
        assert_eq!(err.to_string(), "building display: no EGL");
    }

    #[test]
    fn truncation_message_names_the_section() {
        let err = GeometryLoadError::new(GeometryLoadReason::Truncated {
            section: "wire indices",
            offset: 512,
            wanted: 108,
        });
        assert!(err.is_truncated());
        assert!(err.to_string().contains("wire indices"));
    }
}
