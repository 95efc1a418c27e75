use crate::config::WindowSettings;
use crate::errors::{Annotate, DemoError, WindowInitError};
use crate::geometry::MeshGeometry;
use crate::motion::Camera;
use crate::scene::{MeshKind, RenderContext};
use crate::Drawable;
use gl_thin::gl_helper::{gl_string, initialize_gl_with, GLErrorWrapper};
use glutin::config::{Config, ConfigTemplate, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{Display, DisplayApiPreference, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use log::debug;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use std::num::NonZeroU32;
use std::time::Instant;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

/// The window plus the GL surface and context that draw into it.
pub struct GlWindow {
    // drop order: context and surface go before the window they point into
    pub context: PossiblyCurrentContext,
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    /// Create template to find OpenGL config.
    pub fn config_template(raw_window_handle: RawWindowHandle) -> ConfigTemplate {
        ConfigTemplateBuilder::new()
            .with_depth_size(24)
            .compatible_with_native_window(raw_window_handle)
            .build()
    }

    pub fn new(
        event_loop: &ActiveEventLoop,
        settings: &WindowSettings,
    ) -> Result<Self, WindowInitError> {
        let attributes = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(PhysicalSize::new(settings.width, settings.height));
        let window = event_loop
            .create_window(attributes)
            .annotate_if_err("creating window")?;

        let raw_window_handle = window
            .window_handle()
            .annotate_if_err("window handle")?
            .as_raw();
        let raw_display = window
            .display_handle()
            .annotate_if_err("display handle")?
            .as_raw();

        let display = unsafe { Display::new(raw_display, display_preference(raw_window_handle)) }
            .annotate_if_err("building GL display")?;

        let config = Self::choose_config(&display, raw_window_handle)?;

        let context = {
            let attr = ContextAttributesBuilder::new()
                .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
                .with_profile(GlProfile::Core)
                .build(Some(raw_window_handle));
            unsafe { display.create_context(&config, &attr) }
        }
        .annotate_if_err("creating GL 3.3 core context")?;

        let (width, height): (u32, u32) = window.inner_size().into();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        );
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .annotate_if_err("creating window surface")?;

        let context = context
            .make_current(&surface)
            .annotate_if_err("making context current")?;

        if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
            log::warn!("could not turn on vsync: {}", e);
        }

        initialize_gl_with(|name| display.get_proc_address(name));

        Ok(Self {
            context,
            surface,
            window,
        })
    }

    fn choose_config(
        display: &Display,
        raw_window_handle: RawWindowHandle,
    ) -> Result<Config, WindowInitError> {
        let template = Self::config_template(raw_window_handle);
        let configs_list: Vec<_> = unsafe { display.find_configs(template) }
            .annotate_if_err("listing GL configs")?
            .collect();
        debug!("glutin display configs [{}]", configs_list.len());

        configs_list
            .into_iter()
            .reduce(|accum, config| {
                // Find the config with the maximum number of samples.
                if config.num_samples() > accum.num_samples() {
                    config
                } else {
                    accum
                }
            })
            .ok_or_else(|| WindowInitError::simple("no GL config matches the window"))
    }

    pub fn swap_buffers(&self) -> Result<(), GLErrorWrapper> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| GLErrorWrapper::with_message(format!("swap_buffers failed: {}", e)))
    }
}

#[cfg(target_os = "windows")]
fn display_preference(raw_window_handle: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Wgl(Some(raw_window_handle))
}

#[cfg(target_os = "macos")]
fn display_preference(_raw_window_handle: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn display_preference(_raw_window_handle: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

//

pub struct ActiveRenderer {
    // declared first so the GL objects die while the context is alive
    pub render_context: RenderContext,
    pub gl_window: GlWindow,
    pub started: Instant,
}

impl ActiveRenderer {
    /// Any failure here is fatal; geometry and colors are settled beforehand.
    pub fn new(
        event_loop: &ActiveEventLoop,
        settings: &WindowSettings,
        geometry: &MeshGeometry,
        colors: &[f32],
    ) -> Result<Self, DemoError> {
        let gl_window = GlWindow::new(event_loop, settings)?;
        if let Some(version) = gl_string(gl::VERSION) {
            log::info!("GL version {}", version);
        }

        let size = gl_window.window.inner_size();
        let camera = Camera::for_viewport(size.width, size.height);
        let render_context = RenderContext::new(geometry, colors, &camera)?;
        debug!(
            "solid mesh {} indices, wire mesh {} indices",
            render_context.index_count(MeshKind::Solid),
            render_context.index_count(MeshKind::Wire)
        );

        Ok(Self {
            render_context,
            gl_window,
            started: Instant::now(),
        })
    }
}

impl Drawable for ActiveRenderer {
    fn draw_frame(&mut self) -> Result<(), DemoError> {
        let elapsed = self.started.elapsed().as_secs_f32();
        self.render_context.draw(elapsed)?;
        self.gl_window.swap_buffers()?;
        Ok(())
    }

    fn request_redraw(&self) {
        self.gl_window.window.request_redraw();
    }
}
