use crate::colors::generate_colors;
use crate::config::DemoConfig;
use crate::drawcore::ActiveRenderer;
use crate::errors::{Annotate, DemoError};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

pub mod colors;
pub mod config;
pub mod drawcore;
pub mod errors;
pub mod geometry;
pub mod logging;
pub mod mesh_data;
pub mod motion;
pub mod scene;

//

pub trait Drawable {
    fn draw_frame(&mut self) -> Result<(), DemoError>;

    fn request_redraw(&self);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initialized,
    Rendering,
    Terminated,
}

pub enum AppState<T> {
    Uninitialized,
    Initialized(T),
    Rendering(T),
    Terminated,
}

impl<T> Default for AppState<T> {
    fn default() -> Self {
        Self::Uninitialized
    }
}

impl<T> AppState<T> {
    pub fn phase(&self) -> Phase {
        match self {
            AppState::Uninitialized => Phase::Uninitialized,
            AppState::Initialized(_) => Phase::Initialized,
            AppState::Rendering(_) => Phase::Rendering,
            AppState::Terminated => Phase::Terminated,
        }
    }

    /// Only the first successful build counts.
    pub fn initialize(&mut self, drawable: T) -> bool {
        if let AppState::Uninitialized = self {
            *self = AppState::Initialized(drawable);
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> Option<&T> {
        match self {
            AppState::Initialized(x) | AppState::Rendering(x) => Some(x),
            _ => None,
        }
    }

    /// `Initialized` becomes `Rendering` on the first frame.
    pub fn begin_frame(&mut self) -> Option<&mut T> {
        if let AppState::Initialized(_) = self {
            if let AppState::Initialized(x) = std::mem::take(self) {
                *self = AppState::Rendering(x);
            }
        }
        match self {
            AppState::Rendering(x) => Some(x),
            _ => None,
        }
    }

    /// Hands back the drawable so the caller controls when it is dropped.
    pub fn terminate(&mut self) -> Option<T> {
        match std::mem::replace(self, AppState::Terminated) {
            AppState::Initialized(x) | AppState::Rendering(x) => Some(x),
            _ => None,
        }
    }
}

impl<T: Drawable> AppState<T> {
    pub fn redraw(&mut self) -> Result<(), DemoError> {
        match self.begin_frame() {
            Some(app) => app.draw_frame(),
            None => Ok(()),
        }
    }
}

//

/// The state machine plus the first fatal error, independent of the event loop.
pub struct RenderLoop<T> {
    state: AppState<T>,
    failure: Option<DemoError>,
}

impl<T> Default for RenderLoop<T> {
    fn default() -> Self {
        Self {
            state: AppState::default(),
            failure: None,
        }
    }
}

impl<T> RenderLoop<T> {
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn active(&self) -> Option<&T> {
        self.state.active()
    }

    /// Take the result of building the drawable.  Returns false once the loop
    /// should exit.
    pub fn start(&mut self, built: Result<T, DemoError>) -> bool {
        match built {
            Ok(x) => {
                if self.state.initialize(x) {
                    log::debug!("renderer initialized");
                }
                self.phase() != Phase::Terminated
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    /// Drops the drawable and keeps `error` unless an earlier one is already
    /// kept.
    pub fn fail(&mut self, error: DemoError) {
        log::error!("{}", error);
        drop(self.state.terminate());
        if self.failure.is_none() {
            self.failure = Some(error);
        }
    }

    pub fn close(&mut self) {
        drop(self.state.terminate());
    }

    pub fn failure(&self) -> Option<&DemoError> {
        self.failure.as_ref()
    }

    /// The first fatal error, if any.
    pub fn into_result(self) -> Result<(), DemoError> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<T: Drawable> RenderLoop<T> {
    /// Returns false once the loop should exit.
    pub fn redraw(&mut self) -> bool {
        match self.state.redraw() {
            Ok(()) => true,
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }
}

//

pub struct DemoApp<T, F>
where
    F: FnMut(&ActiveEventLoop) -> Result<T, DemoError>,
{
    render_loop: RenderLoop<T>,
    factory: F,
}

impl<T, F> DemoApp<T, F>
where
    F: FnMut(&ActiveEventLoop) -> Result<T, DemoError>,
{
    pub fn new(factory: F) -> Self {
        Self {
            render_loop: RenderLoop::default(),
            factory,
        }
    }

    pub fn phase(&self) -> Phase {
        self.render_loop.phase()
    }

    pub fn into_result(self) -> Result<(), DemoError> {
        self.render_loop.into_result()
    }
}

impl<T: Drawable, F> ApplicationHandler for DemoApp<T, F>
where
    F: FnMut(&ActiveEventLoop) -> Result<T, DemoError>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_loop.phase() != Phase::Uninitialized {
            return;
        }
        if !self.render_loop.start((self.factory)(event_loop)) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        log::trace!("Received Winit event: {event:?}");
        match event {
            WindowEvent::RedrawRequested => {
                if !self.render_loop.redraw() {
                    event_loop.exit();
                }
            }
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.render_loop.close();
                event_loop.exit();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(app) = self.render_loop.active() {
            app.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.render_loop.close();
    }
}

//

/// Load geometry and colors, open the window and spin until it is closed.
pub fn run(config: DemoConfig) -> Result<(), DemoError> {
    let source = config.geometry.clone().into_source();
    log::info!("geometry source: {}", source.describe());
    let geometry = source.load()?;
    if let Some((lo, hi)) = geometry.bounds() {
        log::debug!(
            "{} vertices spanning {:?}..{:?}",
            geometry.vertex_count(),
            lo,
            hi
        );
    }

    let seed = config.color_seed.resolve();
    log::info!("color seed {}", seed);
    let colors = generate_colors(seed);

    let event_loop = EventLoop::new().annotate_if_err("building event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = config.window;
    let mut app = DemoApp::new(move |event_loop: &ActiveEventLoop| {
        ActiveRenderer::new(event_loop, &window, &geometry, &colors)
    });
    event_loop
        .run_app(&mut app)
        .annotate_if_err("running event loop")?;

    app.into_result()
}
