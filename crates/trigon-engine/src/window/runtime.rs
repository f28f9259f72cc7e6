use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, StartCtx};
use crate::device::{Gpu, GpuInit};
use crate::error::BootstrapError;
use crate::input::platform::translate_window_event;
use crate::input::InputState;

use super::resize::framebuffer_size_callback;
use super::{RenderLoop, WindowSystem};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Initial inner size in physical pixels.
    pub initial_size: PhysicalSize<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            initial_size: PhysicalSize::new(800, 600),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, hands its context to `app`, and renders until the
    /// loop terminates.
    ///
    /// Everything the runtime created (graphics context, window, window
    /// system) is released before this returns, on success and on error.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<(), BootstrapError>
    where
        A: App + 'static,
    {
        let system = WindowSystem::init()?;
        let mut state = AppState::new(config, gpu_init, app);

        let ran = system.run(&mut state);
        let failure = state.shutdown();

        ran?;
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    render_loop: RenderLoop,
    started: bool,
    failure: Option<BootstrapError>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            render_loop: RenderLoop::new(),
            started: false,
            failure: None,
        }
    }

    /// Records a terminal error and stops the loop. The first error wins.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: BootstrapError) {
        log::error!("{err}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        self.render_loop.request_close();
        event_loop.exit();
    }

    /// Drops the window and its context; returns the recorded error, if any.
    fn shutdown(&mut self) -> Option<BootstrapError> {
        self.entry = None;
        self.failure.take()
    }

    fn create_window_entry(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<WindowEntry, BootstrapError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(true);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| BootstrapError::WindowCreation(e.to_string()))?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .map_err(|e| BootstrapError::ContextLoad(format!("{e:#}")))
    }

    /// Window + context creation, initial viewport, then the app's resource setup.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), BootstrapError> {
        let entry = self.create_window_entry(event_loop)?;
        let entry = self.entry.insert(entry);
        let app = &mut self.app;

        entry.with_mut(|fields| {
            framebuffer_size_callback(&mut *fields.gpu, fields.window.inner_size());

            let mut ctx = StartCtx { gpu: &*fields.gpu };
            app.on_start(&mut ctx)
        })?;

        entry.with_window(|w| w.request_redraw());
        Ok(())
    }

    fn redraw(&mut self) {
        let Self {
            app,
            entry,
            render_loop,
            ..
        } = self;

        let Some(entry) = entry.as_mut() else { return };

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                input: fields.input_state,
                render_loop: &mut *render_loop,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            render_loop.request_close();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // The loop check: a close armed during the last frame takes effect here.
        if !self.render_loop.is_running() {
            event_loop.exit();
            return;
        }

        // No frame pacing beyond what presentation imposes.
        event_loop.set_control_flow(ControlFlow::Poll);

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            entry.with_input_state_mut(|input| input.apply_event(&ev));
        }

        match event {
            WindowEvent::CloseRequested => self.render_loop.request_close(),

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| framebuffer_size_callback(gpu, new_size));
            }

            WindowEvent::RedrawRequested => {
                if self.render_loop.is_running() {
                    self.redraw();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Context and window go before the window system itself.
        self.entry = None;
        log::debug!("window closed");
    }
}
