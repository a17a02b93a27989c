//! Window event handling and the frame loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::EffectConfig;
use crate::draw::DrawList;
use crate::engine::ParticleEngine;
use crate::error::EffectError;
use crate::gpu::GpuState;
use crate::input::Input;
use crate::theme::ThemeRegistry;
use crate::time::{Interval, Time};

const TITLE_REFRESH: Duration = Duration::from_millis(500);

pub(crate) struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    fade: f32,
    title: String,
    size: (u32, u32),
    registry: ThemeRegistry,
    engine: ParticleEngine,
    input: Input,
    draw_list: DrawList,
    time: Time,
    theme_timer: Interval,
    title_timer: Interval,
    error: Option<EffectError>,
}

impl App {
    pub fn new(
        config: EffectConfig,
        registry: ThemeRegistry,
        title: String,
        size: (u32, u32),
        seed: Option<u64>,
    ) -> Self {
        let engine = match seed {
            Some(seed) => ParticleEngine::with_seed(config.engine, seed),
            None => ParticleEngine::new(config.engine),
        };
        let now = Instant::now();
        Self {
            window: None,
            gpu_state: None,
            fade: config.fade,
            title,
            size,
            registry,
            engine,
            input: Input::new(size.0, size.1),
            draw_list: DrawList::new(size.0, size.1),
            time: Time::new(),
            theme_timer: Interval::new(config.theme_interval(), now),
            title_timer: Interval::new(TITLE_REFRESH, now),
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn into_result(self) -> Result<(), EffectError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EffectError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EffectError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let physical = window.inner_size();
        self.input = Input::new(physical.width, physical.height);
        self.draw_list.resize(physical.width, physical.height);

        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            &self.registry.current().background,
            self.fade,
        ))?;

        window.request_redraw();
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.time.update();
        let now = Instant::now();

        if self.theme_timer.poll(now) {
            let theme = self.registry.advance();
            log::info!("Theme changed to {}", theme.name);
            if let Some(gpu_state) = &mut self.gpu_state {
                gpu_state.set_background(&theme.background);
            }
        }

        self.engine.tick(self.input.pointer());

        self.draw_list.clear();
        self.engine.render(&mut self.draw_list);

        if let Some(gpu_state) = &mut self.gpu_state {
            match gpu_state.render(&self.draw_list) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (width, height) = gpu_state.size();
                    gpu_state.resize(winit::dpi::PhysicalSize::new(width, height));
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            if self.title_timer.poll(now) {
                window.set_title(&format!(
                    "{} | {} | {:.0} fps | {} particles",
                    self.title,
                    self.registry.current().name,
                    self.time.fps(),
                    self.engine.len()
                ));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                self.draw_list
                    .resize(physical_size.width, physical_size.height);
            }
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::Touch(_) => {
                self.input.handle_event(&event);
                let theme = self.registry.current();
                for pointer_event in self.input.drain_events() {
                    self.engine.handle_pointer(pointer_event, theme);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }
}
