//! Frame driver: window and GPU setup, then one UI frame per redraw.

use std::sync::Arc;

use tintpad_gpu::{CanvasSize, CanvasSizeSource, GpuContext, GpuError, MsaaTarget};
use web_time::Duration;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::AppConfig;
use crate::diagnostics::{self, Diagnostics, FrameTimer};
use crate::error::{AppError, Result};
use crate::fonts;
use crate::keybindings::KeyBindings;
use crate::palette::Palette;
use crate::renderer::{EguiRenderer, FrameOutput};
use crate::state::UiState;
use crate::ui;

/// Events sent to the loop from outside the winit callbacks.
pub enum AppEvent {
    /// Asynchronous GPU initialization finished (browser build).
    GpuReady(std::result::Result<GpuContext, GpuError>),
}

/// Device, swap chain and everything drawn with them.
struct Graphics {
    gpu: GpuContext,
    msaa: MsaaTarget,
    renderer: EguiRenderer,
    canvas: Box<dyn CanvasSizeSource>,
}

struct Running {
    window: Arc<Window>,
    graphics: Graphics,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    ui: UiState,
    diagnostics: Diagnostics,
    timer: FrameTimer,
    /// False while the canvas has a zero dimension
    presentable: bool,
}

enum Phase {
    Init,
    /// Window exists, GPU context still being created
    #[cfg(target_arch = "wasm32")]
    Pending {
        window: Arc<Window>,
        canvas: Box<dyn CanvasSizeSource>,
    },
    Running(Box<Running>),
    Failed,
}

pub struct TintpadApp {
    config: AppConfig,
    bindings: KeyBindings,
    phase: Phase,
    startup_error: Option<AppError>,
    #[cfg(target_arch = "wasm32")]
    proxy: winit::event_loop::EventLoopProxy<AppEvent>,
}

impl TintpadApp {
    fn window_attributes(&self) -> WindowAttributes {
        let attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_resizable(self.config.resizable);

        // In the browser the canvas CSS box decides the size
        #[cfg(not(target_arch = "wasm32"))]
        let attributes = attributes.with_inner_size(winit::dpi::LogicalSize::new(
            self.config.window_size.0,
            self.config.window_size.1,
        ));

        attributes
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn create_window(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<(Arc<Window>, Box<dyn CanvasSizeSource>)> {
        let window = Arc::new(event_loop.create_window(self.window_attributes())?);
        let canvas = Box::new(tintpad_gpu::WindowCanvas::new(window.clone()));
        Ok((window, canvas))
    }

    #[cfg(target_arch = "wasm32")]
    fn create_window(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<(Arc<Window>, Box<dyn CanvasSizeSource>)> {
        use winit::platform::web::WindowAttributesExtWebSys;

        let element = crate::wasm::find_or_create_canvas(self.config.window_size)?;
        let attributes = self.window_attributes().with_canvas(Some(element.clone()));
        let window = Arc::new(event_loop.create_window(attributes)?);
        Ok((window, Box::new(tintpad_gpu::HtmlCanvas::new(element))))
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (window, canvas) = self.create_window(event_loop)?;
        log::info!("Window created: {}", CanvasSize::from(window.inner_size()));

        #[cfg(not(target_arch = "wasm32"))]
        {
            let gpu = pollster::block_on(GpuContext::with_config(
                window.clone(),
                self.config.gpu_config(),
            ))?;
            self.finish_init(window, canvas, gpu);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            let gpu_config = self.config.gpu_config();
            let target = window.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = GpuContext::with_config(target, gpu_config).await;
                if proxy.send_event(AppEvent::GpuReady(result)).is_err() {
                    log::error!("Event loop closed before GPU initialization finished");
                }
            });
            self.phase = Phase::Pending { window, canvas };
        }

        Ok(())
    }

    fn finish_init(
        &mut self,
        window: Arc<Window>,
        canvas: Box<dyn CanvasSizeSource>,
        gpu: GpuContext,
    ) {
        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::dark());
        fonts::install(&egui_ctx, &self.config);

        let max_texture_side = gpu.device.limits().max_texture_dimension_2d as usize;
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window.as_ref(),
            Some(window.scale_factor() as f32),
            window.theme(),
            Some(max_texture_side),
        );

        let msaa = MsaaTarget::new(&gpu.device, gpu.format(), gpu.msaa_samples());
        let renderer = EguiRenderer::new(&gpu);
        log::info!(
            "GPU ready: {:?}, {:?}, {}x MSAA",
            gpu.format(),
            gpu.present_mode(),
            gpu.msaa_samples()
        );

        window.request_redraw();
        self.phase = Phase::Running(Box::new(Running {
            window,
            graphics: Graphics {
                gpu,
                msaa,
                renderer,
                canvas,
            },
            egui_ctx,
            egui_state,
            ui: UiState::new(Palette::hsv_sweep()),
            diagnostics: Diagnostics::default(),
            timer: FrameTimer::new(),
            presentable: true,
        }));
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("Startup failed: {}", error);
        self.startup_error = Some(error);
        self.phase = Phase::Failed;
        event_loop.exit();
    }
}

impl ApplicationHandler<AppEvent> for TintpadApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !matches!(self.phase, Phase::Init) {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::GpuReady(Err(e)) => self.fail(event_loop, e.into()),
            AppEvent::GpuReady(Ok(gpu)) => {
                #[cfg(target_arch = "wasm32")]
                if matches!(self.phase, Phase::Pending { .. })
                    && let Phase::Pending { window, canvas } =
                        std::mem::replace(&mut self.phase, Phase::Init)
                {
                    self.finish_init(window, canvas, gpu);
                    return;
                }
                log::warn!("GPU context arrived outside initialization, dropping it");
                drop(gpu);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Phase::Running(running) = &mut self.phase else {
            if matches!(event, WindowEvent::CloseRequested) {
                event_loop.exit();
            }
            return;
        };

        let response = running.egui_state.on_window_event(&running.window, &event);
        if response.repaint {
            running.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(_) => running.window.request_redraw(),
            WindowEvent::RedrawRequested => running.frame(&self.bindings),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Redraw continuously; a collapsed canvas waits for the next resize
        if let Phase::Running(running) = &self.phase
            && running.presentable
        {
            running.window.request_redraw();
        }
    }
}

impl Running {
    fn frame(&mut self, bindings: &KeyBindings) {
        // Input stays queued in egui-winit until a frame can actually run
        let canvas = self.graphics.canvas.canvas_size();
        let graphics = &mut self.graphics;
        self.presentable = graphics
            .gpu
            .reconcile(canvas, &mut graphics.msaa)
            .is_presentable();
        if !self.presentable {
            return;
        }

        let frame_time = self.timer.tick();
        let raw_input = self.egui_state.take_egui_input(&self.window);

        self.update_diagnostics(canvas, frame_time);

        let output = self.egui_ctx.run(raw_input, |ctx| {
            ui::run_frame(ctx, &mut self.ui, bindings, &self.diagnostics);
        });
        self.egui_state
            .handle_platform_output(&self.window, output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(output.shapes, output.pixels_per_point);

        let graphics = &mut self.graphics;
        graphics
            .renderer
            .update_textures(&graphics.gpu, &output.textures_delta);

        if let Some(frame) = graphics.gpu.acquire_frame() {
            graphics.renderer.render(
                &graphics.gpu,
                &graphics.msaa,
                &frame,
                &FrameOutput {
                    primitives: &primitives,
                    pixels_per_point: output.pixels_per_point,
                    clear_color: self.ui.clear_color(),
                },
            );
            self.window.pre_present_notify();
            frame.present();
        }

        graphics.renderer.free_textures(&output.textures_delta);
    }

    fn update_diagnostics(&mut self, canvas: CanvasSize, frame_time: Duration) {
        let gpu = &self.graphics.gpu;
        let physical = self.window.inner_size();
        let scale_factor = self.window.scale_factor();
        let logical = physical.to_logical::<f64>(scale_factor);

        let d = &mut self.diagnostics;
        d.window_physical = physical.into();
        d.window_logical = (logical.width, logical.height);
        d.scale_factor = scale_factor;
        d.canvas = canvas;
        d.framebuffer = gpu.swap_chain_size();
        d.display = self.window.current_monitor().map(|m| m.size().into());
        d.swap_chain_recreations = gpu.swap_chain_recreations();
        d.msaa_samples = self.graphics.msaa.sample_count();
        d.msaa_target = self.graphics.msaa.size();
        d.surface_format = format!("{:?}", gpu.format());
        d.frame_time = frame_time;
        d.frame_count = self.timer.frames();
        d.browser = diagnostics::browser_metrics();
    }
}

/// Open the window and run until it closes.
///
/// Natively this blocks and returns the startup error, if any. In the browser
/// the loop is handed to the page and this returns immediately.
pub fn run(config: AppConfig) -> Result<()> {
    let bindings = config.keybindings.to_keybindings()?;
    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;

    #[cfg(target_arch = "wasm32")]
    let proxy = event_loop.create_proxy();

    let app = TintpadApp {
        config,
        bindings,
        phase: Phase::Init,
        startup_error: None,
        #[cfg(target_arch = "wasm32")]
        proxy,
    };

    run_loop(event_loop, app)
}

#[cfg(not(target_arch = "wasm32"))]
fn run_loop(event_loop: EventLoop<AppEvent>, mut app: TintpadApp) -> Result<()> {
    event_loop.run_app(&mut app)?;
    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(target_arch = "wasm32")]
fn run_loop(event_loop: EventLoop<AppEvent>, app: TintpadApp) -> Result<()> {
    use winit::platform::web::EventLoopExtWebSys;
    event_loop.spawn_app(app);
    Ok(())
}
