use std::sync::Arc;
use winit::window::Window;

use crate::canvas::CanvasSize;
use crate::config::GpuConfig;
use crate::device_error::{self, DeviceErrorKind};
use crate::error::{GpuError, Result};
use crate::swap_chain::{
    select_surface_format, Reconcile, SurfaceDependent, SwapChainManager, WgpuSurface,
};

/// Main GPU context: device, queue and the swap chain built on the window surface.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter: wgpu::Adapter,
    pub config: GpuConfig,
    msaa_samples: u32,
    swap_chain: SwapChainManager<WgpuSurface>,
}

impl GpuContext {
    /// Initialize GPU context for a window.
    ///
    /// This is async to support both native and WASM backends.
    /// On native, you can use `pollster::block_on()` to call this.
    /// No swap chain exists until the first [`GpuContext::reconcile`].
    pub async fn with_config(window: Arc<Window>, config: GpuConfig) -> Result<Self> {
        log::info!("Initializing GPU with backends: {:?}", config.backends);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        // WebGL has no compute, so Limits::default() would be rejected there
        let limits = wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits,
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        device_error::install_handlers(&device);

        let surface_caps = surface.get_capabilities(&adapter);
        let format = select_surface_format(&surface_caps.formats, config.preferred_format)
            .ok_or(GpuError::NoSurfaceFormats)?;
        if format != config.preferred_format {
            log::warn!(
                "Preferred surface format {:?} unsupported, using {:?}",
                config.preferred_format,
                format
            );
        }

        let present_mode = if surface_caps.present_modes.contains(&config.present_mode) {
            config.present_mode
        } else {
            log::warn!(
                "Present mode {:?} unsupported, falling back to Fifo",
                config.present_mode
            );
            wgpu::PresentMode::Fifo
        };

        let alpha_mode = if surface_caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::Opaque)
        {
            wgpu::CompositeAlphaMode::Opaque
        } else {
            surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };

        let msaa_samples = supported_sample_count(&adapter, format, config.msaa_samples);

        let size = CanvasSize::from(window.inner_size());
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: config.max_frame_latency,
        };

        let swap_chain =
            SwapChainManager::new(WgpuSurface::new(surface, device.clone(), surface_config));

        Ok(Self {
            device,
            queue,
            adapter,
            config,
            msaa_samples,
            swap_chain,
        })
    }

    /// Bring the swap chain in line with the observed canvas size.
    pub fn reconcile(
        &mut self,
        size: CanvasSize,
        dependents: &mut dyn SurfaceDependent,
    ) -> Reconcile {
        self.swap_chain.reconcile(size, dependents)
    }

    /// Acquire the next swap-chain image, or `None` if this frame must be skipped.
    pub fn acquire_frame(&mut self) -> Option<wgpu::SurfaceTexture> {
        if !self.swap_chain.target().is_configured() {
            return None;
        }

        match self.swap_chain.target().surface().get_current_texture() {
            Ok(frame) => Some(frame),
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, rebuilding swap chain");
                self.swap_chain.invalidate_swap_chain();
                None
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring frame, skipping");
                None
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                device_error::report(DeviceErrorKind::OutOfMemory, "failed to acquire frame");
                None
            }
            Err(e) => {
                log::error!("Failed to acquire frame: {:?}", e);
                None
            }
        }
    }

    /// Fixed swap-chain pixel format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.swap_chain.target().format()
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        self.swap_chain.target().present_mode()
    }

    /// Effective MSAA sample count after checking adapter support.
    pub fn msaa_samples(&self) -> u32 {
        self.msaa_samples
    }

    /// Size of the live swap chain, if one exists.
    pub fn swap_chain_size(&self) -> Option<CanvasSize> {
        self.swap_chain.live_size()
    }

    pub fn swap_chain_recreations(&self) -> u64 {
        self.swap_chain.recreations()
    }
}

fn supported_sample_count(
    adapter: &wgpu::Adapter,
    format: wgpu::TextureFormat,
    requested: u32,
) -> u32 {
    if requested <= 1 {
        return 1;
    }
    let flags = adapter.get_texture_format_features(format).flags;
    if flags.sample_count_supported(requested) {
        requested
    } else {
        log::warn!(
            "{}x MSAA unsupported for {:?}, rendering without multisampling",
            requested,
            format
        );
        1
    }
}
