//! Swap-chain lifecycle.
//!
//! [`SwapChainManager`] remembers the size the live swap chain was built for
//! and rebuilds it whenever the requested size differs in either dimension.
//! A rebuild is all-or-nothing: dependents are invalidated, the old swap chain
//! is released, a new one is created, then dependents are recreated.

use crate::canvas::CanvasSize;

/// The presentable surface a swap chain is built on.
pub trait PresentTarget {
    /// Build a swap chain of exactly `size`.
    fn create(&mut self, size: CanvasSize);

    /// Release the current swap chain.
    fn release(&mut self);
}

/// Renderer-side device objects derived from the swap chain (size or format).
pub trait SurfaceDependent {
    fn invalidate(&mut self);
    fn recreate(&mut self, size: CanvasSize);
}

impl SurfaceDependent for () {
    fn invalidate(&mut self) {}
    fn recreate(&mut self, _size: CanvasSize) {}
}

/// Outcome of one [`SwapChainManager::reconcile`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// The requested size cannot be presented; nothing was touched.
    Skipped,
    /// The live swap chain already matches.
    Unchanged,
    /// The swap chain was rebuilt.
    Recreated {
        from: Option<CanvasSize>,
        to: CanvasSize,
    },
}

impl Reconcile {
    pub fn is_presentable(&self) -> bool {
        !matches!(self, Reconcile::Skipped)
    }
}

/// Owns a [`PresentTarget`] and keeps at most one swap chain alive on it.
pub struct SwapChainManager<T: PresentTarget> {
    target: T,
    live: Option<CanvasSize>,
    recreations: u64,
}

impl<T: PresentTarget> SwapChainManager<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            live: None,
            recreations: 0,
        }
    }

    /// Make the live swap chain match `requested`.
    pub fn reconcile(
        &mut self,
        requested: CanvasSize,
        dependents: &mut dyn SurfaceDependent,
    ) -> Reconcile {
        if !requested.is_presentable() {
            return Reconcile::Skipped;
        }
        if self.live == Some(requested) {
            return Reconcile::Unchanged;
        }

        let from = self.live.take();
        dependents.invalidate();
        if from.is_some() {
            self.target.release();
        }
        self.target.create(requested);
        self.live = Some(requested);
        self.recreations += 1;
        dependents.recreate(requested);

        log::debug!(
            "Swap chain recreated: {} -> {}",
            from.map_or_else(|| "none".to_string(), |s| s.to_string()),
            requested
        );

        Reconcile::Recreated {
            from,
            to: requested,
        }
    }

    /// Force a rebuild on the next reconcile, e.g. after the surface was lost.
    pub fn invalidate_swap_chain(&mut self) {
        if let Some(size) = self.live.take() {
            log::debug!("Swap chain {} marked stale", size);
            self.target.release();
        }
    }

    /// Size of the live swap chain, if any.
    pub fn live_size(&self) -> Option<CanvasSize> {
        self.live
    }

    /// Number of swap chains built so far.
    pub fn recreations(&self) -> u64 {
        self.recreations
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

/// Pick the swap-chain format: the preferred one if supported, else the first
/// non-sRGB format, else whatever the surface lists first.
pub fn select_surface_format(
    supported: &[wgpu::TextureFormat],
    preferred: wgpu::TextureFormat,
) -> Option<wgpu::TextureFormat> {
    if supported.contains(&preferred) {
        return Some(preferred);
    }
    supported
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| supported.first())
        .copied()
}

/// A wgpu surface whose configuration plays the role of the swap chain.
pub struct WgpuSurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    config: wgpu::SurfaceConfiguration,
    configured: bool,
}

impl WgpuSurface {
    /// Wrap a surface. `config` carries the fixed format and present mode;
    /// its size is overwritten on every [`PresentTarget::create`].
    pub fn new(
        surface: wgpu::Surface<'static>,
        device: wgpu::Device,
        config: wgpu::SurfaceConfiguration,
    ) -> Self {
        Self {
            surface,
            device,
            config,
            configured: false,
        }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        self.config.present_mode
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn surface(&self) -> &wgpu::Surface<'static> {
        &self.surface
    }
}

impl PresentTarget for WgpuSurface {
    fn create(&mut self, size: CanvasSize) {
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.configured = true;
    }

    fn release(&mut self) {
        // wgpu drops the previous swap chain when the surface is configured
        // again; until then no frame may be acquired from it.
        self.configured = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Invalidate,
        Release,
        Create(CanvasSize),
        Recreate(CanvasSize),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        live: Option<CanvasSize>,
        alive_count: usize,
    }

    impl PresentTarget for Recorder {
        fn create(&mut self, size: CanvasSize) {
            self.calls.push(Call::Create(size));
            self.live = Some(size);
            self.alive_count += 1;
        }

        fn release(&mut self) {
            self.calls.push(Call::Release);
            self.live = None;
            self.alive_count -= 1;
        }
    }

    #[derive(Default)]
    struct Dependents {
        calls: Vec<Call>,
    }

    impl SurfaceDependent for Dependents {
        fn invalidate(&mut self) {
            self.calls.push(Call::Invalidate);
        }

        fn recreate(&mut self, size: CanvasSize) {
            self.calls.push(Call::Recreate(size));
        }
    }

    fn size(w: u32, h: u32) -> CanvasSize {
        CanvasSize::new(w, h)
    }

    #[test]
    fn test_first_reconcile_creates() {
        let mut manager = SwapChainManager::new(Recorder::default());
        let result = manager.reconcile(size(1280, 720), &mut ());
        assert_eq!(
            result,
            Reconcile::Recreated {
                from: None,
                to: size(1280, 720)
            }
        );
        assert_eq!(manager.live_size(), Some(size(1280, 720)));
        assert_eq!(manager.target().calls, vec![Call::Create(size(1280, 720))]);
    }

    #[test]
    fn test_same_size_is_unchanged() {
        let mut manager = SwapChainManager::new(Recorder::default());
        manager.reconcile(size(800, 600), &mut ());
        assert_eq!(manager.reconcile(size(800, 600), &mut ()), Reconcile::Unchanged);
        assert_eq!(manager.recreations(), 1);
    }

    #[test]
    fn test_single_dimension_change_recreates() {
        let mut manager = SwapChainManager::new(Recorder::default());
        manager.reconcile(size(800, 600), &mut ());

        let result = manager.reconcile(size(800, 601), &mut ());
        assert!(matches!(result, Reconcile::Recreated { .. }));

        let result = manager.reconcile(size(640, 601), &mut ());
        assert!(matches!(result, Reconcile::Recreated { .. }));
        assert_eq!(manager.recreations(), 3);
    }

    #[test]
    fn test_zero_size_is_skipped() {
        let mut manager = SwapChainManager::new(Recorder::default());
        manager.reconcile(size(800, 600), &mut ());
        assert_eq!(manager.reconcile(size(0, 0), &mut ()), Reconcile::Skipped);
        assert_eq!(manager.live_size(), Some(size(800, 600)));
        assert_eq!(manager.recreations(), 1);
    }

    #[test]
    fn test_recreate_order() {
        let mut manager = SwapChainManager::new(Recorder::default());
        let mut deps = Dependents::default();
        manager.reconcile(size(100, 100), &mut deps);
        manager.reconcile(size(200, 100), &mut deps);

        assert_eq!(
            deps.calls,
            vec![
                Call::Invalidate,
                Call::Recreate(size(100, 100)),
                Call::Invalidate,
                Call::Recreate(size(200, 100)),
            ]
        );
        assert_eq!(
            manager.target().calls,
            vec![
                Call::Create(size(100, 100)),
                Call::Release,
                Call::Create(size(200, 100)),
            ]
        );
    }

    #[test]
    fn test_live_size_tracks_any_sequence() {
        let sizes = [
            size(1280, 720),
            size(1280, 720),
            size(0, 720),
            size(1024, 768),
            size(1024, 700),
            size(1, 1),
            size(0, 0),
            size(3840, 2160),
            size(3840, 2160),
        ];

        let mut manager = SwapChainManager::new(Recorder::default());
        let mut last_presentable = None;
        for requested in sizes {
            manager.reconcile(requested, &mut ());
            if requested.is_presentable() {
                last_presentable = Some(requested);
            }
            assert_eq!(manager.live_size(), last_presentable);
            assert_eq!(manager.target().live, last_presentable);
            assert!(manager.target().alive_count <= 1);
        }
        // 1280x720, 1024x768, 1024x700, 1x1, 3840x2160
        assert_eq!(manager.recreations(), 5);
    }

    #[test]
    fn test_invalidate_forces_rebuild_at_same_size() {
        let mut manager = SwapChainManager::new(Recorder::default());
        manager.reconcile(size(640, 480), &mut ());
        manager.invalidate_swap_chain();
        assert_eq!(manager.live_size(), None);

        let result = manager.reconcile(size(640, 480), &mut ());
        assert_eq!(
            result,
            Reconcile::Recreated {
                from: None,
                to: size(640, 480)
            }
        );
        assert_eq!(manager.target().alive_count, 1);
    }

    #[test]
    fn test_invalidate_without_swap_chain_is_noop() {
        let mut manager = SwapChainManager::new(Recorder::default());
        manager.invalidate_swap_chain();
        assert!(manager.target().calls.is_empty());
    }

    #[test]
    fn test_select_preferred_format() {
        let supported = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Rgba8Unorm,
        ];
        assert_eq!(
            select_surface_format(&supported, wgpu::TextureFormat::Rgba8Unorm),
            Some(wgpu::TextureFormat::Rgba8Unorm)
        );
    }

    #[test]
    fn test_select_falls_back_to_linear_format() {
        let supported = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Bgra8Unorm,
        ];
        assert_eq!(
            select_surface_format(&supported, wgpu::TextureFormat::Rgba8Unorm),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn test_select_srgb_only_surface() {
        let supported = [wgpu::TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            select_surface_format(&supported, wgpu::TextureFormat::Rgba8Unorm),
            Some(wgpu::TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(select_surface_format(&[], wgpu::TextureFormat::Rgba8Unorm), None);
    }
}
