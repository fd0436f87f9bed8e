//! Multisampled color target that tracks the swap-chain size.

use crate::canvas::CanvasSize;
use crate::swap_chain::SurfaceDependent;

/// Multisampled render target resolved into the swap-chain image each frame.
///
/// With a sample count of 1 no texture is allocated and the render pass draws
/// straight into the swap-chain image.
pub struct MsaaTarget {
    device: wgpu::Device,
    format: wgpu::TextureFormat,
    sample_count: u32,
    size: Option<CanvasSize>,
    view: Option<wgpu::TextureView>,
}

impl MsaaTarget {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, sample_count: u32) -> Self {
        Self {
            device: device.clone(),
            format,
            sample_count: sample_count.max(1),
            size: None,
            view: None,
        }
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Size of the current multisampled texture, if one exists.
    pub fn size(&self) -> Option<CanvasSize> {
        self.size
    }

    /// Returns `(view, resolve_target)` for a color attachment drawing into
    /// `frame_view`.
    pub fn attachment<'a>(
        &'a self,
        frame_view: &'a wgpu::TextureView,
    ) -> (&'a wgpu::TextureView, Option<&'a wgpu::TextureView>) {
        match &self.view {
            Some(msaa_view) => (msaa_view, Some(frame_view)),
            None => (frame_view, None),
        }
    }
}

impl SurfaceDependent for MsaaTarget {
    fn invalidate(&mut self) {
        self.view = None;
        self.size = None;
    }

    fn recreate(&mut self, size: CanvasSize) {
        if self.sample_count <= 1 {
            return;
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Color Target"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.size = Some(size);
    }
}
