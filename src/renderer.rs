//! Draws egui output into the swap-chain image.

use egui::{ClippedPrimitive, TexturesDelta};
use egui_wgpu::{Renderer, RendererOptions, ScreenDescriptor};
use tintpad_gpu::{ClearColor, GpuContext, MsaaTarget};

/// One frame's worth of tessellated UI.
pub struct FrameOutput<'a> {
    pub primitives: &'a [ClippedPrimitive],
    pub pixels_per_point: f32,
    pub clear_color: ClearColor,
}

pub struct EguiRenderer {
    renderer: Renderer,
}

impl EguiRenderer {
    pub fn new(gpu: &GpuContext) -> Self {
        let renderer = Renderer::new(
            &gpu.device,
            gpu.format(),
            RendererOptions {
                msaa_samples: gpu.msaa_samples(),
                ..Default::default()
            },
        );
        Self { renderer }
    }

    /// Upload textures egui added this frame. Must run even when the frame
    /// is not presented, or later frames reference missing textures.
    pub fn update_textures(&mut self, gpu: &GpuContext, delta: &TexturesDelta) {
        for (id, image_delta) in &delta.set {
            self.renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
    }

    pub fn free_textures(&mut self, delta: &TexturesDelta) {
        for id in &delta.free {
            self.renderer.free_texture(id);
        }
    }

    /// Clear to `output.clear_color` and draw the UI in a single pass.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        msaa: &MsaaTarget,
        frame: &wgpu::SurfaceTexture,
        output: &FrameOutput<'_>,
    ) {
        let screen = ScreenDescriptor {
            size_in_pixels: [frame.texture.width(), frame.texture.height()],
            pixels_per_point: output.pixels_per_point,
        };

        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let (view, resolve_target) = msaa.attachment(&frame_view);

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("UI Encoder"),
            });

        let mut commands = self.renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            output.primitives,
            &screen,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("UI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(output.clear_color.to_wgpu()),
                        // The multisampled texture only needs to survive until resolve
                        store: if resolve_target.is_some() {
                            wgpu::StoreOp::Discard
                        } else {
                            wgpu::StoreOp::Store
                        },
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            self.renderer
                .render(&mut render_pass, output.primitives, &screen);
        }

        commands.push(encoder.finish());
        gpu.queue.submit(commands);
    }
}
