//! The rendering orchestrator. Owns the GPU context and the render pass
//! pipelines for the scene and the HUD overlay.

pub mod context;
pub mod pipelines;

use self::{
    context::GfxContext,
    pipelines::{
        grid::GridPipeline,
        marker::MarkerPipeline,
        overlay::{OverlayFrame, OverlayPipeline},
    },
};
use glam::Mat4;
use navdial::Viewport;
use std::sync::Arc;
use winit::window::Window;

/// Owns all rendering-related state.
pub struct Renderer {
    pub gfx: GfxContext,
    pub grid: GridPipeline,
    pub marker: MarkerPipeline,
    pub overlay: OverlayPipeline,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let gfx = GfxContext::new(window).await?;

        let grid = GridPipeline::new(&gfx.device, gfx.config.format);
        let marker = MarkerPipeline::new(&gfx.device, gfx.config.format);
        let overlay = OverlayPipeline::new(&gfx.device, gfx.config.format);

        let egui_renderer = egui_wgpu::Renderer::new(&gfx.device, gfx.config.format, None, 1);

        Ok(Self {
            gfx,
            grid,
            marker,
            overlay,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.gfx.resize(new_size);
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.gfx.size.width, self.gfx.size.height)
    }

    /// Scene and HUD passes; egui runs afterwards in its own pass.
    pub fn render(
        &mut self,
        swap_view: &wgpu::TextureView,
        view_proj: Mat4,
        marker_model: Mat4,
        frame: &OverlayFrame,
    ) {
        // Vertex uploads may reallocate, so they happen before the pass.
        self.overlay
            .prepare(&self.gfx.device, &self.gfx.queue, self.viewport(), frame);

        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.008,
                            g: 0.012,
                            b: 0.02,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Back to front: grid, marker, then the dial overlay.
            self.grid.draw(&mut pass, &self.gfx.queue, view_proj);
            self.marker
                .draw(&mut pass, &self.gfx.queue, view_proj, marker_model);
            self.overlay.draw(&mut pass);
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }
}
