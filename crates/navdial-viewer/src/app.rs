use crate::{
    camera::OrbitCamera,
    renderer::{pipelines::overlay::OverlayFrame, Renderer},
    ui,
    widget::CompassWidget,
};
use anyhow::Result;
use glam::Vec3;
use navdial::{Follower, UpSource, WidgetRepresentation};
use std::{sync::Arc, time::Instant};
use winit::{event::WindowEvent, window::Window};

/// Stand-in headset pose: the physical up vector sways slowly, as if the
/// wearer tilts their head.
pub struct SimulatedHmd {
    elapsed: f32,
}

impl SimulatedHmd {
    fn new() -> Self {
        Self { elapsed: 0.0 }
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}

impl UpSource for SimulatedHmd {
    fn view_up(&self) -> Vec3 {
        let sway = (0.35 * self.elapsed).sin() * 0.12;
        Vec3::new(sway, 1.0, 0.0).normalize()
    }
}

pub struct App {
    pub renderer: Renderer,
    pub camera: OrbitCamera,
    pub compass: CompassWidget,
    pub follower: Follower,
    pub hmd: SimulatedHmd,
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    overlay_frame: OverlayFrame,
    last_frame: Instant,
}

impl App {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let renderer = Renderer::new(window.clone()).await?;
        let size = renderer.gfx.size;

        let camera = OrbitCamera::new(
            Vec3::new(0.0, 1.0, 0.0),
            size.width as f32 / size.height.max(1) as f32,
        );

        // The north marker stands out along -Z; the follower keeps it
        // upright against the simulated headset pose.
        let mut follower = Follower::new();
        follower.set_position(Vec3::new(0.0, 2.0, -15.0));
        follower.set_scale(Vec3::splat(3.0));

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &*window,
            None,
            None,
        );

        Ok(Self {
            renderer,
            camera,
            compass: CompassWidget::new(),
            follower,
            hmd: SimulatedHmd::new(),
            egui_ctx,
            egui_state,
            overlay_frame: OverlayFrame::default(),
            last_frame: Instant::now(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.renderer.resize(new_size);
            self.camera
                .set_aspect(new_size.width as f32 / new_size.height as f32);
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        if response.consumed {
            return true;
        }

        if self.compass.handle_event(event, self.renderer.viewport()) {
            return true;
        }

        if let WindowEvent::Resized(physical_size) = event {
            self.resize(*physical_size);
        }

        false
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        self.hmd.advance(dt);
        self.compass.update(dt);

        let viewport = self.renderer.viewport();
        self.compass.rep.set_viewport(viewport);
        self.camera.sync_from_dial(&self.compass.rep);

        let marker_model = self
            .follower
            .compute_matrix(self.hmd.view_up(), self.camera.eye());

        // Let the dial lay itself out and collect its geometry and text.
        self.overlay_frame.clear();
        self.compass.rep.render_overlay(&mut self.overlay_frame);

        let frame = self.renderer.gfx.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(&swap_view, self.camera.view_proj(), marker_model, &self.overlay_frame);

        // HUD and widget text through egui.
        let egui_input = self.egui_state.take_egui_input(window);
        self.egui_ctx.begin_frame(egui_input);

        ui::draw_hud(&self.egui_ctx, &self.compass.rep);
        ui::paint_widget_texts(&self.egui_ctx, &self.overlay_frame.texts, viewport);

        let egui_output = self.egui_ctx.end_frame();
        let shapes = self
            .egui_ctx
            .tessellate(egui_output.shapes, self.egui_ctx.pixels_per_point());

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                self.renderer.gfx.config.width,
                self.renderer.gfx.config.height,
            ],
            pixels_per_point: self.egui_ctx.pixels_per_point(),
        };

        let mut encoder = self
            .renderer
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("UI Encoder"),
            });

        for (id, delta) in &egui_output.textures_delta.set {
            self.renderer.egui_renderer.update_texture(
                &self.renderer.gfx.device,
                &self.renderer.gfx.queue,
                *id,
                delta,
            );
        }

        self.renderer.egui_renderer.update_buffers(
            &self.renderer.gfx.device,
            &self.renderer.gfx.queue,
            &mut encoder,
            &shapes,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("EGUI Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer
                .egui_renderer
                .render(&mut render_pass, &shapes, &screen_descriptor);
        }

        for id in &egui_output.textures_delta.free {
            self.renderer.egui_renderer.free_texture(id);
        }

        self.renderer
            .gfx
            .queue
            .submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}
