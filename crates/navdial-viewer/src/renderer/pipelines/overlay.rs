// Draws the widget layer's 2D geometry in pixel space over the scene.

use navdial::{OverlayPass, PolyItem, TextItem, Viewport};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayUniforms {
    /// Viewport size in pixels; positions are divided by it in the shader.
    pub viewport_px: [f32; 2],
    pub _pad: [f32; 2],
}

// Compile-time safety check: buffer size must match WGSL-reflected size.
const _: [(); 16] = [(); core::mem::size_of::<OverlayUniforms>()];

/// Frame-local collection target for the widget layer's render pass.
///
/// Triangles composit before lines, which matches the dial's submission
/// order (the translucent backdrop comes first); text runs are handed to the
/// egui painter by the app.
#[derive(Default)]
pub struct OverlayFrame {
    pub tri_vertices: Vec<OverlayVertex>,
    pub line_vertices: Vec<OverlayVertex>,
    pub texts: Vec<TextItem>,
}

impl OverlayFrame {
    pub fn clear(&mut self) {
        self.tri_vertices.clear();
        self.line_vertices.clear();
        self.texts.clear();
    }
}

impl OverlayPass for OverlayFrame {
    fn draw_poly(&mut self, item: &PolyItem) {
        let p = item.property;
        let flat = [p.color[0], p.color[1], p.color[2], p.opacity];
        let color_at = |i: u16| {
            item.vertex_colors
                .as_ref()
                .map(|colors| colors[i as usize])
                .unwrap_or(flat)
        };

        for tri in &item.tris {
            for &i in tri {
                self.tri_vertices.push(OverlayVertex {
                    position: item.points[i as usize].to_array(),
                    color: color_at(i),
                });
            }
        }

        for run in &item.lines {
            for pair in run.windows(2) {
                for &i in pair {
                    self.line_vertices.push(OverlayVertex {
                        position: item.points[i as usize].to_array(),
                        color: color_at(i),
                    });
                }
            }
        }
    }

    fn draw_text(&mut self, item: &TextItem) {
        self.texts.push(item.clone());
    }
}

pub struct OverlayPipeline {
    tri_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    tri_vb: wgpu::Buffer,
    line_vb: wgpu::Buffer,
    tri_capacity: usize,
    line_capacity: usize,
    tri_count: u32,
    line_count: u32,
}

/// Initial vertex buffer capacity; grows on demand in `prepare`.
const INITIAL_CAPACITY: usize = 4096;

impl OverlayPipeline {
    pub fn new(device: &wgpu::Device, color_fmt: wgpu::TextureFormat) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Overlay Uniform Buffer"),
            size: std::mem::size_of::<OverlayUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Overlay BGL"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Overlay Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Overlay WGSL"),
            source: wgpu::ShaderSource::Wgsl(OVERLAY_WGSL.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Overlay Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                },
                wgpu::VertexAttribute {
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 8,
                },
            ],
        };

        let make_pipeline = |topology: wgpu::PrimitiveTopology, label: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_main",
                    buffers: &[vertex_layout.clone()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_fmt,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    ..wgpu::PrimitiveState::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        };

        let tri_pipeline = make_pipeline(wgpu::PrimitiveTopology::TriangleList, "Overlay Tris");
        let line_pipeline = make_pipeline(wgpu::PrimitiveTopology::LineList, "Overlay Lines");

        let tri_vb = Self::vertex_buffer(device, INITIAL_CAPACITY, "Overlay Tri VB");
        let line_vb = Self::vertex_buffer(device, INITIAL_CAPACITY, "Overlay Line VB");

        Self {
            tri_pipeline,
            line_pipeline,
            bind_group,
            uniform_buffer,
            tri_vb,
            line_vb,
            tri_capacity: INITIAL_CAPACITY,
            line_capacity: INITIAL_CAPACITY,
            tri_count: 0,
            line_count: 0,
        }
    }

    fn vertex_buffer(device: &wgpu::Device, capacity: usize, label: &str) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<OverlayVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Uploads the frame's vertices. Must run before the render pass opens,
    /// since buffers may be reallocated to fit.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        viewport: Viewport,
        frame: &OverlayFrame,
    ) {
        let uniforms = OverlayUniforms {
            viewport_px: viewport.size_px().to_array(),
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        if frame.tri_vertices.len() > self.tri_capacity {
            self.tri_capacity = frame.tri_vertices.len().next_power_of_two();
            self.tri_vb = Self::vertex_buffer(device, self.tri_capacity, "Overlay Tri VB");
        }
        if frame.line_vertices.len() > self.line_capacity {
            self.line_capacity = frame.line_vertices.len().next_power_of_two();
            self.line_vb = Self::vertex_buffer(device, self.line_capacity, "Overlay Line VB");
        }

        if !frame.tri_vertices.is_empty() {
            queue.write_buffer(&self.tri_vb, 0, bytemuck::cast_slice(&frame.tri_vertices));
        }
        if !frame.line_vertices.is_empty() {
            queue.write_buffer(&self.line_vb, 0, bytemuck::cast_slice(&frame.line_vertices));
        }
        self.tri_count = frame.tri_vertices.len() as u32;
        self.line_count = frame.line_vertices.len() as u32;
    }

    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>) {
        if self.tri_count > 0 {
            rpass.set_pipeline(&self.tri_pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.tri_vb.slice(..));
            rpass.draw(0..self.tri_count, 0..1);
        }
        if self.line_count > 0 {
            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.line_vb.slice(..));
            rpass.draw(0..self.line_count, 0..1);
        }
    }
}

pub const OVERLAY_WGSL: &str = r#"
struct OverlayUniforms {
    viewport_px: vec2<f32>,
    _pad: vec2<f32>,
};
@group(0) @binding(0) var<uniform> U: OverlayUniforms;

struct VSOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(@location(0) pos: vec2<f32>, @location(1) color: vec4<f32>) -> VSOut {
    var out: VSOut;
    // Pixel space (y-up, bottom-left origin) to NDC.
    let ndc = pos / U.viewport_px * 2.0 - vec2<f32>(1.0, 1.0);
    out.clip = vec4<f32>(ndc, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VSOut) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
