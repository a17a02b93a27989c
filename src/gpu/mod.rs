//! GPU renderer.
//!
//! Each frame runs two passes:
//!
//! 1. **Trail pass** into a persistent premultiplied-alpha texture: a
//!    full-screen fade multiplies what is there by `1 - fade`, then the glow
//!    mesh is added and the shape mesh blended on top. Old strokes fade out
//!    over a few frames, leaving trails.
//! 2. **Composite pass** onto the surface: the theme background gradient is
//!    computed per pixel and the trail texture laid over it.
//!
//! The surface uses a non-sRGB format so colors blend in the same space the
//! hex and HSL theme colors are written in.

mod shaders;
mod tessellate;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::draw::DrawList;
use crate::error::GpuError;
use crate::theme::{Background, MAX_STOPS};
use shaders::{COMPOSITE_SHADER, GEOMETRY_SHADER};
use tessellate::{Mesh, Vertex};

const TRAIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Initial vertex buffer capacity, in vertices.
const INITIAL_VERTICES: usize = 16 * 1024;

/// Multiplies the destination by `1 - src.a`.
const FADE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
};

const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ScreenUniforms {
    size: [f32; 2],
    fade: f32,
    _padding: f32,
}

const KIND_SOLID: u32 = 0;
const KIND_LINEAR: u32 = 1;
const KIND_RADIAL: u32 = 2;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct BackgroundUniforms {
    stops: [[f32; 4]; MAX_STOPS],
    size: [f32; 2],
    angle: f32,
    kind: u32,
    stop_count: u32,
    _padding: [u32; 3],
}

impl BackgroundUniforms {
    fn new(background: &Background, width: u32, height: u32) -> Self {
        let (kind, angle) = match background {
            Background::Solid { .. } => (KIND_SOLID, 0.0),
            Background::Linear { angle_deg, .. } => (KIND_LINEAR, angle_deg.to_radians()),
            Background::Radial { .. } => (KIND_RADIAL, 0.0),
        };
        let mut stops = [[0.0; 4]; MAX_STOPS];
        let colors = background.stops();
        for (slot, color) in stops.iter_mut().zip(colors) {
            *slot = color.to_array();
        }
        Self {
            stops,
            size: [width as f32, height as f32],
            angle,
            kind,
            stop_count: colors.len().min(MAX_STOPS) as u32,
            _padding: [0; 3],
        }
    }
}

/// A vertex buffer that grows to fit the largest mesh seen.
struct VertexBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl VertexBuffer {
    fn new(device: &wgpu::Device, label: &'static str) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, INITIAL_VERTICES),
            capacity: INITIAL_VERTICES,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, vertices: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (vertices * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        if vertices.len() > self.capacity {
            self.capacity = vertices.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::debug!("{} grown to {} vertices", self.label, self.capacity);
        }
        if !vertices.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        }
        self.len = vertices.len() as u32;
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.len > 0 {
            pass.set_vertex_buffer(0, self.buffer.slice(..));
            pass.draw(0..self.len, 0..1);
        }
    }
}

pub(crate) struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    fade: f32,
    fade_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    shape_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    background_buffer: wgpu::Buffer,
    background: BackgroundUniforms,
    composite_layout: wgpu::BindGroupLayout,
    composite_bind_group: wgpu::BindGroup,
    trail_view: wgpu::TextureView,
    mesh: Mesh,
    glow_vertices: VertexBuffer,
    shape_vertices: VertexBuffer,
}

impl GpuState {
    pub async fn new(
        window: Arc<Window>,
        background: &Background,
        fade: f32,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Trail pipelines
        let screen_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Uniform Buffer"),
            contents: bytemuck::bytes_of(&ScreenUniforms {
                size: [width as f32, height as f32],
                fade,
                _padding: 0.0,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Screen Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Screen Bind Group"),
            layout: &screen_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });

        let geometry_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Geometry Shader"),
            source: wgpu::ShaderSource::Wgsl(GEOMETRY_SHADER.into()),
        });

        let trail_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Trail Pipeline Layout"),
            bind_group_layouts: &[&screen_layout],
            push_constant_ranges: &[],
        });

        let fade_pipeline = create_pipeline(
            &device,
            "Fade Pipeline",
            &trail_layout,
            &geometry_shader,
            ("vs_fade", "fs_fade"),
            &[],
            TRAIL_FORMAT,
            FADE_BLENDING,
        );
        let glow_pipeline = create_pipeline(
            &device,
            "Glow Pipeline",
            &trail_layout,
            &geometry_shader,
            ("vs_main", "fs_main"),
            &[Vertex::layout()],
            TRAIL_FORMAT,
            ADDITIVE_BLENDING,
        );
        let shape_pipeline = create_pipeline(
            &device,
            "Shape Pipeline",
            &trail_layout,
            &geometry_shader,
            ("vs_main", "fs_main"),
            &[Vertex::layout()],
            TRAIL_FORMAT,
            wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
        );

        // Composite pipeline
        let background = BackgroundUniforms::new(background, width, height);
        let background_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Background Uniform Buffer"),
            contents: bytemuck::bytes_of(&background),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let composite_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Composite Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });

        let composite_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Composite Shader"),
            source: wgpu::ShaderSource::Wgsl(COMPOSITE_SHADER.into()),
        });

        let composite_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Composite Pipeline Layout"),
                bind_group_layouts: &[&composite_layout],
                push_constant_ranges: &[],
            });

        let composite_pipeline = create_pipeline(
            &device,
            "Composite Pipeline",
            &composite_pipeline_layout,
            &composite_shader,
            ("vs_main", "fs_main"),
            &[],
            config.format,
            wgpu::BlendState::REPLACE,
        );

        let trail_view = create_trail_texture(&device, width, height);
        let composite_bind_group =
            create_composite_bind_group(&device, &composite_layout, &background_buffer, &trail_view);

        let glow_vertices = VertexBuffer::new(&device, "Glow Vertex Buffer");
        let shape_vertices = VertexBuffer::new(&device, "Shape Vertex Buffer");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            fade,
            fade_pipeline,
            glow_pipeline,
            shape_pipeline,
            composite_pipeline,
            screen_buffer,
            screen_bind_group,
            background_buffer,
            background,
            composite_layout,
            composite_bind_group,
            trail_view,
            mesh: Mesh::new(),
            glow_vertices,
            shape_vertices,
        })
    }

    /// Current surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure for a new window size. The trail is cleared.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        self.trail_view = create_trail_texture(&self.device, new_size.width, new_size.height);
        self.composite_bind_group = create_composite_bind_group(
            &self.device,
            &self.composite_layout,
            &self.background_buffer,
            &self.trail_view,
        );

        self.background.size = [new_size.width as f32, new_size.height as f32];
        self.write_uniforms();
    }

    /// Switch the background gradient.
    pub fn set_background(&mut self, background: &Background) {
        self.background = BackgroundUniforms::new(background, self.config.width, self.config.height);
        self.write_uniforms();
    }

    fn write_uniforms(&self) {
        let screen = ScreenUniforms {
            size: [self.config.width as f32, self.config.height as f32],
            fade: self.fade,
            _padding: 0.0,
        };
        self.queue
            .write_buffer(&self.screen_buffer, 0, bytemuck::bytes_of(&screen));
        self.queue
            .write_buffer(&self.background_buffer, 0, bytemuck::bytes_of(&self.background));
    }

    /// Fade the trail, draw `list` into it and present it over the background.
    pub fn render(&mut self, list: &DrawList) -> Result<(), wgpu::SurfaceError> {
        self.mesh.build(list);
        self.glow_vertices
            .upload(&self.device, &self.queue, &self.mesh.glow);
        self.shape_vertices
            .upload(&self.device, &self.queue, &self.mesh.shapes);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Trail pass
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Trail Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.trail_view,
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

            pass.set_bind_group(0, &self.screen_bind_group, &[]);

            pass.set_pipeline(&self.fade_pipeline);
            pass.draw(0..3, 0..1);

            pass.set_pipeline(&self.glow_pipeline);
            self.glow_vertices.draw(&mut pass);

            pass.set_pipeline(&self.shape_pipeline);
            self.shape_vertices.draw(&mut pass);
        }

        // Composite pass
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Composite Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.composite_pipeline);
            pass.set_bind_group(0, &self.composite_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    (vs_entry, fs_entry): (&str, &str),
    buffers: &[wgpu::VertexBufferLayout<'_>],
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some(vs_entry),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_trail_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Trail Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TRAIL_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_composite_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    background: &wgpu::Buffer,
    trail: &wgpu::TextureView,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Composite Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: background.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(trail),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<ScreenUniforms>(), 16);
        assert_eq!(std::mem::size_of::<BackgroundUniforms>(), 96);
    }

    #[test]
    fn test_background_uniforms_linear() {
        let bg = Background::Linear {
            angle_deg: 90.0,
            stops: vec![Rgb::hex(0xff0000), Rgb::hex(0x0000ff)],
        };
        let u = BackgroundUniforms::new(&bg, 800, 600);
        assert_eq!(u.kind, KIND_LINEAR);
        assert_eq!(u.stop_count, 2);
        assert!((u.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(u.stops[0], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(u.stops[1], [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(u.stops[2], [0.0; 4]);
        assert_eq!(u.size, [800.0, 600.0]);
    }

    #[test]
    fn test_background_uniforms_solid() {
        let bg = Background::Solid {
            color: Rgb::hex(0x05080f),
        };
        let u = BackgroundUniforms::new(&bg, 10, 10);
        assert_eq!(u.kind, KIND_SOLID);
        assert_eq!(u.stop_count, 1);
    }
}
