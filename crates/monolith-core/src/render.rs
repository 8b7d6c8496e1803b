//! wgpu renderer shared by the native and web hosts.
//!
//! One render pass per frame: opaque boxes first, then alpha-blended strands
//! and particles that test against (but do not write) depth.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::color::Rgb;
use crate::constants::MAX_POINT_LIGHTS;
use crate::frame::{FrameView, RenderTarget};
use crate::scene::Scene;
use crate::wave::WaveStrand;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    to_eye: [f32; 4],
    ambient: [f32; 4],
    light_pos: [[f32; 4]; MAX_POINT_LIGHTS],
    light_color: [[f32; 4]; MAX_POINT_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshVertex {
    pos: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ShapeInstance {
    model: [[f32; 4]; 4],
    albedo: [f32; 4],
    emissive: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StrandInstance {
    origin: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleInstance {
    pos: [f32; 3],
    scale: f32,
    color: [f32; 4],
}

const BOX_ATTRIBS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const SHAPE_INSTANCE_ATTRIBS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
    6 => Float32x4, 7 => Float32x4
];
const STRAND_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const STRAND_INSTANCE_ATTRIBS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![1 => Float32x4, 2 => Float32x4];
const QUAD_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const PARTICLE_INSTANCE_ATTRIBS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x4];

const QUAD: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Config colors are authored in sRGB; the surface format is sRGB, so shade in linear.
fn linear(rgb: Rgb) -> [f32; 3] {
    rgb.0.map(srgb_channel_to_linear)
}

fn linear_rgba(rgba: [f32; 4]) -> [f32; 4] {
    let [r, g, b] = linear(Rgb([rgba[0], rgba[1], rgba[2]]));
    [r, g, b, rgba[3]]
}

/// Unit box centred on the origin, four vertices per face so normals stay flat.
fn unit_box() -> (Vec<MeshVertex>, Vec<u16>) {
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [0.0, 0.0, -1.0], [1.0, 0.0, 0.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let (n, u, v) = (Vec3::from(normal), Vec3::from(u), Vec3::from(v));
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * su + v * sv) * 0.5;
            vertices.push(MeshVertex {
                pos: p.to_array(),
                normal,
            });
        }
        // (u, v, n) is right-handed for every face above, so this winding is CCW from outside
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn instance_buffer(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size.max(16),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[allow(clippy::too_many_arguments)]
fn make_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    entries: (&str, &str),
    buffers: &[wgpu::VertexBufferLayout<'_>],
    topology: wgpu::PrimitiveTopology,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(entries.0),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(entries.1),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

/// GPU copies of the scene geometry. Dropped as a unit on `release`.
struct SceneBuffers {
    box_vb: wgpu::Buffer,
    box_ib: wgpu::Buffer,
    box_index_count: u32,
    shape_instances: wgpu::Buffer,
    shape_capacity: usize,
    strand_vb: wgpu::Buffer,
    strand_instances: wgpu::Buffer,
    strand_count: usize,
    samples_per_strand: usize,
    quad_vb: wgpu::Buffer,
    particle_instances: wgpu::Buffer,
    particle_capacity: usize,
}

pub struct GpuRenderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    shape_pipeline: wgpu::RenderPipeline,
    strand_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    buffers: Option<SceneBuffers>,
    particle_scratch: Vec<ParticleInstance>,
}

impl<'w> GpuRenderer<'w> {
    /// Build pipelines and size every buffer from `scene`. The host owns the
    /// instance and creates `surface` from its window or canvas.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
        scene: &Scene,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No suitable GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
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
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });

        let shape_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &BOX_ATTRIBS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ShapeInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &SHAPE_INSTANCE_ATTRIBS,
            },
        ];
        let strand_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &STRAND_ATTRIBS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<StrandInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &STRAND_INSTANCE_ATTRIBS,
            },
        ];
        let particle_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &QUAD_ATTRIBS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &PARTICLE_INSTANCE_ATTRIBS,
            },
        ];

        let shape_pipeline = make_pipeline(
            &device,
            "shape_pipeline",
            &layout,
            &shader,
            ("vs_shape", "fs_shape"),
            &shape_buffers,
            wgpu::PrimitiveTopology::TriangleList,
            format,
            None,
            true,
        );
        let strand_pipeline = make_pipeline(
            &device,
            "strand_pipeline",
            &layout,
            &shader,
            ("vs_strand", "fs_strand"),
            &strand_buffers,
            wgpu::PrimitiveTopology::LineStrip,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );
        let particle_pipeline = make_pipeline(
            &device,
            "particle_pipeline",
            &layout,
            &shader,
            ("vs_particle", "fs_particle"),
            &particle_buffers,
            wgpu::PrimitiveTopology::TriangleList,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );

        let buffers = Self::create_buffers(&device, scene);
        log::info!(
            "[render] {:?} {}x{} strands={} particle capacity={}",
            format,
            width,
            height,
            buffers.strand_count,
            buffers.particle_capacity
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globals_buffer,
            globals_bind_group,
            shape_pipeline,
            strand_pipeline,
            particle_pipeline,
            buffers: Some(buffers),
            particle_scratch: Vec::new(),
        })
    }

    fn create_buffers(device: &wgpu::Device, scene: &Scene) -> SceneBuffers {
        let (box_vertices, box_indices) = unit_box();
        let box_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("box_vb"),
            contents: bytemuck::cast_slice(&box_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let box_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("box_ib"),
            contents: bytemuck::cast_slice(&box_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let shape_capacity = scene.shapes().len();
        let strands = scene.waves().strands();
        let strand_count = strands.len();
        let samples_per_strand = strands.first().map_or(0, |s| s.vertices().len());
        let particle_capacity = scene.particle_capacity().max(1);

        SceneBuffers {
            box_vb,
            box_ib,
            box_index_count: box_indices.len() as u32,
            shape_instances: instance_buffer(
                device,
                "shape_instances",
                (shape_capacity * std::mem::size_of::<ShapeInstance>()) as u64,
            ),
            shape_capacity,
            strand_vb: instance_buffer(
                device,
                "strand_vb",
                (strand_count * samples_per_strand * std::mem::size_of::<[f32; 3]>()) as u64,
            ),
            strand_instances: instance_buffer(
                device,
                "strand_instances",
                (strand_count * std::mem::size_of::<StrandInstance>()) as u64,
            ),
            strand_count,
            samples_per_strand,
            quad_vb,
            particle_instances: instance_buffer(
                device,
                "particle_instances",
                (particle_capacity * std::mem::size_of::<ParticleInstance>()) as u64,
            ),
            particle_capacity,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn write_globals(&self, view: &FrameView<'_>) {
        let cam = view.camera;
        let lights = &view.lighting.point_lights;
        let mut light_pos = [[0.0; 4]; MAX_POINT_LIGHTS];
        let mut light_color = [[0.0; 4]; MAX_POINT_LIGHTS];
        for (i, light) in lights.iter().take(MAX_POINT_LIGHTS).enumerate() {
            light_pos[i] = light.position.extend(light.range).to_array();
            let [r, g, b] = linear(light.color);
            let k = light.intensity;
            light_color[i] = [r * k, g * k, b * k, 1.0];
        }
        let [ar, ag, ab] = linear(view.lighting.ambient);
        let globals = Globals {
            view_proj: cam.view_projection().to_cols_array_2d(),
            cam_right: cam.right_axis().extend(0.0).to_array(),
            cam_up: cam.up_axis().extend(0.0).to_array(),
            to_eye: (-cam.forward()).extend(0.0).to_array(),
            ambient: [ar, ag, ab, lights.len().min(MAX_POINT_LIGHTS) as f32],
            light_pos,
            light_color,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    fn grow_particles(&mut self, needed: usize) {
        let Some(buffers) = self.buffers.as_mut() else {
            return;
        };
        if needed <= buffers.particle_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        log::debug!(
            "[render] growing particle buffer {} -> {}",
            buffers.particle_capacity,
            capacity
        );
        buffers.particle_instances = instance_buffer(
            &self.device,
            "particle_instances",
            (capacity * std::mem::size_of::<ParticleInstance>()) as u64,
        );
        buffers.particle_capacity = capacity;
    }
}

impl RenderTarget for GpuRenderer<'_> {
    type Error = wgpu::SurfaceError;

    fn upload_strand(&mut self, index: usize, strand: &WaveStrand) -> Result<(), Self::Error> {
        let Some(buffers) = self.buffers.as_ref() else {
            return Ok(());
        };
        if index >= buffers.strand_count || strand.vertices().len() != buffers.samples_per_strand {
            log::warn!("[render] strand {} does not fit the uploaded layout", index);
            return Ok(());
        }
        let stride = std::mem::size_of::<[f32; 3]>() * buffers.samples_per_strand;
        self.queue.write_buffer(
            &buffers.strand_vb,
            (index * stride) as u64,
            bytemuck::cast_slice(strand.vertices()),
        );
        let instance = StrandInstance {
            origin: strand.origin().extend(0.0).to_array(),
            color: linear_rgba(strand.color()),
        };
        self.queue.write_buffer(
            &buffers.strand_instances,
            (index * std::mem::size_of::<StrandInstance>()) as u64,
            bytemuck::bytes_of(&instance),
        );
        Ok(())
    }

    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), Self::Error> {
        if self.buffers.is_none() {
            return Ok(());
        }
        self.grow_particles(view.particles.len());
        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.write_globals(view);

        let Some(buffers) = self.buffers.as_ref() else {
            return Ok(());
        };
        let shapes: Vec<ShapeInstance> = view
            .shapes
            .iter()
            .take(buffers.shape_capacity)
            .map(|s| {
                let [r, g, b] = linear(s.color);
                let [er, eg, eb] = linear(s.emissive);
                let k = s.emissive_intensity;
                ShapeInstance {
                    model: s.model_matrix().to_cols_array_2d(),
                    albedo: [r, g, b, 1.0],
                    emissive: [er * k, eg * k, eb * k, s.shininess],
                }
            })
            .collect();
        self.queue
            .write_buffer(&buffers.shape_instances, 0, bytemuck::cast_slice(&shapes));

        // particle color comes from the policy; only opacity varies per particle
        let [pr, pg, pb] = linear(view.particle_color);
        self.particle_scratch.clear();
        self.particle_scratch.extend(view.particles.iter().map(|p| ParticleInstance {
            pos: p.position.to_array(),
            scale: p.scale,
            color: [pr, pg, pb, p.opacity],
        }));
        self.queue.write_buffer(
            &buffers.particle_instances,
            0,
            bytemuck::cast_slice(&self.particle_scratch),
        );

        let [cr, cg, cb] = linear(view.clear_color);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: cr as f64,
                            g: cg as f64,
                            b: cb as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            if !shapes.is_empty() {
                rpass.set_pipeline(&self.shape_pipeline);
                rpass.set_vertex_buffer(0, buffers.box_vb.slice(..));
                rpass.set_vertex_buffer(1, buffers.shape_instances.slice(..));
                rpass.set_index_buffer(buffers.box_ib.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..buffers.box_index_count, 0, 0..shapes.len() as u32);
            }

            if buffers.strand_count > 0 && buffers.samples_per_strand > 1 {
                rpass.set_pipeline(&self.strand_pipeline);
                rpass.set_vertex_buffer(0, buffers.strand_vb.slice(..));
                rpass.set_vertex_buffer(1, buffers.strand_instances.slice(..));
                let n = buffers.samples_per_strand as u32;
                for j in 0..buffers.strand_count as u32 {
                    rpass.draw(j * n..(j + 1) * n, j..j + 1);
                }
            }

            if !self.particle_scratch.is_empty() {
                rpass.set_pipeline(&self.particle_pipeline);
                rpass.set_vertex_buffer(0, buffers.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, buffers.particle_instances.slice(..));
                rpass.draw(0..QUAD.len() as u32, 0..self.particle_scratch.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(&mut self) {
        if self.buffers.take().is_some() {
            log::info!("[render] released scene buffers");
        }
        self.particle_scratch = Vec::new();
    }
}
