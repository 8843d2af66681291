use std::path::Path;

use glam::Mat4;
use wgpu::util::DeviceExt;
use wgpu::*;

use super::draw_list::{CameraUniform, DrawInstruction, InstanceUniform};
use super::gpu_init::GpuContext;
use super::textures;
use crate::error::AssetLoadError;
use crate::model::assets::{AssetRegistry, FLOATS_PER_VERTEX};

pub const CLEAR_COLOR: Color = Color {
    r: 0.2,
    g: 0.4,
    b: 0.8,
    a: 1.0,
};

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;
const INSTANCE_SIZE: u64 = std::mem::size_of::<InstanceUniform>() as u64;

pub fn create_depth_texture(device: &Device, width: u32, height: u32) -> TextureView {
    let depth_texture = device.create_texture(&TextureDescriptor {
        label: Some("depth_texture"),
        size: Extent3d { width, height, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    depth_texture.create_view(&TextureViewDescriptor::default())
}

/// Dynamic-offset uniform buffer holding one `InstanceUniform` per draw.
struct InstanceBuffer {
    buffer: Buffer,
    bind_group: BindGroup,
    stride: u64,
    capacity: usize,
}

impl InstanceBuffer {
    fn new(device: &Device, layout: &BindGroupLayout, stride: u64, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let buffer = device.create_buffer(&BufferDescriptor {
            label: Some("instance_buffer"),
            size: stride * capacity as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("instance_bind_group"),
            layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: BindingResource::Buffer(BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: BufferSize::new(INSTANCE_SIZE),
                }),
            }],
        });
        Self { buffer, bind_group, stride, capacity }
    }
}

/// Draws a frame's instruction list: one non-indexed draw per instruction,
/// each selecting its slice of the shared vertex pool.
pub struct Renderer {
    pipeline: RenderPipeline,
    vertex_buffer: Buffer,
    camera_buffer: Buffer,
    scene_bind_group: BindGroup,
    instance_layout: BindGroupLayout,
    instances: InstanceBuffer,
    depth_view: TextureView,
}

impl Renderer {
    pub fn new(gpu: &GpuContext, assets: &AssetRegistry, textures_dir: &Path) -> Result<Self, AssetLoadError> {
        let device = gpu.device.as_ref();
        let (wood_view, brick_view) = textures::load_scene_textures(device, gpu.queue.as_ref(), textures_dir)?;

        let vertex_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("vertex_pool"),
            contents: bytemuck::cast_slice(assets.vertex_pool()),
            usage: BufferUsages::VERTEX,
        });

        let camera_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("camera_buffer"),
            contents: bytemuck::bytes_of(&CameraUniform {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("texture_sampler"),
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            address_mode_w: AddressMode::Repeat,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            ..Default::default()
        });

        let texture_entry = |binding| BindGroupLayoutEntry {
            binding,
            visibility: ShaderStages::FRAGMENT,
            ty: BindingType::Texture {
                sample_type: TextureSampleType::Float { filterable: true },
                view_dimension: TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let scene_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::VERTEX,
                    ty: BindingType::Buffer {
                        ty: BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                texture_entry(1),
                texture_entry(2),
                BindGroupLayoutEntry {
                    binding: 3,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let scene_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &scene_layout,
            entries: &[
                BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
                BindGroupEntry { binding: 1, resource: BindingResource::TextureView(&wood_view) },
                BindGroupEntry { binding: 2, resource: BindingResource::TextureView(&brick_view) },
                BindGroupEntry { binding: 3, resource: BindingResource::Sampler(&sampler) },
            ],
        });

        let instance_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("instance_bind_group_layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: BufferSize::new(INSTANCE_SIZE),
                },
                count: None,
            }],
        });
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = INSTANCE_SIZE.div_ceil(alignment) * alignment;
        let instances = InstanceBuffer::new(device, &instance_layout, stride, 256);

        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("maze_shader"),
            source: ShaderSource::Wgsl(include_str!("shaders/maze.wgsl").into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&scene_layout, &instance_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexBufferLayout {
                    array_stride: (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as BufferAddress,
                    step_mode: VertexStepMode::Vertex,
                    attributes: &[
                        VertexAttribute { offset: 0, shader_location: 0, format: VertexFormat::Float32x3 },
                        VertexAttribute { offset: 12, shader_location: 1, format: VertexFormat::Float32x2 },
                        VertexAttribute { offset: 20, shader_location: 2, format: VertexFormat::Float32x3 },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: gpu.format,
                    blend: Some(BlendState::REPLACE),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: FrontFace::Ccw,
                // Mesh files carry no consistent winding
                cull_mode: None,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: MultisampleState { count: 1, mask: !0, alpha_to_coverage_enabled: false },
            multiview: None,
            cache: None,
        });

        let depth_view = create_depth_texture(device, gpu.config.width, gpu.config.height);

        Ok(Self {
            pipeline,
            vertex_buffer,
            camera_buffer,
            scene_bind_group,
            instance_layout,
            instances,
            depth_view,
        })
    }

    pub fn resize(&mut self, gpu: &GpuContext) {
        self.depth_view = create_depth_texture(gpu.device.as_ref(), gpu.config.width, gpu.config.height);
    }

    pub fn render(&mut self, gpu: &GpuContext, view_proj: Mat4, draw_list: &[DrawInstruction]) -> Result<(), SurfaceError> {
        let device = gpu.device.as_ref();
        let queue = gpu.queue.as_ref();

        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniform { view_proj: view_proj.to_cols_array_2d() }),
        );

        if draw_list.len() > self.instances.capacity {
            let capacity = draw_list.len().next_power_of_two();
            self.instances = InstanceBuffer::new(device, &self.instance_layout, self.instances.stride, capacity);
        }
        let stride = self.instances.stride as usize;
        let mut staging = vec![0u8; stride * draw_list.len()];
        for (i, instruction) in draw_list.iter().enumerate() {
            let uniform = InstanceUniform::from_instruction(instruction);
            staging[i * stride..i * stride + INSTANCE_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&uniform));
        }
        if !staging.is_empty() {
            queue.write_buffer(&self.instances.buffer, 0, &staging);
        }

        let frame = gpu.surface.get_current_texture()?;
        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor { label: Some("encoder") });

        {
            let mut rp = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(CLEAR_COLOR),
                        store: StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rp.set_pipeline(&self.pipeline);
            rp.set_bind_group(0, &self.scene_bind_group, &[]);
            rp.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            for (i, instruction) in draw_list.iter().enumerate() {
                let offset = (i * stride) as DynamicOffset;
                rp.set_bind_group(1, &self.instances.bind_group, &[offset]);
                rp.draw(instruction.mesh.vertices(), 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
