//! Link rendering: each proximity line is a thin instanced quad expanded
//! in the vertex stage from a storage buffer of segment records.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::config::Theme;
use crate::frame::LinkInstance;

const INITIAL_CAPACITY: u32 = 256;

/// Stroke color and line width (shared by all links in a frame).
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LinkParams {
    color: [f32; 3],
    width: f32,
}

pub(super) struct LinksState {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    buffer: wgpu::Buffer,
    capacity: u32,
    count: u32,
    // Kept for bind group rebuilds when the storage buffer grows.
    uniform_buffer: wgpu::Buffer,
    params_buffer: wgpu::Buffer,
}

impl LinksState {
    pub fn new(
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
        theme: &Theme,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let params = LinkParams {
            color: theme.link_color,
            width: theme.link_width,
        };
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Link Params Buffer"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let buffer = create_link_buffer(device, INITIAL_CAPACITY);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Link Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = create_bind_group(
            device,
            &bind_group_layout,
            uniform_buffer,
            &buffer,
            &params_buffer,
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Link Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Link Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Link Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            bind_group,
            buffer,
            capacity: INITIAL_CAPACITY,
            count: 0,
            uniform_buffer: uniform_buffer.clone(),
            params_buffer,
        }
    }

    /// Write this frame's links into the storage buffer. Growing the
    /// buffer invalidates the bind group, so it is rebuilt here too.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, links: &[LinkInstance]) {
        let count = links.len() as u32;
        if count > self.capacity {
            self.capacity = count.next_power_of_two();
            self.buffer = create_link_buffer(device, self.capacity);
            self.bind_group = create_bind_group(
                device,
                &self.bind_group_layout,
                &self.uniform_buffer,
                &self.buffer,
                &self.params_buffer,
            );
        }
        if count > 0 {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(links));
        }
        self.count = count;
    }

    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..6, 0..self.count);
    }
}

fn create_link_buffer(device: &wgpu::Device, capacity: u32) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Link Buffer"),
        size: capacity as u64 * std::mem::size_of::<LinkInstance>() as u64,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    link_buffer: &wgpu::Buffer,
    params_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Link Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: link_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: params_buffer.as_entire_binding(),
            },
        ],
    })
}

const SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
    _padding: vec2<f32>,
};

struct LinkParams {
    color: vec3<f32>,
    width: f32,
};

struct Link {
    a: vec2<f32>,
    b: vec2<f32>,
    alpha: f32,
    _pad0: f32,
    _pad1: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var<storage, read> links: array<Link>;
@group(0) @binding(2) var<uniform> params: LinkParams;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) alpha: f32,
};

fn to_ndc(pos: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(
        pos.x / uniforms.resolution.x * 2.0 - 1.0,
        1.0 - pos.y / uniforms.resolution.y * 2.0,
    );
}

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    var out: VertexOutput;

    let link = links[instance_index];
    let span = link.b - link.a;

    if link.alpha < 0.001 || length(span) < 0.0001 {
        out.clip_position = vec4<f32>(0.0, 0.0, 2.0, 1.0);
        out.alpha = 0.0;
        return out;
    }

    let dir = normalize(span);
    let perp = vec2<f32>(-dir.y, dir.x) * params.width * 0.5;

    var pos: vec2<f32>;
    switch vertex_index {
        case 0u: { pos = link.a - perp; }
        case 1u: { pos = link.a + perp; }
        case 2u: { pos = link.b - perp; }
        case 3u: { pos = link.a + perp; }
        case 4u: { pos = link.b - perp; }
        default: { pos = link.b + perp; }
    }

    out.clip_position = vec4<f32>(to_ndc(pos), 0.0, 1.0);
    out.alpha = link.alpha;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(params.color, max(in.alpha, 0.0));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_link_shader_validates() {
        validate_wgsl(SHADER).expect("link shader should be valid WGSL");
    }

    #[test]
    fn test_link_record_matches_wgsl_stride() {
        // Link in the shader is 32 bytes (vec2 + vec2 + f32 + f32 + vec2).
        assert_eq!(std::mem::size_of::<LinkInstance>(), 32);
    }
}
