use super::helpers;
use super::targets::RenderTargets;
use crate::core::BloomParams;
use wgpu;

/// Mirrors `PostUniforms` in `post.wgsl` (32 bytes).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) blur_dir: [f32; 2],
    pub(crate) bloom_strength: f32,
    pub(crate) bloom_radius: f32,
    pub(crate) threshold: f32,
    pub(crate) _pad: f32,
}

impl PostUniforms {
    pub(crate) fn new(resolution: [f32; 2], blur_dir: [f32; 2], bloom: &BloomParams) -> Self {
        Self {
            resolution,
            blur_dir,
            bloom_strength: bloom.strength,
            bloom_radius: bloom.radius,
            threshold: bloom.threshold,
            _pad: 0.0,
        }
    }
}

/// One uniform buffer per bloom step. Queue writes land before the encoder
/// runs, so steps sharing a buffer would all see the last write.
pub(crate) struct PostUniformBuffers {
    pub(crate) bright: wgpu::Buffer,
    pub(crate) blur_h: wgpu::Buffer,
    pub(crate) blur_v: wgpu::Buffer,
    pub(crate) composite: wgpu::Buffer,
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) uniforms: PostUniformBuffers,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups over the current render targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    pub(crate) bright: wgpu::BindGroup,
    pub(crate) blur_h: wgpu::BindGroup,
    pub(crate) blur_v: wgpu::BindGroup,
    pub(crate) composite: wgpu::BindGroup,
    pub(crate) bloom: wgpu::BindGroup,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    bloom_format: wgpu::TextureFormat,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("post_linear"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let uniforms = PostUniformBuffers {
        bright: helpers::uniform_buffer::<PostUniforms>(device, "post_bright_u"),
        blur_h: helpers::uniform_buffer::<PostUniforms>(device, "post_blur_h_u"),
        blur_v: helpers::uniform_buffer::<PostUniforms>(device, "post_blur_v_u"),
        composite: helpers::uniform_buffer::<PostUniforms>(device, "post_composite_u"),
    };
    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        post_shader,
        "fs_bright",
        bloom_format,
        None,
    );
    let blur_pipeline = helpers::make_post_pipeline(
        device,
        &pl_bright_blur,
        post_shader,
        "fs_blur",
        bloom_format,
        None,
    );
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &pl_composite,
        post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        sampler,
        uniforms,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

impl PostResources {
    fn source_group(
        &self,
        device: &wgpu::Device,
        label: &str,
        view: &wgpu::TextureView,
        uniforms: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    }

    pub(crate) fn bind_groups(
        &self,
        device: &wgpu::Device,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let bloom = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom"),
            layout: &self.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        PostBindGroups {
            bright: self.source_group(device, "bg_bright", &targets.hdr_view, &self.uniforms.bright),
            blur_h: self.source_group(
                device,
                "bg_blur_h",
                &targets.bloom_a_view,
                &self.uniforms.blur_h,
            ),
            blur_v: self.source_group(
                device,
                "bg_blur_v",
                &targets.bloom_b_view,
                &self.uniforms.blur_v,
            ),
            composite: self.source_group(
                device,
                "bg_composite",
                &targets.hdr_view,
                &self.uniforms.composite,
            ),
            bloom,
        }
    }

    /// Uploads this frame's parameters for every bloom step.
    pub(crate) fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        bloom: &BloomParams,
    ) {
        let half = targets.bloom_resolution();
        let full = targets.hdr_resolution();
        let steps = [
            (&self.uniforms.bright, half, [0.0, 0.0]),
            (&self.uniforms.blur_h, half, [1.0, 0.0]),
            (&self.uniforms.blur_v, half, [0.0, 1.0]),
            (&self.uniforms.composite, full, [0.0, 0.0]),
        ];
        for (buffer, resolution, dir) in steps {
            let u = PostUniforms::new(resolution, dir, bloom);
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(&u));
        }
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
