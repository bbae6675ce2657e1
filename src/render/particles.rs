use super::helpers;
use crate::core::{constants, particle_field, Camera, Color, SceneFrame};
use wgpu;
use wgpu::util::DeviceExt;

/// Mirrors `ParticleUniforms` in `particles.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleUniforms {
    pub(crate) model_view: [[f32; 4]; 4],
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
    pub(crate) params: [f32; 4],
}

impl ParticleUniforms {
    pub(crate) fn new(camera: &Camera, scene: &SceneFrame) -> Self {
        let model_view = camera.view_matrix() * scene.particles.model_matrix();
        Self {
            model_view: model_view.to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            color: Color::from_hex(constants::PARTICLE_COLOR_HEX)
                .with_alpha(constants::PARTICLE_OPACITY),
            params: [constants::PARTICLE_SIZE, constants::FOG_DENSITY, 0.0, 0.0],
        }
    }
}

pub(crate) struct ParticleResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) instance_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_particle_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> ParticleResources {
    let centers = particle_field(
        constants::PARTICLE_COUNT,
        constants::PARTICLE_SPREAD,
        constants::PARTICLE_SEED,
    );
    let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("particle_centers"),
        contents: bytemuck::cast_slice(&centers),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let uniform_buffer = helpers::uniform_buffer::<ParticleUniforms>(device, "particle_uniforms");
    let bgl = helpers::uniform_layout(device, "particle_bgl");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("particle_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("particle_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
    };
    let pipeline = helpers::make_scene_pipeline(
        device,
        "particle_pipeline",
        &layout,
        shader,
        &[instance_layout],
        wgpu::PrimitiveTopology::TriangleList,
        color_format,
    );

    ParticleResources {
        pipeline,
        instance_buffer,
        instance_count: centers.len() as u32,
        uniform_buffer,
        bind_group,
    }
}

impl ParticleResources {
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        // one camera-facing quad (two triangles) per particle
        pass.draw(0..6, 0..self.instance_count);
    }
}
