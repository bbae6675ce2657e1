use super::helpers;
use crate::core::{constants, icosphere_wireframe, Camera, SceneFrame};
use wgpu;
use wgpu::util::DeviceExt;

/// Mirrors `OrbUniforms` in `orb.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct OrbUniforms {
    pub(crate) model_view: [[f32; 4]; 4],
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) base_color: [f32; 4],
    pub(crate) accent_color: [f32; 4],
    pub(crate) params: [f32; 4],
}

impl OrbUniforms {
    pub(crate) fn new(camera: &Camera, scene: &SceneFrame) -> Self {
        let model_view = camera.view_matrix() * scene.orb.model_matrix();
        let shader = &scene.shader;
        Self {
            model_view: model_view.to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            base_color: shader.base_color().with_alpha(1.0),
            accent_color: shader.accent_color().with_alpha(1.0),
            params: [
                shader.elapsed_time(),
                shader.audio_level(),
                constants::DISPLACEMENT_SCALE,
                0.0,
            ],
        }
    }
}

pub(crate) struct OrbResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_orb_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> OrbResources {
    let mesh = icosphere_wireframe(constants::ORB_RADIUS, constants::ORB_DETAIL);
    log::info!(
        "[orb] wireframe: {} vertices, {} edges",
        mesh.positions.len(),
        mesh.edge_count()
    );
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("orb_vertices"),
        contents: bytemuck::cast_slice(&mesh.positions),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("orb_edges"),
        contents: bytemuck::cast_slice(&mesh.edges),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer = helpers::uniform_buffer::<OrbUniforms>(device, "orb_uniforms");
    let bgl = helpers::uniform_layout(device, "orb_bgl");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("orb_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("orb_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let vertex_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
    };
    let pipeline = helpers::make_scene_pipeline(
        device,
        "orb_pipeline",
        &layout,
        shader,
        &[vertex_layout],
        wgpu::PrimitiveTopology::LineList,
        color_format,
    );

    OrbResources {
        pipeline,
        vertex_buffer,
        index_buffer,
        index_count: mesh.edges.len() as u32,
        uniform_buffer,
        bind_group,
    }
}

impl OrbResources {
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
