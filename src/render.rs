use crate::core::{Camera, PassExecutor, PassKind, RenderPass, SceneFrame};
use web_sys as web;

mod helpers;
mod orb;
mod particles;
mod post;
mod targets;
use orb::{create_orb_resources, OrbResources, OrbUniforms};
use particles::{create_particle_resources, ParticleResources, ParticleUniforms};
use targets::{RenderTargets, HDR_FORMAT};

const TRANSPARENT: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

/// Surface texture and encoder held between `begin_frame` and `finish_frame`.
struct InFlight {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    orb: OrbResources,
    particles: ParticleResources,
    targets: RenderTargets,
    post: post::PostResources,
    bind_groups: post::PostBindGroups,
    in_flight: Option<InFlight>,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The page shows through wherever the composite writes zero alpha.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
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
        log::info!(
            "[gpu] surface {:?} {}x{} alpha {:?}",
            format,
            width,
            height,
            alpha_mode
        );

        let targets = RenderTargets::new(&device, width, height);

        let orb_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orb_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::ORB_WGSL.into()),
        });
        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particle_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::PARTICLES_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });

        let orb = create_orb_resources(&device, &orb_shader, HDR_FORMAT);
        let particles = create_particle_resources(&device, &particle_shader, HDR_FORMAT);
        let post = post::create_post_resources(&device, &post_shader, HDR_FORMAT, format);
        let bind_groups = post.bind_groups(&device, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            orb,
            particles,
            targets,
            post,
            bind_groups,
            in_flight: None,
        })
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn encode_base(&mut self, camera: &Camera, scene: &SceneFrame) {
        let Some(frame) = self.in_flight.as_mut() else {
            return;
        };
        let orb_u = OrbUniforms::new(camera, scene);
        self.queue
            .write_buffer(&self.orb.uniform_buffer, 0, bytemuck::bytes_of(&orb_u));
        let particle_u = ParticleUniforms::new(camera, scene);
        self.queue.write_buffer(
            &self.particles.uniform_buffer,
            0,
            bytemuck::bytes_of(&particle_u),
        );

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("base_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.targets.hdr_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        self.particles.draw(&mut rpass);
        self.orb.draw(&mut rpass);
    }

    fn encode_bloom(&mut self, bloom: &crate::core::BloomParams) {
        let Some(frame) = self.in_flight.as_mut() else {
            return;
        };
        self.post.write_uniforms(&self.queue, &self.targets, bloom);
        let bg = &self.bind_groups;

        // 1) Bright pass: HDR -> bloom_a
        post::blit(
            &mut frame.encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            TRANSPARENT,
            &self.post.bright_pipeline,
            &bg.bright,
            None,
        );
        // 2) Blur horizontal: bloom_a -> bloom_b
        post::blit(
            &mut frame.encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            TRANSPARENT,
            &self.post.blur_pipeline,
            &bg.blur_h,
            None,
        );
        // 3) Blur vertical: bloom_b -> bloom_a
        post::blit(
            &mut frame.encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            TRANSPARENT,
            &self.post.blur_pipeline,
            &bg.blur_v,
            None,
        );
        // 4) Composite: HDR + bloom_a -> swapchain
        post::blit(
            &mut frame.encoder,
            "composite",
            &frame.view,
            TRANSPARENT,
            &self.post.composite_pipeline,
            &bg.composite,
            Some(&bg.bloom),
        );
    }
}

impl PassExecutor for GpuState {
    type Error = wgpu::SurfaceError;

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();

        // Recreate offscreen render targets and the bind groups that view them
        self.targets.recreate(&self.device, width, height);
        self.bind_groups = self.post.bind_groups(&self.device, &self.targets);
    }

    fn begin_frame(&mut self) -> Result<(), Self::Error> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                // Skip this frame; the next one acquires from the fresh configuration.
                self.reconfigure();
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.in_flight = Some(InFlight {
            surface_texture,
            view,
            encoder,
        });
        Ok(())
    }

    fn execute(
        &mut self,
        pass: &RenderPass,
        camera: &Camera,
        scene: &SceneFrame,
    ) -> Result<(), Self::Error> {
        match pass.kind {
            PassKind::Base => self.encode_base(camera, scene),
            PassKind::Bloom(bloom) => self.encode_bloom(&bloom),
        }
        Ok(())
    }

    fn finish_frame(&mut self) -> Result<(), Self::Error> {
        if let Some(frame) = self.in_flight.take() {
            self.queue.submit(Some(frame.encoder.finish()));
            frame.surface_texture.present();
        }
        Ok(())
    }
}
