use scene_editor_lib::{
    application::{AppState, Application, Layer, Screen},
    config::EditorSettings,
    controller::CameraController,
    error::EditorResult,
    renderer::{IndexBuffer, UniformBuffer, Vertex, VertexBuffer, QUAD_INDICES, QUAD_VERTICES},
    scene::Scene,
    uniform::SceneUniform,
};
use wgpu::{
    include_wgsl, CommandEncoderDescriptor, PipelineLayoutDescriptor, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipelineDescriptor, TextureViewDescriptor,
};
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
};

struct SceneEditor {
    scene: Scene,
    controller: CameraController,
    scene_buffer: UniformBuffer<SceneUniform>,
    scene_bind_group: wgpu::BindGroup,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
}

impl SceneEditor {
    fn snapshot(&self, screen: &Screen) -> SceneUniform {
        let size = screen.size();
        SceneUniform::from_scene(
            &self.scene,
            &self.controller.settings.render,
            (size.width, size.height),
        )
    }
}

impl Layer for SceneEditor {
    fn start(
        screen: &mut Screen,
        _app: &AppState,
        settings: &EditorSettings,
    ) -> EditorResult<Self> {
        let shader = screen
            .device
            .create_shader_module(include_wgsl!("asset/shader/scene.wgsl"));

        let vertex_buffer = VertexBuffer::init_immediate(
            &screen.device,
            bytemuck::cast_slice(QUAD_VERTICES),
            Some("Vertex Buffer"),
        );
        let index_buffer =
            IndexBuffer::init_immediate_u16(&screen.device, QUAD_INDICES, Some("Index Buffer"));

        let mut controller = CameraController::new(settings.clone());
        let mut scene =
            Scene::with_default_contents(settings.fov_radians(), settings.aspect_ratio())?;
        controller.resize(&mut scene, screen.size());

        let size = screen.size();
        let scene_buffer = UniformBuffer::init_immediate(
            &screen.device,
            &SceneUniform::from_scene(&scene, &settings.render, (size.width, size.height)),
            Some("Scene Buffer"),
        );

        let scene_bind_group_layout =
            screen
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                    label: Some("scene_bind_group_layout"),
                });

        let scene_bind_group = screen.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.buffer().as_entire_binding(),
            }],
            label: Some("scene_bind_group"),
        });

        let render_pipeline_layout =
            screen
                .device
                .create_pipeline_layout(&PipelineLayoutDescriptor {
                    label: Some("Render Pipeline Layout"),
                    bind_group_layouts: &[&scene_bind_group_layout],
                    push_constant_ranges: &[],
                });

        let render_pipeline = screen
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some("Render Pipeline"),
                layout: Some(&render_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_main",
                    buffers: &[Vertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: screen.config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
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
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
            });

        Ok(Self {
            scene,
            controller,
            scene_buffer,
            scene_bind_group,
            render_pipeline,
            vertex_buffer,
            index_buffer,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>, _app: &AppState, _screen: &mut Screen) {
        self.controller.resize(&mut self.scene, new_size);
    }

    fn process_event(&mut self, event: &Event<()>, screen: &mut Screen) {
        if let Event::WindowEvent { event, window_id } = event {
            if *window_id != screen.window().id() {
                return;
            }
            // resizes go through `Layer::resize` after the surface is reconfigured
            if matches!(event, WindowEvent::Resized(_)) {
                return;
            }
            let grab = self.controller.cursor_grab();
            self.controller.process_events(&mut self.scene, event);
            if self.controller.cursor_grab() != grab {
                screen.set_cursor_grab(self.controller.cursor_grab());
            }
        }
    }

    fn update(&mut self, app: &AppState, screen: &mut Screen) {
        tracing::trace!("frame time {:.2} ms", app.frame_time() * 1000.0);
        self.controller.update(&mut self.scene);
        self.scene_buffer.write(&screen.queue, &self.snapshot(screen));
    }

    fn render(&mut self, _app: &AppState, screen: &mut Screen) -> Result<(), wgpu::SurfaceError> {
        let output = screen.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&TextureViewDescriptor::default());
        let mut encoder = screen
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));
            render_pass.set_index_buffer(
                self.index_buffer.buffer().slice(..),
                self.index_buffer.format(),
            );
            render_pass.draw_indexed(0..self.index_buffer.count(), 0, 0..1);
        }

        screen.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn shutdown(&mut self, _app: &AppState, _screen: &mut Screen) -> EditorResult<()> {
        tracing::info!(
            "exiting with {} spheres, {} planes",
            self.scene.spheres().len(),
            self.scene.planes().len()
        );
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = pollster::block_on(Application::<SceneEditor>::init(EditorSettings::default()))
    {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
