pub mod app;
pub mod atlas;
pub mod button;
pub mod picking;
pub mod transform;
pub mod utils;

use std::borrow::Cow;
use std::path::Path;

use anyhow::Context;
use atlas::AtlasManifest;
use button::{ButtonState, PICK_ROTATION_DEG};
use picking::{matches_pick_color, PickTarget, PICK_COLOR};
use pollster::block_on;
use transform::{model_matrix, Mat4};
use utils::{Position, Size, TransformUniform, Vertex};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

/// World units spanned by the orthographic projection, as in the original
/// demo: the window shows world (0, 0)..(200, 200) regardless of pixel size.
pub const WORLD_WIDTH: f32 = 200.0;
pub const WORLD_HEIGHT: f32 = 200.0;

/// Atlas frame names for the two button looks.
pub const FRAME_NORMAL: &str = "button-normal.png";
pub const FRAME_ACTIVE: &str = "button-active.png";

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.77,
    g: 0.64,
    b: 0.52,
    a: 1.0,
};

const SURFACE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;

struct ButtonSprite {
    vertex_buffer: wgpu::Buffer,
    texture_bind_group: wgpu::BindGroup,
    state: ButtonState,
}

pub struct PickEngine<'a> {
    pub size: PhysicalSize<u32>,
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_pipeline: wgpu::RenderPipeline,
    pick_pipeline: wgpu::RenderPipeline,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    mvp_buffer: wgpu::Buffer,
    mvp_bind_group: wgpu::BindGroup,
    pick_bind_group: wgpu::BindGroup,
    pick_target: PickTarget,
    proj_view: Mat4,
    button: Option<ButtonSprite>,
}

impl<'a> PickEngine<'a> {
    /// Loads the atlas manifest and image, and builds the button sprite:
    /// one vertex buffer holding both frames' quads over a shared unit
    /// quad, plus the atlas texture bind group.
    pub fn load_button(
        &mut self,
        manifest_path: impl AsRef<Path>,
        image_path: impl AsRef<Path>,
        position: Position,
        size: Size,
    ) -> anyhow::Result<()> {
        let manifest = AtlasManifest::load(manifest_path)?;
        let vertices = manifest.button_vertices(FRAME_NORMAL, FRAME_ACTIVE)?;

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Button Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let image_path = image_path.as_ref();
        let rgba = image::open(image_path)
            .with_context(|| format!("reading atlas image {}", image_path.display()))?
            .to_rgba8();
        let (width, height) = rgba.dimensions();

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Atlas Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[wgpu::TextureFormat::Rgba8UnormSrgb],
        });
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let texture_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some("Atlas Bind Group"),
        });

        log::info!(
            "button sprite loaded: {}x{} atlas, button at ({}, {}) sized {}x{}",
            width,
            height,
            position.x,
            position.y,
            size.width,
            size.height
        );

        self.button = Some(ButtonSprite {
            vertex_buffer,
            texture_bind_group,
            state: ButtonState::new(position, size),
        });
        Ok(())
    }

    /// Cursor position in physical pixels, top-left origin. This matches
    /// the pick target's row order, so no y-flip is needed at readback.
    pub fn handle_cursor_moved(&mut self, cursor: Position) {
        if let Some(button) = &mut self.button {
            button.state.on_cursor_moved(cursor);
        }
    }

    pub fn handle_mouse_press(&mut self) {
        if let Some(button) = &mut self.button {
            button.state.on_left_press();
        }
    }

    pub fn handle_mouse_release(&mut self) {
        if let Some(button) = &mut self.button {
            button.state.on_left_release();
        }
    }

    pub fn resize(&mut self, new_size: &PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = *new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        // Keep the pick target in lockstep with the surface so cursor
        // pixels stay aligned with pick pixels.
        self.pick_target = PickTarget::new(&self.device, new_size.width, new_size.height);
    }

    /// Runs the hidden hit pass when a click is pending, then the visible
    /// pass. The hit pass draws the button rotated by `PICK_ROTATION_DEG`
    /// with the flat pick color into the offscreen target and reads back
    /// the pixel under the click; an exact sentinel match sets `pressed`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if let Some(button) = &mut self.button {
            if let Some(click) = button.state.take_clicked() {
                let mvp = self.proj_view
                    * model_matrix(button.state.position(), button.state.size(), PICK_ROTATION_DEG);
                self.queue
                    .write_buffer(&self.mvp_buffer, 0, bytemuck::bytes_of(&mvp.to_uniform()));

                let mut encoder =
                    self.device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Pick Encoder"),
                        });
                {
                    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Pick Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: self.pick_target.view(),
                            resolve_target: None,
                            ops: wgpu::Operations {
                                // Opaque black: a miss can never match the sentinel.
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });
                    rpass.set_pipeline(&self.pick_pipeline);
                    rpass.set_bind_group(0, &button.texture_bind_group, &[]);
                    rpass.set_bind_group(1, &self.mvp_bind_group, &[]);
                    rpass.set_bind_group(2, &self.pick_bind_group, &[]);
                    rpass.set_vertex_buffer(0, button.vertex_buffer.slice(..));
                    rpass.draw(0..4, 0..1);
                }
                self.queue.submit(Some(encoder.finish()));

                let pixel = self.pick_target.read_pixel(
                    &self.device,
                    &self.queue,
                    click.x as u32,
                    click.y as u32,
                );
                let hit = pixel.is_some_and(matches_pick_color);
                log::debug!(
                    "pick readback at ({}, {}): {:?} -> {}",
                    click.x,
                    click.y,
                    pixel,
                    if hit { "hit" } else { "miss" }
                );
                if hit {
                    button.state.set_pressed();
                }
            }
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        if let Some(button) = &self.button {
            let mvp = self.proj_view
                * model_matrix(button.state.position(), button.state.size(), 0.0);
            self.queue
                .write_buffer(&self.mvp_buffer, 0, bytemuck::bytes_of(&mvp.to_uniform()));
        }

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(button) = &self.button {
                rpass.set_pipeline(&self.sprite_pipeline);
                rpass.set_bind_group(0, &button.texture_bind_group, &[]);
                rpass.set_bind_group(1, &self.mvp_bind_group, &[]);
                rpass.set_bind_group(2, &self.pick_bind_group, &[]);
                rpass.set_vertex_buffer(0, button.vertex_buffer.slice(..));
                rpass.draw(button.state.vertex_range(), 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn new(surface: wgpu::Surface<'a>, instance: wgpu::Instance, size: PhysicalSize<u32>) -> Self {
        let adapter = block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .expect("Failed to find an appropriate adapter");

        let (device, queue) = block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("Failed to create device");

        let config = wgpu::SurfaceConfiguration {
            desired_maximum_frame_latency: 2,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![SURFACE_FORMAT],
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: SURFACE_FORMAT,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo, // V-Sync
        };
        surface.configure(&device, &config);

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("texture_bind_group_layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("transform_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<TransformUniform>() as _,
                        ),
                    },
                    count: None,
                }],
            });

        let pick_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("pick_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<[f32; 4]>() as _
                        ),
                    },
                    count: None,
                }],
            });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: None,
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("../shaders/shader.wgsl"))),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[
                &texture_bind_group_layout,
                &transform_bind_group_layout,
                &pick_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let vertex_attributes = wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &vertex_attributes,
        }];
        let vertex_state = wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        };

        // The two quads per frame are laid out as triangle strips so the
        // draw call can select vertices 0..4 or 4..8 directly.
        let primitive = wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            ..Default::default()
        };

        let sprite_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: vertex_state.clone(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: SURFACE_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive,
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let pick_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Pick Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: vertex_state,
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_pick"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: PickTarget::FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive,
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let mvp_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Uniform Buffer"),
            contents: bytemuck::bytes_of(&Mat4::identity().to_uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let mvp_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mvp_buffer.as_entire_binding(),
            }],
            label: Some("Transform Bind Group"),
        });

        let pick_color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Pick Color Buffer"),
            contents: bytemuck::bytes_of(&PICK_COLOR),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let pick_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pick_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: pick_color_buffer.as_entire_binding(),
            }],
            label: Some("Pick Bind Group"),
        });

        let pick_target = PickTarget::new(&device, size.width, size.height);

        // Projection and view are fixed: ortho over the world rectangle,
        // eye one unit out on +Z looking at the origin.
        let proj = Mat4::orthographic(0.0, WORLD_WIDTH, 0.0, WORLD_HEIGHT, 1.0, -1.0);
        let view = Mat4::look_at([0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let proj_view = proj * view;

        Self {
            size,
            surface,
            device,
            queue,
            config,
            sprite_pipeline,
            pick_pipeline,
            texture_bind_group_layout,
            mvp_buffer,
            mvp_bind_group,
            pick_bind_group,
            pick_target,
            proj_view,
            button: None,
        }
    }
}
