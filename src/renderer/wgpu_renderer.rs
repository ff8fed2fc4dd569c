use crate::layout::Scene;
use crate::renderer::batch::{
    ColorVertex, DiscVertex, DrawKind, FrameBatch, TextItem, TexturedVertex,
};
use crate::renderer::Renderer;
use anyhow::Context;
use glyphon::{
    Attrs, Buffer, Cache, Color as TextColor, Family, FontSystem, Metrics, Resolution, Shaping,
    SwashCache, TextArea, TextAtlas, TextBounds, TextRenderer, Viewport,
};
use image::RgbaImage;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

// WGSL Shaders

const QUAD_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.clip_position = vec4<f32>(input.position, 0.0, 1.0);
    output.color = input.color;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;

const PICTURE_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) tex_coords: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
}

@group(0) @binding(0)
var texture: texture_2d<f32>;
@group(0) @binding(1)
var texture_sampler: sampler;

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.clip_position = vec4<f32>(input.position, 0.0, 1.0);
    output.tex_coords = input.tex_coords;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(texture, texture_sampler, input.tex_coords);
}
"#;

// Pegs: a filled circle with an outline ring, optionally lit like a sphere
// by a light above and to the left of the viewer.
const DISC_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) local: vec2<f32>,
    @location(2) fill: vec4<f32>,
    @location(3) outline: vec4<f32>,
    @location(4) params: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) fill: vec4<f32>,
    @location(2) outline: vec4<f32>,
    @location(3) params: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.clip_position = vec4<f32>(input.position, 0.0, 1.0);
    output.local = input.local;
    output.fill = input.fill;
    output.outline = input.outline;
    output.params = input.params;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let radius = input.params.x;
    let outline = input.params.y;
    let dist = length(input.local) * radius;
    let coverage = clamp(radius - dist + 0.5, 0.0, 1.0);
    if (coverage <= 0.0) {
        discard;
    }

    var color = input.fill.rgb;
    if (input.params.z > 0.5) {
        let r2 = min(dot(input.local, input.local), 1.0);
        let normal = vec3<f32>(input.local.x, -input.local.y, sqrt(1.0 - r2));
        let light = normalize(vec3<f32>(-0.4, 0.5, 0.8));
        let diffuse = max(dot(normal, light), 0.0);
        let half_dir = normalize(light + vec3<f32>(0.0, 0.0, 1.0));
        let specular = pow(max(dot(normal, half_dir), 0.0), 32.0);
        color = color * (0.3 + 0.7 * diffuse) + vec3<f32>(0.35 * specular);
    }

    let ring = clamp(dist - (radius - outline) + 0.5, 0.0, 1.0);
    color = mix(color, input.outline.rgb, ring);
    return vec4<f32>(color, coverage);
}
"#;

impl ColorVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

impl TexturedVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

const DISC_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    0 => Float32x2,
    1 => Float32x2,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
];

impl DiscVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<DiscVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &DISC_ATTRIBUTES,
        }
    }
}

/// glyphon state for the status text.
struct TextState {
    font_system: FontSystem,
    swash_cache: SwashCache,
    atlas: TextAtlas,
    renderer: TextRenderer,
    viewport: Viewport,
    /// One shaped buffer per label, with the text and font size it was shaped for
    buffers: Vec<(Buffer, String, f32)>,
}

impl TextState {
    fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let viewport = Viewport::new(device, &cache);
        let renderer =
            TextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);
        Self {
            font_system,
            swash_cache,
            atlas,
            renderer,
            viewport,
            buffers: Vec::new(),
        }
    }

    /// Shape the labels of a frame and upload the glyphs.
    ///
    /// Returns false when nothing should be drawn.
    fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: (u32, u32),
        items: &[TextItem<'_>],
    ) -> bool {
        if items.is_empty() {
            return false;
        }

        self.buffers.truncate(items.len());
        while self.buffers.len() < items.len() {
            let buffer = Buffer::new(&mut self.font_system, Metrics::new(24.0, 30.0));
            self.buffers.push((buffer, String::new(), 0.0));
        }

        for (item, (buffer, text, font_size)) in items.iter().zip(self.buffers.iter_mut()) {
            buffer.set_size(
                &mut self.font_system,
                Some(item.bounds.w.max(1.0)),
                Some(item.bounds.h.max(1.0)),
            );
            if text.as_str() != item.text || *font_size != item.font_size {
                buffer.set_metrics(
                    &mut self.font_system,
                    Metrics::new(item.font_size, item.font_size * 1.25),
                );
                buffer.set_text(
                    &mut self.font_system,
                    item.text,
                    Attrs::new().family(Family::SansSerif),
                    Shaping::Advanced,
                );
                text.clear();
                text.push_str(item.text);
                *font_size = item.font_size;
            }
            buffer.shape_until_scroll(&mut self.font_system, false);
        }

        self.viewport.update(
            queue,
            Resolution {
                width: size.0,
                height: size.1,
            },
        );

        let areas = items
            .iter()
            .zip(self.buffers.iter())
            .map(|(item, (buffer, _, _))| TextArea {
                buffer,
                left: item.origin[0],
                top: item.origin[1],
                scale: 1.0,
                bounds: TextBounds {
                    left: item.bounds.x as i32,
                    top: item.bounds.y as i32,
                    right: item.bounds.right() as i32,
                    bottom: item.bounds.bottom() as i32,
                },
                default_color: TextColor::rgb(item.color[0], item.color[1], item.color[2]),
                custom_glyphs: &[],
            });

        match self.renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        ) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("text prepare failed: {:?}", err);
                false
            }
        }
    }
}

struct PictureTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

pub struct WgpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    window: Arc<Window>,

    quad_pipeline: wgpu::RenderPipeline,
    disc_pipeline: wgpu::RenderPipeline,
    picture_pipeline: wgpu::RenderPipeline,

    texture_bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    picture: Option<PictureTexture>,

    text: TextState,
    window_size: (u32, u32),
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    source: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{} Shader", label)),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} Pipeline Layout", label)),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} Pipeline", label)),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // projected quads may arrive with either winding
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
        cache: None,
    })
}

impl WgpuRenderer {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let mut window_size = window.inner_size();

        // Handle WASM canvas initialization timing - dimensions might be 0x0 initially
        if window_size.width == 0 || window_size.height == 0 {
            window_size.width = 1920;
            window_size.height = 1080;
        }

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable graphics adapter")?;

        let required_limits = if cfg!(target_arch = "wasm32") {
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
        } else {
            wgpu::Limits::default()
        };

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    label: None,
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .context("failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: window_size.width,
            height: window_size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "surface {}x{} {:?}",
            config.width,
            config.height,
            config.format
        );

        // Create texture bind group layout
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("texture_bind_group_layout"),
            });

        let quad_pipeline = create_pipeline(
            &device,
            "Quad",
            QUAD_SHADER,
            &[],
            ColorVertex::desc(),
            config.format,
            wgpu::BlendState::REPLACE,
        );
        let disc_pipeline = create_pipeline(
            &device,
            "Disc",
            DISC_SHADER,
            &[],
            DiscVertex::desc(),
            config.format,
            wgpu::BlendState::ALPHA_BLENDING,
        );
        let picture_pipeline = create_pipeline(
            &device,
            "Picture",
            PICTURE_SHADER,
            &[&texture_bind_group_layout],
            TexturedVertex::desc(),
            config.format,
            wgpu::BlendState::ALPHA_BLENDING,
        );

        // Create sampler
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let text = TextState::new(&device, &queue, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            window,
            quad_pipeline,
            disc_pipeline,
            picture_pipeline,
            texture_bind_group_layout,
            sampler,
            picture: None,
            text,
            window_size: (window_size.width, window_size.height),
        })
    }

    fn buffer<T: bytemuck::Pod>(
        &self,
        label: &str,
        contents: &[T],
        usage: wgpu::BufferUsages,
    ) -> Option<wgpu::Buffer> {
        if contents.is_empty() {
            return None;
        }
        Some(
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents: bytemuck::cast_slice(contents),
                    usage,
                }),
        )
    }
}

impl Renderer for WgpuRenderer {
    fn draw_scene(&mut self, scene: &Scene) {
        let batch = FrameBatch::build(scene, self.window_size);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.window.request_redraw();
                return;
            }
            Err(err) => {
                log::warn!("failed to acquire frame: {:?}", err);
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let draw_text = self.text.prepare(
            &self.device,
            &self.queue,
            self.window_size,
            &batch.texts,
        );

        let vertex = wgpu::BufferUsages::VERTEX;
        let index = wgpu::BufferUsages::INDEX;
        let quads = self
            .buffer("Quad Vertex Buffer", &batch.quad_vertices, vertex)
            .zip(self.buffer("Quad Index Buffer", &batch.quad_indices, index));
        let discs = self
            .buffer("Disc Vertex Buffer", &batch.disc_vertices, vertex)
            .zip(self.buffer("Disc Index Buffer", &batch.disc_indices, index));
        let pictures = self
            .buffer("Picture Vertex Buffer", &batch.picture_vertices, vertex)
            .zip(self.buffer("Picture Index Buffer", &batch.picture_indices, index));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b, a] = batch.clear;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for draw in &batch.draws {
                let buffers = match draw.kind {
                    DrawKind::Quads => {
                        render_pass.set_pipeline(&self.quad_pipeline);
                        quads.as_ref()
                    }
                    DrawKind::Discs => {
                        render_pass.set_pipeline(&self.disc_pipeline);
                        discs.as_ref()
                    }
                    DrawKind::Picture => {
                        let Some(picture) = &self.picture else {
                            continue;
                        };
                        render_pass.set_pipeline(&self.picture_pipeline);
                        render_pass.set_bind_group(0, &picture.bind_group, &[]);
                        pictures.as_ref()
                    }
                };
                if let Some((vertices, indices)) = buffers {
                    render_pass.set_vertex_buffer(0, vertices.slice(..));
                    render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(draw.indices.clone(), 0, 0..1);
                }
            }

            // Status text on top of everything
            if draw_text {
                if let Err(err) =
                    self.text
                        .renderer
                        .render(&self.text.atlas, &self.text.viewport, &mut render_pass)
                {
                    log::warn!("text render failed: {:?}", err);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.text.atlas.trim();
    }

    fn resize(&mut self, new_size: (u32, u32)) {
        if new_size.0 > 0 && new_size.1 > 0 {
            self.window_size = new_size;
            self.config.width = new_size.0;
            self.config.height = new_size.1;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    fn set_picture(&mut self, picture: &RgbaImage) {
        let dimensions = picture.dimensions();

        let texture_size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let max = self.device.limits().max_texture_dimension_2d;
        if dimensions.0 > max || dimensions.1 > max {
            log::warn!(
                "picture {}x{} exceeds the {} px texture limit, using placeholder",
                dimensions.0,
                dimensions.1,
                max
            );
            return;
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Picture Texture"),
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            picture,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            texture_size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
            label: Some("Picture Bind Group"),
        });

        self.picture = Some(PictureTexture {
            _texture: texture,
            bind_group,
        });
    }

    fn has_picture(&self) -> bool {
        self.picture.is_some()
    }
}
