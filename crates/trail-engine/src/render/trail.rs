use bytemuck::{Pod, Zeroable};
use trail_stream::{CellPatch, Layout, PointStreamEncoder};

use crate::coords::Viewport;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

/// Appearance of the reconstructed strokes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrailStyle {
    /// Stroke width in working units.
    pub stroke_width: f32,
    pub ink: Color,
    pub paper: Color,
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            ink: Color::from_srgb_u8(24, 24, 28, 255),
            paper: Color::WHITE,
        }
    }
}

/// Draws the point grid as strokes over the whole surface.
///
/// The grid lives in an `R × R` `Rgba8Uint` texture. It is uploaded in full
/// once, when created; afterwards only the encoder's pending [`CellPatch`]es
/// are written, one texel each. The fragment shader fetches texels with
/// `textureLoad`, so no sampler or filtering is involved.
#[derive(Default)]
pub struct TrailRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    uniform_buffer: Option<wgpu::Buffer>,

    points_texture: Option<wgpu::Texture>,
    points_view: Option<wgpu::TextureView>,
    points_resolution: u32,
}

impl TrailRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads pending cells from `encoder` and draws every written stroke.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        encoder: &mut PointStreamEncoder,
        layout: &Layout,
        style: &TrailStyle,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_points_texture(ctx, encoder);
        self.ensure_bindings(ctx);

        self.upload_patches(ctx, encoder);
        self.write_uniform(ctx, encoder, layout, style);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trail pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trail shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/trail.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("trail bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<TrailUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Uint,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trail pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trail pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
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
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("trail pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
    }

    fn ensure_points_texture(&mut self, ctx: &RenderCtx<'_>, encoder: &mut PointStreamEncoder) {
        let buffer = encoder.buffer();
        let resolution = buffer.resolution();
        if self.points_texture.is_some() && self.points_resolution == resolution {
            return;
        }

        let size = wgpu::Extent3d {
            width: resolution,
            height: resolution,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("trail points"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Uint,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Full upload carries every cell written so far, pending ones included.
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            buffer.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * resolution),
                rows_per_image: Some(resolution),
            },
            size,
        );
        let skipped = encoder.drain_patches().count();

        log::debug!(
            "points texture {resolution}x{resolution} created ({} cells written, {skipped} patches folded in)",
            encoder.cursor()
        );

        self.points_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.points_texture = Some(texture);
        self.points_resolution = resolution;
        self.bind_group = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_buffer.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(points_view) = self.points_view.as_ref() else { return };

        let uniform_buffer = match self.uniform_buffer.take() {
            Some(ubo) => ubo,
            None => ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("trail ubo"),
                size: std::mem::size_of::<TrailUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
        };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trail bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(points_view),
                },
            ],
        });

        self.uniform_buffer = Some(uniform_buffer);
        self.bind_group = Some(bind_group);
    }

    fn upload_patches(&mut self, ctx: &RenderCtx<'_>, encoder: &mut PointStreamEncoder) {
        let Some(texture) = self.points_texture.as_ref() else { return };

        for patch in encoder.drain_patches() {
            let (origin, bytes) = patch_region(&patch);
            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture,
                    mip_level: 0,
                    origin,
                    aspect: wgpu::TextureAspect::All,
                },
                bytes,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4),
                    rows_per_image: Some(1),
                },
                wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
            );
        }
    }

    fn write_uniform(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &PointStreamEncoder,
        layout: &Layout,
        style: &TrailStyle,
    ) {
        let Some(ubo) = self.uniform_buffer.as_ref() else { return };
        let u = TrailUniform::new(encoder, layout, ctx.viewport, ctx.surface_size, style);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

/// Texel origin and bytes for a single-cell upload.
fn patch_region(patch: &CellPatch) -> (wgpu::Origin3d, &[u8]) {
    let origin = wgpu::Origin3d { x: patch.column, y: patch.row, z: 0 };
    (origin, patch.cell.as_bytes())
}

// Must match `TrailUniform` in shaders/trail.wgsl (std140-compatible, 64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TrailUniform {
    ink: [f32; 4],
    paper: [f32; 4],
    surface_height: f32,
    to_working: f32,
    stroke_width: f32,
    resolution: u32,
    count: u32,
    _pad: [u32; 3],
}

impl TrailUniform {
    fn new(
        encoder: &PointStreamEncoder,
        layout: &Layout,
        viewport: Viewport,
        (surface_width, surface_height): (u32, u32),
        style: &TrailStyle,
    ) -> Self {
        // Working units per surface pixel; equals the layout's physical
        // factor unless the surface was clamped below the window size.
        let to_working = if surface_width > 0 {
            layout.factor() * viewport.width / surface_width as f32
        } else {
            layout.physical_factor()
        };

        Self {
            ink: style.ink.to_array(),
            paper: style.paper.to_array(),
            surface_height: surface_height as f32,
            to_working,
            stroke_width: style.stroke_width,
            resolution: encoder.buffer().resolution(),
            count: encoder.cursor(),
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_stream::EncoderConfig;

    #[test]
    fn uniform_is_64_bytes() {
        assert_eq!(std::mem::size_of::<TrailUniform>(), 64);
    }

    #[test]
    fn uniform_maps_physical_pixels_to_working_space() {
        let mut enc = PointStreamEncoder::new(EncoderConfig::default()).unwrap();
        enc.submit_point(1.0, 1.0, true);
        enc.end_stroke();

        let layout = Layout::new(800.0, 600.0, 2.0, 4.0);
        let viewport = Viewport::new(800.0, 600.0, 2.0);
        let u = TrailUniform::new(&enc, &layout, viewport, (1600, 1200), &TrailStyle::default());

        assert_eq!(u.surface_height, 1200.0);
        // 1 physical px = 0.5 logical px = 0.5 / (2 * 4) working units
        assert_eq!(u.to_working, 0.0625);
        assert_eq!(u.resolution, 32);
        assert_eq!(u.count, 2);
        assert_eq!(u.paper, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn clamped_surface_still_spans_working_space() {
        let enc = PointStreamEncoder::new(EncoderConfig::default()).unwrap();
        let layout = Layout::new(1440.0, 900.0, 2.0, 4.0);
        let viewport = Viewport::new(1440.0, 900.0, 2.0);

        // 2880x1800 fitted into a 2048 texture limit
        let u = TrailUniform::new(&enc, &layout, viewport, (2048, 1280), &TrailStyle::default());

        assert_eq!(u.surface_height, 1280.0);
        assert_eq!(u.to_working, 180.0 / 2048.0);
        // top-right surface pixel lands on the top-right working corner
        assert_eq!(2048.0 * u.to_working, 1440.0 * layout.factor());
        assert_eq!(1280.0 * u.to_working, 900.0 * layout.factor());
    }

    #[test]
    fn patch_targets_single_texel() {
        let mut enc = PointStreamEncoder::new(EncoderConfig { resolution: 4, scale: 4.0 }).unwrap();
        for i in 0..6 {
            enc.submit_point(i as f32 * 10.0, 3.0, true);
        }
        let last = enc.drain_patches().last().unwrap();
        let (origin, bytes) = patch_region(&last);
        assert_eq!((origin.x, origin.y, origin.z), (1, 1, 0));
        assert_eq!(bytes, &[50, 0, 3, 0]);
    }
}
