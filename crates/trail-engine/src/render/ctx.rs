use crate::coords::Viewport;

/// Everything a renderer needs to create and feed GPU resources for one frame.
///
/// `viewport` is the window's logical size and pixel ratio at the time the
/// frame was acquired. `surface_size` is what the surface is actually
/// configured for, in pixels; it only differs from the viewport's physical
/// size when the window exceeds the device's texture limit.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport,
    pub surface_size: (u32, u32),
}

impl<'a> RenderCtx<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        surface_size: (u32, u32),
    ) -> Self {
        Self { device, queue, surface_format, viewport, surface_size }
    }
}

/// The frame's command encoder and the view of the already-cleared surface
/// texture. Passes recorded here must load, not clear.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
