use anyhow::{Context, Result};
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::window::WindowId;

use trail_engine::coords::Viewport;
use trail_engine::core::{App, AppControl, FrameCtx};
use trail_engine::device::GpuInit;
use trail_engine::input::Key;
use trail_engine::render::{TrailRenderer, TrailStyle};
use trail_engine::window::{Runtime, RuntimeConfig};
use trail_stream::{EncoderConfig, GestureRecorder, Layout, PointStreamEncoder};

use crate::bridge::InputBridge;

/// Frames between two progress lines at `debug`.
const REPORT_EVERY: u64 = 600;

/// Builder for the sketch window.
///
/// ```rust,ignore
/// Sketch::new()
///     .title("trail")
///     .resolution(32)
///     .scale(4.0)
///     .run()?;
/// ```
pub struct Sketch {
    title:   String,
    width:   f64,
    height:  f64,
    encoder: EncoderConfig,
    style:   TrailStyle,
}

impl Sketch {
    pub fn new() -> Self {
        Self {
            title:   "trail".to_string(),
            width:   1024.0,
            height:  768.0,
            encoder: EncoderConfig::default(),
            style:   TrailStyle::default(),
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// Side length of the point grid.
    pub fn resolution(mut self, r: u32) -> Self {
        self.encoder.resolution = r;
        self
    }

    /// Downscale between device pixels and working space.
    pub fn scale(mut self, s: f32) -> Self {
        self.encoder.scale = s;
        self
    }

    pub fn style(mut self, style: TrailStyle) -> Self {
        self.style = style;
        self
    }

    /// Opens the window and runs until it is closed or Escape is pressed.
    pub fn run(self) -> Result<()> {
        let encoder = PointStreamEncoder::new(self.encoder)
            .context("invalid encoder configuration")?;

        log::info!(
            "point grid {r}x{r} ({} writable cells), scale {}",
            encoder.config().write_limit(),
            encoder.config().scale,
            r = encoder.config().resolution,
        );

        let config = RuntimeConfig {
            title:        self.title,
            initial_size: LogicalSize::new(self.width, self.height),
        };

        Runtime::run(config, GpuInit::default(), SketchState::new(encoder, self.style))
    }
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new()
    }
}

struct SketchState {
    encoder:  PointStreamEncoder,
    pen:      GestureRecorder,
    bridge:   InputBridge,
    layout:   Layout,
    style:    TrailStyle,
    renderer: TrailRenderer,
}

impl SketchState {
    fn new(encoder: PointStreamEncoder, style: TrailStyle) -> Self {
        let scale = encoder.config().scale;
        Self {
            encoder,
            pen: GestureRecorder::new(),
            bridge: InputBridge::default(),
            layout: Layout::new(0.0, 0.0, 1.0, scale),
            style,
            renderer: TrailRenderer::new(),
        }
    }

    /// Keeps the layout in step with the window; returns `true` if it moved.
    fn sync_layout(&mut self, viewport: Viewport) -> bool {
        let unchanged = self.layout.width == viewport.width
            && self.layout.height == viewport.height
            && self.layout.device_pixel_ratio == viewport.scale_factor;
        if unchanged {
            return false;
        }

        self.layout.resize(viewport.width, viewport.height, viewport.scale_factor);
        let (w, h) = self.layout.working_size();
        log::debug!("working space {w}x{h} (dpr {})", viewport.scale_factor);
        true
    }
}

impl App for SketchState {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::CloseRequested = event {
            log::info!("{} cells written", self.encoder.cursor());
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        self.sync_layout(ctx.window.viewport());

        for ev in &ctx.input_frame.events {
            if let Some(gesture) = self.bridge.translate(ev, &self.layout) {
                self.pen.apply(&mut self.encoder, gesture);
            }
        }

        if ctx.time.frame_index > 0 && ctx.time.frame_index % REPORT_EVERY == 0 {
            log::debug!(
                "frame {}: {} cells used, {} left",
                ctx.time.frame_index,
                self.encoder.cursor(),
                self.encoder.remaining(),
            );
        }

        let Self { encoder, layout, style, renderer, .. } = self;
        ctx.render(style.paper, |rctx, target| {
            renderer.render(rctx, target, encoder, layout, style);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_engine::input::{
        InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
    };

    fn state() -> SketchState {
        let encoder = PointStreamEncoder::new(EncoderConfig::default()).unwrap();
        SketchState::new(encoder, TrailStyle::default())
    }

    fn feed(s: &mut SketchState, events: &[InputEvent]) {
        for ev in events {
            if let Some(g) = s.bridge.translate(ev, &s.layout) {
                s.pen.apply(&mut s.encoder, g);
            }
        }
    }

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x, y })
    }

    #[test]
    fn invalid_resolution_is_rejected_before_window() {
        let err = Sketch::new().resolution(1).run().unwrap_err();
        assert!(format!("{err:#}").contains("invalid encoder configuration"));
    }

    #[test]
    fn layout_follows_viewport() {
        let mut s = state();
        assert!(s.sync_layout(Viewport::new(800.0, 600.0, 2.0)));
        assert!(!s.sync_layout(Viewport::new(800.0, 600.0, 2.0)));
        assert_eq!(s.layout.working_size(), (100, 75));
    }

    #[test]
    fn mouse_stroke_reaches_encoder() {
        let mut s = state();
        s.sync_layout(Viewport::new(800.0, 600.0, 1.0));

        feed(&mut s, &[
            left(MouseButtonState::Pressed, 40.0, 600.0),
            InputEvent::PointerMoved(PointerMoveEvent { x: 41.0, y: 600.0 }),
            InputEvent::PointerMoved(PointerMoveEvent { x: 400.0, y: 600.0 }),
            left(MouseButtonState::Released, 400.0, 600.0),
        ]);

        // press, far drag, release, pen-up; the short drag is decimated
        assert_eq!(s.encoder.cursor(), 4);
        assert_eq!(s.encoder.strokes(), vec![vec![(10, 0), (100, 0), (100, 0)]]);
    }

    #[test]
    fn hover_without_press_draws_nothing() {
        let mut s = state();
        s.sync_layout(Viewport::new(800.0, 600.0, 1.0));
        feed(&mut s, &[
            InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 10.0 }),
            InputEvent::PointerMoved(PointerMoveEvent { x: 300.0, y: 10.0 }),
            InputEvent::PointerLeft,
        ]);
        assert_eq!(s.encoder.cursor(), 0);
    }
}
