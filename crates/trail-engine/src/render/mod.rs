//! GPU rendering.
//!
//! Each renderer owns its GPU resources (pipelines, textures, buffers) and
//! creates them lazily on first use against the current surface format.

mod ctx;
pub mod trail;

pub use ctx::{RenderCtx, RenderTarget};
pub use trail::{TrailRenderer, TrailStyle};
