//! Trail engine crate.
//!
//! Owns the platform + GPU runtime pieces of the sketch: window loop, input
//! translation, wgpu device/surface, and the renderer that turns the point
//! grid from `trail-stream` into strokes on screen.

pub mod core;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;
