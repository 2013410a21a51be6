//! Colors shared between the application and renderers.
//!
//! Colors are linear, premultiplied alpha. Geometry lives in `coords`.

pub mod color;

pub use color::Color;
