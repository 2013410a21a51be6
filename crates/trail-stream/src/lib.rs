//! Point-stream encoding for the trail sketch.
//!
//! Pointer samples are decimated, packed into 4-byte cells and appended to a
//! fixed `R × R` grid that the renderer uploads as an RGBA8 texture. A cell
//! whose two coordinates are both `65535` marks the end of a stroke.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`cell`] | `Cell`, `Sample`, coordinate wrapping |
//! | [`config`] | `EncoderConfig` and its defaults |
//! | [`encoder`] | `PointBuffer`, `PointStreamEncoder`, `CellPatch` |
//! | [`error`] | `ConfigError` |
//! | [`gesture`] | `GestureRecorder`, `Gesture` (press/drag/release protocol) |
//! | [`layout`] | `Layout` (screen → working-space normalization) |
//!
//! # Quick start
//!
//! ```rust
//! use trail_stream::{EncoderConfig, Gesture, GestureRecorder, PointStreamEncoder};
//!
//! let mut encoder = PointStreamEncoder::new(EncoderConfig::default()).unwrap();
//! let mut pen = GestureRecorder::new();
//!
//! pen.apply(&mut encoder, Gesture::Press { x: 10.0, y: 10.0 });
//! pen.apply(&mut encoder, Gesture::Drag { x: 40.0, y: 10.0 });
//! pen.apply(&mut encoder, Gesture::Release { x: 40.0, y: 10.0 });
//!
//! assert_eq!(encoder.strokes(), vec![vec![(10, 10), (40, 10), (40, 10)]]);
//! ```

pub mod cell;
pub mod config;
pub mod encoder;
pub mod error;
pub mod gesture;
pub mod layout;

pub use cell::{Cell, Sample};
pub use config::EncoderConfig;
pub use encoder::{CellPatch, PointBuffer, PointStreamEncoder};
pub use error::ConfigError;
pub use gesture::{Gesture, GestureRecorder};
pub use layout::Layout;
