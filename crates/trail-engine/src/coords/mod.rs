//! Surface geometry shared by the runtime and renderers.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The trail shader works in its own bottom-left working space; see
//! `trail_stream::Layout`.

mod viewport;

pub use viewport::Viewport;
