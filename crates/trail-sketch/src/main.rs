mod app;
mod bridge;

use trail_engine::logging::{LoggingConfig, init_logging};
use trail_engine::render::TrailStyle;

use crate::app::Sketch;

fn main() {
    init_logging(LoggingConfig::default());

    let result = Sketch::new()
        .title("trail")
        .size(1024.0, 768.0)
        .resolution(32)
        .scale(4.0)
        .style(TrailStyle { stroke_width: 2.5, ..TrailStyle::default() })
        .run();

    if let Err(e) = result {
        log::error!("trail-sketch: {e:#}");
        std::process::exit(1);
    }
}
