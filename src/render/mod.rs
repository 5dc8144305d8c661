pub mod svg;
pub mod text;

pub use svg::SvgRenderer;
pub use text::render_report;
