//! Charts module - Scales, scenes and rendering

mod axis;
mod boxplot;
mod page;
mod renderer;
mod scale;
mod scatter;
mod scene;

pub use boxplot::BoxplotScene;
pub use page::render_page;
pub use renderer::{ImageFormat, StaticChartRenderer};
pub use scatter::ScatterScene;
pub use scene::{Canvas, ChartError, Margin};
