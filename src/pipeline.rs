//! Pipeline
//! Builds both scenes from a loaded dataset and writes them out.

use crate::charts::{
    render_page, BoxplotScene, ChartError, ImageFormat, ScatterScene, StaticChartRenderer,
};
use crate::config::ChartConfig;
use crate::data::{Dataset, Field};
use std::path::PathBuf;
use tracing::{info, warn};

const PAGE_TITLE: &str = "Iris Dataset";

/// Build the scatter plot and the boxplot of the length field.
///
/// The two scenes share only the read-only dataset and are built in parallel.
pub fn run(
    dataset: &Dataset,
    config: &ChartConfig,
) -> Result<(ScatterScene, BoxplotScene), ChartError> {
    if dataset.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    let (scatter, boxplot) = rayon::join(
        || ScatterScene::build(dataset, config),
        || BoxplotScene::build(dataset, Field::Length, config),
    );
    Ok((scatter?, boxplot?))
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub dir: PathBuf,
    pub format: ImageFormat,
    /// Also write `index.html` with both charts inline (SVG only).
    pub page: bool,
}

/// Paths written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs {
    pub scatter: PathBuf,
    pub boxplot: PathBuf,
    pub page: Option<PathBuf>,
}

pub fn write_outputs(
    scatter: &ScatterScene,
    boxplot: &BoxplotScene,
    options: &OutputOptions,
) -> Result<Outputs, ChartError> {
    std::fs::create_dir_all(&options.dir)?;

    let ext = options.format.extension();
    let scatter_path = options.dir.join(format!("scatterplot.{ext}"));
    let boxplot_path = options.dir.join(format!("boxplot.{ext}"));

    let page = match options.format {
        ImageFormat::Svg => {
            let (scatter_svg, boxplot_svg) = rayon::join(
                || StaticChartRenderer::to_svg_string(scatter),
                || StaticChartRenderer::to_svg_string(boxplot),
            );
            let (scatter_svg, boxplot_svg) = (scatter_svg?, boxplot_svg?);
            std::fs::write(&scatter_path, &scatter_svg)?;
            std::fs::write(&boxplot_path, &boxplot_svg)?;

            if options.page {
                let path = options.dir.join("index.html");
                std::fs::write(&path, render_page(PAGE_TITLE, &scatter_svg, &boxplot_svg))?;
                Some(path)
            } else {
                None
            }
        }
        ImageFormat::Png => {
            let (a, b) = rayon::join(
                || StaticChartRenderer::write(scatter, &scatter_path, ImageFormat::Png),
                || StaticChartRenderer::write(boxplot, &boxplot_path, ImageFormat::Png),
            );
            a?;
            b?;
            if options.page {
                warn!("HTML page output needs SVG charts; skipping index.html");
            }
            None
        }
    };

    info!(
        "Wrote {} and {}",
        scatter_path.display(),
        boxplot_path.display()
    );
    Ok(Outputs {
        scatter: scatter_path,
        boxplot: boxplot_path,
        page,
    })
}
