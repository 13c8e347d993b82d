//! Static Chart Renderer
//! Draws a scene onto a plotters backend: SVG text, SVG file or PNG file.
//!
//! Scene shapes are in plotting-area coordinates; the renderer shifts them
//! by the canvas margin and rounds to backend pixels.

use super::scene::{ChartError, HAlign, Scene, Shape, VAlign};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt::Debug;
use std::path::Path;
use tracing::debug;

const FONT_FAMILY: &str = "sans-serif";

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

fn backend_error<E: Debug>(e: E) -> ChartError {
    ChartError::Backend(format!("{e:?}"))
}

fn px((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Draw every shape of `scene` onto `root`.
    pub fn draw<DB: DrawingBackend, S: Scene + ?Sized>(
        root: &DrawingArea<DB, Shift>,
        scene: &S,
    ) -> Result<(), ChartError> {
        root.fill(&WHITE).map_err(backend_error)?;

        let margin = scene.canvas().margin;
        let shapes = scene.shapes();
        debug!(shapes = shapes.len(), "Drawing scene");

        for shape in shapes {
            match shape.translated(margin.left, margin.top) {
                Shape::Circle {
                    center,
                    radius,
                    fill,
                } => {
                    root.draw(&Circle::new(px(center), radius.round() as i32, fill.filled()))
                        .map_err(backend_error)?;
                }
                Shape::Rect {
                    top_left,
                    bottom_right,
                    fill,
                } => {
                    root.draw(&Rectangle::new([px(top_left), px(bottom_right)], fill.filled()))
                        .map_err(backend_error)?;
                }
                Shape::Line { from, to, stroke } => {
                    root.draw(&PathElement::new(vec![px(from), px(to)], stroke.stroke_width(1)))
                        .map_err(backend_error)?;
                }
                Shape::Text {
                    at,
                    content,
                    size,
                    h_align,
                    v_align,
                    vertical,
                } => {
                    let h = match h_align {
                        HAlign::Start => HPos::Left,
                        HAlign::Middle => HPos::Center,
                        HAlign::End => HPos::Right,
                    };
                    let v = match v_align {
                        VAlign::Top => VPos::Top,
                        VAlign::Center => VPos::Center,
                        VAlign::Bottom => VPos::Bottom,
                    };
                    let mut style = (FONT_FAMILY, size)
                        .into_font()
                        .color(&BLACK)
                        .pos(Pos::new(h, v));
                    if vertical {
                        style = style.transform(FontTransform::Rotate270);
                    }
                    root.draw(&Text::new(content, px(at), style))
                        .map_err(backend_error)?;
                }
            }
        }
        Ok(())
    }

    /// Render `scene` as an SVG document.
    pub fn to_svg_string<S: Scene + ?Sized>(scene: &S) -> Result<String, ChartError> {
        let mut svg = String::new();
        {
            let root =
                SVGBackend::with_string(&mut svg, scene.canvas().pixel_size()).into_drawing_area();
            Self::draw(&root, scene)?;
            root.present().map_err(backend_error)?;
        }
        Ok(svg)
    }

    /// Render `scene` to `path` in the given format.
    pub fn write<S: Scene + ?Sized>(
        scene: &S,
        path: &Path,
        format: ImageFormat,
    ) -> Result<(), ChartError> {
        match format {
            ImageFormat::Svg => {
                let svg = Self::to_svg_string(scene)?;
                std::fs::write(path, svg)?;
            }
            ImageFormat::Png => {
                let root =
                    BitMapBackend::new(path, scene.canvas().pixel_size()).into_drawing_area();
                Self::draw(&root, scene)?;
                root.present().map_err(backend_error)?;
            }
        }
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{BoxplotScene, ScatterScene};
    use crate::config::ChartConfig;
    use crate::data::model::Record;
    use crate::data::{Dataset, Field};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new(1.4, 0.2, "setosa"),
            Record::new(1.5, 0.3, "setosa"),
            Record::new(4.7, 1.4, "versicolor"),
            Record::new(4.5, 1.5, "versicolor"),
            Record::new(6.0, 2.5, "virginica"),
        ])
    }

    #[test]
    fn scatter_svg_has_one_circle_per_record() {
        let ds = dataset();
        let scene = ScatterScene::build(&ds, &ChartConfig::default()).unwrap();
        let svg = StaticChartRenderer::to_svg_string(&scene).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<circle").count(), ds.len());
        assert!(svg.contains("Petal Length"));
        assert!(svg.contains("virginica"));
    }

    #[test]
    fn boxplot_svg_labels_categories() {
        let scene =
            BoxplotScene::build(&dataset(), Field::Length, &ChartConfig::default()).unwrap();
        let svg = StaticChartRenderer::to_svg_string(&scene).unwrap();
        for label in ["setosa", "versicolor", "virginica"] {
            assert!(svg.contains(label), "missing {label}");
        }
        assert!(svg.to_lowercase().contains("#69b3a2"));
    }

    #[test]
    fn writes_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatterplot.svg");
        let scene = ScatterScene::build(&dataset(), &ChartConfig::default()).unwrap();
        StaticChartRenderer::write(&scene, &path, ImageFormat::Svg).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("width=\"700\""));
    }
}
