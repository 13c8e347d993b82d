//! Scatter Renderer
//! Points positioned by two linear scales and colored by label, plus a legend.

use super::axis::{Axis, Orient};
use super::scale::{LinearScale, OrdinalScale, CATEGORY10};
use super::scene::{Canvas, ChartError, HAlign, Scene, Shape, VAlign};
use crate::config::ChartConfig;
use crate::data::{Dataset, Field};
use plotters::style::RGBColor;

const LEGEND_FONT_SIZE: f64 = 12.0;
const LEGEND_TEXT_GAP: f64 = 6.0;
/// Axis titles sit this far inside the outer edge of the margin.
const TITLE_INSET: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
    /// Top edge of the swatch row.
    pub y: f64,
}

/// Scatter plot of length against width.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterScene {
    pub canvas: Canvas,
    pub x: LinearScale,
    pub y: LinearScale,
    pub colors: OrdinalScale<RGBColor>,
    pub points: Vec<ScatterPoint>,
    pub legend: Vec<LegendEntry>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    radius: f64,
    swatch: f64,
}

impl ScatterScene {
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> Result<Self, ChartError> {
        let canvas = config.canvas();
        let (width, height) = (canvas.plot_width(), canvas.plot_height());

        let x_extent = dataset.extent(Field::Length).ok_or(ChartError::EmptyDataset)?;
        let y_extent = dataset.extent(Field::Width).ok_or(ChartError::EmptyDataset)?;
        let x = LinearScale::padded(x_extent, config.domain_padding, (0.0, width));
        let y = LinearScale::padded(y_extent, config.domain_padding, (height, 0.0));
        let colors = OrdinalScale::new(dataset.labels().clone(), CATEGORY10.to_vec());

        let points = dataset
            .records()
            .iter()
            .map(|record| -> Result<ScatterPoint, ChartError> {
                let color = colors
                    .get(&record.label)
                    .ok_or_else(|| ChartError::UnknownLabel(record.label.clone()))?;
                Ok(ScatterPoint {
                    x: x.map(record.length),
                    y: y.map(record.width),
                    color,
                })
            })
            .collect::<Result<Vec<_>, ChartError>>()?;

        let legend = colors
            .domain()
            .iter()
            .enumerate()
            .filter_map(|(i, label)| {
                colors.get(label).map(|color| LegendEntry {
                    label: label.to_string(),
                    color,
                    y: i as f64 * config.legend_row_height,
                })
            })
            .collect();

        let x_axis = Axis::linear(Orient::Bottom, &x, (0.0, height))
            .with_title(&config.x_title, canvas.margin.bottom - TITLE_INSET);
        let y_axis = Axis::linear(Orient::Left, &y, (0.0, 0.0))
            .with_title(&config.y_title, canvas.margin.left - TITLE_INSET);

        Ok(Self {
            canvas,
            x,
            y,
            colors,
            points,
            legend,
            x_axis,
            y_axis,
            radius: config.point_radius,
            swatch: config.legend_swatch_size,
        })
    }

    fn legend_shapes(&self) -> Vec<Shape> {
        let right = self.canvas.plot_width();
        self.legend
            .iter()
            .flat_map(|entry| {
                let swatch = Shape::Rect {
                    top_left: (right - self.swatch, entry.y),
                    bottom_right: (right, entry.y + self.swatch),
                    fill: entry.color,
                };
                let caption = Shape::label(
                    (right - self.swatch - LEGEND_TEXT_GAP, entry.y + self.swatch / 2.0),
                    &entry.label,
                    LEGEND_FONT_SIZE,
                )
                .aligned(HAlign::End, VAlign::Center);
                [swatch, caption]
            })
            .collect()
    }
}

impl Scene for ScatterScene {
    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn shapes(&self) -> Vec<Shape> {
        let mut shapes = self.x_axis.shapes();
        shapes.extend(self.y_axis.shapes());
        shapes.extend(self.points.iter().map(|p| Shape::Circle {
            center: (p.x, p.y),
            radius: self.radius,
            fill: p.color,
        }));
        shapes.extend(self.legend_shapes());
        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use approx::assert_relative_eq;

    fn iris_like() -> Dataset {
        Dataset::from_records(vec![
            Record::new(1.4, 0.2, "setosa"),
            Record::new(4.7, 1.4, "versicolor"),
            Record::new(6.0, 2.5, "virginica"),
            Record::new(1.3, 0.2, "setosa"),
            Record::new(5.1, 1.9, "virginica"),
        ])
    }

    #[test]
    fn one_point_per_record() {
        let ds = iris_like();
        let scene = ScatterScene::build(&ds, &ChartConfig::default()).unwrap();
        assert_eq!(scene.points.len(), ds.len());
        let circles = scene
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count();
        assert_eq!(circles, ds.len());
    }

    #[test]
    fn scales_pad_the_data_extent() {
        let scene = ScatterScene::build(&iris_like(), &ChartConfig::default()).unwrap();
        assert_relative_eq!(scene.x.domain.0, 0.8, epsilon = 1e-12);
        assert_relative_eq!(scene.x.domain.1, 6.5, epsilon = 1e-12);
        assert_relative_eq!(scene.y.domain.0, -0.3, epsilon = 1e-12);
        assert_relative_eq!(scene.y.domain.1, 3.0, epsilon = 1e-12);
        assert_eq!(scene.x.range, (0.0, 580.0));
        assert_eq!(scene.y.range, (410.0, 0.0));
    }

    #[test]
    fn points_map_through_scales_and_palette() {
        let scene = ScatterScene::build(&iris_like(), &ChartConfig::default()).unwrap();
        let p = &scene.points[2];
        assert_relative_eq!(p.x, scene.x.map(6.0));
        assert_relative_eq!(p.y, scene.y.map(2.5));
        assert_eq!(p.color, CATEGORY10[2]);
        assert_eq!(scene.points[3].color, CATEGORY10[0]);
    }

    #[test]
    fn legend_lists_each_label_once_in_first_seen_order() {
        let scene = ScatterScene::build(&iris_like(), &ChartConfig::default()).unwrap();
        let labels: Vec<&str> = scene.legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["setosa", "versicolor", "virginica"]);
        let rows: Vec<f64> = scene.legend.iter().map(|e| e.y).collect();
        assert_eq!(rows, vec![0.0, 25.0, 50.0]);
    }

    #[test]
    fn legend_swatch_sits_at_right_edge() {
        let scene = ScatterScene::build(&iris_like(), &ChartConfig::default()).unwrap();
        let swatch = scene
            .legend_shapes()
            .into_iter()
            .find(|s| matches!(s, Shape::Rect { .. }));
        assert_eq!(
            swatch,
            Some(Shape::Rect {
                top_left: (562.0, 0.0),
                bottom_right: (580.0, 18.0),
                fill: CATEGORY10[0],
            })
        );
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = ScatterScene::build(&Dataset::default(), &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::EmptyDataset));
    }
}
