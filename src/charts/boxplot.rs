//! Boxplot Renderer
//! Whisker, Q1-Q3 box and median line per category.

use super::axis::{Axis, Orient};
use super::scale::{BandScale, LinearScale};
use super::scene::{Canvas, ChartError, Scene, Shape};
use crate::config::ChartConfig;
use crate::data::{Dataset, Field};
use crate::stats::{quartiles_by_label, QuartileSummary};
use plotters::style::{RGBColor, BLACK};

/// Pixel geometry of one category's box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGlyph {
    pub summary: QuartileSummary,
    /// Left edge of the band.
    pub x: f64,
    pub width: f64,
    /// Pixel rows of the whisker ends, low value first.
    pub whisker: (f64, f64),
    pub q1_y: f64,
    pub median_y: f64,
    pub q3_y: f64,
}

impl BoxGlyph {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Whisker, box, then median line.
    pub fn shapes(&self, fill: RGBColor) -> [Shape; 3] {
        let cx = self.center_x();
        [
            Shape::line((cx, self.whisker.0), (cx, self.whisker.1), BLACK),
            Shape::Rect {
                top_left: (self.x, self.q3_y),
                bottom_right: (self.x + self.width, self.q1_y),
                fill,
            },
            Shape::line(
                (self.x, self.median_y),
                (self.x + self.width, self.median_y),
                BLACK,
            ),
        ]
    }
}

/// Per-category boxplot of one numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotScene {
    pub canvas: Canvas,
    pub bands: BandScale,
    pub y: LinearScale,
    pub boxes: Vec<BoxGlyph>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub fill: RGBColor,
}

impl BoxplotScene {
    /// Summarize `field` per label and lay out the boxes.
    pub fn build(dataset: &Dataset, field: Field, config: &ChartConfig) -> Result<Self, ChartError> {
        let canvas = config.canvas();
        let extent = dataset.extent(field).ok_or(ChartError::EmptyDataset)?;
        let summaries = quartiles_by_label(dataset, field)?;

        let bands = BandScale::new(
            dataset.labels().clone(),
            (0.0, canvas.plot_width()),
            config.band_padding,
        );
        let y = LinearScale::padded(extent, config.domain_padding, (canvas.plot_height(), 0.0));
        let fill = config
            .box_fill_color()
            .map_err(|e| ChartError::Style(e.to_string()))?;

        Self::from_summaries(summaries, bands, y, canvas, fill, config.whisker_factor)
    }

    /// Lay out precomputed summaries. Whiskers are not clamped to the value
    /// scale's domain and may extend past the axis.
    pub fn from_summaries(
        summaries: Vec<QuartileSummary>,
        bands: BandScale,
        y: LinearScale,
        canvas: Canvas,
        fill: RGBColor,
        whisker_factor: f64,
    ) -> Result<Self, ChartError> {
        let width = bands.bandwidth();
        let boxes = summaries
            .into_iter()
            .map(|summary| -> Result<BoxGlyph, ChartError> {
                let x = bands
                    .position(&summary.label)
                    .ok_or_else(|| ChartError::UnknownLabel(summary.label.clone()))?;
                let (low, high) = summary.whisker_with(whisker_factor);
                Ok(BoxGlyph {
                    x,
                    width,
                    whisker: (y.map(low), y.map(high)),
                    q1_y: y.map(summary.q1),
                    median_y: y.map(summary.median),
                    q3_y: y.map(summary.q3),
                    summary,
                })
            })
            .collect::<Result<Vec<_>, ChartError>>()?;

        let x_axis = Axis::band(Orient::Bottom, &bands, (0.0, canvas.plot_height()));
        let y_axis = Axis::linear(Orient::Left, &y, (0.0, 0.0));

        Ok(Self {
            canvas,
            bands,
            y,
            boxes,
            x_axis,
            y_axis,
            fill,
        })
    }

    pub fn summaries(&self) -> impl Iterator<Item = &QuartileSummary> {
        self.boxes.iter().map(|b| &b.summary)
    }
}

impl Scene for BoxplotScene {
    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn shapes(&self) -> Vec<Shape> {
        let mut shapes = self.x_axis.shapes();
        shapes.extend(self.y_axis.shapes());
        shapes.extend(self.boxes.iter().flat_map(|b| b.shapes(self.fill)));
        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use crate::data::LabelSet;
    use crate::stats::quartiles::summarize;
    use approx::assert_relative_eq;

    fn three_species() -> Dataset {
        Dataset::from_records(vec![
            Record::new(1.4, 0.2, "setosa"),
            Record::new(1.5, 0.2, "setosa"),
            Record::new(1.6, 0.4, "setosa"),
            Record::new(4.0, 1.3, "versicolor"),
            Record::new(4.5, 1.5, "versicolor"),
            Record::new(5.5, 2.0, "virginica"),
            Record::new(6.1, 2.3, "virginica"),
        ])
    }

    #[test]
    fn one_box_per_label_in_band_order() {
        let scene =
            BoxplotScene::build(&three_species(), Field::Length, &ChartConfig::default()).unwrap();
        let labels: Vec<&str> = scene.summaries().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["setosa", "versicolor", "virginica"]);
        for b in &scene.boxes {
            assert_relative_eq!(b.x, scene.bands.position(&b.summary.label).unwrap());
            assert_relative_eq!(b.width, scene.bands.bandwidth());
            // Screen y grows downward.
            assert!(b.q3_y <= b.median_y && b.median_y <= b.q1_y);
        }
    }

    #[test]
    fn value_scale_uses_quartile_field() {
        let scene =
            BoxplotScene::build(&three_species(), Field::Length, &ChartConfig::default()).unwrap();
        assert_relative_eq!(scene.y.domain.0, 0.9, epsilon = 1e-12);
        assert_relative_eq!(scene.y.domain.1, 6.6, epsilon = 1e-12);
        assert_eq!(scene.y.range, (410.0, 0.0));
    }

    #[test]
    fn whisker_spans_one_and_a_half_iqr() {
        let scene =
            BoxplotScene::build(&three_species(), Field::Length, &ChartConfig::default()).unwrap();
        let setosa = &scene.boxes[0];
        assert_relative_eq!(setosa.summary.q1, 1.45, epsilon = 1e-12);
        assert_relative_eq!(setosa.summary.q3, 1.55, epsilon = 1e-12);
        assert_relative_eq!(setosa.whisker.0, scene.y.map(1.30), epsilon = 1e-9);
        assert_relative_eq!(setosa.whisker.1, scene.y.map(1.70), epsilon = 1e-9);
    }

    #[test]
    fn draws_whisker_box_median_in_order() {
        let scene =
            BoxplotScene::build(&three_species(), Field::Length, &ChartConfig::default()).unwrap();
        let b = &scene.boxes[1];
        let [whisker, rect, median] = b.shapes(scene.fill);
        assert_eq!(
            whisker,
            Shape::line((b.center_x(), b.whisker.0), (b.center_x(), b.whisker.1), BLACK)
        );
        assert_eq!(
            rect,
            Shape::Rect {
                top_left: (b.x, b.q3_y),
                bottom_right: (b.x + b.width, b.q1_y),
                fill: RGBColor(0x69, 0xb3, 0xa2),
            }
        );
        assert_eq!(
            median,
            Shape::line((b.x, b.median_y), (b.x + b.width, b.median_y), BLACK)
        );
    }

    #[test]
    fn whiskers_are_not_clamped() {
        let labels: LabelSet = ["wide"].into_iter().collect();
        let bands = BandScale::new(labels, (0.0, 100.0), 0.1);
        let y = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        let summary = summarize("wide", &[0.0, 10.0]).unwrap();
        let scene = BoxplotScene::from_summaries(
            vec![summary],
            bands,
            y,
            ChartConfig::default().canvas(),
            BLACK,
            1.5,
        )
        .unwrap();
        let (low, high) = scene.boxes[0].whisker;
        assert_relative_eq!(low, y.map(-5.0));
        assert_relative_eq!(high, y.map(15.0));
        assert!(low > 100.0 && high < 0.0);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let labels: LabelSet = ["a"].into_iter().collect();
        let bands = BandScale::new(labels, (0.0, 100.0), 0.1);
        let y = LinearScale::new((0.0, 1.0), (100.0, 0.0));
        let summary = summarize("b", &[0.5]).unwrap();
        let err = BoxplotScene::from_summaries(
            vec![summary],
            bands,
            y,
            ChartConfig::default().canvas(),
            BLACK,
            1.5,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::UnknownLabel(l) if l == "b"));
    }
}
