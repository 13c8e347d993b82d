//! Axes
//! Domain line, tick marks, tick labels and an optional title.

use super::scale::{BandScale, LinearScale};
use super::scene::{HAlign, Shape, VAlign};
use plotters::style::BLACK;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const TICK_FONT_SIZE: f64 = 10.0;
const TITLE_FONT_SIZE: f64 = 14.0;
const DEFAULT_TICK_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position along the axis in pixels.
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    /// Distance from the axis line, away from the plot.
    pub distance: f64,
}

/// An axis placed at `origin` inside the plotting area.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: Orient,
    pub origin: (f64, f64),
    pub extent: (f64, f64),
    pub ticks: Vec<Tick>,
    pub title: Option<AxisTitle>,
}

impl Axis {
    pub fn linear(orient: Orient, scale: &LinearScale, origin: (f64, f64)) -> Self {
        let ticks = scale
            .tick_labels(DEFAULT_TICK_COUNT)
            .into_iter()
            .map(|(value, label)| Tick {
                offset: scale.map(value),
                label,
            })
            .collect();
        Self {
            orient,
            origin,
            extent: scale.range,
            ticks,
            title: None,
        }
    }

    /// One tick per band centre, labelled with the band's label.
    pub fn band(orient: Orient, scale: &BandScale, origin: (f64, f64)) -> Self {
        let ticks = scale
            .labels()
            .iter()
            .filter_map(|label| {
                scale.center(label).map(|offset| Tick {
                    offset,
                    label: label.to_string(),
                })
            })
            .collect();
        Self {
            orient,
            origin,
            extent: scale.range(),
            ticks,
            title: None,
        }
    }

    pub fn with_title(mut self, text: impl Into<String>, distance: f64) -> Self {
        self.title = Some(AxisTitle {
            text: text.into(),
            distance,
        });
        self
    }

    pub fn shapes(&self) -> Vec<Shape> {
        let (r0, r1) = self.extent;
        let mut shapes = Vec::with_capacity(self.ticks.len() * 2 + 4);

        match self.orient {
            Orient::Bottom => {
                shapes.push(Shape::line((r0, 0.0), (r1, 0.0), BLACK));
                shapes.push(Shape::line((r0, 0.0), (r0, TICK_SIZE), BLACK));
                shapes.push(Shape::line((r1, 0.0), (r1, TICK_SIZE), BLACK));
                for tick in &self.ticks {
                    let x = tick.offset;
                    shapes.push(Shape::line((x, 0.0), (x, TICK_SIZE), BLACK));
                    shapes.push(
                        Shape::label((x, TICK_SIZE + TICK_PADDING), &tick.label, TICK_FONT_SIZE)
                            .aligned(HAlign::Middle, VAlign::Top),
                    );
                }
                if let Some(title) = &self.title {
                    shapes.push(
                        Shape::label(((r0 + r1) / 2.0, title.distance), &title.text, TITLE_FONT_SIZE)
                            .aligned(HAlign::Middle, VAlign::Center),
                    );
                }
            }
            Orient::Left => {
                shapes.push(Shape::line((0.0, r0), (0.0, r1), BLACK));
                shapes.push(Shape::line((-TICK_SIZE, r0), (0.0, r0), BLACK));
                shapes.push(Shape::line((-TICK_SIZE, r1), (0.0, r1), BLACK));
                for tick in &self.ticks {
                    let y = tick.offset;
                    shapes.push(Shape::line((-TICK_SIZE, y), (0.0, y), BLACK));
                    shapes.push(
                        Shape::label((-(TICK_SIZE + TICK_PADDING), y), &tick.label, TICK_FONT_SIZE)
                            .aligned(HAlign::End, VAlign::Center),
                    );
                }
                if let Some(title) = &self.title {
                    shapes.push(
                        Shape::label((-title.distance, (r0 + r1) / 2.0), &title.text, TITLE_FONT_SIZE)
                            .aligned(HAlign::Middle, VAlign::Center)
                            .rotated(),
                    );
                }
            }
        }

        let (dx, dy) = self.origin;
        shapes.into_iter().map(|s| s.translated(dx, dy)).collect()
    }
}
