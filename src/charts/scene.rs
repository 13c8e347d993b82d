//! Scene primitives
//! Drawable shapes in plotting-area coordinates and the canvas they sit on.

use crate::stats::StatsError;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Cannot build a chart from an empty dataset")]
    EmptyDataset,
    #[error("Label '{0}' is not in the scale domain")]
    UnknownLabel(String),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error("Invalid chart style: {0}")]
    Style(String),
    #[error("Drawing failed: {0}")]
    Backend(String),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

/// Space reserved around the plotting area for axes and titles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Output surface size and the plotting area inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Canvas {
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Pixel size for a drawing backend.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A single drawable primitive. Coordinates are relative to the top-left
/// corner of the plotting area.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: (f64, f64),
        radius: f64,
        fill: RGBColor,
    },
    Rect {
        top_left: (f64, f64),
        bottom_right: (f64, f64),
        fill: RGBColor,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: RGBColor,
    },
    Text {
        at: (f64, f64),
        content: String,
        size: f64,
        h_align: HAlign,
        v_align: VAlign,
        /// Reads bottom to top.
        vertical: bool,
    },
}

impl Shape {
    pub fn line(from: (f64, f64), to: (f64, f64), stroke: RGBColor) -> Self {
        Shape::Line { from, to, stroke }
    }

    pub fn label(at: (f64, f64), content: impl Into<String>, size: f64) -> Self {
        Shape::Text {
            at,
            content: content.into(),
            size,
            h_align: HAlign::Middle,
            v_align: VAlign::Center,
            vertical: false,
        }
    }

    pub fn aligned(self, h: HAlign, v: VAlign) -> Self {
        match self {
            Shape::Text {
                at,
                content,
                size,
                vertical,
                ..
            } => Shape::Text {
                at,
                content,
                size,
                h_align: h,
                v_align: v,
                vertical,
            },
            other => other,
        }
    }

    pub fn rotated(self) -> Self {
        match self {
            Shape::Text {
                at,
                content,
                size,
                h_align,
                v_align,
                ..
            } => Shape::Text {
                at,
                content,
                size,
                h_align,
                v_align,
                vertical: true,
            },
            other => other,
        }
    }

    /// Same shape moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mv = |(x, y): (f64, f64)| (x + dx, y + dy);
        match self.clone() {
            Shape::Circle {
                center,
                radius,
                fill,
            } => Shape::Circle {
                center: mv(center),
                radius,
                fill,
            },
            Shape::Rect {
                top_left,
                bottom_right,
                fill,
            } => Shape::Rect {
                top_left: mv(top_left),
                bottom_right: mv(bottom_right),
                fill,
            },
            Shape::Line { from, to, stroke } => Shape::Line {
                from: mv(from),
                to: mv(to),
                stroke,
            },
            Shape::Text {
                at,
                content,
                size,
                h_align,
                v_align,
                vertical,
            } => Shape::Text {
                at: mv(at),
                content,
                size,
                h_align,
                v_align,
                vertical,
            },
        }
    }
}

/// Something a renderer can draw.
pub trait Scene {
    fn canvas(&self) -> &Canvas;

    /// Shapes in drawing order, in plotting-area coordinates.
    fn shapes(&self) -> Vec<Shape>;
}
