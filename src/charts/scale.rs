//! Scales
//! Linear, band and ordinal mappings from data values to pixels or colors.

use crate::data::LabelSet;
use plotters::style::RGBColor;

/// Ten-color categorical palette.
pub const CATEGORY10: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4), // Blue
    RGBColor(0xff, 0x7f, 0x0e), // Orange
    RGBColor(0x2c, 0xa0, 0x2c), // Green
    RGBColor(0xd6, 0x27, 0x28), // Red
    RGBColor(0x94, 0x67, 0xbd), // Purple
    RGBColor(0x8c, 0x56, 0x4b), // Brown
    RGBColor(0xe3, 0x77, 0xc2), // Pink
    RGBColor(0x7f, 0x7f, 0x7f), // Grey
    RGBColor(0xbc, 0xbd, 0x22), // Olive
    RGBColor(0x17, 0xbe, 0xcf), // Cyan
];

/// Affine mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain `[min - pad, max + pad]` of a data extent.
    pub fn padded(extent: (f64, f64), pad: f64, range: (f64, f64)) -> Self {
        Self::new((extent.0 - pad, extent.1 + pad), range)
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let Some((i1, i2, inc)) = tick_spec(lo, hi, count) else {
            return Vec::new();
        };
        if i2 < i1 {
            return Vec::new();
        }

        let n = (i2 - i1) as usize + 1;
        (0..n)
            .map(|i| {
                let k = i1 + i as f64;
                if inc < 0.0 {
                    k / -inc
                } else {
                    k * inc
                }
            })
            .collect()
    }

    /// Tick values with labels formatted to the tick step's precision.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let ticks = self.ticks(count);
        let step = match ticks.as_slice() {
            [a, b, ..] => (b - a).abs(),
            _ => 1.0,
        };
        let decimals = (-step.log10().floor()).max(0.0) as usize;
        ticks
            .into_iter()
            .map(|t| {
                let t = if t.abs() < step * 1e-9 { 0.0 } else { t };
                (t, format!("{t:.decimals$}"))
            })
            .collect()
    }
}

/// Integer tick bounds and increment for `[start, stop]`.
///
/// A negative increment means ticks are `k / -inc`, which keeps sub-unit
/// steps exact.
fn tick_spec(start: f64, stop: f64, count: usize) -> Option<(f64, f64, f64)> {
    if count == 0 || !start.is_finite() || !stop.is_finite() || stop <= start {
        return None;
    }
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        Some((i1, i2, -inc))
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        Some((i1, i2, inc))
    }
}

/// Equal-width slots, one per label, with padding between and around them.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    labels: LabelSet,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    /// Band scale with the same inner and outer padding, centred in `range`.
    pub fn new(labels: LabelSet, range: (f64, f64), padding: f64) -> Self {
        Self {
            labels,
            range,
            padding_inner: padding,
            padding_outer: padding,
            align: 0.5,
        }
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.labels.len() as f64;
        let (r0, r1) = self.range;
        (r1 - r0) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Left edge of the band for `label`.
    pub fn position(&self, label: &str) -> Option<f64> {
        let i = self.labels.position(label)?;
        let n = self.labels.len() as f64;
        let (r0, r1) = self.range;
        let step = self.step();
        let start = r0 + (r1 - r0 - step * (n - self.padding_inner)) * self.align;
        Some(start + step * i as f64)
    }

    /// Centre of the band for `label`.
    pub fn center(&self, label: &str) -> Option<f64> {
        self.position(label).map(|x| x + self.bandwidth() / 2.0)
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Maps labels to a cyclic list of outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale<T> {
    domain: LabelSet,
    range: Vec<T>,
}

impl<T: Copy> OrdinalScale<T> {
    pub fn new(domain: LabelSet, range: Vec<T>) -> Self {
        Self { domain, range }
    }

    /// Output for `label`, cycling through the range when the domain is
    /// longer than it.
    pub fn get(&self, label: &str) -> Option<T> {
        if self.range.is_empty() {
            return None;
        }
        self.domain
            .position(label)
            .map(|i| self.range[i % self.range.len()])
    }

    pub fn domain(&self) -> &LabelSet {
        &self.domain
    }
}
