//! Geometry resolution
//!
//! Turns a widget's declarative placement into concrete pixels for a single
//! render pass. The stored [`Widget`] is never touched; every pass gets a
//! fresh [`Geometry`].
//!
//! Sizing runs before anchoring: percentage coordinates mark the widget's
//! centre, so the width and height must be known first.

use std::fmt;
use std::path::Path;

use carta_specs::DisplaySpec;

use crate::config::{GLYPH_WIDTH_DIVISOR, LINE_HEIGHT_FACTOR, SLIDER_STEP_WIDTH};
use crate::error::ProbeError;
use crate::probe::ImageProbe;
use crate::widget::{Position, Widget, WidgetKind};

/// A resolved coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coordinate {
    /// Top-left offset in canvas pixels
    Pixels(f64),
    /// Renderer auto-placement
    Step,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(value) => write!(f, "{value}"),
            Self::Step => f.write_str("step"),
        }
    }
}

/// Concrete placement of one widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Left edge
    pub x: Coordinate,
    /// Top edge
    pub y: Coordinate,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

/// Resolves widgets against a canvas
#[derive(Debug)]
pub struct Resolver<'a, P: ?Sized> {
    canvas: &'a DisplaySpec,
    probe: &'a P,
}

impl<'a, P: ImageProbe + ?Sized> Resolver<'a, P> {
    /// Resolve against `canvas`, asking `probe` for unsized images
    pub fn new(canvas: &'a DisplaySpec, probe: &'a P) -> Self {
        Self { canvas, probe }
    }

    /// Compute the geometry of `widget`
    ///
    /// `font_size` is the session default; a widget override takes precedence
    /// for size estimation. Explicit widths and heights are kept as given and
    /// only missing dimensions are estimated.
    pub fn resolve(&self, widget: &Widget, font_size: u32) -> Result<Geometry, ProbeError> {
        let font_size = f64::from(widget.font_size().unwrap_or(font_size));

        let (width, height) = match (widget.width(), widget.height()) {
            (Some(width), Some(height)) => (width, height),
            (width, height) => {
                let (est_width, est_height) = self.estimate(widget, font_size)?;
                (width.unwrap_or(est_width), height.unwrap_or(est_height))
            }
        };

        Ok(Geometry {
            x: anchor(widget.x(), width, |p| self.canvas.percent_x(p)),
            y: anchor(widget.y(), height, |p| self.canvas.percent_y(p)),
            width,
            height,
        })
    }

    fn estimate(&self, widget: &Widget, font_size: f64) -> Result<(f64, f64), ProbeError> {
        match widget.kind() {
            WidgetKind::Image => {
                let (width, height) = self.probe.probe(Path::new(widget.value()))?;
                Ok((f64::from(width), f64::from(height)))
            }
            kind => Ok(estimate_size(kind, widget.value(), font_size)),
        }
    }
}

/// Estimate the box of a non-image widget
///
/// - slider: `(high - low) * 20` wide, one line tall
/// - multi-line text: longest line wide, one line per line of text tall
/// - anything else: the whole value on one line
pub fn estimate_size(kind: &WidgetKind, value: &str, font_size: f64) -> (f64, f64) {
    let glyph_width = font_size / GLYPH_WIDTH_DIVISOR;
    let line_height = font_size * LINE_HEIGHT_FACTOR;

    match kind {
        WidgetKind::Slider { low, high } => {
            let steps = high.saturating_sub(*low) as f64;
            (steps * SLIDER_STEP_WIDTH, line_height)
        }
        _ if value.contains('\n') => {
            let lines: Vec<&str> = value.split('\n').collect();
            let longest = lines
                .iter()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0);
            (glyph_width * longest as f64, line_height * lines.len() as f64)
        }
        _ => (glyph_width * value.chars().count() as f64, line_height),
    }
}

fn anchor(position: Position, extent: f64, percent_to_pixels: impl Fn(f64) -> f64) -> Coordinate {
    match position {
        Position::Pixels(pixels) => Coordinate::Pixels(f64::from(pixels)),
        Position::Percent(percent) => Coordinate::Pixels(percent_to_pixels(percent) - extent / 2.0),
        Position::Step => Coordinate::Step,
    }
}
